#![doc = include_str!("../README.md")]

mod directory;
mod error;
#[cfg(feature = "serde")]
mod seed;
mod user;

pub use crate::directory::*;
pub use crate::error::*;
pub use crate::user::*;
