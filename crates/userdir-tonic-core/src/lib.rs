#![doc = include_str!("../README.md")]

mod common;
pub use common::*;
// Public re-export so downstream crates can access `userdir` via
// `userdir_tonic_core::userdir`
pub use userdir;
