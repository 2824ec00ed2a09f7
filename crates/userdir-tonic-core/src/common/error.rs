//! Error types for the user lookup service.
//!
//! This module defines the central `Error` enum covering every failure a
//! `GetUser` call can report. It implements `From<Error>` for
//! `tonic::Status` so handlers can propagate failures with `?` and clients
//! receive the matching gRPC status code.
//!
//! ## Error Cases
//! - `InvalidArgument`: the request failed structural validation (empty id).
//! - `NotFound`: the id is well-formed but no user has it.
//!
//! Where an id applies it is attached to the status as the
//! [`USER_ID_METADATA_KEY`] metadata entry, so callers do not have to parse
//! the message to recover it.

use tonic::{
    Status,
    metadata::{Ascii, MetadataValue},
};

pub type Result<T> = core::result::Result<T, Error>;

/// Metadata key carrying the requested user id on failed lookups.
pub const USER_ID_METADATA_KEY: &str = "x-user-id";

/// Unified error type for the user lookup service.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The request was malformed.
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// No user exists with the requested id.
    #[error("User not found: {id}")]
    NotFound { id: String },
}

impl Error {
    /// Stable, machine-readable name of the failure kind.
    pub const fn kind(&self) -> &'static str {
        match self {
            Error::InvalidArgument { .. } => "invalid_argument",
            Error::NotFound { .. } => "not_found",
        }
    }
}

impl From<Error> for Status {
    fn from(err: Error) -> Self {
        match err {
            Error::InvalidArgument { reason } => Status::invalid_argument(reason),
            Error::NotFound { id } => {
                let mut status = Status::not_found(format!("User not found: {}", id));
                // Non-ASCII ids are still reported in the message.
                if let Ok(value) = MetadataValue::<Ascii>::try_from(id.as_str()) {
                    status.metadata_mut().insert(USER_ID_METADATA_KEY, value);
                }
                status
            }
        }
    }
}

/// Extracts the requested user id attached to a failed lookup, if any.
pub fn user_id_from_status(status: &Status) -> Option<&str> {
    status
        .metadata()
        .get(USER_ID_METADATA_KEY)
        .and_then(|value| value.to_str().ok())
}
