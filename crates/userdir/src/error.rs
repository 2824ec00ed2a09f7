/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised while building a [`Directory`](crate::Directory).
///
/// Lookups never fail; every variant here describes a seed that violates the
/// directory invariants or could not be read.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A seed record carried an empty identifier.
    #[error("user id must not be empty")]
    EmptyId,

    /// Two seed records share the same identifier.
    #[error("duplicate user id: {id}")]
    DuplicateId { id: String },

    /// The seed source could not be read or decoded.
    #[error("invalid seed: {reason}")]
    Seed { reason: String },
}
