pub mod error;
pub mod types;

pub use error::{Error, Result, USER_ID_METADATA_KEY, user_id_from_status};

/// gRPC service and message definitions generated from `proto/user.proto`.
///
/// ## Service
///
/// - `UserService::GetUser` - unary lookup of a single user by id.
///
/// ## Messages
///
/// - [`GetUserRequest`](proto::GetUserRequest) - carries the requested `id`.
/// - [`GetUserResponse`](proto::GetUserResponse) - the matched `id` and
///   `name`, copied verbatim from the directory.
pub mod proto {
    tonic::include_proto!("user");

    /// Encoded file descriptor set for gRPC reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("user_descriptor");
}
