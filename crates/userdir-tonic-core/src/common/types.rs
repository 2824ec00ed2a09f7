//! Conversions between directory records and wire messages.
//!
//! Responses carry exactly the `id` and `name` of the matched [`User`] with no
//! transformation.

use crate::proto::GetUserResponse;
use userdir::User;

impl From<&User> for GetUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_owned(),
            name: user.name().to_owned(),
        }
    }
}

impl From<User> for GetUserResponse {
    fn from(user: User) -> Self {
        let (id, name) = user.into_parts();
        Self { id, name }
    }
}

impl From<GetUserResponse> for User {
    fn from(response: GetUserResponse) -> Self {
        Self::new(response.id, response.name)
    }
}
