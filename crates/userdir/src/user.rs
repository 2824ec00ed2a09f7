/// A single directory entry.
///
/// Both fields are fixed at construction. The `id` is the lookup key and is
/// required to be non-empty once the record is placed in a
/// [`Directory`](crate::Directory).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    id: String,
    name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// The unique identifier of this user.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display name of this user.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consumes the record, returning `(id, name)`.
    pub fn into_parts(self) -> (String, String) {
        (self.id, self.name)
    }
}
