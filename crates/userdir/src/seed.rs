//! JSON seed loading.
//!
//! A seed is a JSON array of `{"id": .., "name": ..}` objects. An array is
//! used instead of an object map so duplicate ids surface as
//! [`Error::DuplicateId`] rather than being collapsed by the parser.

use crate::{Directory, Error, Result, User};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

impl Directory {
    /// Builds a directory from a JSON seed read from `reader`.
    ///
    /// # Errors
    ///
    /// [`Error::Seed`] if the input is not a JSON array of user objects, plus
    /// any error [`Directory::new`] reports.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let users: Vec<User> = serde_json::from_reader(reader).map_err(|e| Error::Seed {
            reason: e.to_string(),
        })?;
        Self::new(users)
    }

    /// Builds a directory from the JSON seed file at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Seed`] if the file cannot be opened, otherwise as
    /// [`Directory::from_json_reader`].
    pub fn from_json_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Seed {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_reader(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_array_seed() {
        let json = r#"[{"id":"1","name":"Alice"},{"id":"2","name":"Bob"}]"#;
        let directory = Directory::from_json_reader(json.as_bytes()).unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.find("2"), Some(&User::new("2", "Bob")));
    }

    #[test]
    fn duplicate_ids_in_seed_are_rejected() {
        let json = r#"[{"id":"1","name":"Alice"},{"id":"1","name":"Eve"}]"#;
        let err = Directory::from_json_reader(json.as_bytes()).unwrap_err();
        assert_eq!(err, Error::DuplicateId { id: "1".into() });
    }

    #[test]
    fn malformed_seed_is_reported() {
        let err = Directory::from_json_reader(r#"{"1":"Alice"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Seed { .. }));

        let err = Directory::from_json_reader(r#"[{"id":"1"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::Seed { .. }));
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Directory::from_json_path("/nonexistent/userdir-seed.json").unwrap_err();
        match err {
            Error::Seed { reason } => assert!(reason.contains("userdir-seed.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
