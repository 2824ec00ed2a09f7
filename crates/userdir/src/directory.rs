//! Immutable identifier-to-record lookup table.
//!
//! A [`Directory`] is populated exactly once from a seed and exposes only
//! shared-reference accessors afterwards. Since nothing can write to it after
//! construction it is `Send + Sync` and can be queried from any number of
//! tasks behind an `Arc` without coordination.

use crate::{Error, Result, User};
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// The complete, read-only set of known [`User`]s keyed by id.
///
/// # Invariants
///
/// - Every id is non-empty.
/// - Every id maps to exactly one record.
#[derive(Clone, Debug, Default)]
pub struct Directory {
    users: HashMap<String, User>,
}

impl Directory {
    /// Builds a directory from a seed set.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyId`] if any record has an empty id.
    /// - [`Error::DuplicateId`] if two records share an id. The seed is
    ///   rejected as a whole; no entry is overwritten.
    pub fn new<I>(seed: I) -> Result<Self>
    where
        I: IntoIterator<Item = User>,
    {
        let seed = seed.into_iter();
        let mut users = HashMap::with_capacity(seed.size_hint().0);

        for user in seed {
            if user.id().is_empty() {
                return Err(Error::EmptyId);
            }
            match users.entry(user.id().to_owned()) {
                Entry::Occupied(slot) => {
                    return Err(Error::DuplicateId {
                        id: slot.key().clone(),
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(user);
                }
            }
        }

        Ok(Self { users })
    }

    /// The built-in two-entry directory used when no seed is configured.
    pub fn sample() -> Self {
        let users = [User::new("1", "Alice"), User::new("2", "Bob")]
            .into_iter()
            .map(|user| (user.id().to_owned(), user))
            .collect();
        Self { users }
    }

    /// Looks up a user by id.
    ///
    /// Accepts any string, including empty or unknown ids. Absence is a
    /// normal outcome and is reported as `None`.
    pub fn find(&self, id: &str) -> Option<&User> {
        self.users.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.users.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Iterates over all records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use std::sync::Arc;

    fn seeded() -> Directory {
        Directory::new([User::new("1", "Alice"), User::new("2", "Bob")]).unwrap()
    }

    #[test]
    fn finds_every_seeded_record() {
        let directory = seeded();
        assert_eq!(directory.find("1"), Some(&User::new("1", "Alice")));
        assert_eq!(directory.find("2"), Some(&User::new("2", "Bob")));
        assert_eq!(directory.len(), 2);
        assert!(!directory.is_empty());
    }

    #[test]
    fn unknown_and_empty_ids_are_absent() {
        let directory = seeded();
        assert_eq!(directory.find("3"), None);
        assert_eq!(directory.find(""), None);
        assert!(!directory.contains("3"));
    }

    #[test]
    fn lookups_are_exact_matches() {
        let directory = seeded();
        assert_eq!(directory.find(" 1"), None);
        assert_eq!(directory.find("1 "), None);
        assert_eq!(directory.find("01"), None);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Directory::new([
            User::new("1", "Alice"),
            User::new("1", "Mallory"),
        ])
        .unwrap_err();
        assert_eq!(err, Error::DuplicateId { id: "1".into() });
    }

    #[test]
    fn rejects_empty_ids() {
        let err = Directory::new([User::new("", "Nobody")]).unwrap_err();
        assert_eq!(err, Error::EmptyId);
    }

    #[test]
    fn empty_seed_builds_empty_directory() {
        let directory = Directory::new(Vec::new()).unwrap();
        assert!(directory.is_empty());
        assert_eq!(directory.find("1"), None);
    }

    #[test]
    fn sample_matches_builtin_seed() {
        let sample = Directory::sample();
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.find("1").map(User::name), Some("Alice"));
        assert_eq!(sample.find("2").map(User::name), Some("Bob"));

        let mut ids: Vec<_> = sample.iter().map(User::id).collect();
        ids.sort_unstable();
        assert_eq!(ids, ["1", "2"]);
    }

    #[test]
    fn repeated_lookups_are_identical() {
        let directory = seeded();
        let first = directory.find("1").cloned();
        for _ in 0..16 {
            assert_eq!(directory.find("1").cloned(), first);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_lookups_do_not_interfere() {
        let directory = Arc::new(seeded());

        let tasks = (0..100).map(|i| {
            let directory = Arc::clone(&directory);
            let id = if i % 2 == 0 { "1" } else { "2" };
            tokio::spawn(async move { (id, directory.find(id).cloned()) })
        });

        for result in join_all(tasks).await {
            let (id, user) = result.unwrap();
            let user = user.unwrap();
            assert_eq!(user.id(), id);
            assert_eq!(user.name(), if id == "1" { "Alice" } else { "Bob" });
        }
    }
}
