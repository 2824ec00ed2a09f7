//! gRPC service implementation for user lookups.
//!
//! This module defines [`LookupService`], the concrete implementation of the
//! [`UserService`] gRPC service defined in `proto/user.proto`. Each
//! `GetUser` call validates the request, consults the shared [`Directory`] and
//! projects the result onto the wire.
//!
//! The directory is immutable and shared behind an `Arc`, so handlers run
//! concurrently without any locking and a cancelled call leaves nothing to
//! clean up.

use crate::server::telemetry::{
    increment_lookup_errors, increment_requests, record_lookup_duration,
};
use std::sync::Arc;
use tonic::{Request, Response, Status};
use userdir::Directory;
use userdir_tonic_core::{
    Error,
    proto::{GetUserRequest, GetUserResponse, user_service_server::UserService},
};

/// Read-only user lookup over a shared [`Directory`].
#[derive(Clone, Debug)]
pub struct LookupService {
    directory: Arc<Directory>,
}

impl LookupService {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Resolves a single id.
    ///
    /// An empty id is rejected as [`Error::InvalidArgument`] before the
    /// directory is consulted; an unknown id yields [`Error::NotFound`].
    pub fn lookup(&self, id: &str) -> Result<GetUserResponse, Error> {
        if id.is_empty() {
            return Err(Error::InvalidArgument {
                reason: "id must not be empty".to_string(),
            });
        }

        self.directory
            .find(id)
            .map(GetUserResponse::from)
            .ok_or_else(|| Error::NotFound { id: id.to_owned() })
    }
}

#[tonic::async_trait]
impl UserService for LookupService {
    /// Handles a unary `GetUser` request.
    ///
    /// If `metrics` is enabled, emits telemetry for:
    /// - request rate
    /// - failures by kind
    /// - handler duration
    #[tracing::instrument(skip_all, fields(id = %req.get_ref().id))]
    async fn get_user(
        &self,
        req: Request<GetUserRequest>,
    ) -> Result<Response<GetUserResponse>, Status> {
        let start = std::time::Instant::now();
        increment_requests();

        let result = self.lookup(&req.get_ref().id);
        record_lookup_duration(start.elapsed().as_secs_f64() * 1_000_000.0);

        match result {
            Ok(user) => {
                tracing::debug!(name = %user.name, "user found");
                Ok(Response::new(user))
            }
            Err(e) => {
                increment_lookup_errors(e.kind());
                tracing::debug!(kind = e.kind(), "lookup failed: {}", e);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::join_all;
    use tonic::Code;
    use userdir::User;
    use userdir_tonic_core::user_id_from_status;

    fn service() -> LookupService {
        LookupService::new(Arc::new(Directory::sample()))
    }

    async fn get(service: &LookupService, id: &str) -> Result<GetUserResponse, Status> {
        service
            .get_user(Request::new(GetUserRequest { id: id.to_string() }))
            .await
            .map(Response::into_inner)
    }

    #[tokio::test]
    async fn returns_seeded_users_verbatim() {
        let service = service();

        let alice = get(&service, "1").await.unwrap();
        assert_eq!(alice.id, "1");
        assert_eq!(alice.name, "Alice");

        let bob = get(&service, "2").await.unwrap();
        assert_eq!(bob.id, "2");
        assert_eq!(bob.name, "Bob");
    }

    #[tokio::test]
    async fn every_directory_entry_is_served() {
        let directory = Directory::new(
            (0..64).map(|i| User::new(format!("id-{i}"), format!("User {i}"))),
        )
        .unwrap();
        let service = LookupService::new(Arc::new(directory));

        for user in service.directory().iter() {
            let response = get(&service, user.id()).await.unwrap();
            assert_eq!(response.id, user.id());
            assert_eq!(response.name, user.name());
        }
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let status = get(&service(), "3").await.unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert!(status.message().contains('3'));
        assert_eq!(user_id_from_status(&status), Some("3"));
    }

    #[tokio::test]
    async fn empty_id_is_invalid_argument() {
        let status = get(&service(), "").await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn empty_id_is_rejected_even_if_lookup_would_miss() {
        let service = service();
        assert_eq!(
            service.lookup(""),
            Err(Error::InvalidArgument {
                reason: "id must not be empty".to_string()
            })
        );
        assert_eq!(
            service.lookup("3"),
            Err(Error::NotFound { id: "3".to_string() })
        );
    }

    #[tokio::test]
    async fn repeated_calls_are_identical() {
        let service = service();
        let first = get(&service, "1").await.unwrap();
        for _ in 0..10 {
            assert_eq!(get(&service, "1").await.unwrap(), first);
        }

        let first_miss = get(&service, "3").await.unwrap_err();
        let second_miss = get(&service, "3").await.unwrap_err();
        assert_eq!(first_miss.code(), second_miss.code());
        assert_eq!(first_miss.message(), second_miss.message());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_calls_do_not_interfere() {
        let service = service();

        let tasks = (0..100).map(|i| {
            let service = service.clone();
            let id = if i % 2 == 0 { "1" } else { "2" };
            tokio::spawn(async move { (id, get(&service, id).await) })
        });

        for result in join_all(tasks).await {
            let (id, response) = result.unwrap();
            let response = response.unwrap();
            assert_eq!(response.id, id);
            assert_eq!(response.name, if id == "1" { "Alice" } else { "Bob" });
        }
    }
}
