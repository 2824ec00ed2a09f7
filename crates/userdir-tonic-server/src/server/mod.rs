//! Server assembly: configuration, telemetry, the `GetUser` handler and the
//! tonic router that exposes it.

pub mod config;
pub mod service;
pub mod telemetry;

use futures::Stream;
use service::handler::LookupService;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::oneshot;
use tonic::transport::server::Connected;
use tonic::{codec::CompressionEncoding, transport::Server};
use tonic_reflection::server::Builder;
use tonic_web::GrpcWebLayer;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use userdir::Directory;
use userdir_tonic_core::proto::{FILE_DESCRIPTOR_SET, user_service_server::UserServiceServer};

/// Serves the lookup service, gRPC health and reflection on `incoming` until
/// `signal` resolves.
///
/// Health reports `user.UserService` as serving for the lifetime of the
/// server and flips it to not-serving once `signal` fires, before in-flight
/// calls are drained.
///
/// Draining waits for open connections, including long-lived health `Watch`
/// streams. After `drain_timeout` the remaining connections are dropped.
pub async fn serve_with_incoming<I, IO, IE, F>(
    directory: Arc<Directory>,
    incoming: I,
    signal: F,
    drain_timeout: Duration,
) -> anyhow::Result<()>
where
    I: Stream<Item = Result<IO, IE>>,
    IO: AsyncRead + AsyncWrite + Connected + Unpin + Send + 'static,
    IE: Into<tower::BoxError>,
    F: Future<Output = ()>,
{
    let (health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<UserServiceServer<LookupService>>()
        .await;

    let service = LookupService::new(directory);

    let reflection = Builder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let (draining_tx, draining_rx) = oneshot::channel::<()>();
    let shutdown = async move {
        signal.await;
        tracing::info!("Shutdown signal received, terminating gracefully...");
        health_reporter
            .set_not_serving::<UserServiceServer<LookupService>>()
            .await;
        let _ = draining_tx.send(());
    };

    // Only starts counting once the shutdown future has run to completion.
    let drain_deadline = async move {
        match draining_rx.await {
            Ok(()) => tokio::time::sleep(drain_timeout).await,
            Err(_) => core::future::pending().await,
        }
    };

    let serve = Server::builder()
        .accept_http1(true)
        .http2_adaptive_window(Some(true))
        .layer(
            ServiceBuilder::new()
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(GrpcWebLayer::new()),
        )
        .add_service(health_service)
        .add_service(reflection)
        .add_service(build_user_service(service))
        .serve_with_incoming_shutdown(incoming, shutdown);

    tokio::select! {
        res = serve => {
            res?;
            tracing::info!("Service shut down successfully");
        }
        () = drain_deadline => {
            tracing::warn!(
                "Connections still open after {:?}, closing them",
                drain_timeout
            );
        }
    }
    Ok(())
}

/// Serves on a Unix domain socket bound at `path`, removing the socket file
/// once the server stops.
///
/// Removal is best effort; a panic can still leave the file behind.
#[cfg(unix)]
pub async fn serve_uds<F>(
    directory: Arc<Directory>,
    path: impl AsRef<std::path::Path>,
    signal: F,
    drain_timeout: Duration,
) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    use anyhow::Context;
    use tokio::net::UnixListener;
    use tokio_stream::wrappers::UnixListenerStream;

    let path = path.as_ref();
    let uds = UnixListener::bind(path)
        .with_context(|| format!("failed to bind Unix socket {}", path.display()))?;
    let res = serve_with_incoming(
        directory,
        UnixListenerStream::new(uds),
        signal,
        drain_timeout,
    )
    .await;
    let _ = std::fs::remove_file(path);
    res
}

pub fn build_user_service(service: LookupService) -> UserServiceServer<LookupService> {
    UserServiceServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}
