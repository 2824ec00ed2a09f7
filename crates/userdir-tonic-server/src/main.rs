use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_stream::wrappers::TcpListenerStream;
use userdir_tonic_server::server::{
    config::{CliArgs, ServerConfig},
    serve_with_incoming,
    telemetry::init_telemetry,
};
#[cfg(unix)]
use userdir_tonic_server::server::serve_uds;

// Using mimalloc for better performance under contention, especially in musl
// environments.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    let config = ServerConfig::try_from(args)?;

    let providers = init_telemetry()?;

    let directory = Arc::new(config.load_directory()?);

    let res = if config.uds {
        #[cfg(unix)]
        {
            log_startup_info(&config.server_addr, &config, directory.len());
            serve_uds(
                directory,
                &config.server_addr,
                shutdown_signal(),
                config.drain_timeout,
            )
            .await
        }
        #[cfg(not(unix))]
        {
            anyhow::bail!("Unix domain sockets are not supported on this platform");
        }
    } else {
        let tcp_path = config.server_addr.clone();
        let tcp = TcpListener::bind(&tcp_path).await?;
        let incoming = TcpListenerStream::new(tcp);
        log_startup_info(&tcp_path, &config, directory.len());
        serve_with_incoming(directory, incoming, shutdown_signal(), config.drain_timeout)
            .await
    };

    providers.shutdown();
    res
}

fn log_startup_info(addr: &str, config: &ServerConfig, users: usize) {
    if cfg!(debug_assertions) {
        tracing::info!(
            "Starting user lookup service on {} with full config: {:#?}",
            addr,
            config
        );
    } else {
        tracing::info!(
            "Starting user lookup service on {} serving {} users",
            addr,
            users
        );
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C signal"),
        () = terminate => tracing::info!("Received SIGTERM signal"),
    }
}
