use anyhow::{Context, bail};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use userdir::Directory;

/// Runtime configuration for the `userdir-tonic-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first when present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "userdir-tonic-server",
    version,
    about = "A gRPC service answering read-only user lookups"
)]
pub struct CliArgs {
    /// Address to listen on (TCP or Unix socket path; use --uds for Unix socket).
    ///
    /// Example: "0.0.0.0:50051" or "/tmp/userdir.sock"
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:50051"))]
    pub server_addr: String,

    /// Listen on a Unix socket instead of TCP. If set, `SERVER_ADDR` must be a file path.
    #[arg(short, long, default_value_t = false)]
    pub uds: bool,

    /// JSON file holding the directory contents, as an array of
    /// `{"id": .., "name": ..}` objects.
    ///
    /// When omitted the server starts with the built-in two-user sample.
    /// The file is read once at startup; the directory never changes while
    /// the server runs.
    ///
    /// Environment variable: `SEED_FILE`
    #[arg(long, env = "SEED_FILE")]
    pub seed_file: Option<PathBuf>,

    /// Seconds to wait for open connections to finish after a shutdown
    /// signal before they are closed.
    ///
    /// Long-lived streams such as health `Watch` calls would otherwise hold
    /// the process open indefinitely.
    ///
    /// Environment variable: `DRAIN_TIMEOUT_SECS`
    #[arg(long, env = "DRAIN_TIMEOUT_SECS", default_value_t = 10)]
    pub drain_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub uds: bool,
    pub seed_file: Option<PathBuf>,
    pub drain_timeout: Duration,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.server_addr.is_empty() {
            bail!("SERVER_ADDR must not be empty");
        }

        if !args.uds {
            args.server_addr.parse::<SocketAddr>().with_context(|| {
                format!(
                    "SERVER_ADDR ({}) is not a valid socket address",
                    args.server_addr
                )
            })?;
        }

        if let Some(path) = &args.seed_file {
            if !path.is_file() {
                bail!("SEED_FILE ({}) does not exist or is not a file", path.display());
            }
        }

        Ok(Self {
            server_addr: args.server_addr,
            uds: args.uds,
            seed_file: args.seed_file,
            drain_timeout: Duration::from_secs(args.drain_timeout_secs),
        })
    }
}

impl ServerConfig {
    /// Builds the directory this server will answer from.
    pub fn load_directory(&self) -> anyhow::Result<Directory> {
        match &self.seed_file {
            Some(path) => Directory::from_json_path(path)
                .with_context(|| format!("failed to load seed file {}", path.display())),
            None => Ok(Directory::sample()),
        }
    }
}
