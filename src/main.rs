use std::fs;
use std::path::Path;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chirpy::config::{Secrets, ServerConfig};
use chirpy::server::{AppState, create_router};
use chirpy::store::{FileChirpStore, FileUserStore};

#[derive(Parser)]
#[command(name = "chirpy")]
#[command(about = "A tiny backend for short text posts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, short, default_value = "8080")]
        port: u16,

        /// Data directory for the user and chirp documents
        #[arg(long, default_value = "./data")]
        data_dir: String,

        /// Directory served under /app
        #[arg(long, default_value = ".")]
        file_root: String,

        /// Delete both documents before starting
        #[arg(long)]
        debug: bool,
    },
}

fn remove_if_present(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            warn!("Debug mode: removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

async fn run_serve(config: ServerConfig, debug: bool) -> anyhow::Result<()> {
    let secrets = Secrets::from_env()?;

    fs::create_dir_all(&config.data_dir)?;
    if debug {
        remove_if_present(&config.users_path())?;
        remove_if_present(&config.chirps_path())?;
    }

    let users = FileUserStore::open(config.users_path())?;
    let chirps = FileChirpStore::open(config.chirps_path())?;

    if secrets.polka_key.is_none() {
        warn!("POLKA_APIKEY is not set; upgrade webhooks will be rejected");
    }

    let state = Arc::new(AppState::new(
        Arc::new(users),
        Arc::new(chirps),
        &secrets,
        config.file_root.clone(),
    ));

    let app = create_router(state);
    let addr = config.socket_addr()?;

    info!(
        "Serving files from {} on {}",
        config.file_root.display(),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("chirpy=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
            file_root,
            debug,
        } => {
            let config = ServerConfig {
                host,
                port,
                data_dir: data_dir.into(),
                file_root: file_root.into(),
            };
            run_serve(config, debug).await?;
        }
    }

    Ok(())
}
