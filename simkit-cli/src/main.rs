//! `simkit`: developer CLI for the session identity.
//!
//! The session is a directory on disk (one file per storage key), so successive
//! invocations share the same identity until `simkit clear`.

use std::{path::PathBuf, sync::Arc, time::Duration};

use clap::{Parser, Subcommand};
use eyre::{eyre, Result, WrapErr};
use simkit_core::{
    AppShell, CacheStatus, Chain, FileSessionStorage, IdentityList, IdentityManager,
    SimkitConfig,
};
use tracing_subscriber::EnvFilter;

mod assets;

use assets::DirectoryAssetCache;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Origin of the simulator app serving the sequencer proxy.
    #[arg(long, env = "SIMKIT_BASE_URL")]
    base_url: String,

    /// Directory holding the session. Defaults to the user cache directory.
    #[arg(long, env = "SIMKIT_SESSION_DIR")]
    session_dir: Option<PathBuf>,

    /// Allow plain `http://` base URLs.
    #[arg(long)]
    insecure: bool,

    /// Request timeout in milliseconds. Transport default when omitted.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print identities as JSON.
    #[arg(long)]
    json: bool,

    /// Log lifecycle events to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Restore the session identity, or create one if there is none.
    Boot {
        #[arg(long, default_value = "mainnet")]
        chain: Chain,

        /// Directory expected to hold the cached Semaphore artifacts.
        #[arg(long)]
        assets_dir: Option<PathBuf>,
    },
    /// Create a new identity, replacing the session identity.
    Create {
        #[arg(long, default_value = "mainnet")]
        chain: Chain,
    },
    /// Restore the session identity and re-check its proofs.
    Show,
    /// Remove the identity from the session.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_tracing(args.verbose)?;

    let session_dir = match &args.session_dir {
        Some(dir) => dir.clone(),
        None => dirs::cache_dir()
            .map(|dir| dir.join("simkit").join("session"))
            .ok_or_else(|| eyre!("no cache directory, pass --session-dir"))?,
    };
    let storage = FileSessionStorage::new(&session_dir)
        .wrap_err_with(|| format!("opening session in {}", session_dir.display()))?;

    let mut config = SimkitConfig::new(args.base_url.clone());
    config.allow_insecure = args.insecure;
    config.timeout = args.timeout_ms.map(Duration::from_millis);

    let manager = Arc::new(IdentityManager::new(config, Arc::new(storage)));

    match args.command {
        Command::Boot { chain, assets_dir } => {
            let assets_dir = assets_dir.unwrap_or_else(|| session_dir.join("assets"));
            let shell = AppShell::new(
                manager.clone(),
                Arc::new(DirectoryAssetCache::new(assets_dir)),
                CacheStatus::new(),
            );
            shell.boot(chain).await;
            if !shell.cache_status().is_complete() {
                eprintln!("Semaphore artifacts are not cached yet");
            }
        }
        Command::Create { chain } => {
            manager.create_identity(chain).await;
        }
        Command::Show => {
            if manager.retrieve_identity().await.is_none() {
                eprintln!("No identity in session");
            }
        }
        Command::Clear => {
            manager.clear_identity().await;
            manager.store().reset();
            println!("Cleared session identity");
            return Ok(());
        }
    }

    render(&IdentityList::from_store(manager.store()), args.json)
}

fn render(list: &IdentityList, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&list.rows)?);
    } else {
        print!("{list}");
    }
    Ok(())
}

fn setup_tracing(verbose: bool) -> Result<()> {
    let default_filter = if verbose { "simkit_core=debug,simkit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    // `simkit-core` logs through the `log` facade
    tracing_log::LogTracer::init()?;

    Ok(())
}
