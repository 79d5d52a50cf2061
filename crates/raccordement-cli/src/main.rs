//! Diagnostic CLI for the raccordement offline layer.
//!
//! Two subcommands exercising the core end to end:
//! - `lookup <code>`: resolve a postal code to commune names.
//! - `preflight`: install the offline cache against the site origin and
//!   verify every manifest entry is then served from cache.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use raccordement_core::lookup::client::{LOOKUP_BASE_URL, LOOKUP_TIMEOUT_SECS};
use raccordement_core::{
    CacheController, Config, HttpNetwork, HttpRequest, LookupClient, Manifest, CACHE_GENERATION,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "raccordement", about = "Offline layer diagnostics for the raccordement site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a postal code to the commune names it covers
    Lookup {
        /// 5-character postal code
        code: String,
    },
    /// Install the offline cache and verify every manifest entry is served
    Preflight {
        /// Site origin to preflight (overrides the configured one)
        #[arg(long)]
        origin: Option<String>,
    },
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Command::Lookup { code } => lookup(&config, &code).await,
        Command::Preflight { origin } => preflight(&config, origin).await,
    }
}

async fn lookup(config: &Config, code: &str) -> Result<()> {
    let base_url = config.lookup_base_url.as_deref().unwrap_or(LOOKUP_BASE_URL);
    let timeout = Duration::from_secs(config.lookup_timeout_secs.unwrap_or(LOOKUP_TIMEOUT_SECS));
    let client = LookupClient::with_options(base_url, timeout)
        .context("Failed to create lookup client")?;

    let names = client.resolve(code).await;
    if names.is_empty() {
        println!("No communes found for {}", code);
    } else {
        for name in &names {
            println!("{}", name);
        }
    }
    Ok(())
}

async fn preflight(config: &Config, origin: Option<String>) -> Result<()> {
    let origin = origin
        .or_else(|| config.site_origin.clone())
        .context("No site origin: pass --origin or set site_origin in the config file")?;

    let manifest = Manifest::for_origin(&origin);
    let network = HttpNetwork::new().context("Failed to create network backend")?;
    let mut controller = CacheController::new(CACHE_GENERATION, manifest.clone(), network);

    eprintln!("Installing {} ({} assets)...", CACHE_GENERATION, manifest.len());
    if let Err(e) = controller.install().await {
        eprintln!("✗ install failed at {}", e.url());
        return Err(e).context("Cache install failed");
    }
    info!(generation = CACHE_GENERATION, "preflight install succeeded");

    for url in manifest.urls() {
        let response = controller
            .intercept(&HttpRequest::get(url.clone()))
            .await
            .with_context(|| format!("Intercept failed for {}", url))?;
        eprintln!("✓ {} ({} bytes from cache)", url, response.body.len());
    }

    if let Some(store) = controller.store() {
        eprintln!(
            "Preflight OK: {} entries installed at {}",
            store.len(),
            store.installed_at().format("%H:%M:%S")
        );
    }
    Ok(())
}
