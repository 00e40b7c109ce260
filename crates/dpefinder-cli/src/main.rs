//! dpefinder - rank FAA designated pilot examiners by distance.
//!
//! Loads the examiner directory from the local snapshot (or the FAA designee
//! registry when there is none), geocodes each examiner by zip code, and
//! prints them nearest first relative to the origin zip code.

mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use dpefinder_core::api::RegistryClient;
use dpefinder_core::cache::{RegistryCache, SnapshotStore};
use dpefinder_core::config::Config;
use dpefinder_core::geo::{DistanceRanker, GeoIndex, ZipTable};

#[derive(Parser, Debug)]
#[command(name = "dpefinder", version, about = "Rank FAA designated pilot examiners by distance from a zip code")]
struct Args {
    /// Origin zip code to rank examiners against
    origin_zip: String,

    /// Fetch a fresh directory from the registry even if a snapshot exists
    #[arg(long, env = "DPEFINDER_REFRESH")]
    refresh: bool,

    /// Registry designee type to load
    #[arg(long, value_name = "ID")]
    designee_type: Option<u32>,

    /// Zip code to coordinate table (JSON)
    #[arg(long, value_name = "PATH", env = "DPEFINDER_ZIP_TABLE")]
    zip_table: Option<PathBuf>,

    /// Directory holding registry snapshots
    #[arg(long, value_name = "PATH", env = "DPEFINDER_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Only show the N nearest examiners
    #[arg(long, value_name = "N")]
    limit: Option<usize>,
}

impl Args {
    /// Command-line values take precedence over the config file
    fn apply_to(&self, config: &mut Config) {
        if let Some(id) = self.designee_type {
            config.designee_type_id = Some(id);
        }
        if let Some(ref path) = self.zip_table {
            config.zip_table = Some(path.clone());
        }
        if let Some(ref dir) = self.cache_dir {
            config.cache_dir = Some(dir.clone());
        }
    }
}

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    init_tracing();

    let mut config = Config::load()?;
    args.apply_to(&mut config);

    run(&args, &config).await
}

async fn run(args: &Args, config: &Config) -> Result<()> {
    let zip_table_path = config.zip_table()?;
    let table = ZipTable::load(&zip_table_path)?;
    info!(path = %zip_table_path.display(), zips = table.len(), "Zip code table ready");

    let client = RegistryClient::with_options(config.api_base_url(), config.request_timeout())?;
    let store = SnapshotStore::new(config.cache_dir()?)?;
    let cache = RegistryCache::new(client, store).with_country(config.country_id());

    let category = config.designee_type_id();
    let records = cache
        .obtain(category, args.refresh)
        .await
        .with_context(|| format!("Failed to obtain designees (type {})", category))?;

    let index = GeoIndex::build(&records, &table);
    if index.is_empty() {
        warn!("No designee zip codes could be located");
    }

    let ranked = DistanceRanker::new(&table).rank(&index, &args.origin_zip)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::render(&mut out, &args.origin_zip, &records, &ranked, args.limit)?;
    out.flush()?;
    Ok(())
}
