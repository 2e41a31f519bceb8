use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use train_connections::cache::{CacheConfig, CacheError, CachedFetcher, ContentCache};
use train_connections::connections::{RouteCodes, resolve_connections, within_journey_limit};
use train_connections::domain::{InvalidDay, Weekday};
use train_connections::extract::parse_train_legs;
use train_connections::fetch::{ContentFetcher, FetchConfig, FetchError, HttpFetcher};
use train_connections::report::{write_connections, write_routes};
use train_connections::routes::{
    AggregateError, AggregateOptions, ListingSource, aggregate_routes,
};

/// Railway route analysis: connections via a transit station, and the
/// best transit stations between two places.
#[derive(Parser, Debug)]
#[command(name = "trains", author, version, about, long_about = None)]
struct Args {
    /// Fetch everything from the network, ignoring the page cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Directory holding cached pages
    #[arg(long, global = true, env = "TRAINS_CACHE_DIR", default_value = "./cache")]
    cache_dir: PathBuf,

    /// Hours before a cached page is fetched again
    #[arg(long, global = true, env = "TRAINS_CACHE_TTL_HOURS", default_value_t = 24)]
    cache_ttl_hours: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find two-train connections via an intermediate station
    #[command(visible_alias = "viasearch")]
    Via {
        /// Via listing URL, e.g. https://etrain.info/trains/Valsad-BL-to-H-Sahib-Nanded-NED-via-Kalyan-Jn-KYN
        #[arg(short, long)]
        url: String,

        /// Only show connections running on this day (sun, mon, ... or full names)
        #[arg(short, long)]
        day: Option<String>,
    },

    /// Rank transit stations between two stations
    #[command(visible_alias = "topsearch")]
    Top {
        /// Transit listing URL, e.g. https://etrain.info/transit/BL-NED
        #[arg(short, long)]
        url: String,

        /// Number of routes to show (0 or negative = all)
        #[arg(short, long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,

        /// Maximum distance in kilometres (0 or negative = no limit)
        #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
        max_distance: i64,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Day(#[from] InvalidDay),

    #[error("error initializing cache: {0}")]
    Cache(#[from] CacheError),

    #[error("error fetching URL: {0}")]
    Fetch(#[from] FetchError),

    #[error("error fetching all pages: {0}")]
    Aggregate(#[from] AggregateError),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr so reports on stdout stay clean. `RUST_LOG` overrides the
/// default `info` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(args: Args) -> Result<(), CliError> {
    let cache = if args.no_cache {
        None
    } else {
        Some(ContentCache::open(cache_config(&args))?)
    };

    let fetcher = CachedFetcher::new(HttpFetcher::new(FetchConfig::default())?, cache);
    info!(
        cache = fetcher.cache_enabled(),
        cache_dir = %args.cache_dir.display(),
        cache_ttl_hours = args.cache_ttl_hours,
        "starting"
    );

    match args.command {
        Command::Via { url, day } => via_search(&fetcher, &url, day.as_deref()).await,
        Command::Top {
            url,
            limit,
            max_distance,
        } => top_search(&fetcher, &url, limit, max_distance).await,
    }
}

fn cache_config(args: &Args) -> CacheConfig {
    let ttl = Duration::from_secs(args.cache_ttl_hours.saturating_mul(60 * 60));
    CacheConfig::new(&args.cache_dir).with_ttl(ttl)
}

async fn via_search<F: ContentFetcher>(
    fetcher: &F,
    url: &str,
    day: Option<&str>,
) -> Result<(), CliError> {
    let day = day.map(Weekday::normalize).transpose()?;

    let html = fetcher.fetch(url).await?;
    let legs = parse_train_legs(&html);

    let codes = RouteCodes::from_url(url);
    let (to_transit, from_transit) = codes.split_legs(&legs);
    info!(
        legs = legs.len(),
        to_transit = to_transit.len(),
        from_transit = from_transit.len(),
        source = %codes.source,
        transit = %codes.transit,
        destination = %codes.destination,
        "split legs by segment"
    );

    let connections = within_journey_limit(resolve_connections(&to_transit, &from_transit, day));

    let mut out = io::stdout().lock();
    write_connections(&mut out, &codes, day, &connections)?;
    out.flush()?;
    Ok(())
}

async fn top_search<F: ContentFetcher>(
    fetcher: &F,
    url: &str,
    limit: i64,
    max_distance: i64,
) -> Result<(), CliError> {
    let options = top_options(url, limit, max_distance);
    let source = ListingSource::new(fetcher, url);

    let aggregation = match aggregate_routes(&source, &options).await {
        Ok(aggregation) => aggregation,
        Err(e) => {
            let partial = e.partial().len();
            if partial > 0 {
                warn!(routes = partial, "discarding routes from pages fetched before the failure");
            }
            return Err(e.into());
        }
    };

    let mut out = io::stdout().lock();
    write_routes(&mut out, &aggregation, &options)?;
    out.flush()?;
    Ok(())
}

/// Aggregation options from the `top` flags. Values <= 0 disable the limit
/// or the distance filter; oversized values saturate.
fn top_options(url: &str, limit: i64, max_distance: i64) -> AggregateOptions {
    let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
    let max_distance = u32::try_from(max_distance.clamp(0, i64::from(u32::MAX))).unwrap_or(u32::MAX);

    AggregateOptions::for_url(url)
        .with_limit(limit)
        .with_max_distance(max_distance)
}
