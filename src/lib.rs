//! # blitnaut-dl
//!
//! Enumerates Blitnauts from their subgraph and mirrors one image per Blitnaut
//! into a local directory, skipping images already on disk.
//!
//! The crate is two pieces and a driver:
//! - [`subgraph`] - the record source ([`RecordSource`], [`SubgraphClient`])
//! - [`images`] - the on-disk image cache ([`ImageCache`])
//! - [`run`] / [`run_with`] - ensure the directory, fetch records, download images
//!
//! ## Quick Start
//!
//! ```no_run
//! use blitnaut_dl::{Config, RunMode, run};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = run(&Config::default(), RunMode::All).await?;
//!     println!("{} saved, {} already cached", summary.saved, summary.skipped);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Image download cache
pub mod images;
/// Subgraph record source
pub mod subgraph;
/// Core types
pub mod types;

// Re-export commonly used types
pub use config::{Config, ImageConfig, SubgraphConfig};
pub use error::{Error, Result};
pub use images::ImageCache;
pub use subgraph::{RecordSource, SubgraphClient};
pub use types::{Blitnaut, BlitnautId, FetchOutcome};

use tracing::{info, warn};

/// Which records a run enumerates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunMode {
    /// Every Blitnaut, paginated
    #[default]
    All,
    /// Blitnauts with a numeric id strictly greater than the cursor
    After(BlitnautId),
    /// A single Blitnaut; absent ids download nothing
    Single(BlitnautId),
}

/// Totals for a completed run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records returned by the record source
    pub records: usize,
    /// Images downloaded during this run
    pub saved: usize,
    /// Images already present on disk
    pub skipped: usize,
}

/// Run once against the endpoints and directory in `config`
///
/// Validates the configuration, builds the production [`SubgraphClient`] and
/// [`ImageCache`], then delegates to [`run_with`].
pub async fn run(config: &Config, mode: RunMode) -> Result<RunSummary> {
    config.validate()?;

    let http_client = reqwest::Client::builder()
        .user_agent(concat!("blitnaut-dl/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let source = SubgraphClient::with_client(http_client.clone(), &config.subgraph);
    let cache = ImageCache::with_client(http_client, &config.images);

    run_with(&source, &cache, mode).await
}

/// Run once with an explicit record source and image cache
///
/// The output directory is ensured first. All records are fetched before any
/// download starts; downloads then run concurrently and the first failure
/// fails the run.
pub async fn run_with<S>(source: &S, cache: &ImageCache, mode: RunMode) -> Result<RunSummary>
where
    S: RecordSource + ?Sized,
{
    cache.ensure_output_dir().await?;

    let blitnauts = match mode {
        RunMode::All => source.get_all().await?,
        RunMode::After(cursor) => source.get_after_id(cursor).await?,
        RunMode::Single(id) => match source.get_by_id(id).await? {
            Some(blitnaut) => vec![blitnaut],
            None => {
                warn!(blitnaut_id = id.get(), "no such blitnaut");
                Vec::new()
            }
        },
    };

    info!(
        records = blitnauts.len(),
        output_dir = %cache.output_dir().display(),
        "fetched blitnauts, downloading images"
    );

    let outcomes = cache
        .download_all(blitnauts.iter().map(|b| b.numeric_id))
        .await?;

    let saved = outcomes
        .iter()
        .filter(|o| matches!(o, FetchOutcome::Saved { .. }))
        .count();
    let summary = RunSummary {
        records: blitnauts.len(),
        saved,
        skipped: outcomes.len() - saved,
    };

    info!(
        records = summary.records,
        saved = summary.saved,
        skipped = summary.skipped,
        "run complete"
    );
    Ok(summary)
}
