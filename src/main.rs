use std::path::PathBuf;
use std::process::ExitCode;

use blitnaut_dl::{BlitnautId, Config, RunMode};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Mirror Blitnaut images from the subgraph into a local directory
#[derive(Parser, Debug)]
#[command(name = "blitnaut-dl", version)]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long, env = "BLITNAUT_CONFIG")]
    config: Option<PathBuf>,

    /// GraphQL endpoint of the Blitnauts subgraph
    #[arg(long, env = "BLITNAUT_SUBGRAPH_URL")]
    subgraph_url: Option<String>,

    /// Base URL of the image endpoint
    #[arg(long, env = "BLITNAUT_IMAGE_URL")]
    image_url: Option<String>,

    /// Directory images are written to
    #[arg(long, env = "BLITNAUT_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Only Blitnauts with a numeric id greater than this
    #[arg(long, value_name = "ID", conflicts_with = "id")]
    after: Option<BlitnautId>,

    /// Only the Blitnaut with this numeric id
    #[arg(long, value_name = "ID")]
    id: Option<BlitnautId>,
}

impl Cli {
    fn load_config(&self) -> blitnaut_dl::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_json_file(path)?,
            None => Config::default(),
        };

        if let Some(url) = &self.subgraph_url {
            config.subgraph.url = url.clone();
        }
        if let Some(url) = &self.image_url {
            config.images.base_url = url.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.images.output_dir = dir.clone();
        }

        Ok(config)
    }

    fn mode(&self) -> RunMode {
        match (self.id, self.after) {
            (Some(id), _) => RunMode::Single(id),
            (None, Some(cursor)) => RunMode::After(cursor),
            (None, None) => RunMode::All,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.load_config() {
        Ok(config) => blitnaut_dl::run(&config, cli.mode()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}
