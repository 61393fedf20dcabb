//! plotsort - classify a directory of images from the browser
//!
//! Run from (or point `--root` at) the directory holding the images, then
//! open http://localhost:8000. Press a label key (default `1`/`2`) to
//! classify the current image and the arrow keys to move between images.
//! Classifications are written as JSON under `selections/`.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use plotsort_common::{Config, TomlConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for plotsort
#[derive(Parser, Debug)]
#[command(name = "plotsort")]
#[command(about = "Classify images in a directory through a local web page")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "8000", env = "PLOTSORT_PORT")]
    port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "PLOTSORT_BIND")]
    bind: IpAddr,

    /// Directory containing the images
    #[arg(short, long, default_value = ".", env = "PLOTSORT_ROOT")]
    root: PathBuf,

    /// Glob pattern of files to classify, relative to the root [default: *.png]
    #[arg(long, env = "PLOTSORT_PATTERN")]
    pattern: Option<String>,

    /// Directory for selection files [default: <root>/selections]
    #[arg(long)]
    selections: Option<PathBuf>,

    /// TOML file with `pattern` and a `[labels]` table
    #[arg(short, long, env = "PLOTSORT_CONFIG")]
    config: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(Config, SocketAddr)> {
        let mut config = Config::new(self.root);

        if let Some(path) = &self.config {
            let file = TomlConfig::load(path)?;
            config = config.with_file(file)?;
        }
        if let Some(pattern) = self.pattern {
            config = config.with_pattern(pattern)?;
        }
        if let Some(dir) = self.selections {
            config = config.with_selections_dir(dir);
        }

        Ok((config, SocketAddr::new(self.bind, self.port)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "plotsort=info,plotsort_web=info,plotsort_common=info,tower_http=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting plotsort v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("PLOTSORT_GIT_HASH"),
        env!("PLOTSORT_BUILD_TIME"),
        env!("PLOTSORT_BUILD_PROFILE")
    );

    let (config, addr) = Args::parse()
        .into_config()
        .context("Invalid configuration")?;
    info!(
        "Labels: {}",
        config
            .labels
            .iter()
            .map(|(key, label)| format!("{}={}", key, label))
            .collect::<Vec<_>>()
            .join(" ")
    );

    plotsort_web::server::run(config, addr).await
}
