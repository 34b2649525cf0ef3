//! # Scrivo - A Small Tabbed Text Editor
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the editor
//! cargo run
//!
//! # Open a file in the first tab
//! cargo run -- notes.txt
//!
//! # Use another config file, with debug logging
//! cargo run -- --config ./scrivo.toml -vv
//!
//! # Per-crate log levels; RUST_LOG directives add to -v
//! RUST_LOG=scrivo_core=trace cargo run
//! ```

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrivo_core::Config;
use scrivo_ui::{run, Flags};

/// Scrivo - a small tabbed text editor
#[derive(Parser, Debug)]
#[command(name = "scrivo")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to open
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Config file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }

    fn flags(self) -> Flags {
        let (config, config_path) = Config::load_with_path(self.config.as_deref());
        Flags {
            config,
            config_path,
            file: self.file,
        }
    }
}

/// Log filter: the `-v` level, refined by `RUST_LOG`-style directives.
fn log_filter(level: tracing::Level, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .parse_lossy(directives.unwrap_or_default())
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true),
        )
        .with(log_filter(
            args.log_level(),
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .init();

    tracing::info!("Starting Scrivo v{}", env!("CARGO_PKG_VERSION"));

    // Run the application
    run(args.flags()).map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
