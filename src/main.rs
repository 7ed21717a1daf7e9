//! Pulseboard CLI
//!
//! - `serve`: run the dashboard server
//! - `render`: one render cycle printed to stdout
//! - `categories`: list selectable content types
//! - `config`: print a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pulseboard::api::{serve, AppState, ApiError};
use pulseboard::catalog::{Category, Selection, Selector};
use pulseboard::config::{generate_default_config, Config, DefaultLoad, LoggingConfig};
use pulseboard::page::{render_page, render_text, PageView, EMPTY_SELECTION_MESSAGE};

#[derive(Parser)]
#[command(name = "pulseboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Social media performance dashboard")]
#[command(long_about = "Pulseboard asks an analytics data service about the content types you pick\n(Text, Image, Video, Reels, Carousel) and renders metrics, insights and recommendations.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server
    Serve {
        /// Host to bind (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fetch and render insights once
    Render {
        /// Content types, comma-separated (e.g., text,image)
        #[arg(short, long, value_delimiter = ',', required = true)]
        select: Vec<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Read the response from this JSON file instead of the data service
        #[arg(long)]
        fixture: Option<PathBuf>,
    },

    /// List selectable content types
    Categories,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Warnings raised while loading (bad env overrides) go to stderr until
    // the configured subscriber is installed
    let loaded = tracing::subscriber::with_default(bootstrap_subscriber(), || match &cli.config {
        Some(path) => Config::load_with_env(path).map(|config| DefaultLoad {
            config,
            path: Some(path.clone()),
            skipped: Vec::new(),
        }),
        None => Ok(Config::load_default()),
    })?;

    init_logging(&loaded.config.logging);

    for error in &loaded.skipped {
        tracing::warn!("Skipping config file: {}", error);
    }
    match &loaded.path {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let mut config = loaded.config;

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            tracing::info!("Starting Pulseboard v{}", env!("CARGO_PKG_VERSION"));

            let source = pulseboard::source::from_config(&config.source)?;
            match source.health_check().await {
                Ok(()) => tracing::info!("Data source {} reachable", source.name()),
                Err(e) => tracing::warn!("Data source not reachable yet: {}", e),
            }

            let state = AppState::new(source, config.dashboard.clone());
            serve(state, &config.server).await?;
        }

        Commands::Render {
            select,
            format,
            fixture,
        } => {
            if fixture.is_some() {
                config.source.fixture = fixture;
            }

            let selection = Selection::from_labels(select.iter().filter(|s| !s.trim().is_empty()))?;
            let source = pulseboard::source::from_config(&config.source)?;
            let state = AppState::new(source, config.dashboard.clone());

            let plan = match state.generate(&selection).await {
                Ok(plan) => plan,
                Err(ApiError::EmptySelection) => bail!(EMPTY_SELECTION_MESSAGE),
                Err(e) => return Err(e).context("Failed to generate insights"),
            };

            match format {
                OutputFormat::Text => print!("{}", render_text(&plan)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
                OutputFormat::Html => {
                    let selector = Selector::from_selection(&selection);
                    println!(
                        "{}",
                        render_page(&PageView {
                            title: &config.dashboard.title,
                            footer: &config.dashboard.footer,
                            selector: &selector,
                            banner: None,
                            plan: Some(&plan),
                        })
                    );
                }
            }
        }

        Commands::Categories => {
            for category in Category::all() {
                println!("{} {:<10} ({})", category.icon(), category.label(), category.key());
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Warn-level stderr logging used before the config is known
fn bootstrap_subscriber() -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .finish()
}

/// Initialize tracing; `RUST_LOG` wins over the configured level
fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pulseboard={},tower_http=info", config.level))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
