//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use openmedicaid::api::WatchlistRequest;
use openmedicaid::config::Config;
use openmedicaid::output::OutputMode;

/// openmedicaid - Medicaid provider spending reports
#[derive(Parser, Debug)]
#[command(
    name = "openmedicaid",
    version,
    about = "Medicaid provider spending reports",
    long_about = "Browse precomputed Medicaid provider billing statistics.\n\n\
                  Reports are built from JSON fixtures in a data directory:\n\
                  headline numbers, a unified fraud-risk watchlist, provider\n\
                  profiles, state rankings, trends and exclusion matches."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Fixture directory (overrides OPENMEDICAID_DATA and the config file)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show headline numbers
    Stats,

    /// Show the unified fraud-risk watchlist
    Watchlist(WatchlistArgs),

    /// Show a provider profile
    Provider {
        /// National Provider Identifier
        npi: String,
    },

    /// Check whether a provider is flagged (name, NPI or city)
    Check {
        /// Search text (at least 2 characters)
        query: String,
    },

    /// Rank states by spending
    States {
        /// Heat map view: per-capita or total
        #[arg(long, default_value = "per-capita")]
        view: String,
    },

    /// Show one state
    State {
        /// Two-letter state code
        code: String,
    },

    /// Show yearly spending trends
    Trends,

    /// Show excluded providers still found in payment data
    Exclusions,

    /// Summarize the fraud-similarity model
    Ml,

    /// List known flags
    Flags,

    /// Format a value the way reports do
    Fmt {
        /// money, number, money-full, cpc, percent, growth, ratio, state, flag, hcpcs,
        /// feature, title or date
        kind: String,

        /// Raw value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Print the RSS feed of investigations
    Feed {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the XML sitemap
    Sitemap {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check fixtures against the expected schema
    Validate,

    /// Serve reports over HTTP
    #[cfg(feature = "ui")]
    Serve {
        /// Port to listen on (defaults to the config file, then 8787)
        #[arg(short, long)]
        port: Option<u16>,

        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },

    /// Show version
    Version,
}

/// Watchlist filters
#[derive(Args, Debug)]
pub struct WatchlistArgs {
    /// all, stat or ml
    #[arg(long, default_value = "all")]
    pub tab: String,

    /// critical, high, elevated, ml or low
    #[arg(long)]
    pub tier: Option<String>,

    /// Keep providers carrying this flag key
    #[arg(long)]
    pub flag: Option<String>,

    /// Keep providers in this state
    #[arg(long)]
    pub state: Option<String>,

    /// Substring over name, NPI, state and city
    #[arg(short, long)]
    pub search: Option<String>,

    /// risk, flags, spending, name or ml
    #[arg(long, default_value = "risk")]
    pub sort: String,

    /// Maximum rows (0 for all; defaults to the configured page size)
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl WatchlistArgs {
    fn into_request(self, page_size: usize) -> WatchlistRequest {
        WatchlistRequest {
            tab: Some(self.tab),
            tier: self.tier,
            flag: self.flag,
            state: self.state,
            search: self.search,
            sort: Some(self.sort),
            limit: Some(self.limit.unwrap_or(page_size).to_string()),
        }
    }
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let config = Config::load();
    let data_dir = config.resolve_data_dir(cli.data_dir.as_deref());
    log::debug!("Using data directory {}", data_dir.display());

    match cli.command {
        Some(Command::Stats) => commands::stats(&data_dir, output_mode),
        Some(Command::Watchlist(args)) => {
            commands::watchlist(&data_dir, &args.into_request(config.page_size), output_mode)
        },
        Some(Command::Provider { npi }) => commands::provider(&data_dir, &npi, output_mode),
        Some(Command::Check { query }) => commands::check(&data_dir, &query, output_mode),
        Some(Command::States { view }) => commands::states(&data_dir, &view, output_mode),
        Some(Command::State { code }) => commands::state(&data_dir, &code, output_mode),
        Some(Command::Trends) => commands::trends(&data_dir, output_mode),
        Some(Command::Exclusions) => commands::exclusions(&data_dir, output_mode),
        Some(Command::Ml) => commands::ml(&data_dir, output_mode),
        Some(Command::Flags) => commands::flags(output_mode),
        Some(Command::Fmt { kind, value }) => commands::fmt(&kind, &value, output_mode),
        Some(Command::Feed { output }) => {
            commands::feed(&config.site_url, output.as_deref(), output_mode)
        },
        Some(Command::Sitemap { output }) => {
            commands::sitemap(&data_dir, &config.site_url, output.as_deref(), output_mode)
        },
        Some(Command::Validate) => commands::validate(&data_dir, output_mode),
        #[cfg(feature = "ui")]
        Some(Command::Serve { port, open }) => {
            commands::serve(&data_dir, port.unwrap_or(config.server.port), open, &config)
        },
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("openmedicaid v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("openmedicaid v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'openmedicaid --help' for usage");
                println!("Run 'openmedicaid stats' to get started");
            }
            Ok(())
        },
    }
}
