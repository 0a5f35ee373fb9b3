//! Maktaba CLI - read the catalog API from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Every product, or one category's
//! maktaba products
//! maktaba products --category Books
//!
//! # Other collections
//! maktaba categories
//! maktaba ads
//! maktaba offers
//! maktaba orders
//!
//! # Dashboard counters
//! maktaba stats
//!
//! # JSON lines instead of text, against another backend
//! maktaba --json --api-url http://shop.internal:5000/api products
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::time::Duration;

use clap::{Parser, Subcommand};

use maktaba_client::RestClient;
use maktaba_core::CurrencyCode;

mod commands;

use commands::{CliError, Format, Output};

#[derive(Parser)]
#[command(name = "maktaba")]
#[command(author, version, about = "Maktaba catalog CLI")]
struct Cli {
    /// Catalog API base URL
    #[arg(
        long,
        env = "MAKTABA_API_URL",
        default_value = "http://127.0.0.1:5000/api",
        global = true
    )]
    api_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "MAKTABA_API_TIMEOUT_SECS", global = true)]
    timeout: Option<u64>,

    /// Currency used to format prices (`YER`, `SAR`, `USD`)
    #[arg(long, env = "STORE_CURRENCY", default_value = "YER", global = true)]
    currency: CurrencyCode,

    /// Print one JSON object per line
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories
    Categories,
    /// List ads
    Ads,
    /// List offers
    Offers,
    /// List orders, newest first
    Orders,
    /// Show catalog counters
    Stats,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays pipeable
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let api = RestClient::new(&cli.api_url, cli.timeout.map(Duration::from_secs))?;
    let format = if cli.json { Format::Json } else { Format::Text };
    let stdout = io::stdout();
    let mut out = Output::new(stdout.lock(), format, cli.currency);

    match cli.command {
        Commands::Products { category } => {
            commands::catalog::products(&api, category.as_deref(), &mut out).await?;
        }
        Commands::Categories => commands::catalog::categories(&api, &mut out).await?,
        Commands::Ads => commands::catalog::ads(&api, &mut out).await?,
        Commands::Offers => commands::catalog::offers(&api, &mut out).await?,
        Commands::Orders => commands::report::orders(&api, &mut out).await?,
        Commands::Stats => commands::report::stats(&api, &mut out).await?,
    }
    out.into_inner().flush()?;
    Ok(())
}
