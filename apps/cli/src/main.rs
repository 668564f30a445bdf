//! Gridwire operational command line: validate table configurations and run
//! page loads through the full interpretation pipeline.

#![forbid(unsafe_code)]

use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gridwire_application::{
    DynamicParams, PageLoad, TableDataService, interpolate_path_params, unresolved_placeholders,
};
use gridwire_core::{TableError, TableResult};
use gridwire_domain::TableConfig;
use gridwire_infrastructure::{
    ConsoleNavigator, ConsoleNotifier, DEFAULT_TIMEOUT, HttpTableDataSource,
};

/// Command-line interface for the `gridwire` binary.
#[derive(Parser, Debug)]
#[command(
    name = "gridwire",
    about = "Interpret declarative data-table configurations",
    version
)]
struct Cli {
    /// Which operation to run.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a table configuration file.
    Validate(ValidateArgs),
    /// Fetch one page through the configured API and print it as JSON.
    Fetch(FetchArgs),
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to the configuration JSON file.
    #[arg(value_name = "CONFIG")]
    config: PathBuf,
}

/// Arguments for the `fetch` subcommand.
#[derive(Args, Debug)]
struct FetchArgs {
    /// Path to the configuration JSON file.
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Logical page to fetch, starting at 1.
    #[arg(long, default_value_t = 1)]
    page: u64,

    /// Rows per page; defaults to the configured default page size.
    #[arg(long)]
    page_size: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), TableError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(args) => validate(&args),
        Commands::Fetch(args) => fetch(&args).await,
    }
}

fn validate(args: &ValidateArgs) -> TableResult<()> {
    let config = load_config(args.config.as_path())?;
    config.validate()?;

    let path = interpolate_path_params(config.api.path.as_str(), &config.path_params);
    for placeholder in unresolved_placeholders(path.as_str()) {
        warn!(
            placeholder = placeholder.as_str(),
            "path placeholder has no enabled param with a value"
        );
    }

    info!(
        config = %args.config.display(),
        columns = config.columns.len(),
        actions = config.events.click_actions.len(),
        "configuration is valid"
    );
    Ok(())
}

async fn fetch(args: &FetchArgs) -> TableResult<()> {
    let config = load_config(args.config.as_path())?;
    config.validate()?;

    let page_size = args
        .page_size
        .unwrap_or(config.pagination.default_page_size);
    let dynamic = DynamicParams::new()
        .with_page(&config.query_params, args.page)
        .with_page_size(&config.query_params, page_size);

    let data_source = Arc::new(HttpTableDataSource::new(http_timeout()?)?);
    let service = TableDataService::new(data_source)
        .with_notifier(Arc::new(ConsoleNotifier::new()))
        .with_navigator(Arc::new(ConsoleNavigator::new()));

    match service
        .load_page(&config, &dynamic, args.page, page_size)
        .await
    {
        PageLoad::Loaded(loaded) => {
            let rendered = serde_json::to_string_pretty(&loaded).map_err(|error| {
                TableError::Internal(format!("failed to render page as JSON: {error}"))
            })?;
            println!("{rendered}");
            Ok(())
        }
        PageLoad::Superseded => {
            warn!("page load was superseded before it resolved");
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> TableResult<TableConfig> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        TableError::Config(format!(
            "failed to read configuration '{}': {error}",
            path.display()
        ))
    })?;

    serde_json::from_str(raw.as_str()).map_err(|error| {
        TableError::Config(format!(
            "configuration '{}' is not valid JSON: {error}",
            path.display()
        ))
    })
}

fn http_timeout() -> TableResult<Duration> {
    let seconds = parse_env_u64("GRIDWIRE_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT.as_secs())?;
    Ok(Duration::from_secs(seconds))
}

fn parse_env_u64(name: &str, default: u64) -> TableResult<u64> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| TableError::Config(format!("{name} must be a positive integer"))),
        Err(_) => Ok(default),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
