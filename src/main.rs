//! proftafla - University of Iceland exam schedules from the command line
//!
//! Prints department schedules and student statistics as JSON, caching every fetch
//! in Redis (or on disk, or in memory) for ten minutes.

use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use proftafla::cache::{MemoryCache, RedisCache};
use proftafla::cli::{CacheBackend, Cli, CliError, Command, StartupConfig};
use proftafla::data::{ExamClient, HttpScheduleSource, ScheduleSource};

/// Loads a `.env` file so clap's `env` values can come from it
fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv() {
        if !err.not_found() {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }
}

/// Initializes tracing on stderr, keeping stdout for JSON output
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs one subcommand and returns the text to print
async fn run(command: &Command, client: &ExamClient) -> Result<String, Box<dyn Error>> {
    let output = match command {
        Command::Departments => serde_json::to_string_pretty(client.departments())?,
        Command::Tests { slug } => {
            let sections = client
                .get_tests(slug)
                .await?
                .ok_or_else(|| CliError::UnknownDepartment(slug.clone()))?;
            serde_json::to_string_pretty(&sections)?
        }
        Command::Stats => serde_json::to_string_pretty(&client.get_stats().await?)?,
        Command::ClearCache => client.clear_cache().await?.to_string(),
    };
    Ok(output)
}

async fn try_main(cli: Cli) -> Result<String, Box<dyn Error>> {
    let config = StartupConfig::from_cli(&cli);
    let source: Arc<dyn ScheduleSource> = Arc::new(HttpScheduleSource::new(config.source.clone())?);

    match config.backend {
        CacheBackend::Redis => {
            let redis = RedisCache::connect(&config.redis_url).await?;
            let client = ExamClient::new(Arc::new(redis.clone()), source).with_ttl(config.ttl_seconds);
            let result = run(&cli.command, &client).await;
            redis.close();
            result
        }
        CacheBackend::File => {
            let cache = config.file_cache()?;
            let client = ExamClient::new(Arc::new(cache), source).with_ttl(config.ttl_seconds);
            run(&cli.command, &client).await
        }
        CacheBackend::Memory => {
            let client = ExamClient::new(Arc::new(MemoryCache::new()), source).with_ttl(config.ttl_seconds);
            run(&cli.command, &client).await
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    load_dotenv();
    init_tracing();

    let cli = Cli::parse();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), command = ?cli.command, "starting");

    match try_main(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
