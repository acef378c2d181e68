use clap::Parser;
use exn::ResultExt;
use pouet::error::{ErrorKind, Result};
use pouet::{Config, Pouet, Target, export_csv};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Query the pouet.net data dumps with SQL.
///
/// The dumps are mirrored into a local SQLite database first, and only
/// downloaded again when pouet.net publishes newer ones.
#[derive(Parser, Debug)]
#[command(name = "pouet", version)]
struct Cli {
    /// Configuration file (TOML, or JSON by extension).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Database file, or `:memory:`. Overrides the configuration.
    #[arg(long)]
    database: Option<String>,
    /// Ignore existing snapshots and download every dump.
    #[arg(long)]
    no_cache: bool,
    /// Write the rows to this CSV file instead of standard output.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Only report whether the database is stale.
    #[arg(long)]
    check: bool,
    /// SQL to run.
    #[arg(required_unless_present = "check")]
    sql: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(database) = cli.database {
        config.database = database;
    }
    if cli.no_cache {
        config.cache = false;
    }
    let target: Target = config.database.parse().map_err(ErrorKind::database)?;
    let pouet = Pouet::from_config(&config)?.with_progress(|title: &str| eprintln!("{title}"));

    if cli.check {
        let stale = pouet.check_version(&target).await?;
        println!("{}", if stale { "stale" } else { "fresh" });
        return Ok(());
    }

    let sql = cli.sql.unwrap_or_default();
    let rows = pouet.sql_query(&sql, &target).await?;
    match cli.output {
        Some(path) => {
            if !export_csv(&rows, &path)? {
                tracing::warn!(path = %path.display(), "query returned no rows, nothing written");
            }
        },
        None => {
            let mut stdout = std::io::stdout().lock();
            for row in &rows {
                let line = serde_json::to_string(row).or_raise(|| ErrorKind::Export)?;
                writeln!(stdout, "{line}").or_raise(|| ErrorKind::Export)?;
            }
        },
    }
    Ok(())
}
