mod config;
mod logging;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use storegen_eval::{EvalError, VerificationEngine, VerifyOptions};
use storegen_generate::{GenerateOptions, GenerationEngine, GenerationError};
use storegen_store::{
    StoreError, fetch_order_lines, load_dataset, open_existing, render_order_report,
};
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use config::{ConfigError, StoregenConfig, load_config};
use logging::init_logging;

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("generation error: {0}")]
    Generate(#[from] GenerationError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("verification error: {0}")]
    Eval(#[from] EvalError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "storegen", version, about = "Synthetic e-commerce dataset generator")]
struct Cli {
    /// Path to a TOML config file (default: storegen.toml when present).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Also append JSON log lines to this file.
    #[arg(long, global = true, value_name = "PATH")]
    log_json: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the five CSV files.
    Generate(GenerateArgs),
    /// Rebuild the SQLite database from the CSV files.
    Load(LoadArgs),
    /// Print the order report from the database.
    Query(QueryArgs),
    /// Check a generated dataset and write metrics.json and report.md.
    Verify(VerifyArgs),
    /// Generate, load and query in one go.
    Run(RunArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Output directory for the CSV files.
    #[arg(long, value_name = "DIR")]
    out: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    categories: Option<usize>,
    #[arg(long)]
    customers: Option<usize>,
    #[arg(long)]
    products: Option<usize>,
    #[arg(long)]
    orders: Option<usize>,
    #[arg(long)]
    order_items: Option<usize>,
    /// Reference date for signup and order windows (default: local today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct LoadArgs {
    /// Directory holding the CSV files.
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    /// Directory holding the CSV files.
    #[arg(long, value_name = "DIR")]
    data: Option<PathBuf>,
    /// Upper bound for order dates (default: from generation_report.json).
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,
    /// Report violations without failing.
    #[arg(long, default_value_t = false)]
    no_strict: bool,
    /// Violation examples kept in report.md.
    #[arg(long, default_value_t = 20)]
    max_examples: usize,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    generate: GenerateArgs,
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,
}

/// Errors are reported once, as display text, then mapped to a failing exit
/// code.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.log_json.as_deref()) {
        eprintln!("storegen: {err}");
        return ExitCode::FAILURE;
    }

    let run_id = Uuid::new_v4().to_string();
    let span = tracing::info_span!("run", run_id = %run_id);
    match execute(cli.config, cli.command).instrument(span).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(run_id = %run_id, error = %err, "run failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(config_path: Option<PathBuf>, command: Command) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;
    let timer = Instant::now();
    let name = command_name(&command);
    tracing::info!(event = "run_started", command = name);

    match command {
        Command::Generate(args) => run_generate(&config, args).map(|_| ())?,
        Command::Load(args) => {
            let data_dir = args.data.unwrap_or_else(|| config.data_dir.clone());
            let db_path = args.db.unwrap_or_else(|| config.database.clone());
            run_load(&db_path, &data_dir).await?;
        }
        Command::Query(args) => {
            let db_path = args.db.unwrap_or_else(|| config.database.clone());
            run_query(&db_path).await?;
        }
        Command::Verify(args) => run_verify(&config, args)?,
        Command::Run(args) => {
            let db_path = args.db.unwrap_or_else(|| config.database.clone());
            let data_dir = run_generate(&config, args.generate)?;
            run_load(&db_path, &data_dir).await?;
            run_query(&db_path).await?;
        }
    }

    tracing::info!(
        event = "run_finished",
        command = name,
        status = "success",
        duration_ms = timer.elapsed().as_millis() as u64
    );
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Generate(_) => "generate",
        Command::Load(_) => "load",
        Command::Query(_) => "query",
        Command::Verify(_) => "verify",
        Command::Run(_) => "run",
    }
}

/// Merge flags over config values. Flags win, then the config file, then the
/// built-in defaults already folded into `config`.
fn generate_options(config: &StoregenConfig, args: GenerateArgs) -> GenerateOptions {
    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut options = GenerateOptions::new(today);
    options.out_dir = args.out.unwrap_or_else(|| config.data_dir.clone());
    options.seed = args.seed.unwrap_or(config.seed);

    let mut counts = config.counts;
    if let Some(value) = args.categories {
        counts.categories = value;
    }
    if let Some(value) = args.customers {
        counts.customers = value;
    }
    if let Some(value) = args.products {
        counts.products = value;
    }
    if let Some(value) = args.orders {
        counts.orders = value;
    }
    if let Some(value) = args.order_items {
        counts.order_items = value;
    }
    options.counts = counts;
    options
}

fn run_generate(config: &StoregenConfig, args: GenerateArgs) -> Result<PathBuf, CliError> {
    let options = generate_options(config, args);
    let result = GenerationEngine::new(options).run()?;
    tracing::info!(
        event = "dataset_written",
        out_dir = %result.out_dir.display(),
        bytes_written = result.report.bytes_written
    );
    Ok(result.out_dir)
}

async fn run_load(db_path: &Path, data_dir: &Path) -> Result<(), CliError> {
    let report = load_dataset(db_path, data_dir).await?;
    let rows: u64 = report.tables.iter().map(|table| table.rows).sum();
    tracing::info!(
        event = "database_loaded",
        database = %report.database.display(),
        rows
    );
    Ok(())
}

async fn run_query(db_path: &Path) -> Result<(), CliError> {
    let pool = open_existing(db_path).await?;
    let lines = fetch_order_lines(&pool).await?;
    pool.close().await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render_order_report(&lines, &mut out)?;
    tracing::info!(event = "report_rendered", rows = lines.len());
    Ok(())
}

fn run_verify(config: &StoregenConfig, args: VerifyArgs) -> Result<(), CliError> {
    let data_dir = args.data.unwrap_or_else(|| config.data_dir.clone());
    let options = VerifyOptions {
        strict: !args.no_strict,
        max_examples: args.max_examples,
        today: args.today,
        out_dir: None,
    };
    let result = VerificationEngine::new(options).run(&data_dir)?;
    tracing::info!(
        event = "dataset_verified",
        violations = result.violations.len(),
        report = %result.report_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 1).expect("valid date")
    }

    #[test]
    fn config_values_apply_without_flags() {
        let mut config = StoregenConfig::default();
        config.seed = 7;
        config.data_dir = PathBuf::from("fixtures");
        config.counts.orders = 3;

        let args = GenerateArgs {
            today: Some(today()),
            ..GenerateArgs::default()
        };
        let options = generate_options(&config, args);
        assert_eq!(options.seed, 7);
        assert_eq!(options.out_dir, PathBuf::from("fixtures"));
        assert_eq!(options.counts.orders, 3);
        assert_eq!(options.counts.customers, 50);
        assert_eq!(options.today, today());
    }

    #[test]
    fn flags_override_config() {
        let mut config = StoregenConfig::default();
        config.seed = 7;
        config.counts.orders = 3;

        let args = GenerateArgs {
            out: Some(PathBuf::from("elsewhere")),
            seed: Some(99),
            orders: Some(12),
            today: Some(today()),
            ..GenerateArgs::default()
        };
        let options = generate_options(&config, args);
        assert_eq!(options.seed, 99);
        assert_eq!(options.out_dir, PathBuf::from("elsewhere"));
        assert_eq!(options.counts.orders, 12);
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "storegen",
            "generate",
            "--seed",
            "5",
            "--today",
            "2025-10-01",
            "--config",
            "custom.toml",
        ])
        .expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.seed, Some(5));
                assert_eq!(args.today, Some(today()));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn failure_text_names_the_missing_database() {
        let err = CliError::from(StoreError::DatabaseNotFound {
            path: PathBuf::from("data").join("nowhere.db"),
        });
        let text = err.to_string();
        assert!(text.contains("nowhere.db"), "{text}");
        assert!(text.contains("run `storegen load` first"), "{text}");
        assert!(!text.contains("DatabaseNotFound"), "{text}");
    }

    #[test]
    fn verify_is_strict_by_default() {
        let cli = Cli::try_parse_from(["storegen", "verify"]).expect("parse");
        match cli.command {
            Command::Verify(args) => {
                assert!(!args.no_strict);
                assert_eq!(args.max_examples, 20);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
