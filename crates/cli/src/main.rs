//! # amrcast
//!
//! Command-line interface for antimicrobial resistance forecasting.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use data_core::{
    extract, list_keys, load_series, parse_date, write_records_csv, CsvSource, DataSource,
    ExtractConfig, SeriesKey, SyntheticSource,
};
use forecast_facade::{
    available_models, backtest, compare_models, get_forecast, write_evaluation_json,
    write_forecast_csv, write_forecast_csv_file, ForecastConfig, ForecastTable, ModelKind,
    TimeSeries,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming a default JSON config file
const CONFIG_ENV: &str = "AMRCAST_CONFIG";

#[derive(Parser)]
#[command(name = "amrcast")]
#[command(about = "Antimicrobial resistance forecasting CLI", long_about = None)]
struct Cli {
    /// JSON config file (defaults to $AMRCAST_CONFIG)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SeriesArgs {
    /// Records CSV or two-column `date,value` CSV
    #[arg(short, long)]
    input: PathBuf,

    /// Pathogen filter (case-insensitive)
    #[arg(long, default_value = "")]
    pathogen: String,

    /// Antibiotic filter (case-insensitive)
    #[arg(long, default_value = "")]
    antibiotic: String,

    /// Country filter (case-insensitive)
    #[arg(long, default_value = "")]
    country: String,
}

impl SeriesArgs {
    fn key(&self) -> SeriesKey {
        SeriesKey::new(&self.pathogen, &self.antibiotic, &self.country)
    }

    fn load(&self) -> Result<TimeSeries> {
        let key = self.key();
        let series = load_series(&self.input, &key)
            .with_context(|| format!("failed to load {} from {:?}", key, self.input))?;
        info!(%key, points = series.len(), "series ready");
        Ok(series)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast one series with one model
    Forecast {
        #[command(flatten)]
        series: SeriesArgs,

        /// Model (prophet, arima, lstm, random_forest, gradient_boosting, svr, exponential_smoothing)
        #[arg(short, long, default_value = "arima")]
        model: ModelKind,

        /// Steps to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// Attach residual-based prediction intervals
        #[arg(long)]
        intervals: bool,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Forecast one series with several models side by side
    Compare {
        #[command(flatten)]
        series: SeriesArgs,

        /// Comma-separated models (defaults to the configured list)
        #[arg(short, long)]
        models: Option<String>,

        /// Steps to forecast
        #[arg(long)]
        horizon: Option<usize>,

        /// Output CSV (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Hold out the tail of a series and score every model against it
    Backtest {
        #[command(flatten)]
        series: SeriesArgs,

        /// Comma-separated models (defaults to the configured list)
        #[arg(short, long)]
        models: Option<String>,

        /// Held-out observations
        #[arg(long)]
        holdout: Option<usize>,

        /// Evaluation JSON output
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Run status JSON output
        #[arg(long)]
        status: Option<PathBuf>,
    },

    /// List pathogen/antibiotic/country combinations in record files
    Keys {
        /// Record CSV files, read concurrently
        #[arg(short, long, required = true)]
        input: Vec<PathBuf>,

        /// Deadline for reading all files, in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,
    },

    /// Generate a seeded synthetic records file
    Synthesize {
        /// Series as `pathogen/antibiotic/country`; repeatable
        #[arg(short, long = "series", value_parser = parse_key, required = true)]
        keys: Vec<SeriesKey>,

        /// First month (YYYY-MM)
        #[arg(long, default_value = "2015-01")]
        start: String,

        /// Months per series
        #[arg(long, default_value = "96")]
        months: usize,

        /// Random seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Output CSV
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn parse_key(raw: &str) -> std::result::Result<SeriesKey, String> {
    let parts: Vec<&str> = raw.split('/').collect();
    match parts.as_slice() {
        [pathogen, antibiotic, country] => Ok(SeriesKey::new(*pathogen, *antibiotic, *country)),
        [pathogen, antibiotic] => Ok(SeriesKey::new(*pathogen, *antibiotic, "")),
        _ => Err(format!(
            "expected pathogen/antibiotic[/country], got '{}'",
            raw
        )),
    }
}

/// Config from `--config`, then `$AMRCAST_CONFIG`, then defaults
fn load_config(path: Option<&Path>) -> Result<ForecastConfig> {
    let path = path
        .map(Path::to_path_buf)
        .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            ForecastConfig::from_json_file(&path)
                .with_context(|| format!("failed to load config {:?}", path))
        }
        None => Ok(ForecastConfig::default()),
    }
}

fn select_models(list: Option<&str>, config: &ForecastConfig) -> Result<Vec<ModelKind>> {
    let models = match list {
        Some(list) => ModelKind::parse_list(list)?,
        None => config.models.clone(),
    };
    if models.is_empty() {
        bail!("no models selected");
    }
    Ok(models)
}

fn print_table(table: &ForecastTable) {
    println!("\nModel: {}", table.model);
    if let Some(reason) = table.placeholder_reason() {
        println!("  (substituted: {})", reason);
    }
    for point in &table.points {
        match (point.lower, point.upper) {
            (Some(lower), Some(upper)) => println!(
                "  {}: {:.2}  [{:.2}, {:.2}]",
                point.date, point.forecast, lower, upper
            ),
            _ => println!("  {}: {:.2}", point.date, point.forecast),
        }
    }
}

fn write_tables(tables: &[ForecastTable], output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            for table in tables {
                print_table(table);
            }
            write_forecast_csv_file(path, tables)
                .with_context(|| format!("failed to write {:?}", path))?;
            println!("\nForecasts written to {:?}", path);
        }
        None => write_forecast_csv(std::io::stdout().lock(), tables)?,
    }
    Ok(())
}

fn run_forecast(
    config: ForecastConfig,
    series: SeriesArgs,
    model: ModelKind,
    horizon: Option<usize>,
    intervals: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let data = series.load()?;
    let config = ForecastConfig {
        intervals: config.intervals || intervals,
        ..config
    };
    let horizon = horizon.unwrap_or(config.horizon);

    let table = get_forecast(&data, model, horizon, &config)
        .with_context(|| format!("{} forecast failed", model.label()))?;
    write_tables(std::slice::from_ref(&table), output.as_deref())
}

fn run_compare(
    config: ForecastConfig,
    series: SeriesArgs,
    models: Option<String>,
    horizon: Option<usize>,
    output: Option<PathBuf>,
) -> Result<()> {
    let data = series.load()?;
    let models = select_models(models.as_deref(), &config)?;
    let horizon = horizon.unwrap_or(config.horizon);

    let comparison = compare_models(&data, &models, horizon, &config);
    let substituted = comparison.placeholders().len();
    if substituted > 0 {
        eprintln!(
            "{} of {} models failed and were replaced by placeholders",
            substituted,
            comparison.len()
        );
    }
    write_tables(comparison.tables(), output.as_deref())
}

fn run_backtest(
    config: ForecastConfig,
    series: SeriesArgs,
    models: Option<String>,
    holdout: Option<usize>,
    output: Option<PathBuf>,
    status: Option<PathBuf>,
) -> Result<()> {
    let data = series.load()?;
    let models = select_models(models.as_deref(), &config)?;
    let holdout = holdout.unwrap_or(config.holdout);
    if holdout == 0 {
        bail!("holdout must be at least 1");
    }

    let report = backtest(&data, &models, holdout, &config);

    println!("\n=== Backtest Results ===");
    println!("Train: {}  Test: {}", report.train_len, report.test_len);
    println!("{:<36} {:>10} {:>10} {:>10}", "Model", "RMSE", "MAE", "MAPE %");
    for (label, record) in report.evaluation.iter() {
        let mape = record
            .mape
            .map_or_else(|| "-".to_string(), |m| format!("{:.2}", m));
        println!(
            "{:<36} {:>10.3} {:>10.3} {:>10}",
            label, record.rmse, record.mae, mape
        );
    }
    match &report.best {
        Some(best) => println!("\nBest model: {}", best),
        None => println!("\nNo fitted model could be scored"),
    }

    if let Some(path) = output {
        let file = File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
        write_evaluation_json(file, &report.evaluation)?;
        println!("Evaluation written to {:?}", path);
    }

    if let Some(path) = status {
        let placeholders: Vec<&str> = report
            .comparison
            .placeholders()
            .iter()
            .map(|t| t.model.as_str())
            .collect();
        let json = serde_json::json!({
            "status": if placeholders.is_empty() { "ok" } else { "partial" },
            "series": data.label,
            "models": models.iter().map(ModelKind::as_str).collect::<Vec<_>>(),
            "train_len": report.train_len,
            "test_len": report.test_len,
            "best": report.best,
            "placeholders": placeholders,
            "finished_at": chrono::Utc::now().to_rfc3339(),
        });
        let mut file =
            File::create(&path).with_context(|| format!("failed to create {:?}", path))?;
        serde_json::to_writer_pretty(&mut file, &json)?;
        println!("Status written to {:?}", path);
    }

    Ok(())
}

fn run_keys(inputs: Vec<PathBuf>, timeout: u64) -> Result<()> {
    let sources: Vec<Arc<dyn DataSource>> = inputs
        .into_iter()
        .map(|path| Arc::new(CsvSource::new(path)) as Arc<dyn DataSource>)
        .collect();
    let config = ExtractConfig {
        deadline: Duration::from_secs(timeout),
        ..ExtractConfig::default()
    };

    let report = extract(sources, config)?;
    for (name, err) in &report.failed {
        eprintln!("Skipped {}: {}", name, err);
    }
    if report.completed.is_empty() {
        bail!("no input could be read");
    }

    let keys = list_keys(&report.records());
    println!("{} series:", keys.len());
    for key in keys {
        println!("  {}", key);
    }
    Ok(())
}

fn run_synthesize(
    keys: Vec<SeriesKey>,
    start: String,
    months: usize,
    seed: u64,
    output: PathBuf,
) -> Result<()> {
    let start = parse_date(&start).context("invalid --start")?;
    let set = SyntheticSource::new(keys, start, months)
        .with_seed(seed)
        .fetch()?;

    let file = File::create(&output).with_context(|| format!("failed to create {:?}", output))?;
    write_records_csv(file, &set.records)?;
    println!(
        "Wrote {} synthetic records to {:?}",
        set.records.len(),
        output
    );
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "amrcast=debug,forecast_core=debug,data_core=debug"
    } else {
        "amrcast=info,forecast_core=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    debug!(models = ?available_models(), "available models");

    match cli.command {
        Commands::Forecast {
            series,
            model,
            horizon,
            intervals,
            output,
        } => run_forecast(
            load_config(cli.config.as_deref())?,
            series,
            model,
            horizon,
            intervals,
            output,
        ),

        Commands::Compare {
            series,
            models,
            horizon,
            output,
        } => run_compare(
            load_config(cli.config.as_deref())?,
            series,
            models,
            horizon,
            output,
        ),

        Commands::Backtest {
            series,
            models,
            holdout,
            output,
            status,
        } => run_backtest(
            load_config(cli.config.as_deref())?,
            series,
            models,
            holdout,
            output,
            status,
        ),

        Commands::Keys { input, timeout } => run_keys(input, timeout),

        Commands::Synthesize {
            keys,
            start,
            months,
            seed,
            output,
        } => run_synthesize(keys, start, months, seed, output),
    }
}
