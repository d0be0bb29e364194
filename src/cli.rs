//! Command line interface of the `homeval` binary.
//!
//! Data come either from two CSV files (`--train` and `--test`) or from a
//! single file (`--data`) split with a seeded shuffle. The group column is
//! always read as categorical, whatever its values look like.
use crate::report::Report;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use homeval_data::{load_split, train_test_split, CsvOptions, Split};
use homeval_eval::{Comparison, ErrorMetric, Metric};
use homeval_models::{load_model, GroupAverageRegressor, Regressor, DEFAULT_GROUP_COLUMN};
use linfa::{traits::Fit, DatasetBase, ParamGuard};
use log::info;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Name of the baseline in reports
pub const BASELINE_NAME: &str = "baseline";

/// Compare housing price models against the average price per group baseline
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Action to perform
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate the baseline and saved models on the same train/test splits
    Compare(CompareArgs),
    /// Fit the baseline, report its errors and optionally save it
    Fit(FitArgs),
}

/// Dataset options shared by subcommands
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Train CSV file
    #[arg(long, requires = "test", conflicts_with = "data")]
    pub train: Option<PathBuf>,
    /// Test CSV file
    #[arg(long, requires = "train")]
    pub test: Option<PathBuf>,
    /// Single CSV file split into train and test
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Fraction of `--data` rows used as test
    #[arg(long, default_value_t = 0.2)]
    pub test_ratio: f64,
    /// Seed of the `--data` shuffle
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Label column
    #[arg(long, default_value = "SalePrice")]
    pub target: String,
    /// Column whose values define the baseline groups
    #[arg(long, default_value = DEFAULT_GROUP_COLUMN)]
    pub group_column: String,
    /// Error metric: mae, mse or rmse
    #[arg(long, default_value = "rmse")]
    pub metric: String,
}

/// Options of the `compare` subcommand
#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    /// Dataset options
    #[command(flatten)]
    pub data: DataArgs,
    /// Saved model to compare, as `PATH` or `NAME=PATH` (repeatable)
    #[arg(long = "model", value_name = "[NAME=]PATH")]
    pub models: Vec<String>,
    /// Do not include the baseline in the comparison
    #[arg(long)]
    pub no_baseline: bool,
    /// Save the fitted baseline as json
    #[arg(long)]
    pub save: Option<PathBuf>,
}

/// Options of the `fit` subcommand
#[derive(Args, Debug, Clone)]
pub struct FitArgs {
    /// Dataset options
    #[command(flatten)]
    pub data: DataArgs,
    /// Save the fitted baseline as json
    #[arg(long)]
    pub save: Option<PathBuf>,
}

impl DataArgs {
    /// CSV options forcing the group column to be categorical
    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions::default().categorical_columns(&[self.group_column.as_str()])
    }

    /// Parse the metric name
    pub fn metric(&self) -> anyhow::Result<ErrorMetric> {
        Ok(self.metric.parse::<ErrorMetric>()?)
    }

    /// Load train and test splits
    pub fn load(&self) -> anyhow::Result<(Split, Split)> {
        let options = self.csv_options();
        match (&self.train, &self.test, &self.data) {
            (Some(train), Some(test), None) => {
                let train = load_split(train, &self.target, &options)
                    .with_context(|| format!("Cannot load train data from {}", train.display()))?;
                let test = load_split(test, &self.target, &options)
                    .with_context(|| format!("Cannot load test data from {}", test.display()))?;
                Ok((train, test))
            }
            (None, None, Some(data)) => {
                let all = load_split(data, &self.target, &options)
                    .with_context(|| format!("Cannot load data from {}", data.display()))?;
                let (train, test) = train_test_split(&all, self.test_ratio, self.seed)?;
                info!(
                    "{} rows split into {} train and {} test rows (seed {})",
                    all.len(),
                    train.len(),
                    test.len(),
                    self.seed
                );
                Ok((train, test))
            }
            _ => bail!("Either --train and --test, or --data has to be given"),
        }
    }
}

/// Fit the average per group baseline on `train`
pub fn fit_baseline(group_column: &str, train: &Split) -> anyhow::Result<GroupAverageRegressor> {
    let (features, labels) = train.clone().into_parts();
    let dataset = DatasetBase::new(features, labels);
    let model = GroupAverageRegressor::params(group_column)
        .check()?
        .fit(&dataset)?;
    info!("Baseline fitted: {}", model);
    Ok(model)
}

/// Split a `[NAME=]PATH` model argument, the name defaulting to the file stem
fn model_entry(arg: &str) -> (String, PathBuf) {
    match arg.split_once('=') {
        Some((name, path)) if !name.is_empty() => (name.to_string(), PathBuf::from(path)),
        _ => {
            let path = PathBuf::from(arg);
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| arg.to_string());
            (name, path)
        }
    }
}

/// Parse `--model` arguments, rejecting names given to more than one model
fn model_entries(args: &[String], with_baseline: bool) -> anyhow::Result<Vec<(String, PathBuf)>> {
    let mut names: HashSet<String> = HashSet::new();
    if with_baseline {
        names.insert(BASELINE_NAME.to_string());
    }
    let mut entries = Vec::with_capacity(args.len());
    for arg in args {
        let (name, path) = model_entry(arg);
        if !names.insert(name.clone()) {
            bail!(
                "Model name `{}` is used more than once, give distinct names with NAME=PATH",
                name
            );
        }
        entries.push((name, path));
    }
    Ok(entries)
}

fn save_baseline(model: &GroupAverageRegressor, path: &Path) -> anyhow::Result<()> {
    model
        .save(path)
        .with_context(|| format!("Cannot save baseline in {}", path.display()))
}

/// Run the `compare` subcommand, returning the rendered report
pub fn compare(args: &CompareArgs) -> anyhow::Result<String> {
    let metric = args.data.metric()?;
    let entries = model_entries(&args.models, !args.no_baseline)?;
    let (train, test) = args.data.load()?;

    let mut comparison = Comparison::new();
    if !args.no_baseline {
        let baseline = fit_baseline(&args.data.group_column, &train)?;
        if let Some(path) = &args.save {
            save_baseline(&baseline, path)?;
        }
        comparison.push(BASELINE_NAME, Box::new(baseline));
    }
    for (name, path) in entries {
        let model = load_model(&path)
            .with_context(|| format!("Cannot load model {} from {}", name, path.display()))?;
        comparison.push(name, Box::new(model) as Box<dyn Regressor>);
    }
    if comparison.is_empty() {
        bail!("Nothing to compare: give at least one --model or keep the baseline");
    }

    let outcomes = comparison.run(&metric, &train, &test);
    let report = Report::new(metric.name(), &outcomes);
    if report.n_failures() > 0 {
        log::warn!("{} of {} evaluations failed", report.n_failures(), outcomes.len());
    }
    Ok(report.to_string())
}

/// Run the `fit` subcommand, returning the rendered report of the baseline
pub fn fit(args: &FitArgs) -> anyhow::Result<String> {
    let metric = args.data.metric()?;
    let (train, test) = args.data.load()?;
    let baseline = fit_baseline(&args.data.group_column, &train)?;
    if let Some(path) = &args.save {
        save_baseline(&baseline, path)?;
    }
    let outcomes = Comparison::new()
        .with_model(BASELINE_NAME, Box::new(baseline))
        .run(&metric, &train, &test);
    Ok(Report::new(metric.name(), &outcomes).to_string())
}

/// Dispatch the parsed command line
pub fn run(cli: &Cli) -> anyhow::Result<String> {
    match &cli.command {
        Command::Compare(args) => compare(args),
        Command::Fit(args) => fit(args),
    }
}
