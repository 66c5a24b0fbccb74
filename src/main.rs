//! DCA Returns CLI
//!
//! Sweeps a staged investment plan across starting years and writes one ARR
//! curve per starting year, ready for plotting (x = year, y = ARR %, one line
//! per starting year).

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use log::info;
use serde::Serialize;

use dca_returns::market::loader::DEFAULT_DATA_PATH;
use dca_returns::plan::{DEFAULT_NUM_INSTALLMENTS, DEFAULT_TOTAL_PRINCIPAL};
use dca_returns::returns::ArrSummary;
use dca_returns::{
    ArrSeries, CalculationConfig, HoldingPeriod, IndexDataset, IndexSelection, InvestmentPlan,
    SweepRunner,
};

/// Annualized returns of dollar-cost-averaged index investments
#[derive(Parser, Debug)]
#[command(name = "dca_returns", version, about)]
struct Cli {
    /// Bundled index to analyse
    #[arg(long, value_enum, default_value = "msci-world")]
    index: IndexArg,

    /// Read the bundled index from CSV files in this directory instead of the built-in tables
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Custom price CSV (Year,Close); requires --inflation
    #[arg(long, requires = "inflation", conflicts_with = "data_dir")]
    prices: Option<PathBuf>,

    /// Custom inflation CSV (Year,RatePercent); requires --prices
    #[arg(long, requires = "prices", conflicts_with = "data_dir")]
    inflation: Option<PathBuf>,

    /// Number of equal yearly installments
    #[arg(long, default_value_t = DEFAULT_NUM_INSTALLMENTS)]
    installments: u32,

    /// Total principal spread across the installments
    #[arg(long, default_value_t = DEFAULT_TOTAL_PRINCIPAL)]
    principal: f64,

    /// Report nominal returns instead of inflation-adjusted returns
    #[arg(long)]
    nominal: bool,

    /// Holding-period convention for annualizing
    #[arg(long, value_enum, default_value = "inclusive")]
    holding_period: HoldingPeriodArg,

    /// Starting years to evaluate (default: every year but the last)
    #[arg(long = "start-year")]
    start_years: Vec<i32>,

    /// Output CSV path for the curves
    #[arg(long, default_value = "arr_curves.csv")]
    output: PathBuf,

    /// Print a JSON report to stdout instead of the text summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IndexArg {
    MsciWorld,
    Nasdaq,
}

impl From<IndexArg> for IndexSelection {
    fn from(arg: IndexArg) -> Self {
        match arg {
            IndexArg::MsciWorld => IndexSelection::MsciWorld,
            IndexArg::Nasdaq => IndexSelection::Nasdaq,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HoldingPeriodArg {
    Inclusive,
    Elapsed,
}

impl From<HoldingPeriodArg> for HoldingPeriod {
    fn from(arg: HoldingPeriodArg) -> Self {
        match arg {
            HoldingPeriodArg::Inclusive => HoldingPeriod::Inclusive,
            HoldingPeriodArg::Elapsed => HoldingPeriod::Elapsed,
        }
    }
}

/// One plotted point: long format, keyed by starting year
#[derive(Debug, Serialize)]
struct CurveRow {
    #[serde(rename = "StartYear")]
    start_year: i32,
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "ArrPct")]
    arr_pct: f64,
    #[serde(rename = "TotalValue")]
    total_value: f64,
    #[serde(rename = "TotalInvested")]
    total_invested: f64,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    generated_at: DateTime<Utc>,
    index: &'a str,
    num_installments: u32,
    total_principal: f64,
    inflation_adjusted: bool,
    holding_period: HoldingPeriod,
    summaries: Vec<ArrSummary>,
    curves: &'a [ArrSeries],
    execution_time_ms: u64,
}

fn load_dataset(cli: &Cli) -> Result<IndexDataset> {
    let selection = IndexSelection::from(cli.index);

    match (&cli.prices, &cli.inflation, &cli.data_dir) {
        (Some(prices), Some(inflation), _) => {
            let name = prices
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "custom".to_string());
            IndexDataset::from_csv_paths(name, prices, inflation).with_context(|| {
                format!(
                    "Failed to load {} / {}",
                    prices.display(),
                    inflation.display()
                )
            })
        }
        (None, None, Some(dir)) => IndexDataset::from_data_dir(dir, selection)
            .with_context(|| format!("Failed to load {} from {}", selection, dir.display())),
        (None, None, None) => Ok(IndexDataset::from_selection(selection)),
        _ => bail!("--prices and --inflation must be given together"),
    }
}

fn write_curves(path: &Path, curves: &[ArrSeries]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);

    for curve in curves {
        for point in &curve.points {
            writer.serialize(CurveRow {
                start_year: curve.start_year,
                year: point.year,
                arr_pct: point.arr_pct,
                total_value: point.total_value,
                total_invested: point.total_invested,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

fn print_summary(dataset: &IndexDataset, plan: &InvestmentPlan, curves: &[ArrSeries]) {
    let first = dataset.prices.first_year();
    let last = dataset.prices.last_year();
    let label = if plan.inflation_adjusted {
        "Inflation-adjusted"
    } else {
        "Nominal"
    };

    println!(
        "{} ARR (%) in {} ({}-{}) with {} yearly installments",
        label, dataset.name, first, last, plan.num_installments
    );
    println!("{}", "=".repeat(72));
    println!(
        "{:>6} {:>6} {:>10} {:>10} {:>10} {:>10} {:>14}",
        "Start", "Years", "Final", "Min", "Max", "Mean", "FinalValue"
    );
    println!("{}", "-".repeat(72));

    for curve in curves {
        let s = curve.summary();
        println!(
            "{:>6} {:>6} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>14.2}",
            s.start_year,
            s.years,
            s.final_arr_pct,
            s.min_arr_pct,
            s.max_arr_pct,
            s.mean_arr_pct,
            s.final_value
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let start = Instant::now();

    if cli.data_dir.is_none() && cli.prices.is_none() {
        info!("Using built-in tables (CSV copies live in {}/)", DEFAULT_DATA_PATH);
    }

    let dataset = load_dataset(&cli)?;
    let config = CalculationConfig {
        holding_period: cli.holding_period.into(),
    };
    let runner = SweepRunner::new(dataset).with_config(config);

    let start_years = if cli.start_years.is_empty() {
        runner.dataset().starting_years()
    } else {
        cli.start_years.clone()
    };

    let plan = InvestmentPlan::new(
        start_years[0],
        cli.installments,
        cli.principal,
        !cli.nominal,
    );

    let curves = runner
        .sweep(&plan, &start_years)
        .with_context(|| format!("ARR sweep over {} failed", runner.dataset().name))?;

    write_curves(&cli.output, &curves)?;

    if cli.json {
        let report = Report {
            generated_at: Utc::now(),
            index: &runner.dataset().name,
            num_installments: plan.num_installments,
            total_principal: plan.total_principal,
            inflation_adjusted: plan.inflation_adjusted,
            holding_period: runner.config().holding_period,
            summaries: curves.iter().map(|c| c.summary()).collect(),
            curves: &curves,
            execution_time_ms: start.elapsed().as_millis() as u64,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(runner.dataset(), &plan, &curves);
        println!("\n{} curves written to: {}", curves.len(), cli.output.display());
        println!("Total time: {:?}", start.elapsed());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["dca_returns"]).unwrap();
        assert_eq!(cli.installments, DEFAULT_NUM_INSTALLMENTS);
        assert!(!cli.nominal);
        assert!(cli.start_years.is_empty());
    }

    #[test]
    fn test_custom_csvs_conflict_with_data_dir() {
        let err = Cli::try_parse_from([
            "dca_returns",
            "--data-dir",
            "data",
            "--prices",
            "p.csv",
            "--inflation",
            "i.csv",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let cli = Cli::try_parse_from(["dca_returns", "--prices", "p.csv", "--inflation", "i.csv"])
            .unwrap();
        assert!(cli.data_dir.is_none());
        assert_eq!(cli.prices, Some(PathBuf::from("p.csv")));
    }

    #[test]
    fn test_prices_require_inflation() {
        let err = Cli::try_parse_from(["dca_returns", "--prices", "p.csv"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
