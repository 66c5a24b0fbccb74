//! Compare installment counts across every starting year
//!
//! For each bundled index and each installment count from 1 to 10, sweeps
//! all starting years and reports the spread of final ARR values.

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use dca_returns::plan::DEFAULT_TOTAL_PRINCIPAL;
use dca_returns::{IndexSelection, InvestmentPlan, SweepRunner};

const MAX_INSTALLMENTS: u32 = 10;

fn main() -> Result<()> {
    env_logger::init();

    let output_path = "installment_summary.csv";
    let mut file = File::create(output_path).context("Failed to create output file")?;
    writeln!(
        file,
        "Index,Installments,InflationAdjusted,Curves,WorstFinalArr,MeanFinalArr,BestFinalArr"
    )?;

    for selection in [IndexSelection::MsciWorld, IndexSelection::Nasdaq] {
        let runner = SweepRunner::from_selection(selection);
        let first_year = runner.dataset().prices.first_year();

        for inflation_adjusted in [true, false] {
            for installments in 1..=MAX_INSTALLMENTS {
                let plan = InvestmentPlan::new(
                    first_year,
                    installments,
                    DEFAULT_TOTAL_PRINCIPAL,
                    inflation_adjusted,
                );
                let curves = runner.sweep_all(&plan)?;

                let finals: Vec<f64> = curves
                    .iter()
                    .filter_map(|c| c.last().map(|p| p.arr_pct))
                    .collect();
                let worst = finals.iter().copied().fold(f64::INFINITY, f64::min);
                let best = finals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                let mean = finals.iter().sum::<f64>() / finals.len().max(1) as f64;

                writeln!(
                    file,
                    "{},{},{},{},{:.4},{:.4},{:.4}",
                    selection,
                    installments,
                    inflation_adjusted,
                    finals.len(),
                    worst,
                    mean,
                    best
                )?;
            }
        }

        println!(
            "{}: {} starting years summarized",
            selection,
            runner.dataset().starting_years().len()
        );
    }

    println!("Output written to {}", output_path);
    Ok(())
}
