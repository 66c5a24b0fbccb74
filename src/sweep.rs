//! Start-year sweep for building a family of ARR curves
//!
//! Holds one dataset and evaluates the same plan from many starting years.
//! Each starting year is independent, so the sweep runs on the rayon pool.

use std::path::Path;

use log::info;
use rayon::prelude::*;

use crate::error::{ArrResult, DataError};
use crate::market::{IndexDataset, IndexSelection};
use crate::plan::InvestmentPlan;
use crate::returns::{ArrEngine, ArrSeries, CalculationConfig};

/// Pre-loaded runner for sweeping a plan across starting years
///
/// # Example
/// ```ignore
/// let runner = SweepRunner::new(IndexDataset::from_selection(IndexSelection::MsciWorld));
/// let plan = InvestmentPlan::new(1990, 3, 100_000.0, true);
/// let curves = runner.sweep_all(&plan)?;
/// ```
#[derive(Debug, Clone)]
pub struct SweepRunner {
    dataset: IndexDataset,
    config: CalculationConfig,
}

impl SweepRunner {
    pub fn new(dataset: IndexDataset) -> Self {
        Self {
            dataset,
            config: CalculationConfig::default(),
        }
    }

    /// Create runner for one of the bundled datasets
    pub fn from_selection(selection: IndexSelection) -> Self {
        Self::new(IndexDataset::from_selection(selection))
    }

    /// Create runner by loading series from CSV files
    pub fn from_csv_paths(
        name: &str,
        prices_path: &Path,
        inflation_path: &Path,
    ) -> Result<Self, DataError> {
        Ok(Self::new(IndexDataset::from_csv_paths(
            name,
            prices_path,
            inflation_path,
        )?))
    }

    pub fn with_config(mut self, config: CalculationConfig) -> Self {
        self.config = config;
        self
    }

    fn engine(&self) -> ArrEngine<'_> {
        ArrEngine::for_dataset(&self.dataset, self.config.clone())
    }

    /// Run a single plan
    pub fn run(&self, plan: &InvestmentPlan) -> ArrResult<ArrSeries> {
        self.engine().compute(plan)
    }

    /// Run `plan` once per starting year, in parallel
    ///
    /// Output order follows `start_years`. The first failure fails the sweep.
    pub fn sweep(&self, plan: &InvestmentPlan, start_years: &[i32]) -> ArrResult<Vec<ArrSeries>> {
        info!(
            "Sweeping {} starting years over {} ({} installments, inflation_adjusted={})",
            start_years.len(),
            self.dataset.name,
            plan.num_installments,
            plan.inflation_adjusted
        );

        let engine = self.engine();
        start_years
            .par_iter()
            .map(|&year| engine.compute(&plan.with_start_year(year)))
            .collect()
    }

    /// Same as `sweep`, evaluated on the calling thread
    pub fn sweep_sequential(
        &self,
        plan: &InvestmentPlan,
        start_years: &[i32],
    ) -> ArrResult<Vec<ArrSeries>> {
        let engine = self.engine();
        start_years
            .iter()
            .map(|&year| engine.compute(&plan.with_start_year(year)))
            .collect()
    }

    /// Sweep every candidate starting year of the dataset
    pub fn sweep_all(&self, plan: &InvestmentPlan) -> ArrResult<Vec<ArrSeries>> {
        self.sweep(plan, &self.dataset.starting_years())
    }

    pub fn dataset(&self) -> &IndexDataset {
        &self.dataset
    }

    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }
}
