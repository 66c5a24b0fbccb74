//! Core ARR engine for staged index investments

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::series::{ArrPoint, ArrSeries};
use super::tranche::Tranche;
use crate::error::{ArrError, ArrResult};
use crate::market::{IndexDataset, InflationSeries, PriceSeries};
use crate::plan::InvestmentPlan;

/// How many years an evaluation year counts as having been held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HoldingPeriod {
    /// The start year counts as year 1: `year - start_year + 1`
    #[default]
    Inclusive,
    /// Whole years since the start: `year - start_year`; zero years gives 0%
    Elapsed,
}

impl HoldingPeriod {
    pub fn years(&self, start_year: i32, year: i32) -> u32 {
        let elapsed = (year - start_year).max(0) as u32;
        match self {
            HoldingPeriod::Inclusive => elapsed + 1,
            HoldingPeriod::Elapsed => elapsed,
        }
    }
}

/// Configuration for ARR calculations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationConfig {
    pub holding_period: HoldingPeriod,
}

/// ARR engine over one price series and its inflation series
///
/// Stateless apart from the borrowed input tables, so one engine can be
/// shared across threads and asked for any number of plans.
#[derive(Debug, Clone)]
pub struct ArrEngine<'a> {
    prices: &'a PriceSeries,
    inflation: &'a InflationSeries,
    config: CalculationConfig,
}

impl<'a> ArrEngine<'a> {
    pub fn new(
        prices: &'a PriceSeries,
        inflation: &'a InflationSeries,
        config: CalculationConfig,
    ) -> Self {
        Self {
            prices,
            inflation,
            config,
        }
    }

    pub fn for_dataset(dataset: &'a IndexDataset, config: CalculationConfig) -> Self {
        Self::new(&dataset.prices, &dataset.inflation, config)
    }

    pub fn config(&self) -> &CalculationConfig {
        &self.config
    }

    /// ARR for every year from the plan's start year to the end of the series
    pub fn compute(&self, plan: &InvestmentPlan) -> ArrResult<ArrSeries> {
        plan.validate(self.prices)?;

        let last_year = self.prices.last_year();
        if plan.inflation_adjusted && !self.inflation.covers(plan.start_year, last_year) {
            return Err(ArrError::InsufficientData(format!(
                "inflation series ({}) does not cover {}-{}",
                describe_range(self.inflation),
                plan.start_year,
                last_year
            )));
        }

        // Validated start year lies within the series, so this is at least 1
        let span = (last_year - plan.start_year + 1) as usize;
        let tranches: Vec<Tranche> = plan
            .installments()
            .take(span)
            .filter_map(|installment| Tranche::deploy(&installment, self.prices))
            .collect();

        if tranches.len() < plan.num_installments as usize {
            warn!(
                "Only {} of {} installments from {} fall within the price series (ends {})",
                tranches.len(),
                plan.num_installments,
                plan.start_year,
                last_year
            );
        }

        let mut series = ArrSeries::with_capacity(plan.start_year, span);

        for year in plan.start_year..=last_year {
            let point = self.evaluate_year(plan, &tranches, year)?;
            series.add_point(point);
        }

        debug!(
            "Computed {} ARR points from {} ({} installments, inflation_adjusted={})",
            series.len(),
            plan.start_year,
            plan.num_installments,
            plan.inflation_adjusted
        );

        Ok(series)
    }

    /// Value the position as of a single year
    fn evaluate_year(
        &self,
        plan: &InvestmentPlan,
        tranches: &[Tranche],
        year: i32,
    ) -> ArrResult<ArrPoint> {
        let close = self.prices.close(year).ok_or_else(|| {
            ArrError::InsufficientData(format!("no price for {}", year))
        })?;

        let mut total_value = 0.0;
        let mut deployed_tranches = 0u32;

        for tranche in tranches.iter().filter(|t| t.is_deployed_by(year)) {
            total_value += tranche.value_at(year, close, self.inflation, plan.inflation_adjusted)?;
            deployed_tranches += 1;
        }

        let total_invested = deployed_tranches as f64 * plan.installment_amount();
        let years = self.config.holding_period.years(plan.start_year, year);
        let arr_pct = annualized_return_pct(total_value, total_invested, years, year)?;

        Ok(ArrPoint {
            year,
            arr_pct,
            total_value,
            total_invested,
            deployed_tranches,
        })
    }
}

/// Annualized return in percent: `((value / invested)^(1 / years) - 1) * 100`
///
/// Nothing invested, or a zero-length holding period, gives 0. A
/// non-positive ratio has no real root and is reported as a domain error.
pub fn annualized_return_pct(
    total_value: f64,
    total_invested: f64,
    years: u32,
    year: i32,
) -> ArrResult<f64> {
    if total_invested == 0.0 || years == 0 {
        return Ok(0.0);
    }

    let ratio = total_value / total_invested;
    if !ratio.is_finite() || ratio <= 0.0 {
        return Err(ArrError::numeric_domain(
            year,
            format!(
                "value/invested ratio {} ({} / {}) cannot be annualized",
                ratio, total_value, total_invested
            ),
        ));
    }

    Ok((ratio.powf(1.0 / years as f64) - 1.0) * 100.0)
}

/// Compute the ARR series for one starting year
///
/// Uses the default `CalculationConfig` (inclusive holding period).
pub fn compute_arr_series(
    prices: &PriceSeries,
    inflation: &InflationSeries,
    start_year: i32,
    num_installments: u32,
    total_principal: f64,
    inflation_adjusted: bool,
) -> ArrResult<ArrSeries> {
    let plan = InvestmentPlan::new(
        start_year,
        num_installments,
        total_principal,
        inflation_adjusted,
    );
    ArrEngine::new(prices, inflation, CalculationConfig::default()).compute(&plan)
}

fn describe_range(inflation: &InflationSeries) -> String {
    match (inflation.first_year(), inflation.last_year()) {
        (Some(first), Some(last)) => format!("{}-{}", first, last),
        _ => "empty".to_string(),
    }
}
