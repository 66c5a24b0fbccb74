//! Annualized return engine for staged (dollar-cost-averaged) investments

mod engine;
mod series;
mod tranche;

pub use engine::{
    annualized_return_pct, compute_arr_series, ArrEngine, CalculationConfig, HoldingPeriod,
};
pub use series::{ArrPoint, ArrSeries, ArrSummary};
pub use tranche::Tranche;
