//! DCA Returns - annualized return engine for staged index investments
//!
//! This library provides:
//! - Validated yearly price and inflation series, with bundled MSCI World and NASDAQ data
//! - Investment plans split into equal yearly installments
//! - Per-year annualized rate of return (ARR), nominal or inflation-adjusted
//! - Parallel sweeps across starting years for comparing curves

pub mod error;
pub mod market;
pub mod plan;
pub mod returns;
pub mod sweep;

// Re-export commonly used types
pub use error::{ArrError, ArrResult, DataError, ErrorKind};
pub use market::{IndexDataset, IndexSelection, InflationSeries, PriceSeries};
pub use plan::{Installment, InvestmentPlan};
pub use returns::{
    compute_arr_series, ArrEngine, ArrPoint, ArrSeries, CalculationConfig, HoldingPeriod,
};
pub use sweep::SweepRunner;
