//! Market data: index price series, inflation series and bundled datasets

mod dataset;
pub mod loader;
mod series;

pub use dataset::{msci_world, nasdaq, us_inflation, IndexDataset, IndexSelection};
pub use loader::{load_inflation_series, load_price_series, DEFAULT_DATA_PATH};
pub use series::{InflationPoint, InflationSeries, PricePoint, PriceSeries};
