//! CSV-based series loader
//!
//! Price files have columns `Year,Close`; inflation files have `Year,RatePercent`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::Reader;
use log::debug;

use super::series::{InflationPoint, InflationSeries, PricePoint, PriceSeries};
use crate::error::DataError;

/// Default path to the bundled data directory
pub const DEFAULT_DATA_PATH: &str = "data";

/// Inflation file name inside the data directory
pub const INFLATION_FILE_NAME: &str = "us_inflation.csv";

#[derive(Debug, serde::Deserialize)]
struct PriceRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "Close")]
    close: f64,
}

#[derive(Debug, serde::Deserialize)]
struct InflationRow {
    #[serde(rename = "Year")]
    year: i32,
    #[serde(rename = "RatePercent")]
    rate_pct: f64,
}

fn open(path: &Path) -> Result<File, DataError> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Load a price series from a CSV file
pub fn load_price_series(path: &Path) -> Result<PriceSeries, DataError> {
    let series = load_price_series_from_reader(open(path)?)?;
    debug!(
        "Loaded {} prices ({}-{}) from {}",
        series.len(),
        series.first_year(),
        series.last_year(),
        path.display()
    );
    Ok(series)
}

/// Load a price series from any reader (e.g., string buffer, network stream)
pub fn load_price_series_from_reader<R: Read>(reader: R) -> Result<PriceSeries, DataError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: PriceRow = result?;
        points.push(PricePoint {
            year: row.year,
            close: row.close,
        });
    }

    Ok(PriceSeries::new(points)?)
}

/// Load an inflation series from a CSV file
pub fn load_inflation_series(path: &Path) -> Result<InflationSeries, DataError> {
    let series = load_inflation_series_from_reader(open(path)?)?;
    debug!("Loaded {} inflation rates from {}", series.len(), path.display());
    Ok(series)
}

pub fn load_inflation_series_from_reader<R: Read>(reader: R) -> Result<InflationSeries, DataError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut points = Vec::new();

    for result in csv_reader.deserialize() {
        let row: InflationRow = result?;
        points.push(InflationPoint {
            year: row.year,
            rate_pct: row.rate_pct,
        });
    }

    Ok(InflationSeries::new(points)?)
}
