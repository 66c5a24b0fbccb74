//! Index datasets: a price series paired with the inflation series used to deflate it

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::loader;
use super::series::{InflationSeries, PriceSeries};
use crate::error::{ArrError, ArrResult, DataError};

/// Bundled index choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexSelection {
    MsciWorld,
    Nasdaq,
}

impl IndexSelection {
    pub fn label(&self) -> &'static str {
        match self {
            IndexSelection::MsciWorld => "MSCI World",
            IndexSelection::Nasdaq => "NASDAQ",
        }
    }

    /// CSV file name for this index under the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            IndexSelection::MsciWorld => "msci_world.csv",
            IndexSelection::Nasdaq => "nasdaq.csv",
        }
    }
}

impl fmt::Display for IndexSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named price series with its inflation series
#[derive(Debug, Clone)]
pub struct IndexDataset {
    pub name: String,
    pub prices: PriceSeries,
    pub inflation: InflationSeries,
}

impl IndexDataset {
    /// Pair a price series with inflation data
    ///
    /// Inflation years must lie within the price range. The inflation series
    /// may be shorter than the price series (or empty); coverage is only
    /// enforced when an inflation-adjusted calculation asks for it.
    pub fn new(
        name: impl Into<String>,
        prices: PriceSeries,
        inflation: InflationSeries,
    ) -> ArrResult<Self> {
        if let (Some(first), Some(last)) = (inflation.first_year(), inflation.last_year()) {
            if first < prices.first_year() || last > prices.last_year() {
                return Err(ArrError::invalid_input(
                    "inflation_series",
                    format!(
                        "inflation years {}-{} fall outside price years {}-{}",
                        first,
                        last,
                        prices.first_year(),
                        prices.last_year()
                    ),
                ));
            }
        }

        Ok(Self {
            name: name.into(),
            prices,
            inflation,
        })
    }

    /// One of the bundled historical datasets
    pub fn from_selection(selection: IndexSelection) -> Self {
        match selection {
            IndexSelection::MsciWorld => msci_world(),
            IndexSelection::Nasdaq => nasdaq(),
        }
    }

    /// Load a dataset from a price CSV and an inflation CSV
    ///
    /// The inflation series is trimmed to the price range, so a single
    /// long inflation file can serve several indices.
    pub fn from_csv_paths(
        name: impl Into<String>,
        prices_path: &Path,
        inflation_path: &Path,
    ) -> Result<Self, DataError> {
        let prices = loader::load_price_series(prices_path)?;
        let inflation = loader::load_inflation_series(inflation_path)?;
        let inflation = inflation.clipped_to(&prices);
        Ok(Self::new(name, prices, inflation)?)
    }

    /// Load a bundled index from a data directory laid out like `data/`
    pub fn from_data_dir(dir: &Path, selection: IndexSelection) -> Result<Self, DataError> {
        Self::from_csv_paths(
            selection.label(),
            &dir.join(selection.file_name()),
            &dir.join(loader::INFLATION_FILE_NAME),
        )
    }

    /// Candidate starting years: the first through the second-to-last year
    ///
    /// A single-year series has just that one year.
    pub fn starting_years(&self) -> Vec<i32> {
        let first = self.prices.first_year();
        let last = self.prices.last_year();
        if first == last {
            vec![first]
        } else {
            (first..last).collect()
        }
    }
}

/// US CPI inflation, percent per year, 1990-2023
pub fn us_inflation() -> InflationSeries {
    const FIRST_YEAR: i32 = 1990;
    const RATES: [f64; 34] = [
        5.4, 4.2, 3.0, 3.0, 2.6, 2.8, 3.0, 2.3, 1.6, 2.2, // 1990-1999
        3.4, 2.8, 1.6, 2.3, 2.7, 3.4, 3.2, 2.9, 3.8, -0.4, // 2000-2009
        1.6, 3.2, 2.1, 1.5, 1.6, 0.1, 1.3, 2.1, 2.4, 1.8, // 2010-2019
        1.2, 4.7, 8.0, 4.0, // 2020-2023
    ];

    InflationSeries::from_table(FIRST_YEAR, &RATES)
}

/// MSCI World year-end closes, 1990-2023
pub fn msci_world() -> IndexDataset {
    const FIRST_YEAR: i32 = 1990;
    const CLOSES: [f64; 34] = [
        372.12, 431.00, 416.58, 487.15, 492.34, 573.71, 668.60, 760.37, 906.94, 1125.41,
        1035.51, 860.56, 671.97, 834.46, 937.66, 980.27, 1128.04, 1312.94, 789.84, 1058.07,
        1168.80, 1073.44, 1238.92, 1491.48, 1584.31, 1560.51, 1674.43, 2036.67, 1899.39, 2323.14,
        2699.15, 3354.00, 2702.29, 3295.00,
    ];

    bundled(IndexSelection::MsciWorld, FIRST_YEAR, &CLOSES)
}

/// NASDAQ Composite year-end closes, 1997-2023
pub fn nasdaq() -> IndexDataset {
    const FIRST_YEAR: i32 = 1997;
    const CLOSES: [f64; 27] = [
        1570.35, 2192.69, 4069.31, 2470.52, 1950.40, 1340.43, 2003.37, 2178.34, 2205.32, 2415.29,
        2652.28, 1577.03, 2269.15, 2652.87, 2605.15, 3019.51, 4058.62, 4736.05, 5007.41, 5383.12,
        6903.39, 6635.28, 8972.60, 12888.28, 15744.52, 10535.48, 14056.72,
    ];

    bundled(IndexSelection::Nasdaq, FIRST_YEAR, &CLOSES)
}

fn bundled(selection: IndexSelection, first_year: i32, closes: &[f64]) -> IndexDataset {
    let prices = PriceSeries::from_table(first_year, closes);
    let inflation = us_inflation().clipped_to(&prices);

    IndexDataset {
        name: selection.label().to_string(),
        prices,
        inflation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_msci_world() {
        let dataset = IndexDataset::from_selection(IndexSelection::MsciWorld);

        assert_eq!(dataset.name, "MSCI World");
        assert_eq!(dataset.prices.first_year(), 1990);
        assert_eq!(dataset.prices.last_year(), 2023);
        assert_eq!(dataset.prices.close(2008), Some(789.84));
        assert!(dataset.inflation.covers(1990, 2023));
        assert_eq!(dataset.inflation.rate(2009), Some(-0.4));
    }

    #[test]
    fn test_bundled_nasdaq_aligns_inflation() {
        let dataset = IndexDataset::from_selection(IndexSelection::Nasdaq);

        assert_eq!(dataset.prices.first_year(), 1997);
        assert_eq!(dataset.prices.last_year(), 2023);
        assert_eq!(dataset.inflation.first_year(), Some(1997));
        assert_eq!(dataset.inflation.len(), 27);
        assert_eq!(dataset.inflation.rate(1997), Some(2.3));
        assert_eq!(dataset.inflation.rate(2022), Some(8.0));
    }

    #[test]
    fn test_starting_years() {
        let dataset = IndexDataset::from_selection(IndexSelection::MsciWorld);
        let years = dataset.starting_years();
        assert_eq!(years.first(), Some(&1990));
        assert_eq!(years.last(), Some(&2022));
        assert_eq!(years.len(), 33);

        let single = IndexDataset::new(
            "single",
            PriceSeries::from_closes(2020, &[50.0]).unwrap(),
            InflationSeries::empty(),
        )
        .unwrap();
        assert_eq!(single.starting_years(), vec![2020]);
    }

    #[test]
    fn test_inflation_outside_price_range_rejected() {
        let prices = PriceSeries::from_closes(2000, &[1.0, 2.0]).unwrap();
        let inflation = InflationSeries::from_rates(1999, &[1.0, 1.0, 1.0]).unwrap();

        assert!(IndexDataset::new("bad", prices.clone(), inflation.clone()).is_err());

        let clipped = inflation.clipped_to(&prices);
        assert_eq!(clipped.first_year(), Some(2000));
        assert!(IndexDataset::new("ok", prices, clipped).is_ok());
    }
}
