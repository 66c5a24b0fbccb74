//! Yearly price and inflation series
//!
//! Both series are year-contiguous: one entry per year, strictly increasing,
//! no gaps. Lookups by year are therefore direct index offsets.

use serde::{Deserialize, Serialize};

use crate::error::{ArrError, ArrResult};

/// Closing value of an index for one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub year: i32,
    pub close: f64,
}

/// Inflation rate for one year, in percent (negative for deflation)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InflationPoint {
    pub year: i32,
    pub rate_pct: f64,
}

/// Validated yearly closing prices of a market index
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a price series, rejecting empty, non-contiguous or non-positive data
    pub fn new(points: Vec<PricePoint>) -> ArrResult<Self> {
        if points.is_empty() {
            return Err(ArrError::invalid_input("price_series", "series is empty"));
        }

        check_contiguous("price_series", points.iter().map(|p| p.year))?;

        for point in &points {
            if !point.close.is_finite() || point.close <= 0.0 {
                return Err(ArrError::invalid_input(
                    "price_series",
                    format!("close for {} must be positive, got {}", point.year, point.close),
                ));
            }
        }

        Ok(Self { points })
    }

    /// Build a price series from consecutive closes starting at `first_year`
    pub fn from_closes(first_year: i32, closes: &[f64]) -> ArrResult<Self> {
        Self::new(
            closes
                .iter()
                .zip(first_year..)
                .map(|(&close, year)| PricePoint { year, close })
                .collect(),
        )
    }

    /// Build from a bundled constant table known to be valid
    pub(crate) fn from_table(first_year: i32, closes: &[f64]) -> Self {
        let points: Vec<PricePoint> = closes
            .iter()
            .zip(first_year..)
            .map(|(&close, year)| PricePoint { year, close })
            .collect();
        debug_assert!(Self::new(points.clone()).is_ok());
        Self { points }
    }

    pub fn first_year(&self) -> i32 {
        self.points[0].year
    }

    pub fn last_year(&self) -> i32 {
        self.points[self.points.len() - 1].year
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, year: i32) -> bool {
        year >= self.first_year() && year <= self.last_year()
    }

    /// Closing value for `year`, if the series covers it
    pub fn close(&self, year: i32) -> Option<f64> {
        if !self.contains(year) {
            return None;
        }
        self.points
            .get((year - self.first_year()) as usize)
            .map(|p| p.close)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.points.iter().map(|p| p.year)
    }
}

/// Validated yearly inflation rates
///
/// May be empty when only nominal returns are needed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InflationSeries {
    points: Vec<InflationPoint>,
}

impl InflationSeries {
    pub fn new(points: Vec<InflationPoint>) -> ArrResult<Self> {
        check_contiguous("inflation_series", points.iter().map(|p| p.year))?;

        if let Some(bad) = points.iter().find(|p| !p.rate_pct.is_finite()) {
            return Err(ArrError::invalid_input(
                "inflation_series",
                format!("rate for {} is not a finite number", bad.year),
            ));
        }

        Ok(Self { points })
    }

    pub fn from_rates(first_year: i32, rates: &[f64]) -> ArrResult<Self> {
        Self::new(
            rates
                .iter()
                .zip(first_year..)
                .map(|(&rate_pct, year)| InflationPoint { year, rate_pct })
                .collect(),
        )
    }

    pub(crate) fn from_table(first_year: i32, rates: &[f64]) -> Self {
        let points: Vec<InflationPoint> = rates
            .iter()
            .zip(first_year..)
            .map(|(&rate_pct, year)| InflationPoint { year, rate_pct })
            .collect();
        debug_assert!(Self::new(points.clone()).is_ok());
        Self { points }
    }

    /// Zero inflation for every year in `first_year..=last_year`
    pub fn zero(first_year: i32, last_year: i32) -> Self {
        Self {
            points: (first_year..=last_year)
                .map(|year| InflationPoint { year, rate_pct: 0.0 })
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|p| p.year)
    }

    pub fn last_year(&self) -> Option<i32> {
        self.points.last().map(|p| p.year)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Inflation rate in percent for `year`, if covered
    pub fn rate(&self, year: i32) -> Option<f64> {
        let first = self.first_year()?;
        if year < first {
            return None;
        }
        self.points.get((year - first) as usize).map(|p| p.rate_pct)
    }

    /// Whether every year in `from..=to` has a rate
    pub fn covers(&self, from: i32, to: i32) -> bool {
        match (self.first_year(), self.last_year()) {
            (Some(first), Some(last)) => first <= from && to <= last,
            _ => from > to,
        }
    }

    /// Keep only the years covered by `prices`
    ///
    /// Both series are contiguous, so the result is contiguous as well.
    pub fn clipped_to(&self, prices: &PriceSeries) -> InflationSeries {
        InflationSeries {
            points: self
                .points
                .iter()
                .filter(|p| prices.contains(p.year))
                .copied()
                .collect(),
        }
    }

    pub fn points(&self) -> &[InflationPoint] {
        &self.points
    }
}

fn check_contiguous(field: &str, mut years: impl Iterator<Item = i32>) -> ArrResult<()> {
    let Some(mut prev) = years.next() else {
        return Ok(());
    };

    for year in years {
        if year <= prev {
            return Err(ArrError::invalid_input(
                field,
                format!("years must be strictly increasing, {} follows {}", year, prev),
            ));
        }
        if year != prev + 1 {
            return Err(ArrError::invalid_input(
                field,
                format!("gap between {} and {}", prev, year),
            ));
        }
        prev = year;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_price_lookup() {
        let prices = PriceSeries::from_closes(1990, &[100.0, 110.0, 121.0]).unwrap();

        assert_eq!(prices.first_year(), 1990);
        assert_eq!(prices.last_year(), 1992);
        assert_eq!(prices.len(), 3);
        assert_eq!(prices.close(1991), Some(110.0));
        assert_eq!(prices.close(1989), None);
        assert_eq!(prices.close(1993), None);
        assert_eq!(prices.years().collect::<Vec<_>>(), vec![1990, 1991, 1992]);
    }

    #[test]
    fn test_price_series_rejects_bad_input() {
        let empty = PriceSeries::new(Vec::new()).unwrap_err();
        assert_eq!(empty.kind(), ErrorKind::InvalidInput);

        let duplicate = PriceSeries::new(vec![
            PricePoint { year: 2000, close: 1.0 },
            PricePoint { year: 2000, close: 2.0 },
        ])
        .unwrap_err();
        assert_eq!(duplicate.kind(), ErrorKind::InvalidInput);

        let decreasing = PriceSeries::new(vec![
            PricePoint { year: 2001, close: 1.0 },
            PricePoint { year: 2000, close: 2.0 },
        ])
        .unwrap_err();
        assert_eq!(decreasing.kind(), ErrorKind::InvalidInput);

        let gap = PriceSeries::new(vec![
            PricePoint { year: 2000, close: 1.0 },
            PricePoint { year: 2002, close: 2.0 },
        ])
        .unwrap_err();
        assert!(gap.to_string().contains("gap"));

        assert!(PriceSeries::from_closes(2000, &[1.0, 0.0]).is_err());
        assert!(PriceSeries::from_closes(2000, &[1.0, -5.0]).is_err());
        assert!(PriceSeries::from_closes(2000, &[f64::NAN]).is_err());
    }

    #[test]
    fn test_inflation_lookup_and_coverage() {
        let inflation = InflationSeries::from_rates(1997, &[2.3, 1.6, -0.4]).unwrap();

        assert_eq!(inflation.rate(1997), Some(2.3));
        assert_eq!(inflation.rate(1999), Some(-0.4));
        assert_eq!(inflation.rate(1996), None);
        assert_eq!(inflation.rate(2000), None);

        assert!(inflation.covers(1997, 1999));
        assert!(inflation.covers(1998, 1998));
        assert!(!inflation.covers(1996, 1999));
        assert!(!inflation.covers(1997, 2000));
    }

    #[test]
    fn test_empty_inflation() {
        let inflation = InflationSeries::empty();
        assert!(inflation.is_empty());
        assert_eq!(inflation.rate(2000), None);
        assert!(!inflation.covers(2000, 2000));
    }

    #[test]
    fn test_zero_inflation() {
        let inflation = InflationSeries::zero(2000, 2004);
        assert_eq!(inflation.len(), 5);
        assert!(inflation.points().iter().all(|p| p.rate_pct == 0.0));
        assert!(inflation.covers(2000, 2004));
    }

    #[test]
    fn test_clip_inflation_to_prices() {
        let prices = PriceSeries::from_closes(2001, &[1.0, 2.0, 3.0]).unwrap();
        let inflation = InflationSeries::from_rates(1999, &[1.0, 2.0, 3.0, 4.0]).unwrap();

        let clipped = inflation.clipped_to(&prices);
        assert_eq!(clipped.first_year(), Some(2001));
        assert_eq!(clipped.last_year(), Some(2002));
        assert_eq!(clipped.rate(2002), Some(4.0));
    }

    #[test]
    fn test_inflation_rejects_gaps_and_nan() {
        let gap = InflationSeries::new(vec![
            InflationPoint { year: 2000, rate_pct: 1.0 },
            InflationPoint { year: 2003, rate_pct: 1.0 },
        ]);
        assert!(gap.is_err());

        assert!(InflationSeries::from_rates(2000, &[1.0, f64::INFINITY]).is_err());
    }
}
