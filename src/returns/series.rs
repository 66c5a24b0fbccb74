//! ARR output structures

use serde::{Deserialize, Serialize};

/// Annualized return of the cumulative position as of one year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrPoint {
    pub year: i32,

    /// Annualized rate of return, in percent
    pub arr_pct: f64,

    /// Value of all deployed tranches (real or nominal, per the plan)
    pub total_value: f64,

    /// Principal deployed so far
    pub total_invested: f64,

    pub deployed_tranches: u32,
}

/// ARR trajectory for one starting year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrSeries {
    pub start_year: i32,
    pub points: Vec<ArrPoint>,
}

impl ArrSeries {
    pub fn new(start_year: i32) -> Self {
        Self {
            start_year,
            points: Vec::new(),
        }
    }

    pub fn with_capacity(start_year: i32, capacity: usize) -> Self {
        Self {
            start_year,
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn add_point(&mut self, point: ArrPoint) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, year: i32) -> Option<&ArrPoint> {
        self.points.iter().find(|p| p.year == year)
    }

    /// (year, ARR%) pairs for plotting
    pub fn pairs(&self) -> Vec<(i32, f64)> {
        self.points.iter().map(|p| (p.year, p.arr_pct)).collect()
    }

    pub fn last(&self) -> Option<&ArrPoint> {
        self.points.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ArrSummary {
        let years = self.points.len() as u32;
        let final_arr_pct = self.points.last().map(|p| p.arr_pct).unwrap_or(0.0);
        let final_value = self.points.last().map(|p| p.total_value).unwrap_or(0.0);
        let final_invested = self.points.last().map(|p| p.total_invested).unwrap_or(0.0);

        let min_arr_pct = self
            .points
            .iter()
            .map(|p| p.arr_pct)
            .fold(f64::INFINITY, f64::min);
        let max_arr_pct = self
            .points
            .iter()
            .map(|p| p.arr_pct)
            .fold(f64::NEG_INFINITY, f64::max);
        let mean_arr_pct = if years == 0 {
            0.0
        } else {
            self.points.iter().map(|p| p.arr_pct).sum::<f64>() / years as f64
        };

        ArrSummary {
            start_year: self.start_year,
            years,
            final_arr_pct,
            min_arr_pct: if years == 0 { 0.0 } else { min_arr_pct },
            max_arr_pct: if years == 0 { 0.0 } else { max_arr_pct },
            mean_arr_pct,
            final_value,
            final_invested,
        }
    }
}

/// Summary statistics for one ARR series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrSummary {
    pub start_year: i32,
    pub years: u32,
    pub final_arr_pct: f64,
    pub min_arr_pct: f64,
    pub max_arr_pct: f64,
    pub mean_arr_pct: f64,
    pub final_value: f64,
    pub final_invested: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(year: i32, arr_pct: f64) -> ArrPoint {
        ArrPoint {
            year,
            arr_pct,
            total_value: 100.0 + arr_pct,
            total_invested: 100.0,
            deployed_tranches: 1,
        }
    }

    #[test]
    fn test_summary() {
        let mut series = ArrSeries::new(2000);
        series.add_point(point(2000, 0.0));
        series.add_point(point(2001, -4.0));
        series.add_point(point(2002, 7.0));

        let summary = series.summary();
        assert_eq!(summary.start_year, 2000);
        assert_eq!(summary.years, 3);
        assert_eq!(summary.final_arr_pct, 7.0);
        assert_eq!(summary.min_arr_pct, -4.0);
        assert_eq!(summary.max_arr_pct, 7.0);
        assert_relative_eq!(summary.mean_arr_pct, 1.0);
        assert_eq!(summary.final_value, 107.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ArrSeries::new(2000).summary();
        assert_eq!(summary.years, 0);
        assert_eq!(summary.min_arr_pct, 0.0);
        assert_eq!(summary.max_arr_pct, 0.0);
    }

    #[test]
    fn test_pairs_and_lookup() {
        let mut series = ArrSeries::with_capacity(2000, 2);
        series.add_point(point(2000, 0.0));
        series.add_point(point(2001, 3.5));

        assert_eq!(series.pairs(), vec![(2000, 0.0), (2001, 3.5)]);
        assert_eq!(series.get(2001).map(|p| p.arr_pct), Some(3.5));
        assert!(series.get(2005).is_none());
    }
}
