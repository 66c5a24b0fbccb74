//! A deployed tranche and its valuation at a later year

use crate::error::{ArrError, ArrResult};
use crate::market::{InflationSeries, PriceSeries};
use crate::plan::Installment;

/// An installment anchored to the index price of its own deployment year
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tranche {
    pub deployment_year: i32,
    pub amount: f64,
    /// Index close in the deployment year; never recomputed
    pub cost_basis: f64,
}

impl Tranche {
    /// Anchor an installment to the price series
    ///
    /// Returns `None` when the deployment year lies past the end of the series,
    /// in which case the tranche is never invested.
    pub fn deploy(installment: &Installment, prices: &PriceSeries) -> Option<Self> {
        prices.close(installment.deployment_year).map(|cost_basis| Self {
            deployment_year: installment.deployment_year,
            amount: installment.amount,
            cost_basis,
        })
    }

    pub fn is_deployed_by(&self, year: i32) -> bool {
        self.deployment_year <= year
    }

    /// Nominal value at a year whose index close is `close`
    pub fn nominal_value(&self, close: f64) -> f64 {
        self.amount * (close / self.cost_basis)
    }

    /// Cumulative inflation since deployment, as of `year`
    ///
    /// Product of `1 + rate/100` over the years after deployment up to and
    /// including `year`; exactly 1 in the deployment year itself.
    pub fn inflation_factor(&self, inflation: &InflationSeries, year: i32) -> ArrResult<f64> {
        let factor = ((self.deployment_year + 1)..=year).try_fold(1.0, |factor, y| {
            inflation
                .rate(y)
                .map(|rate| factor * (1.0 + rate / 100.0))
                .ok_or_else(|| ArrError::InsufficientData(format!("no inflation rate for {}", y)))
        })?;

        if !factor.is_finite() || factor <= 0.0 {
            return Err(ArrError::numeric_domain(
                year,
                format!(
                    "inflation factor {} for tranche deployed in {} is not positive",
                    factor, self.deployment_year
                ),
            ));
        }

        Ok(factor)
    }

    /// Value at `year`, deflated by inflation since deployment when requested
    pub fn value_at(
        &self,
        year: i32,
        close: f64,
        inflation: &InflationSeries,
        inflation_adjusted: bool,
    ) -> ArrResult<f64> {
        let nominal = self.nominal_value(close);
        if inflation_adjusted {
            Ok(nominal / self.inflation_factor(inflation, year)?)
        } else {
            Ok(nominal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn tranche() -> Tranche {
        Tranche {
            deployment_year: 2000,
            amount: 500.0,
            cost_basis: 50.0,
        }
    }

    #[test]
    fn test_deploy_uses_own_year_price() {
        let prices = PriceSeries::from_closes(2000, &[40.0, 50.0]).unwrap();
        let installment = Installment {
            index: 1,
            deployment_year: 2001,
            amount: 250.0,
        };

        let tranche = Tranche::deploy(&installment, &prices).unwrap();
        assert_eq!(tranche.cost_basis, 50.0);

        let late = Installment {
            index: 2,
            deployment_year: 2002,
            amount: 250.0,
        };
        assert!(Tranche::deploy(&late, &prices).is_none());
    }

    #[test]
    fn test_nominal_value() {
        assert_relative_eq!(tranche().nominal_value(75.0), 750.0);
        assert_relative_eq!(tranche().nominal_value(50.0), 500.0);
    }

    #[test]
    fn test_inflation_factor_starts_after_deployment() {
        let inflation = InflationSeries::from_rates(2000, &[50.0, 10.0, -5.0]).unwrap();
        let tranche = tranche();

        // The deployment year's own rate (50%) never applies
        assert_eq!(tranche.inflation_factor(&inflation, 2000).unwrap(), 1.0);
        assert_relative_eq!(
            tranche.inflation_factor(&inflation, 2001).unwrap(),
            1.10,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            tranche.inflation_factor(&inflation, 2002).unwrap(),
            1.10 * 0.95,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_inflation_factor_missing_year() {
        let inflation = InflationSeries::from_rates(2000, &[2.0]).unwrap();
        let err = tranche().inflation_factor(&inflation, 2001).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InsufficientData);
    }

    #[test]
    fn test_inflation_factor_non_positive() {
        let inflation = InflationSeries::from_rates(2000, &[0.0, -100.0]).unwrap();
        let err = tranche().inflation_factor(&inflation, 2001).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NumericDomainError);
    }

    #[test]
    fn test_value_at() {
        let inflation = InflationSeries::from_rates(2000, &[0.0, 25.0]).unwrap();
        let tranche = tranche();

        let nominal = tranche.value_at(2001, 100.0, &inflation, false).unwrap();
        let real = tranche.value_at(2001, 100.0, &inflation, true).unwrap();

        assert_relative_eq!(nominal, 1000.0);
        assert_relative_eq!(real, 800.0, max_relative = 1e-12);
    }
}
