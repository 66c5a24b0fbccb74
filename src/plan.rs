//! Investment plan parameters and the installments they expand into

use serde::{Deserialize, Serialize};

use crate::error::{ArrError, ArrResult};
use crate::market::PriceSeries;

/// Default total principal (matches the reference charts)
pub const DEFAULT_TOTAL_PRINCIPAL: f64 = 100_000.0;

/// Default number of yearly installments
pub const DEFAULT_NUM_INSTALLMENTS: u32 = 3;

/// A staged investment: `total_principal` split into equal yearly tranches
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentPlan {
    /// Year the first tranche is invested
    pub start_year: i32,

    /// Number of equal yearly tranches (at least 1)
    pub num_installments: u32,

    /// Total amount across all tranches
    pub total_principal: f64,

    /// Report real (inflation-adjusted) rather than nominal returns
    pub inflation_adjusted: bool,
}

/// One tranche of a plan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    /// Tranche index, 0-based
    pub index: u32,
    pub deployment_year: i32,
    pub amount: f64,
}

impl InvestmentPlan {
    pub fn new(
        start_year: i32,
        num_installments: u32,
        total_principal: f64,
        inflation_adjusted: bool,
    ) -> Self {
        Self {
            start_year,
            num_installments,
            total_principal,
            inflation_adjusted,
        }
    }

    /// Same plan, started in a different year
    pub fn with_start_year(&self, start_year: i32) -> Self {
        Self { start_year, ..*self }
    }

    /// Size of each tranche
    pub fn installment_amount(&self) -> f64 {
        self.total_principal / self.num_installments as f64
    }

    /// Tranche j is invested in `start_year + j`
    ///
    /// Lazy, so callers can `take` only the tranches a series can hold. Stops
    /// early if a deployment year would leave the `i32` range.
    pub fn installments(&self) -> impl Iterator<Item = Installment> + '_ {
        let amount = self.installment_amount();
        (0..self.num_installments).map_while(move |index| {
            let offset = i32::try_from(index).ok()?;
            Some(Installment {
                index,
                deployment_year: self.start_year.checked_add(offset)?,
                amount,
            })
        })
    }

    /// Year the last tranche would be invested, if the series reaches it
    ///
    /// `None` when that year is not representable.
    pub fn final_deployment_year(&self) -> Option<i32> {
        let offset = i32::try_from(self.num_installments.saturating_sub(1)).ok()?;
        self.start_year.checked_add(offset)
    }

    /// Check parameters against a price series
    pub fn validate(&self, prices: &PriceSeries) -> ArrResult<()> {
        if self.num_installments < 1 {
            return Err(ArrError::invalid_input(
                "num_installments",
                "must be at least 1",
            ));
        }

        if self.final_deployment_year().is_none() {
            return Err(ArrError::invalid_input(
                "num_installments",
                format!(
                    "{} installments from {} run past the last representable year",
                    self.num_installments, self.start_year
                ),
            ));
        }

        if !self.total_principal.is_finite() || self.total_principal <= 0.0 {
            return Err(ArrError::invalid_input(
                "total_principal",
                format!("must be positive, got {}", self.total_principal),
            ));
        }

        if !prices.contains(self.start_year) {
            return Err(ArrError::invalid_input(
                "start_year",
                format!(
                    "{} not in price series ({}-{})",
                    self.start_year,
                    prices.first_year(),
                    prices.last_year()
                ),
            ));
        }

        Ok(())
    }
}

impl Default for InvestmentPlan {
    fn default() -> Self {
        Self {
            start_year: 1990,
            num_installments: DEFAULT_NUM_INSTALLMENTS,
            total_principal: DEFAULT_TOTAL_PRINCIPAL,
            inflation_adjusted: true,
        }
    }
}
