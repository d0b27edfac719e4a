use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::PrepaymentPlan;
use crate::types::PercentBasis;

/// longest tenure accepted at the boundary
///
/// Bounds the schedule at 600 rows and the `(1 + r)^n` loop at 600 steps.
pub const MAX_TENURE_YEARS: u32 = 50;

/// highest annual interest rate accepted at the boundary, in percent
///
/// Together with [`MAX_AMOUNT`] this keeps monthly interest and the summed
/// totals far inside `Decimal` range, so a validated loan cannot overflow.
pub const MAX_ANNUAL_RATE_PERCENT: Decimal = dec!(100);

/// largest monetary amount accepted for any field (10^15)
pub const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// loan inputs as collected from the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub home_value: Money,
    #[serde(default)]
    pub down_payment_percent: Decimal,
    pub interest_rate_annual_percent: Decimal,
    pub tenure_years: u32,
    /// flat deduction from the financed amount
    #[serde(default)]
    pub loan_insurance: Money,

    // informational running costs, not amortized
    #[serde(default)]
    pub property_taxes_annual: Money,
    #[serde(default)]
    pub home_insurance_annual: Money,
    #[serde(default)]
    pub maintenance_monthly: Money,

    // prepayments
    #[serde(default)]
    pub prepayment_monthly: Money,
    #[serde(default)]
    pub prepayment_quarterly: Money,
    #[serde(default)]
    pub prepayment_one_time: Money,

    /// first calendar year of the schedule; relative years 1..=n when absent
    #[serde(default)]
    pub start_year: Option<i32>,
}

impl LoanParameters {
    /// home loan with no prepayments or running costs
    pub fn home_loan(
        home_value: Money,
        down_payment_percent: Decimal,
        interest_rate_annual_percent: Decimal,
        tenure_years: u32,
    ) -> Self {
        Self {
            home_value,
            down_payment_percent,
            interest_rate_annual_percent,
            tenure_years,
            loan_insurance: Money::ZERO,
            property_taxes_annual: Money::ZERO,
            home_insurance_annual: Money::ZERO,
            maintenance_monthly: Money::ZERO,
            prepayment_monthly: Money::ZERO,
            prepayment_quarterly: Money::ZERO,
            prepayment_one_time: Money::ZERO,
            start_year: None,
        }
    }

    pub fn builder() -> LoanParametersBuilder {
        LoanParametersBuilder::new()
    }

    /// parse from a json document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// load from a json file on disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| LoanError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn annual_rate(&self) -> Rate {
        Rate::from_percent(self.interest_rate_annual_percent)
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate().monthly_rate()
    }

    pub fn total_months(&self) -> u32 {
        self.tenure_years * 12
    }

    pub fn prepayment_plan(&self) -> PrepaymentPlan {
        PrepaymentPlan {
            monthly: self.prepayment_monthly,
            quarterly: self.prepayment_quarterly,
            one_time: self.prepayment_one_time,
        }
    }

    /// reject inputs the engine does not accept; the first offending field is reported
    pub fn validate(&self) -> Result<()> {
        if self.tenure_years == 0 {
            return Err(LoanError::invalid("tenure_years", "must be at least 1 year"));
        }
        if self.tenure_years > MAX_TENURE_YEARS {
            return Err(LoanError::invalid(
                "tenure_years",
                format!("must not exceed {} years", MAX_TENURE_YEARS),
            ));
        }

        if self.interest_rate_annual_percent < Decimal::ZERO {
            return Err(LoanError::invalid("interest_rate_annual_percent", "must not be negative"));
        }
        if self.interest_rate_annual_percent > MAX_ANNUAL_RATE_PERCENT {
            return Err(LoanError::invalid(
                "interest_rate_annual_percent",
                format!("must not exceed {}%", MAX_ANNUAL_RATE_PERCENT),
            ));
        }

        if self.down_payment_percent < Decimal::ZERO
            || self.down_payment_percent > Decimal::ONE_HUNDRED
        {
            return Err(LoanError::invalid(
                "down_payment_percent",
                "must be between 0 and 100",
            ));
        }

        let amounts = [
            ("home_value", self.home_value),
            ("loan_insurance", self.loan_insurance),
            ("property_taxes_annual", self.property_taxes_annual),
            ("home_insurance_annual", self.home_insurance_annual),
            ("maintenance_monthly", self.maintenance_monthly),
            ("prepayment_monthly", self.prepayment_monthly),
            ("prepayment_quarterly", self.prepayment_quarterly),
            ("prepayment_one_time", self.prepayment_one_time),
        ];
        for &(field, amount) in &amounts {
            if amount.is_negative() {
                return Err(LoanError::invalid(field, "must not be negative"));
            }
            if amount.as_decimal() > MAX_AMOUNT {
                return Err(LoanError::invalid(field, format!("must not exceed {}", MAX_AMOUNT)));
            }
        }

        Ok(())
    }
}

/// builder for loan parameters
#[derive(Debug, Clone)]
pub struct LoanParametersBuilder {
    params: LoanParameters,
}

impl LoanParametersBuilder {
    pub fn new() -> Self {
        Self {
            params: LoanParameters::home_loan(Money::ZERO, Decimal::ZERO, Decimal::ZERO, 0),
        }
    }

    pub fn home_value(mut self, value: Money) -> Self {
        self.params.home_value = value;
        self
    }

    pub fn down_payment_percent(mut self, percent: Decimal) -> Self {
        self.params.down_payment_percent = percent;
        self
    }

    pub fn rate_percent(mut self, percent: Decimal) -> Self {
        self.params.interest_rate_annual_percent = percent;
        self
    }

    pub fn tenure_years(mut self, years: u32) -> Self {
        self.params.tenure_years = years;
        self
    }

    pub fn loan_insurance(mut self, amount: Money) -> Self {
        self.params.loan_insurance = amount;
        self
    }

    pub fn property_taxes_annual(mut self, amount: Money) -> Self {
        self.params.property_taxes_annual = amount;
        self
    }

    pub fn home_insurance_annual(mut self, amount: Money) -> Self {
        self.params.home_insurance_annual = amount;
        self
    }

    pub fn maintenance_monthly(mut self, amount: Money) -> Self {
        self.params.maintenance_monthly = amount;
        self
    }

    pub fn prepayment_monthly(mut self, amount: Money) -> Self {
        self.params.prepayment_monthly = amount;
        self
    }

    pub fn prepayment_quarterly(mut self, amount: Money) -> Self {
        self.params.prepayment_quarterly = amount;
        self
    }

    pub fn prepayment_one_time(mut self, amount: Money) -> Self {
        self.params.prepayment_one_time = amount;
        self
    }

    pub fn start_year(mut self, year: i32) -> Self {
        self.params.start_year = Some(year);
        self
    }

    /// validate and return the parameters
    pub fn build(self) -> Result<LoanParameters> {
        self.params.validate()?;
        Ok(self.params)
    }
}

impl Default for LoanParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// knobs that change how results are reported, not how the loan amortizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculatorConfig {
    #[serde(default)]
    pub percent_basis: PercentBasis,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LoanParameters {
        LoanParameters::home_loan(Money::from_major(5_000_000), dec!(20), dec!(8.5), 20)
    }

    #[test]
    fn test_valid_parameters() {
        let params = sample();
        assert!(params.validate().is_ok());
        assert_eq!(params.total_months(), 240);
        assert_eq!(params.annual_rate().as_decimal(), dec!(0.085));
    }

    #[test]
    fn test_zero_tenure_rejected() {
        let mut params = sample();
        params.tenure_years = 0;
        match params.validate() {
            Err(LoanError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_years"),
            other => panic!("expected tenure error, got {:?}", other),
        }
    }

    #[test]
    fn test_tenure_above_max_rejected() {
        let mut params = sample();
        params.tenure_years = MAX_TENURE_YEARS;
        assert!(params.validate().is_ok());

        params.tenure_years = MAX_TENURE_YEARS + 1;
        match params.validate() {
            Err(LoanError::InvalidInput { field, .. }) => assert_eq!(field, "tenure_years"),
            other => panic!("expected tenure error, got {:?}", other),
        }
    }

    #[test]
    fn test_rate_above_max_rejected() {
        let mut params = sample();
        params.interest_rate_annual_percent = MAX_ANNUAL_RATE_PERCENT;
        assert!(params.validate().is_ok());

        params.interest_rate_annual_percent = dec!(100.01);
        match params.validate() {
            Err(LoanError::InvalidInput { field, .. }) => {
                assert_eq!(field, "interest_rate_annual_percent")
            }
            other => panic!("expected rate error, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_above_max_rejected() {
        let mut params = sample();
        params.home_value = Money::from_decimal(MAX_AMOUNT);
        assert!(params.validate().is_ok());

        params.maintenance_monthly = Money::from_decimal(MAX_AMOUNT) + Money::ONE;
        match params.validate() {
            Err(LoanError::InvalidInput { field, reason }) => {
                assert_eq!(field, "maintenance_monthly");
                assert!(reason.contains("must not exceed"));
            }
            other => panic!("expected amount error, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rate_rejected() {
        let mut params = sample();
        params.interest_rate_annual_percent = dec!(-0.5);
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("interest_rate_annual_percent"));
    }

    #[test]
    fn test_down_payment_out_of_range() {
        let mut params = sample();
        params.down_payment_percent = dec!(100.01);
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("down_payment_percent"));

        params.down_payment_percent = dec!(100);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_negative_amount_names_field() {
        let mut params = sample();
        params.prepayment_quarterly = Money::from_major(-1);
        match params.validate() {
            Err(LoanError::InvalidInput { field, .. }) => assert_eq!(field, "prepayment_quarterly"),
            other => panic!("expected prepayment error, got {:?}", other),
        }
    }

    #[test]
    fn test_builder() {
        let params = LoanParameters::builder()
            .home_value(Money::from_major(6_000_000))
            .down_payment_percent(dec!(25))
            .rate_percent(dec!(9))
            .tenure_years(15)
            .prepayment_monthly(Money::from_major(5_000))
            .start_year(2025)
            .build()
            .unwrap();

        assert_eq!(params.tenure_years, 15);
        assert_eq!(params.prepayment_plan().monthly, Money::from_major(5_000));
        assert_eq!(params.start_year, Some(2025));

        // missing tenure is caught at build time
        assert!(LoanParameters::builder()
            .home_value(Money::from_major(1_000))
            .build()
            .is_err());
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "home_value": "4000000",
            "interest_rate_annual_percent": "8",
            "tenure_years": 20,
            "prepayment_quarterly": "25000"
        }"#;

        let params = LoanParameters::from_json_str(json).unwrap();
        assert_eq!(params.home_value, Money::from_major(4_000_000));
        assert_eq!(params.down_payment_percent, Decimal::ZERO);
        assert_eq!(params.prepayment_quarterly, Money::from_major(25_000));
        assert_eq!(params.start_year, None);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = LoanParameters::from_json_file("/nonexistent/loan.json").unwrap_err();
        assert!(matches!(err, LoanError::Io { .. }));
    }
}
