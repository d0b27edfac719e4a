use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::Money;

use super::amortization::ScheduleRow;

/// one year of the schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlySummaryRow {
    pub year: i32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    pub prepayment_paid: Money,
    pub ending_balance: Money,
    /// cumulative share of the loan repaid, 0 to 100
    pub percent_of_loan_paid: Decimal,
}

/// denominator and upfront credit for the cumulative percent-paid figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaidShare {
    pub denominator: Money,
    /// counted as paid before the first month
    pub paid_upfront: Money,
}

impl PaidShare {
    /// cumulative percentage for `paid` scheduled flows, capped at 100
    pub fn percent(&self, paid: Money) -> Decimal {
        let total = self.paid_upfront + paid;
        match total.percent_of(self.denominator) {
            Some(percent) => percent.min(Decimal::ONE_HUNDRED).round_dp(2),
            // nothing to repay
            None => Decimal::ONE_HUNDRED,
        }
    }
}

/// group monthly rows into exactly `tenure_years` yearly rows
///
/// Years are labelled from `start_year`, or 1, 2, ... when no calendar year is
/// given. A year without rows (the loan already ended) reports zero flows and
/// carries the previous ending balance forward. Month 0 is counted in year one.
pub fn aggregate_yearly(
    rows: &[ScheduleRow],
    tenure_years: u32,
    start_year: Option<i32>,
    share: &PaidShare,
) -> Vec<YearlySummaryRow> {
    let first_year = start_year.unwrap_or(1);
    let mut ending_balance = rows.first().map(|r| r.balance_before).unwrap_or(Money::ZERO);
    let mut cumulative_paid = Money::ZERO;

    (0..tenure_years)
        .map(|year_index| {
            let months = rows.iter().filter(|r| r.month.saturating_sub(1) / 12 == year_index);

            let mut principal_paid = Money::ZERO;
            let mut interest_paid = Money::ZERO;
            let mut prepayment_paid = Money::ZERO;
            for row in months {
                principal_paid += row.principal_paid;
                interest_paid += row.interest_paid;
                prepayment_paid += row.prepayment_paid;
                ending_balance = row.balance_after;
            }

            cumulative_paid += principal_paid + prepayment_paid;

            YearlySummaryRow {
                year: first_year + year_index as i32,
                principal_paid,
                interest_paid,
                prepayment_paid,
                ending_balance,
                percent_of_loan_paid: share.percent(cumulative_paid),
            }
        })
        .collect()
}

/// headline totals across the whole schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTotals {
    pub total_principal: Money,
    /// one-time plus every periodic prepayment actually applied
    pub total_prepayment: Money,
    pub total_interest: Money,
    /// emi plus the monthly prepayment; a flat headline figure
    pub total_monthly_payment: Money,
}

impl LoanTotals {
    /// everything paid towards the loan
    pub fn total_paid(&self) -> Money {
        self.total_principal + self.total_prepayment + self.total_interest
    }
}

pub fn summarize_totals(
    rows: &[ScheduleRow],
    emi: Money,
    prepayment_monthly: Money,
    prepayment_one_time: Money,
) -> LoanTotals {
    let total_principal: Money = rows.iter().map(|r| r.principal_paid).sum();
    let total_interest: Money = rows.iter().map(|r| r.interest_paid).sum();
    let periodic: Money = rows.iter().map(|r| r.prepayment_paid).sum();

    LoanTotals {
        total_principal,
        total_prepayment: prepayment_one_time + periodic,
        total_interest,
        total_monthly_payment: emi + prepayment_monthly,
    }
}

/// the full monthly cash outlay of owning the home
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOutgoings {
    pub emi: Money,
    pub property_taxes: Money,
    pub home_insurance: Money,
    pub maintenance: Money,
    pub total: Money,
}

impl MonthlyOutgoings {
    pub fn new(params: &LoanParameters, emi: Money) -> Self {
        let twelve = Decimal::from(12);
        let property_taxes = params.property_taxes_annual / twelve;
        let home_insurance = params.home_insurance_annual / twelve;
        let maintenance = params.maintenance_monthly;

        Self {
            emi,
            property_taxes,
            home_insurance,
            maintenance,
            total: emi + property_taxes + home_insurance + maintenance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::payments::amortization::{compute_emi, run_amortization};
    use rust_decimal_macros::dec;

    fn schedule(principal: i64, percent: Decimal, months: u32, monthly_prepay: i64) -> Vec<ScheduleRow> {
        let principal = Money::from_major(principal);
        let rate = Rate::from_percent(percent).monthly_rate();
        let emi = compute_emi(principal, rate, months).unwrap();
        run_amortization(principal, rate, months, emi, Money::from_major(monthly_prepay), Money::ZERO)
            .collect()
    }

    fn full_share(principal: i64) -> PaidShare {
        PaidShare {
            denominator: Money::from_major(principal),
            paid_upfront: Money::ZERO,
        }
    }

    #[test]
    fn test_yearly_rows_match_tenure() {
        let rows = schedule(1_200_000, dec!(9), 36, 0);
        let yearly = aggregate_yearly(&rows, 3, Some(2024), &full_share(1_200_000));

        assert_eq!(yearly.len(), 3);
        assert_eq!(yearly[0].year, 2024);
        assert_eq!(yearly[2].year, 2026);
        assert_eq!(yearly[2].ending_balance, Money::ZERO);
        assert_eq!(yearly[2].percent_of_loan_paid, dec!(100));

        let interest: Money = yearly.iter().map(|y| y.interest_paid).sum();
        let monthly_interest: Money = rows.iter().map(|r| r.interest_paid).sum();
        assert_eq!(interest, monthly_interest);
    }

    #[test]
    fn test_early_payoff_keeps_all_years() {
        // heavy prepayment clears the loan well inside the tenure
        let rows = schedule(600_000, dec!(8), 120, 40_000);
        assert!(rows.len() < 24);

        let yearly = aggregate_yearly(&rows, 10, None, &full_share(600_000));
        assert_eq!(yearly.len(), 10);
        assert_eq!(yearly[0].year, 1);
        assert_eq!(yearly[9].year, 10);

        for year in &yearly[2..] {
            assert_eq!(year.principal_paid, Money::ZERO);
            assert_eq!(year.interest_paid, Money::ZERO);
            assert_eq!(year.prepayment_paid, Money::ZERO);
            assert_eq!(year.ending_balance, Money::ZERO);
            assert_eq!(year.percent_of_loan_paid, dec!(100));
        }
    }

    #[test]
    fn test_empty_schedule_years() {
        let yearly = aggregate_yearly(&[], 5, Some(2030), &PaidShare {
            denominator: Money::from_major(500_000),
            paid_upfront: Money::from_major(500_000),
        });

        assert_eq!(yearly.len(), 5);
        assert!(yearly.iter().all(|y| y.ending_balance.is_zero()));
        assert!(yearly.iter().all(|y| y.percent_of_loan_paid == dec!(100)));
    }

    #[test]
    fn test_month_zero_counts_in_first_year() {
        let row = ScheduleRow {
            month: 0,
            calendar_year: 1,
            calendar_month: 1,
            interest_paid: Money::from_major(50),
            principal_paid: Money::from_major(100),
            prepayment_paid: Money::ZERO,
            balance_before: Money::from_major(1_000),
            balance_after: Money::from_major(900),
        };

        let yearly = aggregate_yearly(&[row], 2, None, &full_share(1_000));
        assert_eq!(yearly[0].principal_paid, Money::from_major(100));
        assert_eq!(yearly[0].ending_balance, Money::from_major(900));
        assert_eq!(yearly[0].percent_of_loan_paid, dec!(10));
        assert_eq!(yearly[1].principal_paid, Money::ZERO);
    }

    #[test]
    fn test_paid_share() {
        let share = PaidShare {
            denominator: Money::from_major(1_000),
            paid_upfront: Money::from_major(100),
        };
        assert_eq!(share.percent(Money::ZERO), dec!(10));
        assert_eq!(share.percent(Money::from_major(150)), dec!(25));
        assert_eq!(share.percent(Money::from_major(5_000)), dec!(100));

        let nothing_owed = PaidShare {
            denominator: Money::ZERO,
            paid_upfront: Money::ZERO,
        };
        assert_eq!(nothing_owed.percent(Money::ZERO), dec!(100));
    }

    #[test]
    fn test_totals() {
        let rows = schedule(300_000, dec!(10), 60, 2_000);
        let rate = Rate::from_percent(dec!(10)).monthly_rate();
        let emi = compute_emi(Money::from_major(300_000), rate, 60).unwrap();
        let totals = summarize_totals(&rows, emi, Money::from_major(2_000), Money::from_major(25_000));

        let periodic: Money = rows.iter().map(|r| r.prepayment_paid).sum();
        assert_eq!(totals.total_prepayment, Money::from_major(25_000) + periodic);
        assert_eq!(totals.total_monthly_payment, emi + Money::from_major(2_000));
        assert_eq!(totals.total_principal + periodic, Money::from_major(300_000));
        assert!(totals.total_interest.is_positive());
    }

    #[test]
    fn test_monthly_outgoings() {
        let mut params = LoanParameters::home_loan(Money::from_major(5_000_000), dec!(20), dec!(8), 20);
        params.property_taxes_annual = Money::from_major(24_000);
        params.home_insurance_annual = Money::from_major(12_000);
        params.maintenance_monthly = Money::from_major(3_000);

        let outgoings = MonthlyOutgoings::new(&params, Money::from_major(33_000));
        assert_eq!(outgoings.property_taxes, Money::from_major(2_000));
        assert_eq!(outgoings.home_insurance, Money::from_major(1_000));
        assert_eq!(outgoings.total, Money::from_major(39_000));
    }
}
