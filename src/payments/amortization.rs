use std::iter::FusedIterator;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::YearMonth;

use super::prepayment::PrepaymentPlan;

/// one elapsed month of the schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based month index
    pub month: u32,
    pub calendar_year: i32,
    pub calendar_month: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub prepayment_paid: Money,
    pub balance_before: Money,
    pub balance_after: Money,
}

impl ScheduleRow {
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.calendar_year,
            month: self.calendar_month,
        }
    }

    /// the EMI portion actually paid this month
    pub fn installment(&self) -> Money {
        self.interest_paid + self.principal_paid
    }

    /// everything that reduced the balance this month
    pub fn principal_reduction(&self) -> Money {
        self.principal_paid + self.prepayment_paid
    }
}

/// down payment taken out of the home value
pub fn compute_down_payment(params: &LoanParameters) -> Result<Money> {
    params
        .home_value
        .percentage(params.down_payment_percent)
        .ok_or_else(|| out_of_range("down_payment_percent"))
}

/// principal before the one-time prepayment: home value less down payment and loan insurance
pub fn compute_original_principal(params: &LoanParameters) -> Result<Money> {
    Ok(raw_original_principal(params)?.clamp_non_negative())
}

/// amortized principal, clamped at zero
pub fn compute_loan_amount(params: &LoanParameters) -> Result<Money> {
    Ok(raw_loan_amount(params)?.clamp_non_negative())
}

/// amortized principal before clamping; negative when deductions exceed the financed amount
pub(crate) fn raw_loan_amount(params: &LoanParameters) -> Result<Money> {
    raw_original_principal(params)?
        .checked_sub(params.prepayment_one_time)
        .ok_or_else(|| out_of_range("prepayment_one_time"))
}

fn raw_original_principal(params: &LoanParameters) -> Result<Money> {
    let financed = params
        .home_value
        .checked_sub(compute_down_payment(params)?)
        .ok_or_else(|| out_of_range("home_value"))?;
    financed
        .checked_sub(params.loan_insurance)
        .ok_or_else(|| out_of_range("loan_insurance"))
}

fn out_of_range(field: &'static str) -> LoanError {
    LoanError::invalid(field, "is outside the representable range")
}

/// equated monthly installment
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)`, with the degenerate cases handled
/// explicitly: no months or no principal gives zero, a zero rate divides the
/// principal evenly across the months. The rate factor is formed before the
/// principal is applied so the only product that can overflow is the last one.
pub fn compute_emi(principal: Money, monthly_rate: Rate, total_months: u32) -> Result<Money> {
    if total_months == 0 || !principal.is_positive() {
        return Ok(Money::ZERO);
    }

    let even_split = principal / Decimal::from(total_months);
    if monthly_rate.is_zero() {
        return Ok(even_split);
    }

    let r = monthly_rate.as_decimal();
    let factor = match monthly_rate.compound_factor(total_months) {
        // (1 + r)^n past decimal range: the factor has converged to r
        None => r,
        Some(compound) => {
            let growth = compound - Decimal::ONE;
            if growth.is_zero() {
                // no growth over the term, nothing to amortize against
                return Ok(even_split);
            }
            r * (compound / growth)
        }
    };

    principal.checked_mul(factor).ok_or_else(|| {
        LoanError::invalid("principal", "installment is outside the representable range")
    })
}

/// lazy month-by-month amortization
///
/// Yields one [`ScheduleRow`] per elapsed month until the balance reaches zero
/// or the scheduled months run out. Interest accrues on the opening balance of
/// each month before the EMI and any prepayment are deducted.
#[derive(Debug, Clone)]
pub struct AmortizationRun {
    monthly_rate: Rate,
    total_months: u32,
    emi: Money,
    prepayments: PrepaymentPlan,
    start_year: i32,
    balance: Money,
    month_index: u32,
    finished: bool,
}

/// start the simulation
pub fn run_amortization(
    principal: Money,
    monthly_rate: Rate,
    total_months: u32,
    emi: Money,
    prepay_monthly: Money,
    prepay_quarterly: Money,
) -> AmortizationRun {
    AmortizationRun {
        monthly_rate,
        total_months,
        emi,
        prepayments: PrepaymentPlan {
            monthly: prepay_monthly,
            quarterly: prepay_quarterly,
            one_time: Money::ZERO,
        },
        start_year: 1,
        balance: principal.clamp_non_negative(),
        month_index: 0,
        finished: false,
    }
}

impl AmortizationRun {
    /// label rows with calendar years starting in january of `year`
    pub fn with_start_year(mut self, year: i32) -> Self {
        self.start_year = year;
        self
    }

    /// balance after the last emitted month
    pub fn balance(&self) -> Money {
        self.balance
    }

    /// number of months emitted so far
    pub fn months_elapsed(&self) -> u32 {
        self.month_index
    }

    fn remaining_months(&self) -> u32 {
        if self.finished || self.balance.is_zero() {
            0
        } else {
            self.total_months.saturating_sub(self.month_index)
        }
    }
}

impl Iterator for AmortizationRun {
    type Item = ScheduleRow;

    fn next(&mut self) -> Option<ScheduleRow> {
        if self.remaining_months() == 0 {
            self.finished = true;
            return None;
        }

        let month = self.month_index + 1;
        let balance_before = self.balance;

        let interest_paid = balance_before * self.monthly_rate.as_decimal();
        let mut principal_paid = (self.emi - interest_paid)
            .clamp_non_negative()
            .min(balance_before);
        let mut balance = balance_before - principal_paid;

        let mut prepayment_paid = Money::ZERO;
        for scheduled in self.prepayments.periodic_for_month(month) {
            let applied = scheduled.min(balance);
            balance -= applied;
            prepayment_paid += applied;
        }
        balance = balance.clamp_non_negative();

        // fold rounding dust into the final installment
        if month == self.total_months && balance.is_positive() && balance < Money::ONE {
            principal_paid += balance;
            balance = Money::ZERO;
        }

        self.balance = balance;
        self.month_index = month;
        if balance.is_zero() {
            self.finished = true;
        }

        let label = YearMonth::for_schedule_month(self.start_year, month);
        Some(ScheduleRow {
            month,
            calendar_year: label.year,
            calendar_month: label.month,
            interest_paid,
            principal_paid,
            prepayment_paid,
            balance_before,
            balance_after: balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining_months() as usize;
        ((remaining > 0) as usize, Some(remaining))
    }
}

impl FusedIterator for AmortizationRun {}
