//! presentation helpers around a finished calculation
//!
//! Nothing here feeds back into the engine. The "current month" used to trim
//! the monthly table is always supplied by the caller.
use hourglass_rs::SafeTimeProvider;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::{builder::Builder, settings::Style, Table};

use crate::calculator::LoanReport;
use crate::decimal::Money;
use crate::payments::{ScheduleRow, YearlySummaryRow};
use crate::types::YearMonth;

/// monthly rows from `visible_from` onwards; all rows when none is given
pub fn visible_months(rows: &[ScheduleRow], visible_from: Option<YearMonth>) -> &[ScheduleRow] {
    match visible_from {
        Some(from) => {
            let start = rows.partition_point(|row| row.year_month() < from);
            &rows[start..]
        }
        None => rows,
    }
}

/// the month a display should treat as "now"
pub fn current_month(time_provider: &SafeTimeProvider) -> YearMonth {
    YearMonth::from_datetime(time_provider.now())
}

/// split of everything paid, for the proportion chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    pub principal_percent: Decimal,
    pub prepayment_percent: Decimal,
    pub interest_percent: Decimal,
}

impl PaymentBreakdown {
    pub fn from_report(report: &LoanReport) -> Self {
        let totals = &report.totals;
        let paid = totals.total_paid();
        let share = |part: Money| part.percent_of(paid).unwrap_or(Decimal::ZERO).round_dp(2);

        Self {
            principal_percent: share(totals.total_principal),
            prepayment_percent: share(totals.total_prepayment),
            interest_percent: share(totals.total_interest),
        }
    }
}

/// headline figures rounded for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub emi: Money,
    pub loan_amount: Money,
    pub total_principal: Money,
    pub total_prepayment: Money,
    pub total_interest: Money,
    pub total_monthly_payment: Money,
    pub monthly_outgoings: Money,
    pub payoff_month: Option<u32>,
    pub interest_saved: Money,
    pub breakdown: PaymentBreakdown,
    pub warnings: Vec<String>,
}

impl SummaryView {
    pub fn from_report(report: &LoanReport) -> Self {
        SummaryView {
            emi: report.emi.round_dp(2),
            loan_amount: report.amounts.amortized_principal.round_dp(2),
            total_principal: report.totals.total_principal.round_dp(2),
            total_prepayment: report.totals.total_prepayment.round_dp(2),
            total_interest: report.totals.total_interest.round_dp(2),
            total_monthly_payment: report.totals.total_monthly_payment.round_dp(2),
            monthly_outgoings: report.monthly_outgoings.total.round_dp(2),
            payoff_month: report.payoff_month,
            interest_saved: report.interest_saved.round_dp(2),
            breakdown: PaymentBreakdown::from_report(report),
            warnings: report.warnings.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn amount(m: Money) -> String {
    m.round_dp(2).to_string()
}

pub fn summary_table(summary: &SummaryView) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    builder.push_record(["EMI".to_string(), amount(summary.emi)]);
    builder.push_record(["Loan amount".to_string(), amount(summary.loan_amount)]);
    builder.push_record(["Total principal".to_string(), amount(summary.total_principal)]);
    builder.push_record(["Total prepayment".to_string(), amount(summary.total_prepayment)]);
    builder.push_record(["Total interest".to_string(), amount(summary.total_interest)]);
    builder.push_record(["Monthly payment".to_string(), amount(summary.total_monthly_payment)]);
    builder.push_record(["Monthly outgoings".to_string(), amount(summary.monthly_outgoings)]);
    builder.push_record([
        "Paid off in month".to_string(),
        summary.payoff_month.map(|m| m.to_string()).unwrap_or_else(|| "-".to_string()),
    ]);
    builder.push_record(["Interest saved".to_string(), amount(summary.interest_saved)]);

    let mut table = Table::from(builder);
    table.with(Style::rounded());
    table.to_string()
}

pub fn yearly_table(rows: &[YearlySummaryRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Year", "Principal", "Interest", "Prepayment", "Balance", "% Paid"]);
    for row in rows {
        builder.push_record([
            row.year.to_string(),
            amount(row.principal_paid),
            amount(row.interest_paid),
            amount(row.prepayment_paid),
            amount(row.ending_balance),
            format!("{:.2}", row.percent_of_loan_paid),
        ]);
    }

    let mut table = Table::from(builder);
    table.with(Style::rounded());
    table.to_string()
}

pub fn monthly_table(rows: &[ScheduleRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Month", "Date", "Principal", "Interest", "Prepayment", "Balance"]);
    for row in rows {
        builder.push_record([
            row.month.to_string(),
            row.year_month().to_string(),
            amount(row.principal_paid),
            amount(row.interest_paid),
            amount(row.prepayment_paid),
            amount(row.balance_after),
        ]);
    }

    let mut table = Table::from(builder);
    table.with(Style::rounded());
    table.to_string()
}
