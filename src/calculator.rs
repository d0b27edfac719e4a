use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{CalculatorConfig, LoanParameters};
use crate::decimal::Money;
use crate::errors::{CalculationWarning, Result};
use crate::payments::amortization::raw_loan_amount;
use crate::payments::{
    aggregate_yearly, compute_down_payment, compute_emi, compute_loan_amount,
    compute_original_principal, run_amortization, summarize_totals, LoanTotals, MonthlyOutgoings,
    PaidShare, ScheduleRow, YearlySummaryRow,
};
use crate::types::PercentBasis;

/// how the financed amount was derived from the home value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanAmounts {
    pub home_value: Money,
    pub down_payment: Money,
    pub loan_insurance: Money,
    /// financed amount before the one-time prepayment
    pub original_principal: Money,
    pub one_time_prepayment_applied: Money,
    /// what actually amortizes
    pub amortized_principal: Money,
}

/// everything a presentation layer needs to render one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanReport {
    pub emi: Money,
    pub yearly_schedule: Vec<YearlySummaryRow>,
    pub monthly_schedule: Vec<ScheduleRow>,
    pub totals: LoanTotals,
    pub amounts: LoanAmounts,
    pub monthly_outgoings: MonthlyOutgoings,
    /// month of the final installment, none when nothing was amortized
    pub payoff_month: Option<u32>,
    /// interest avoided compared with the same loan without any prepayment
    pub interest_saved: Money,
    pub warnings: Vec<CalculationWarning>,
}

impl LoanReport {
    pub fn is_paid_off_early(&self, total_months: u32) -> bool {
        self.payoff_month.is_some_and(|m| m < total_months)
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// validates parameters and runs the amortization engine
#[derive(Debug, Clone, Default)]
pub struct EmiCalculator {
    config: CalculatorConfig,
}

impl EmiCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn calculate(&self, params: &LoanParameters) -> Result<LoanReport> {
        params.validate()?;

        let monthly_rate = params.monthly_rate();
        let total_months = params.total_months();
        let plan = params.prepayment_plan();

        let down_payment = compute_down_payment(params)?;
        let original_principal = compute_original_principal(params)?;
        let principal = compute_loan_amount(params)?;
        let one_time_applied = original_principal - principal;

        let mut warnings = Vec::new();
        if !principal.is_positive() {
            let computed_principal = raw_loan_amount(params)?;
            warn!(%computed_principal, "deductions leave nothing to amortize");
            warnings.push(CalculationWarning::DegenerateLoan { computed_principal });
        }

        let emi = compute_emi(principal, monthly_rate, total_months)?;
        debug!(%original_principal, %principal, %emi, total_months, "computed installment");

        let mut run = run_amortization(
            principal,
            monthly_rate,
            total_months,
            emi,
            plan.monthly,
            plan.quarterly,
        );
        if let Some(year) = params.start_year {
            run = run.with_start_year(year);
        }
        let monthly_schedule: Vec<ScheduleRow> = run.collect();

        let share = match self.config.percent_basis {
            PercentBasis::OriginalPrincipal => PaidShare {
                denominator: original_principal,
                paid_upfront: one_time_applied,
            },
            PercentBasis::AmortizedPrincipal => PaidShare {
                denominator: principal,
                paid_upfront: Money::ZERO,
            },
        };
        let yearly_schedule =
            aggregate_yearly(&monthly_schedule, params.tenure_years, params.start_year, &share);

        let totals = summarize_totals(&monthly_schedule, emi, plan.monthly, one_time_applied);
        let payoff_month = monthly_schedule.last().map(|r| r.month);
        let interest_saved = if plan.is_empty() {
            Money::ZERO
        } else {
            let baseline = baseline_interest(params, original_principal)?;
            (baseline - totals.total_interest).clamp_non_negative()
        };
        debug!(
            months = monthly_schedule.len(),
            ?payoff_month,
            total_interest = %totals.total_interest,
            %interest_saved,
            "amortization complete"
        );

        Ok(LoanReport {
            emi,
            yearly_schedule,
            monthly_schedule,
            totals,
            amounts: LoanAmounts {
                home_value: params.home_value,
                down_payment,
                loan_insurance: params.loan_insurance,
                original_principal,
                one_time_prepayment_applied: one_time_applied,
                amortized_principal: principal,
            },
            monthly_outgoings: MonthlyOutgoings::new(params, emi),
            payoff_month,
            interest_saved,
            warnings,
        })
    }
}

/// interest on the same loan with every prepayment removed
fn baseline_interest(params: &LoanParameters, original_principal: Money) -> Result<Money> {
    let monthly_rate = params.monthly_rate();
    let total_months = params.total_months();
    let emi = compute_emi(original_principal, monthly_rate, total_months)?;

    Ok(run_amortization(original_principal, monthly_rate, total_months, emi, Money::ZERO, Money::ZERO)
        .map(|row| row.interest_paid)
        .sum())
}
