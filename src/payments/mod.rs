pub mod amortization;
pub mod prepayment;
pub mod summary;

pub use amortization::{
    compute_down_payment, compute_emi, compute_loan_amount, compute_original_principal,
    run_amortization, AmortizationRun, ScheduleRow,
};
pub use prepayment::PrepaymentPlan;
pub use summary::{
    aggregate_yearly, summarize_totals, LoanTotals, MonthlyOutgoings, PaidShare,
    YearlySummaryRow,
};
