pub mod calculator;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod types;
pub mod view;

// re-export key types
pub use calculator::{EmiCalculator, LoanAmounts, LoanReport};
pub use config::{CalculatorConfig, LoanParameters, LoanParametersBuilder};
pub use decimal::{Money, Rate};
pub use errors::{CalculationWarning, LoanError, Result};
pub use payments::{
    aggregate_yearly, compute_emi, compute_loan_amount, run_amortization, summarize_totals,
    AmortizationRun, LoanTotals, MonthlyOutgoings, PrepaymentPlan, ScheduleRow, YearlySummaryRow,
};
pub use types::{PercentBasis, YearMonth};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
