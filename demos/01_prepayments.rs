/// prepayments - how monthly, quarterly and one-time prepayments shorten a loan
use home_loan_rs::view::{yearly_table, SummaryView};
use home_loan_rs::{Decimal, EmiCalculator, LoanParameters, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base = LoanParameters::builder()
        .home_value(Money::from_major(6_000_000))
        .down_payment_percent(Decimal::from(25))
        .rate_percent(Decimal::new(875, 2))
        .tenure_years(20)
        .start_year(2025)
        .build()?;

    let calculator = EmiCalculator::new();
    let without = calculator.calculate(&base)?;

    let with_prepayments = LoanParameters {
        prepayment_monthly: Money::from_major(5_000),
        prepayment_quarterly: Money::from_major(25_000),
        prepayment_one_time: Money::from_major(200_000),
        ..base.clone()
    };
    let with = calculator.calculate(&with_prepayments)?;

    println!("=== without prepayments ===");
    println!("emi {}, paid off in month {:?}", without.emi.round_dp(2), without.payoff_month);
    println!("total interest {}\n", without.totals.total_interest.round_dp(2));

    println!("=== with prepayments ===");
    let summary = SummaryView::from_report(&with);
    println!("{}", summary.to_json_pretty()?);
    println!("{}", yearly_table(&with.yearly_schedule));

    Ok(())
}
