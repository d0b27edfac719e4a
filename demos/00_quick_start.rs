/// quick start - minimal example to get started
use home_loan_rs::{Decimal, EmiCalculator, LoanParameters, Money};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 50 lakh home, 20% down, 8.5% for 20 years
    let params = LoanParameters::home_loan(
        Money::from_major(5_000_000),
        Decimal::from(20),
        Decimal::new(85, 1),
        20,
    );

    let report = EmiCalculator::new().calculate(&params)?;

    println!("loan amount:    {}", report.amounts.amortized_principal);
    println!("emi:            {}", report.emi.round_dp(2));
    println!("total interest: {}", report.totals.total_interest.round_dp(2));

    Ok(())
}
