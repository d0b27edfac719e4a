/// json report - parameters in, full report out
use home_loan_rs::{CalculatorConfig, EmiCalculator, LoanParameters, PercentBasis};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let params = LoanParameters::from_json_str(
        r#"{
            "home_value": "4500000",
            "down_payment_percent": "20",
            "interest_rate_annual_percent": "9.1",
            "tenure_years": 2,
            "loan_insurance": "35000",
            "property_taxes_annual": "18000",
            "home_insurance_annual": "9000",
            "maintenance_monthly": "2500",
            "prepayment_one_time": "300000",
            "start_year": 2026
        }"#,
    )?;

    let calculator = EmiCalculator::with_config(CalculatorConfig {
        percent_basis: PercentBasis::AmortizedPrincipal,
    });
    let report = calculator.calculate(&params)?;

    println!("{}", report.to_json_pretty()?);

    Ok(())
}
