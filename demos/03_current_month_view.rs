/// current month view - the display layer decides what "now" is
use chrono::{TimeZone, Utc};
use home_loan_rs::view::{current_month, monthly_table, visible_months};
use home_loan_rs::{Decimal, EmiCalculator, LoanParameters, Money, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()
    ));
    let controller = time.test_control().unwrap();

    let mut params = LoanParameters::home_loan(
        Money::from_major(2_500_000),
        Decimal::from(10),
        Decimal::from(9),
        5,
    );
    params.start_year = Some(2025);

    // the engine never sees the clock
    let report = EmiCalculator::new().calculate(&params)?;

    let now = current_month(&time);
    println!("rows from {}:", now);
    println!("{}", monthly_table(&visible_months(&report.monthly_schedule, Some(now))[..6]));

    // a year later the same report shows fewer rows
    controller.advance(chrono::Duration::days(365));
    let later = current_month(&time);
    let remaining = visible_months(&report.monthly_schedule, Some(later));
    println!("\n{} rows remain from {}", remaining.len(), later);

    Ok(())
}
