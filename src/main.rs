use std::process;

use clap::{Parser, ValueEnum};
use home_loan_rs::view::{self, SummaryView};
use home_loan_rs::{
    CalculatorConfig, Decimal, EmiCalculator, LoanError, LoanParameters, Money, PercentBasis,
    SafeTimeProvider, TimeSource, YearMonth,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Home loan EMI calculator with prepayment-aware amortization schedules
#[derive(Parser, Debug)]
#[command(name = "home-loan", version, about)]
struct Cli {
    /// Read loan parameters from a json file instead of flags
    #[arg(long)]
    input: Option<String>,

    /// Property price
    #[arg(long)]
    home_value: Option<Money>,

    /// Down payment as a percentage of the property price
    #[arg(long, default_value = "0")]
    down_payment: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    rate: Option<Decimal>,

    /// Loan tenure in years
    #[arg(long)]
    tenure: Option<u32>,

    #[arg(long, default_value = "0")]
    loan_insurance: Money,

    /// Annual property taxes
    #[arg(long, default_value = "0")]
    property_taxes: Money,

    /// Annual home insurance premium
    #[arg(long, default_value = "0")]
    home_insurance: Money,

    /// Monthly maintenance
    #[arg(long, default_value = "0")]
    maintenance: Money,

    #[arg(long, default_value = "0")]
    prepay_monthly: Money,

    #[arg(long, default_value = "0")]
    prepay_quarterly: Money,

    /// One-time prepayment applied upfront
    #[arg(long, default_value = "0")]
    prepay_once: Money,

    /// First calendar year of the schedule (defaults to the current year)
    #[arg(long)]
    start_year: Option<i32>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    output: OutputFormat,

    /// Include the monthly schedule
    #[arg(long)]
    monthly: bool,

    /// Show monthly rows from this month on (YYYY-MM)
    #[arg(long, conflicts_with = "from_current_month")]
    from: Option<YearMonth>,

    /// Show monthly rows from the current month on
    #[arg(long)]
    from_current_month: bool,

    /// Denominator for the percent-paid column
    #[arg(long, value_enum, default_value = "original")]
    percent_basis: BasisArg,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

#[derive(Debug, Clone, ValueEnum)]
enum BasisArg {
    Original,
    Amortized,
}

impl From<BasisArg> for PercentBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Original => PercentBasis::OriginalPrincipal,
            BasisArg::Amortized => PercentBasis::AmortizedPrincipal,
        }
    }
}

fn init_logging(level: &str) {
    let default_filter = format!("home_loan={level},home_loan_rs={level}");
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

fn missing(field: &'static str) -> LoanError {
    LoanError::InvalidInput {
        field,
        reason: "is required when --input is not given".to_string(),
    }
}

fn parameters(cli: &Cli, time: &SafeTimeProvider) -> home_loan_rs::Result<LoanParameters> {
    let mut params = match &cli.input {
        Some(path) => LoanParameters::from_json_file(path)?,
        None => {
            let mut builder = LoanParameters::builder()
                .home_value(cli.home_value.ok_or_else(|| missing("home_value"))?)
                .down_payment_percent(cli.down_payment)
                .rate_percent(cli.rate.ok_or_else(|| missing("interest_rate_annual_percent"))?)
                .tenure_years(cli.tenure.ok_or_else(|| missing("tenure_years"))?)
                .loan_insurance(cli.loan_insurance)
                .property_taxes_annual(cli.property_taxes)
                .home_insurance_annual(cli.home_insurance)
                .maintenance_monthly(cli.maintenance)
                .prepayment_monthly(cli.prepay_monthly)
                .prepayment_quarterly(cli.prepay_quarterly)
                .prepayment_one_time(cli.prepay_once);
            if let Some(year) = cli.start_year {
                builder = builder.start_year(year);
            }
            builder.build()?
        }
    };

    if let Some(year) = cli.start_year {
        params.start_year = Some(year);
    }
    if params.start_year.is_none() {
        params.start_year = Some(view::current_month(time).year);
    }
    Ok(params)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::System);
    let params = parameters(&cli, &time)?;

    let calculator = EmiCalculator::with_config(CalculatorConfig {
        percent_basis: cli.percent_basis.clone().into(),
    });
    let report = calculator.calculate(&params)?;
    let summary = SummaryView::from_report(&report);

    let visible_from = if cli.from_current_month {
        Some(view::current_month(&time))
    } else {
        cli.from
    };
    let monthly = view::visible_months(&report.monthly_schedule, visible_from);

    match cli.output {
        OutputFormat::Json => {
            let mut value = serde_json::json!({
                "summary": summary,
                "monthly_outgoings": report.monthly_outgoings,
                "yearly_schedule": report.yearly_schedule,
            });
            if cli.monthly {
                value["monthly_schedule"] = serde_json::to_value(monthly)?;
            }
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            println!("{}", view::summary_table(&summary));
            for warning in &summary.warnings {
                println!("warning: {}", warning);
            }
            println!("\n{}", view::yearly_table(&report.yearly_schedule));
            if cli.monthly {
                println!("\n{}", view::monthly_table(monthly));
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
