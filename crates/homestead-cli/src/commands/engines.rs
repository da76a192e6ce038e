use std::time::Instant;

use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use homestead_core::deposit::growth;
use homestead_core::inflation::projection;
use homestead_core::mortgage::amortization;
use homestead_core::rental::income;
use homestead_core::time_value::stays_representable;
use homestead_core::{with_metadata, Money, RatePct, RateSeries};

use crate::input;

type CmdResult = Result<Value, Box<dyn std::error::Error>>;
type CheckResult = Result<(), Box<dyn std::error::Error>>;

const MAX_AMOUNT: Money = dec!(1_000_000_000_000);
const MAX_RATE: RatePct = dec!(100);
const MIN_RATE: RatePct = dec!(-100);
const MAX_MONTHS: u32 = 1200;
const MAX_YEARS: u32 = 100;
const MIN_CALENDAR_YEAR: i32 = 1900;
const MAX_CALENDAR_YEAR: i32 = 2200;

fn ensure_range<T>(field: &str, value: T, min: T, max: T) -> CheckResult
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(format!("{field} must be within {min}..={max}, got {value}").into());
    }
    Ok(())
}

fn ensure_rates(field: &str, rates: &RateSeries, min: RatePct) -> CheckResult {
    ensure_range(field, rates.trough(), min, MAX_RATE)?;
    ensure_range(field, rates.peak(), min, MAX_RATE)
}

fn ensure_representable(start: Money, inflow: Money, peak_rate: RatePct, months: u32) -> CheckResult {
    if !stays_representable(start, inflow, peak_rate, months) {
        return Err("inputs compound past the supported numeric range; \
                    shorten the horizon or lower the rates"
            .into());
    }
    Ok(())
}

/// Read an engine input from `--input` or stdin; `None` means "use flags".
fn document_input<T: serde::de::DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match input::source::read_document(path)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// `--yearly-rates` wins over `--rate`; neither means `default`.
fn rate_series(rate: Option<Decimal>, yearly: Option<Vec<Decimal>>, default: RatePct) -> RateSeries {
    match (yearly, rate) {
        (Some(rates), _) if !rates.is_empty() => RateSeries::Yearly(rates),
        (_, Some(rate)) => RateSeries::Flat(rate),
        _ => RateSeries::Flat(default),
    }
}

fn elapsed_us(start: Instant) -> u64 {
    start.elapsed().as_micros() as u64
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub principal: Money,
    pub annual_rate: RatePct,
    pub term_months: u32,
    #[serde(default)]
    pub extra_payment: Money,
}

impl AmortizationInput {
    fn check(&self) -> CheckResult {
        ensure_range("principal", self.principal, Decimal::ZERO, MAX_AMOUNT)?;
        ensure_range("annual_rate", self.annual_rate, Decimal::ZERO, MAX_RATE)?;
        ensure_range("term_months", self.term_months, 1, MAX_MONTHS)?;
        ensure_range("extra_payment", self.extra_payment, Decimal::ZERO, MAX_AMOUNT)?;
        // The annuity factor (1 + r)^n is compounded on its own, so bound it
        // from at least one unit
        ensure_representable(
            self.principal.max(Decimal::ONE),
            self.principal + self.extra_payment,
            self.annual_rate,
            self.term_months,
        )
    }
}

/// Arguments for the mortgage schedule
#[derive(Args)]
pub struct AmortizationArgs {
    /// Path to JSON/YAML input (principal, annual_rate, term_months, extra_payment)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Monthly overpayment
    #[arg(long)]
    pub extra: Option<Decimal>,

    /// Only print the first N schedule rows
    #[arg(long)]
    pub rows: Option<usize>,
}

pub fn run_amortization(args: AmortizationArgs) -> CmdResult {
    let inp = match document_input::<AmortizationInput>(args.input.as_deref())? {
        Some(inp) => inp,
        None => AmortizationInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?
                .checked_mul(12)
                .ok_or("--term-years is too large")?,
            extra_payment: args.extra.unwrap_or(Decimal::ZERO),
        },
    };
    inp.check()?;

    let start = Instant::now();
    let payment = amortization::annuity_payment(inp.principal, inp.annual_rate, inp.term_months);
    let mut schedule = amortization::amortization_schedule(
        inp.principal,
        inp.annual_rate,
        inp.term_months,
        inp.extra_payment,
    );
    let payoff_month = amortization::payoff_month(&schedule);
    let totals = amortization::payments_through(&schedule, payoff_month);
    let interest_saved = amortization::interest_saved(
        inp.principal,
        inp.annual_rate,
        inp.term_months,
        inp.extra_payment,
    );
    let term_reduction = amortization::term_reduction(
        inp.principal,
        inp.annual_rate,
        inp.term_months,
        inp.extra_payment,
    );
    if let Some(rows) = args.rows {
        schedule.truncate(rows);
    }

    let result = json!({
        "annuity_payment": payment,
        "payoff_month": payoff_month,
        "totals": totals,
        "interest_saved": interest_saved,
        "term_reduction_months": term_reduction,
        "schedule": schedule,
    });
    let output = with_metadata(
        "Fixed annuity with monthly rounding and optional overpayment",
        &inp,
        Vec::new(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

// ---------------------------------------------------------------------------
// Deposit
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct DepositInput {
    pub initial_deposit: Money,
    #[serde(default)]
    pub monthly_contribution: Money,
    pub rates: RateSeries,
    pub months: u32,
}

impl DepositInput {
    fn check(&self) -> CheckResult {
        ensure_range("initial_deposit", self.initial_deposit, Decimal::ZERO, MAX_AMOUNT)?;
        ensure_range(
            "monthly_contribution",
            self.monthly_contribution,
            Decimal::ZERO,
            MAX_AMOUNT,
        )?;
        ensure_rates("rates", &self.rates, MIN_RATE)?;
        ensure_range("months", self.months, 0, MAX_MONTHS)?;
        ensure_representable(
            self.initial_deposit,
            self.monthly_contribution,
            self.rates.peak(),
            self.months,
        )
    }
}

/// Arguments for deposit growth
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct DepositArgs {
    /// Path to JSON/YAML input (initial_deposit, monthly_contribution, rates, months)
    #[arg(long)]
    pub input: Option<String>,

    /// Opening balance
    #[arg(long)]
    pub initial: Option<Decimal>,

    /// Contribution added from month 2 on
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Flat annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Year-by-year rates in percent (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub yearly_rates: Option<Vec<Decimal>>,

    /// Number of months
    #[arg(long, default_value = "120")]
    pub months: u32,

    /// Only print the first N schedule rows
    #[arg(long)]
    pub rows: Option<usize>,
}

pub fn run_deposit(args: DepositArgs) -> CmdResult {
    let inp = match document_input::<DepositInput>(args.input.as_deref())? {
        Some(inp) => inp,
        None => DepositInput {
            initial_deposit: args
                .initial
                .ok_or("--initial is required (or provide --input)")?,
            monthly_contribution: args.monthly.unwrap_or(Decimal::ZERO),
            rates: rate_series(args.rate, args.yearly_rates, Decimal::ZERO),
            months: args.months,
        },
    };
    inp.check()?;

    let start = Instant::now();
    let mut schedule = growth::deposit_schedule(
        inp.initial_deposit,
        inp.monthly_contribution,
        &inp.rates,
        inp.months,
    );
    let final_balance = growth::final_balance(&schedule);
    let total_interest = growth::total_interest(&schedule);
    let total_contributions = final_balance - total_interest;

    let mut warnings = Vec::new();
    let negative = inp.rates.negative_years(inp.months.div_ceil(12) as usize);
    if !negative.is_empty() {
        warnings.push(format!("Deposit rate is negative in {} year(s)", negative.len()));
    }
    if let Some(rows) = args.rows {
        schedule.truncate(rows);
    }

    let result = json!({
        "final_balance": final_balance,
        "total_contributions": total_contributions,
        "total_interest": total_interest,
        "schedule": schedule,
    });
    let output = with_metadata(
        "Monthly capitalisation, contributions after interest",
        &inp,
        warnings,
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

// ---------------------------------------------------------------------------
// Property value
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct PropertyValueInput {
    pub current_price: Money,
    pub rates: RateSeries,
    pub years: u32,
}

impl PropertyValueInput {
    fn check(&self) -> CheckResult {
        ensure_range("current_price", self.current_price, Decimal::ZERO, MAX_AMOUNT)?;
        ensure_rates("rates", &self.rates, MIN_RATE)?;
        ensure_range("years", self.years, 0, MAX_YEARS)?;
        ensure_representable(
            self.current_price.max(Decimal::ONE),
            Decimal::ZERO,
            self.rates.peak() + projection::OPTIMISTIC_ADJUSTMENT,
            self.years * 12,
        )
    }
}

/// Arguments for the three-scenario value projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct PropertyValueArgs {
    /// Path to JSON/YAML input (current_price, rates, years)
    #[arg(long)]
    pub input: Option<String>,

    /// Current market price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Flat inflation rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Year-by-year inflation in percent (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub yearly_rates: Option<Vec<Decimal>>,

    /// Projection horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,
}

pub fn run_property_value(args: PropertyValueArgs) -> CmdResult {
    let inp = match document_input::<PropertyValueInput>(args.input.as_deref())? {
        Some(inp) => inp,
        None => PropertyValueInput {
            current_price: args.price.ok_or("--price is required (or provide --input)")?,
            rates: rate_series(args.rate, args.yearly_rates, Decimal::ZERO),
            years: args.years,
        },
    };
    inp.check()?;

    let start = Instant::now();
    let values = projection::scenarios(inp.current_price, &inp.rates, inp.years);
    let factor = projection::inflation_factor(&inp.rates, inp.years);

    let result = json!({
        "pessimistic": values.pessimistic,
        "base": values.base,
        "optimistic": values.optimistic,
        "inflation_factor": factor,
    });
    let output = with_metadata(
        "Annual compounding at inflation -2 / +0 / +3 points, floored at -10%",
        &inp,
        Vec::new(),
        elapsed_us(start),
        result,
    );
    Ok(serde_json::to_value(output)?)
}

// ---------------------------------------------------------------------------
// Rental
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct RentalInput {
    pub monthly_rent: Money,
    pub rates: RateSeries,
    pub years: u32,
    pub completion_year: Option<i32>,
    pub as_of_year: Option<i32>,
}

impl RentalInput {
    fn check(&self) -> CheckResult {
        ensure_range("monthly_rent", self.monthly_rent, Decimal::ZERO, MAX_AMOUNT)?;
        ensure_rates("rates", &self.rates, MIN_RATE)?;
        ensure_range("years", self.years, 0, MAX_YEARS)?;
        for (field, year) in [
            ("completion_year", self.completion_year),
            ("as_of_year", self.as_of_year),
        ] {
            if let Some(year) = year {
                ensure_range(field, year, MIN_CALENDAR_YEAR, MAX_CALENDAR_YEAR)?;
            }
        }
        let annual_rent = self.monthly_rent * dec!(12);
        ensure_representable(annual_rent, annual_rent, self.rates.peak(), self.years * 12)
    }
}

/// Arguments for the rental income projection
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RentalArgs {
    /// Path to JSON/YAML input (monthly_rent, rates, years, completion_year, as_of_year)
    #[arg(long)]
    pub input: Option<String>,

    /// Current monthly rent
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Flat indexation rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Year-by-year indexation in percent (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub yearly_rates: Option<Vec<Decimal>>,

    /// Projection horizon in years
    #[arg(long, default_value = "10")]
    pub years: u32,

    /// Year the property can first be let
    #[arg(long)]
    pub completion_year: Option<i32>,

    /// Calendar year treated as "today"
    #[arg(long)]
    pub as_of_year: Option<i32>,
}

pub fn run_rental(args: RentalArgs) -> CmdResult {
    let inp = match document_input::<RentalInput>(args.input.as_deref())? {
        Some(inp) => inp,
        None => RentalInput {
            monthly_rent: args.rent.ok_or("--rent is required (or provide --input)")?,
            rates: rate_series(args.rate, args.yearly_rates, Decimal::ZERO),
            years: args.years,
            completion_year: args.completion_year,
            as_of_year: args.as_of_year,
        },
    };
    inp.check()?;

    let as_of_year = inp
        .as_of_year
        .or(args.as_of_year)
        .unwrap_or_else(input::snapshot::current_year);
    let completion_year = inp.completion_year.unwrap_or(as_of_year);

    let start = Instant::now();
    let projection = income::project_rental_income(
        inp.monthly_rent,
        &inp.rates,
        inp.years,
        completion_year,
        as_of_year,
    );

    let mut warnings = Vec::new();
    if completion_year - as_of_year >= inp.years as i32 {
        warnings.push(format!(
            "Completion in {completion_year} falls outside the {}-year horizon",
            inp.years
        ));
    }

    let output = with_metadata(
        "Rent indexed yearly, zero income until completion",
        &inp,
        warnings,
        elapsed_us(start),
        projection,
    );
    Ok(serde_json::to_value(output)?)
}
