use clap::Args;
use log::{debug, info};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use homestead_core::strategies::comparison::compare;
use homestead_core::strategies::time_series::{rent_vs_mortgage, time_series};
use homestead_core::{run_comparison, InputSnapshot};

use crate::input;
use crate::input::settings::export_settings;

/// Snapshot source shared by the strategy commands.
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct SnapshotArgs {
    /// Path to a snapshot or settings file (JSON, or YAML by extension)
    #[arg(long)]
    pub input: Option<String>,

    /// Calendar year treated as "today" (defaults to the current year)
    #[arg(long)]
    pub as_of_year: Option<i32>,

    /// Purchase price
    #[arg(long)]
    pub property_price: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Analysis horizon in years
    #[arg(long)]
    pub analysis_period: Option<u32>,

    /// Mortgage rate in percent (6 = 6%)
    #[arg(long)]
    pub mortgage_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub loan_term: Option<u32>,

    /// Monthly overpayment on top of the annuity
    #[arg(long)]
    pub extra_monthly_payment: Option<Decimal>,

    /// Deposit rate in percent
    #[arg(long)]
    pub deposit_rate: Option<Decimal>,

    /// Flat inflation rate in percent
    #[arg(long)]
    pub inflation_rate: Option<Decimal>,

    /// Year-by-year inflation (comma separated); enables the equalizer
    #[arg(long, value_delimiter = ',')]
    pub yearly_inflation: Option<Vec<Decimal>>,

    /// Current monthly rent
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,

    /// Completion year of an off-plan property
    #[arg(long)]
    pub completion_year: Option<i32>,
}

impl SnapshotArgs {
    /// Document (file or stdin) first, then individual flags on top.
    fn resolve(&self) -> Result<InputSnapshot, Box<dyn std::error::Error>> {
        let document = input::source::read_document(self.input.as_deref())?;
        let snapshot = input::snapshot::resolve_snapshot(document, self.as_of_year)?;
        let overrides = self.overrides();
        if !overrides.is_empty() {
            debug!("flag overrides: {:?}", overrides.keys().collect::<Vec<_>>());
        }
        input::snapshot::apply_overrides(snapshot, overrides)
    }

    fn overrides(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        let mut decimal = |key: &str, v: Option<Decimal>| {
            if let Some(v) = v {
                fields.insert(key.to_string(), json!(v.to_string()));
            }
        };
        decimal("property_price", self.property_price);
        decimal("down_payment", self.down_payment);
        decimal("mortgage_rate", self.mortgage_rate);
        decimal("extra_monthly_payment", self.extra_monthly_payment);
        decimal("deposit_rate", self.deposit_rate);
        decimal("inflation_rate", self.inflation_rate);
        decimal("monthly_rent", self.monthly_rent);

        if let Some(years) = self.analysis_period {
            fields.insert("analysis_period".into(), json!(years));
        }
        if let Some(years) = self.loan_term {
            fields.insert("loan_term".into(), json!(years));
        }
        if let Some(year) = self.completion_year {
            fields.insert("completion_year".into(), json!(year));
        }
        if let Some(ref rates) = self.yearly_inflation {
            let rates: Vec<String> = rates.iter().map(Decimal::to_string).collect();
            fields.insert("yearly_inflation".into(), json!(rates));
            fields.insert("use_equalizer".into(), json!(true));
        }
        fields
    }
}

/// Arguments for the three-way strategy comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Drop the month-by-month schedules from the output
    #[arg(long)]
    pub without_schedules: bool,
}

/// Arguments for chart series
#[derive(Args)]
pub struct TimeSeriesArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Yearly mortgage vs rent instead of monthly balances
    #[arg(long)]
    pub annual: bool,
}

/// Arguments for exporting a settings document
#[derive(Args)]
pub struct SettingsExportArgs {
    #[command(flatten)]
    pub snapshot: SnapshotArgs,

    /// Also write the document to this path
    #[arg(long)]
    pub out: Option<String>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = args.snapshot.resolve()?;
    let output = run_comparison(&snapshot)?;
    let mut value = serde_json::to_value(output)?;

    if args.without_schedules {
        if let Some(result) = value.get_mut("result").and_then(Value::as_object_mut) {
            result.remove("mortgage_schedule");
            result.remove("deposit_schedule");
        }
    }
    Ok(value)
}

pub fn run_time_series(args: TimeSeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = args.snapshot.resolve()?;
    let result = compare(&snapshot)?;

    if args.annual {
        Ok(serde_json::to_value(rent_vs_mortgage(&result, &snapshot))?)
    } else {
        Ok(serde_json::to_value(time_series(&result, &snapshot))?)
    }
}

pub fn run_settings_export(args: SettingsExportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot = args.snapshot.resolve()?;
    snapshot.validate()?;

    let document = serde_json::to_value(export_settings(&snapshot, chrono::Utc::now()))?;
    if let Some(ref path) = args.out {
        input::source::write_json(path, &document)?;
        info!("settings written to {path}");
    }
    Ok(document)
}
