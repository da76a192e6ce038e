use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::HomesteadError;
use crate::inflation::projection::{CompletionPlan, OPTIMISTIC_ADJUSTMENT};
use crate::rate_series::RateSeries;
use crate::time_value::{monthly_rate, stays_representable};
use crate::types::{Money, RatePct};
use crate::HomesteadResult;

/// Deposit rate premium over inflation when the yearly equalizer is active.
///
/// Fixed policy: a deposit tracking a yearly inflation schedule is assumed
/// to pay inflation plus two points.
pub const LINKED_DEPOSIT_PREMIUM: RatePct = dec!(2);

const DEFAULT_RENOVATION_RETURN_RATE: RatePct = dec!(60);

const MAX_ANALYSIS_YEARS: u32 = 50;
const MAX_LOAN_TERM_YEARS: u32 = 30;
const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;
const MAX_RATE: RatePct = dec!(100);
/// Matches the scenario floor: no year deflates by more than 10%.
const MIN_INFLATION: RatePct = dec!(-10);
const MAX_PRICE: Money = dec!(1_000_000_000);
const MAX_MONTHLY_AMOUNT: Money = dec!(100_000_000);
const MAX_RENOVATION_PER_AREA: Money = dec!(10_000_000);
const MAX_AREA: Decimal = dec!(10_000);

fn default_renovation_return_rate() -> RatePct {
    DEFAULT_RENOVATION_RETURN_RATE
}

/// Everything the comparison needs, supplied by the caller and never
/// mutated by the engine.
///
/// Rates are percentages. `as_of_year` stands in for "today" in every
/// calendar calculation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub property_price: Money,
    pub down_payment: Money,
    /// Floor area; enables renovation costing and per-area prices
    #[serde(default)]
    pub area: Option<Decimal>,
    /// Analysis horizon in years
    pub analysis_period: u32,

    pub mortgage_rate: RatePct,
    /// Loan term in years
    pub loan_term: u32,
    #[serde(default)]
    pub extra_monthly_payment: Money,

    pub deposit_rate: RatePct,

    pub inflation_rate: RatePct,
    /// Use `yearly_inflation` instead of the flat `inflation_rate`
    #[serde(default)]
    pub use_equalizer: bool,
    #[serde(default)]
    pub yearly_inflation: Vec<RatePct>,

    /// Current monthly rent for a comparable property
    #[serde(default)]
    pub monthly_rent: Money,

    #[serde(default)]
    pub renovation_required: bool,
    #[serde(default)]
    pub renovation_cost_per_area: Money,
    /// Share of the renovation spend recovered at sale, in percent
    #[serde(default = "default_renovation_return_rate")]
    pub renovation_return_rate: RatePct,

    pub completion_year: i32,
    pub as_of_year: i32,

    #[serde(default)]
    pub expected_price_per_area_at_completion: Option<Money>,
    #[serde(default)]
    pub expected_price_per_area_at_sale: Option<Money>,
}

impl InputSnapshot {
    /// The reference scenario: a 10m flat with 20% down on a 30-year 6%
    /// mortgage against an 8% deposit, 5% inflation, delivered this year.
    pub fn with_defaults(as_of_year: i32) -> Self {
        Self {
            property_price: dec!(10_000_000),
            down_payment: dec!(2_000_000),
            area: Some(dec!(50)),
            analysis_period: 10,
            mortgage_rate: dec!(6),
            loan_term: 30,
            extra_monthly_payment: Decimal::ZERO,
            deposit_rate: dec!(8),
            inflation_rate: dec!(5),
            use_equalizer: false,
            yearly_inflation: Vec::new(),
            monthly_rent: dec!(50_000),
            renovation_required: true,
            renovation_cost_per_area: dec!(170_000),
            renovation_return_rate: DEFAULT_RENOVATION_RETURN_RATE,
            completion_year: as_of_year,
            as_of_year,
            expected_price_per_area_at_completion: None,
            expected_price_per_area_at_sale: None,
        }
    }

    /// Reject snapshots that break the shape and range invariants.
    ///
    /// Ranges bound every field the engines compound on, and a final check
    /// keeps the largest balance the horizon can reach inside what `Decimal`
    /// represents.
    pub fn validate(&self) -> HomesteadResult<()> {
        check_range("analysis_period", self.analysis_period, 1, MAX_ANALYSIS_YEARS)?;
        check_range("loan_term", self.loan_term, 1, MAX_LOAN_TERM_YEARS)?;
        check_range("completion_year", self.completion_year, MIN_YEAR, MAX_YEAR)?;
        check_range("as_of_year", self.as_of_year, MIN_YEAR, MAX_YEAR)?;

        if self.property_price <= Decimal::ZERO {
            return Err(invalid("property_price", "Property price must be positive"));
        }
        check_range("property_price", self.property_price, Decimal::ZERO, MAX_PRICE)?;
        if self.down_payment < Decimal::ZERO {
            return Err(invalid("down_payment", "Down payment cannot be negative"));
        }
        if self.down_payment > self.property_price {
            return Err(invalid(
                "down_payment",
                "Down payment cannot exceed the property price",
            ));
        }

        check_range("mortgage_rate", self.mortgage_rate, Decimal::ZERO, MAX_RATE)?;
        check_range("deposit_rate", self.deposit_rate, Decimal::ZERO, MAX_RATE)?;
        check_range("inflation_rate", self.inflation_rate, MIN_INFLATION, MAX_RATE)?;
        for rate in &self.yearly_inflation {
            check_range("yearly_inflation", *rate, MIN_INFLATION, MAX_RATE)?;
        }
        check_range(
            "renovation_return_rate",
            self.renovation_return_rate,
            Decimal::ZERO,
            dec!(100),
        )?;

        if self.extra_monthly_payment < Decimal::ZERO {
            return Err(invalid(
                "extra_monthly_payment",
                "Extra monthly payment cannot be negative",
            ));
        }
        check_range(
            "extra_monthly_payment",
            self.extra_monthly_payment,
            Decimal::ZERO,
            MAX_MONTHLY_AMOUNT,
        )?;
        if self.monthly_rent < Decimal::ZERO {
            return Err(invalid("monthly_rent", "Monthly rent cannot be negative"));
        }
        check_range("monthly_rent", self.monthly_rent, Decimal::ZERO, MAX_MONTHLY_AMOUNT)?;
        if self.renovation_cost_per_area < Decimal::ZERO {
            return Err(invalid(
                "renovation_cost_per_area",
                "Renovation cost cannot be negative",
            ));
        }
        check_range(
            "renovation_cost_per_area",
            self.renovation_cost_per_area,
            Decimal::ZERO,
            MAX_RENOVATION_PER_AREA,
        )?;

        if let Some(area) = self.area {
            if area <= Decimal::ZERO {
                return Err(invalid("area", "Area must be positive when given"));
            }
            check_range("area", area, Decimal::ZERO, MAX_AREA)?;
        }
        for (field, price) in [
            (
                "expected_price_per_area_at_completion",
                self.expected_price_per_area_at_completion,
            ),
            ("expected_price_per_area_at_sale", self.expected_price_per_area_at_sale),
        ] {
            if let Some(p) = price {
                if p <= Decimal::ZERO {
                    return Err(invalid(field, "Expected price must be positive when given"));
                }
                check_range(field, p, Decimal::ZERO, MAX_PRICE)?;
            }
        }
        if self.use_equalizer && self.yearly_inflation.is_empty() {
            return Err(invalid(
                "yearly_inflation",
                "Equalizer is enabled but no yearly rates were given",
            ));
        }

        self.check_magnitude()
    }

    /// Every amount that enters the engines, compounded monthly at the
    /// highest rate in force, with a full mortgage payment and a year of
    /// rent added each month. Renovation is indexed until completion, so the
    /// run covers that too.
    fn check_magnitude(&self) -> HomesteadResult<()> {
        let years_to_completion = self.years_to_completion().max(0) as u32;
        let years = self
            .analysis_period
            .max(self.loan_term)
            .max(years_to_completion);
        let peak_rate = self
            .mortgage_rate
            .max(self.inflation_series().peak() + OPTIMISTIC_ADJUSTMENT)
            .max(self.deposit_series().peak());

        let area = self.area.unwrap_or(Decimal::ZERO);
        let planned_price = self
            .expected_price_per_area_at_completion
            .unwrap_or(Decimal::ZERO)
            .max(self.expected_price_per_area_at_sale.unwrap_or(Decimal::ZERO));
        let start = self.property_price + (self.renovation_cost_per_area + planned_price) * area;
        let inflow = self.loan_amount() * (Decimal::ONE + monthly_rate(peak_rate))
            + self.extra_monthly_payment
            + self.monthly_rent * dec!(12);

        if !stays_representable(start, inflow, peak_rate, years * 12) {
            return Err(invalid(
                "analysis_period",
                "Projected balances exceed the supported numeric range; \
                 shorten the horizon or lower the rates",
            ));
        }
        Ok(())
    }

    pub fn loan_amount(&self) -> Money {
        self.property_price - self.down_payment
    }

    pub fn term_months(&self) -> u32 {
        self.loan_term * 12
    }

    pub fn analysis_months(&self) -> u32 {
        self.analysis_period * 12
    }

    /// Inflation in force: the yearly equalizer, or the flat rate.
    pub fn inflation_series(&self) -> RateSeries {
        if self.use_equalizer && !self.yearly_inflation.is_empty() {
            RateSeries::Yearly(self.yearly_inflation.clone())
        } else {
            RateSeries::Flat(self.inflation_rate)
        }
    }

    /// Deposit rate in force: linked to the equalizer when it is active.
    pub fn deposit_series(&self) -> RateSeries {
        match self.inflation_series() {
            yearly @ RateSeries::Yearly(_) => yearly.with_premium(LINKED_DEPOSIT_PREMIUM),
            RateSeries::Flat(_) => RateSeries::Flat(self.deposit_rate),
        }
    }

    pub fn years_to_completion(&self) -> i32 {
        self.completion_year - self.as_of_year
    }

    /// Years of the horizon left after delivery.
    pub fn years_from_completion_to_end(&self) -> u32 {
        let remaining = self.analysis_period as i64 - self.years_to_completion() as i64;
        remaining.max(0) as u32
    }

    pub fn completion_plan(&self) -> CompletionPlan {
        CompletionPlan {
            area: self.area,
            expected_price_per_area_at_completion: self.expected_price_per_area_at_completion,
            completion_year: self.completion_year,
            as_of_year: self.as_of_year,
        }
    }
}

fn check_range<T>(field: &str, value: T, min: T, max: T) -> HomesteadResult<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if value < min || value > max {
        return Err(HomesteadError::InvalidInput {
            field: field.into(),
            reason: format!("{value} is outside the allowed range {min}..={max}"),
        });
    }
    Ok(())
}

fn invalid(field: &str, reason: &str) -> HomesteadError {
    HomesteadError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}
