use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rate_series::RateSeries;
use crate::time_value::round_unit;
use crate::types::{Money, RatePct};

/// Year-by-year rental income over the analysis horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalProjection {
    /// Income per year, one entry per year of the horizon
    pub yearly: Vec<Money>,
    pub total: Money,
    /// Monthly rent in force during the final year
    pub monthly_rent_at_end: Money,
}

/// Project rental income with a deferred start at `completion_year`.
///
/// Before completion the property earns nothing but the rent is still
/// indexed each year, so occupancy starts at an inflated rent. From
/// completion on, each year earns twelve months of rent and the rent is
/// indexed for the following year.
pub fn project_rental_income(
    current_monthly_rent: Money,
    rates: &RateSeries,
    analysis_years: u32,
    completion_year: i32,
    as_of_year: i32,
) -> RentalProjection {
    let years_until_completion = (completion_year - as_of_year).max(0) as u32;

    let mut yearly = Vec::with_capacity(analysis_years as usize);
    let mut total = Decimal::ZERO;
    let mut monthly_rent = current_monthly_rent;

    for year in 0..analysis_years {
        let index = |rent: Money| {
            round_unit(rent * (Decimal::ONE + rates.rate_for_year(year as usize) / dec!(100)))
        };

        if year < years_until_completion {
            yearly.push(Decimal::ZERO);
            monthly_rent = index(monthly_rent);
            continue;
        }

        let income = round_unit(monthly_rent * dec!(12));
        yearly.push(income);
        total += income;

        if year + 1 < analysis_years {
            monthly_rent = index(monthly_rent);
        }
    }

    RentalProjection {
        yearly,
        total,
        monthly_rent_at_end: monthly_rent,
    }
}

/// Monthly rent minus the monthly mortgage payment (positive is surplus).
pub fn monthly_cash_flow(monthly_rent: Money, monthly_mortgage_payment: Money) -> Money {
    monthly_rent - monthly_mortgage_payment
}

/// Gross rental yield in percent: annual rent / property value × 100.
pub fn rental_yield(monthly_rent: Money, property_value: Money) -> RatePct {
    if property_value <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly_rent * dec!(12) / property_value * dec!(100)
}

/// Running total of rental income month by month, each year's income
/// spread evenly over its twelve months.
pub fn cumulative_monthly_income(projection: &RentalProjection) -> Vec<Money> {
    let mut monthly = Vec::with_capacity(projection.yearly.len() * 12);
    let mut cumulative = Decimal::ZERO;

    for income in &projection.yearly {
        let per_month = *income / dec!(12);
        for _ in 0..12 {
            cumulative += per_month;
            monthly.push(round_unit(cumulative));
        }
    }

    monthly
}
