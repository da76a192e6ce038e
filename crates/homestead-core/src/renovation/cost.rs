use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::deposit::growth::opportunity_cost;
use crate::inflation::projection::project_value;
use crate::rate_series::RateSeries;
use crate::time_value::round_unit;
use crate::types::{Money, RatePct};

/// Renovation cost at the completion year: `cost_per_area × area` indexed
/// by inflation over the years until delivery.
pub fn renovation_cost(
    cost_per_area: Money,
    area: Decimal,
    rates: &RateSeries,
    completion_year: i32,
    as_of_year: i32,
) -> Money {
    if area <= Decimal::ZERO || cost_per_area <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let years_until_completion = (completion_year - as_of_year).max(0) as u32;
    project_value(cost_per_area * area, rates, years_until_completion, Decimal::ZERO)
}

/// Deposit interest forgone by spending `renovation_cost` at completion
/// instead of depositing it until the end of the horizon.
pub fn renovation_opportunity_cost(
    renovation_cost: Money,
    deposit_rates: &RateSeries,
    years_from_completion_to_end: u32,
) -> Money {
    opportunity_cost(renovation_cost, deposit_rates, years_from_completion_to_end)
}

/// Part of the renovation spend recovered in the sale price.
pub fn recovered_at_sale(renovation_cost: Money, return_rate: RatePct) -> Money {
    round_unit(renovation_cost * return_rate / dec!(100))
}

pub fn price_per_area(property_price: Money, area: Option<Decimal>) -> Option<Money> {
    match area {
        Some(a) if a > Decimal::ZERO => Some(round_unit(property_price / a)),
        _ => None,
    }
}

/// A property delivered this year or later most likely needs finishing.
pub fn renovation_likely_needed(completion_year: i32, as_of_year: i32) -> bool {
    completion_year >= as_of_year
}

/// Calendar year in which the renovation is paid for.
pub fn renovation_year(completion_year: i32, as_of_year: i32) -> i32 {
    completion_year.max(as_of_year)
}

/// Cash out of pocket up front: down payment plus renovation.
pub fn initial_investment(down_payment: Money, renovation_cost: Money) -> Money {
    down_payment + renovation_cost
}
