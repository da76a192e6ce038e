use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::rate_series::RateSeries;
use crate::types::{Money, RatePct};

const HALF: Decimal = dec!(0.5);
const HUNDRED: Decimal = dec!(100);

/// Largest value an engine input may compound to. Four orders of magnitude
/// below `Decimal::MAX` are left for intermediate products.
pub const MAGNITUDE_LIMIT: Decimal = dec!(1_000_000_000_000_000_000_000_000);

/// Round to the nearest whole unit, halves upward (`⌊x + 0.5⌋`).
///
/// Every engine rounds with this at each accumulation step; downstream
/// balances compound on the rounded value.
pub fn round_unit(value: Decimal) -> Money {
    (value + HALF).floor()
}

/// Convert an annual percentage rate to a monthly fraction.
pub fn monthly_rate(annual_rate: RatePct) -> Decimal {
    annual_rate / HUNDRED / dec!(12)
}

/// Growth factor `Π (1 + max(rate_y + adjustment, floor) / 100)` over `years`.
///
/// Pass `None` as `floor` to compound the raw rates.
pub fn compound_factor(
    rates: &RateSeries,
    years: u32,
    adjustment: RatePct,
    floor: Option<RatePct>,
) -> Decimal {
    let mut factor = Decimal::ONE;
    for year in 0..years as usize {
        let mut effective = rates.rate_for_year(year) + adjustment;
        if let Some(min) = floor {
            effective = effective.max(min);
        }
        factor *= Decimal::ONE + effective / HUNDRED;
    }
    factor
}

/// Future value of a single sum: `round(pv × (1 + rate/100)^years)`.
pub fn future_value(present_value: Money, annual_rate: RatePct, years: u32) -> Money {
    if years == 0 {
        return present_value;
    }
    let factor = compound_factor(&RateSeries::Flat(annual_rate), years, Decimal::ZERO, None);
    round_unit(present_value * factor)
}

/// Whether `start`, compounded monthly at `peak_rate` with `inflow` added
/// every month, stays within [`MAGNITUDE_LIMIT`] for `months`.
///
/// Monthly compounding at the peak rate bounds every schedule and yearly
/// projection in the engines, so inputs that pass cannot overflow them.
pub fn stays_representable(start: Money, inflow: Money, peak_rate: RatePct, months: u32) -> bool {
    let growth = Decimal::ONE + monthly_rate(peak_rate.max(Decimal::ZERO));
    let inflow = inflow.abs();
    let mut bound = start.abs();
    for _ in 0..months {
        match bound.checked_mul(growth).and_then(|b| b.checked_add(inflow)) {
            Some(next) if next <= MAGNITUDE_LIMIT => bound = next,
            _ => return false,
        }
    }
    bound <= MAGNITUDE_LIMIT
}
