//! Inflation indexing of asset values under pessimistic, base, and
//! optimistic rate adjustments, including off-plan purchases that are
//! re-based on a planned price at completion.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rate_series::RateSeries;
use crate::time_value::{compound_factor, round_unit};
use crate::types::{Money, RatePct, ScenarioValue};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Rate adjustment for the pessimistic scenario, in percentage points.
pub const PESSIMISTIC_ADJUSTMENT: RatePct = dec!(-2);

/// Rate adjustment for the optimistic scenario, in percentage points.
pub const OPTIMISTIC_ADJUSTMENT: RatePct = dec!(3);

/// No year's effective rate goes below this, whatever the adjustment.
pub const EFFECTIVE_RATE_FLOOR: RatePct = dec!(-10);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Delivery terms of an off-plan purchase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompletionPlan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_price_per_area_at_completion: Option<Money>,
    pub completion_year: i32,
    pub as_of_year: i32,
}

impl CompletionPlan {
    /// Years from `as_of_year` until delivery; non-positive once delivered.
    pub fn years_to_completion(&self) -> i32 {
        self.completion_year - self.as_of_year
    }

    /// Planned value at completion, when both area and price are known.
    pub fn value_at_completion(&self) -> Option<Money> {
        match (self.area, self.expected_price_per_area_at_completion) {
            (Some(area), Some(price)) if area > Decimal::ZERO && price > Decimal::ZERO => {
                Some(round_unit(area * price))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Index `base_value` over `years`, each year's rate shifted by
/// `adjustment` points and floored at [`EFFECTIVE_RATE_FLOOR`].
pub fn project_value(
    base_value: Money,
    rates: &RateSeries,
    years: u32,
    adjustment: RatePct,
) -> Money {
    let factor = compound_factor(rates, years, adjustment, Some(EFFECTIVE_RATE_FLOOR));
    round_unit(base_value * factor)
}

/// Three-scenario projection of `current_price` over `years`.
pub fn scenarios(current_price: Money, rates: &RateSeries, years: u32) -> ScenarioValue {
    ScenarioValue {
        pessimistic: project_value(current_price, rates, years, PESSIMISTIC_ADJUSTMENT),
        base: project_value(current_price, rates, years, Decimal::ZERO),
        optimistic: project_value(current_price, rates, years, OPTIMISTIC_ADJUSTMENT),
    }
}

/// Three-scenario projection that honours a planned off-plan price.
///
/// While the property is still under construction and a planned price per
/// area is known, the value at completion is that planned price, and only
/// the years after completion are indexed, with the rate schedule re-based
/// at the completion year. Otherwise this is [`scenarios`] from the current
/// price.
pub fn scenarios_with_completion(
    current_price: Money,
    rates: &RateSeries,
    analysis_period: u32,
    plan: &CompletionPlan,
) -> ScenarioValue {
    let years_to_completion = plan.years_to_completion();
    match plan.value_at_completion() {
        Some(value_at_completion) if years_to_completion > 0 => {
            let offset = years_to_completion as u32;
            let years_after = analysis_period.saturating_sub(offset);
            let rates_after = rates.starting_at(offset as usize);
            scenarios(value_at_completion, &rates_after, years_after)
        }
        _ => scenarios(current_price, rates, analysis_period),
    }
}

/// Pin the base case to a planned sale price (`area × price_per_area`).
///
/// The pessimistic and optimistic cases keep their ratio to the projected
/// base case. Without a usable area and price the projection is returned
/// unchanged.
pub fn apply_sale_target(
    projected: ScenarioValue,
    area: Option<Decimal>,
    price_per_area_at_sale: Option<Money>,
) -> ScenarioValue {
    let target = match (area, price_per_area_at_sale) {
        (Some(a), Some(p)) if a > Decimal::ZERO && p > Decimal::ZERO => round_unit(a * p),
        _ => return projected,
    };

    if projected.base.is_zero() {
        return ScenarioValue::uniform(target);
    }

    ScenarioValue {
        pessimistic: round_unit(target * projected.pessimistic / projected.base),
        base: target,
        optimistic: round_unit(target * projected.optimistic / projected.base),
    }
}

/// Cumulative inflation factor over `years` (1.34 means prices rose 34%).
pub fn inflation_factor(rates: &RateSeries, years: u32) -> Decimal {
    compound_factor(rates, years, Decimal::ZERO, None)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
