//! Chart-ready series derived from a finished comparison.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rental::income::cumulative_monthly_income;
use crate::strategies::comparison::ComparisonResult;
use crate::strategies::snapshot::InputSnapshot;
use crate::time_value::round_unit;
use crate::types::Money;

/// Balances and values at the end of one month of the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub month: u32,
    pub year: u32,
    pub debt_balance: Money,
    pub deposit_balance: Money,
    /// Property value minus outstanding debt
    pub mortgage_equity: Money,
    /// Base-case market value
    pub property_value: Money,
    pub rental_accumulated: Money,
}

/// Mortgage payments against rental income for one year of the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualCashFlowPoint {
    pub year: u32,
    pub mortgage_payment: Money,
    pub rental_income: Money,
    pub net_cash_flow: Money,
}

/// Month-by-month series over the analysis horizon.
///
/// The property value grows from the purchase price at the base inflation
/// rate: whole years compound, the current partial year accrues linearly.
pub fn time_series(result: &ComparisonResult, snapshot: &InputSnapshot) -> Vec<TimeSeriesPoint> {
    let months = snapshot.analysis_months();
    let inflation = snapshot.inflation_series();
    let rental_accumulated = cumulative_monthly_income(&result.strategy_b.rental);

    let mut points = Vec::with_capacity(months as usize);
    let mut value_at_year_start = snapshot.property_price;

    for month in 1..=months {
        let whole_years = month / 12;
        let partial_months = month % 12;

        let property_value = if partial_months == 0 {
            // Year boundary: compound the year that just closed
            let closed = inflation.rate_for_year(whole_years as usize - 1) / dec!(100);
            value_at_year_start *= Decimal::ONE + closed;
            round_unit(value_at_year_start)
        } else {
            let rate = inflation.rate_for_year(whole_years as usize) / dec!(100);
            let fraction = Decimal::from(partial_months) / dec!(12);
            round_unit(value_at_year_start * (Decimal::ONE + rate * fraction))
        };

        let debt_balance = result
            .mortgage_schedule
            .get(month as usize - 1)
            .map(|row| row.balance)
            .unwrap_or(Decimal::ZERO);
        let deposit_balance = result
            .deposit_schedule
            .get(month as usize - 1)
            .map(|row| row.balance)
            .unwrap_or(Decimal::ZERO);

        points.push(TimeSeriesPoint {
            month,
            year: month.div_ceil(12),
            debt_balance,
            deposit_balance,
            mortgage_equity: property_value - debt_balance,
            property_value,
            rental_accumulated: rental_accumulated
                .get(month as usize - 1)
                .copied()
                .unwrap_or(Decimal::ZERO),
        });
    }

    points
}

/// Year-by-year mortgage outflow against rental inflow.
pub fn rent_vs_mortgage(
    result: &ComparisonResult,
    snapshot: &InputSnapshot,
) -> Vec<AnnualCashFlowPoint> {
    (1..=snapshot.analysis_period)
        .map(|year| {
            let first = (year - 1) * 12 + 1;
            let last = year * 12;
            let mortgage_payment: Money = result
                .mortgage_schedule
                .iter()
                .filter(|row| row.month >= first && row.month <= last)
                .map(|row| row.payment)
                .sum();
            let rental_income = result
                .strategy_b
                .rental
                .yearly
                .get(year as usize - 1)
                .copied()
                .unwrap_or(Decimal::ZERO);

            AnnualCashFlowPoint {
                year,
                mortgage_payment,
                rental_income,
                net_cash_flow: rental_income - mortgage_payment,
            }
        })
        .collect()
}
