//! Strategy comparison: buy-and-sell (A), buy-and-rent (B), and deposit
//! only (C), built from the mortgage, deposit, inflation, rental, and
//! renovation engines and ranked on their base-case outcome.

use log::{debug, trace, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::deposit::growth::{self, DepositRow};
use crate::inflation::projection;
use crate::mortgage::amortization::{self, AmortizationRow};
use crate::renovation::cost as renovation;
use crate::rental::income::{self, RentalProjection};
use crate::strategies::snapshot::InputSnapshot;
use crate::types::{with_metadata, ComputationOutput, Money, RatePct, ScenarioValue};
use crate::HomesteadResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Buy with a mortgage, sell at the end of the horizon
    A,
    /// Buy with a mortgage, rent the property out
    B,
    /// Keep the capital in a deposit
    C,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::A => "Mortgage + sale",
            Strategy::B => "Mortgage + rental",
            Strategy::C => "Bank deposit",
        }
    }
}

/// Strategy A: buy with a mortgage and sell after the horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyAResult {
    pub property_value_at_end: ScenarioValue,
    pub remaining_debt: Money,
    pub total_mortgage_payments: Money,
    pub total_interest_paid: Money,
    pub down_payment: Money,
    pub renovation_cost: Money,
    /// Renovation spend recovered in the sale price
    pub renovation_recovered_at_sale: Money,
    /// Sale price minus outstanding debt
    pub net_proceeds_from_sale: ScenarioValue,
    /// Net proceeds minus everything paid in (renovation excluded)
    pub profit_loss: ScenarioValue,
    /// Down payment plus mortgage payments
    pub total_invested: Money,
}

/// Strategy B: buy with a mortgage and keep the property as a rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyBResult {
    pub property_value_at_end: ScenarioValue,
    pub remaining_debt: Money,
    pub total_mortgage_payments: Money,
    pub total_interest_paid: Money,
    pub down_payment: Money,
    pub renovation_cost: Money,
    pub total_rental_income: Money,
    pub rental: RentalProjection,
    /// Market value minus outstanding debt
    pub net_equity: ScenarioValue,
    /// Rental income minus mortgage payments
    pub cash_flow: Money,
    /// Current rent minus the monthly mortgage payment, overpayment included
    pub monthly_cash_flow: Money,
    /// Gross yield of the current rent on the purchase price, in percent
    pub rental_yield: RatePct,
    pub total_invested: Money,
}

/// Strategy C: deposit the down payment and the would-be mortgage payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCResult {
    pub final_balance: Money,
    pub total_contributions: Money,
    pub total_interest_earned: Money,
    /// Interest the renovation money would have earned on deposit
    pub renovation_savings_interest: Money,
}

/// Base-case value each strategy is ranked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyValues {
    pub a: Money,
    pub b: Money,
    pub c: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub strategy_a: StrategyAResult,
    pub strategy_b: StrategyBResult,
    pub strategy_c: StrategyCResult,
    pub values: StrategyValues,
    pub winner: Strategy,
    pub winner_name: String,
    pub difference_best_vs_worst: Money,
    pub mortgage_schedule: Vec<AmortizationRow>,
    pub deposit_schedule: Vec<DepositRow>,
    pub annuity_payment: Money,
    pub loan_amount: Money,
    /// Months until the loan is repaid, overpayments included
    pub actual_loan_term_months: u32,
    /// Interest avoided through overpayments over the full term
    pub interest_saved: Money,
    /// Purchase price per unit of area, when the area is known
    pub price_per_area: Option<Money>,
    /// Calendar year the renovation is paid for; `None` without a renovation
    pub renovation_year: Option<i32>,
    /// Down payment plus renovation, paid before any income arrives
    pub initial_investment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compare the three strategies for one snapshot.
///
/// Fails only when the snapshot breaks its invariants; everything after
/// validation is a pure function of the snapshot.
pub fn compare(snapshot: &InputSnapshot) -> HomesteadResult<ComparisonResult> {
    snapshot.validate()?;

    let loan_amount = snapshot.loan_amount();
    let term_months = snapshot.term_months();
    let analysis_months = snapshot.analysis_months();
    let inflation = snapshot.inflation_series();
    let deposit_rates = snapshot.deposit_series();

    // --- Mortgage ---
    let annuity_payment =
        amortization::annuity_payment(loan_amount, snapshot.mortgage_rate, term_months);
    let total_monthly_payment = annuity_payment + snapshot.extra_monthly_payment;
    let mortgage_schedule = amortization::amortization_schedule(
        loan_amount,
        snapshot.mortgage_rate,
        term_months,
        snapshot.extra_monthly_payment,
    );
    let remaining_debt = amortization::balance_at_month(&mortgage_schedule, analysis_months);
    let payments = amortization::payments_through(&mortgage_schedule, analysis_months);
    let actual_loan_term_months = amortization::payoff_month(&mortgage_schedule);
    let interest_saved = amortization::interest_saved(
        loan_amount,
        snapshot.mortgage_rate,
        term_months,
        snapshot.extra_monthly_payment,
    );
    debug!(
        "loan {loan_amount} at {}% over {term_months} months: annuity {annuity_payment}, repaid in {actual_loan_term_months} months",
        snapshot.mortgage_rate
    );

    // --- Property value ---
    let projected = projection::scenarios_with_completion(
        snapshot.property_price,
        &inflation,
        snapshot.analysis_period,
        &snapshot.completion_plan(),
    );
    let property_value_at_end = projection::apply_sale_target(
        projected,
        snapshot.area,
        snapshot.expected_price_per_area_at_sale,
    );
    debug!(
        "property value after {} years: {} / {} / {}",
        snapshot.analysis_period,
        property_value_at_end.pessimistic,
        property_value_at_end.base,
        property_value_at_end.optimistic
    );

    // --- Renovation ---
    let renovation_cost = match snapshot.area {
        Some(area) if snapshot.renovation_required => renovation::renovation_cost(
            snapshot.renovation_cost_per_area,
            area,
            &inflation,
            snapshot.completion_year,
            snapshot.as_of_year,
        ),
        _ => Decimal::ZERO,
    };
    let renovation_opportunity_cost = renovation::renovation_opportunity_cost(
        renovation_cost,
        &deposit_rates,
        snapshot.years_from_completion_to_end(),
    );
    let renovation_recovered_at_sale =
        renovation::recovered_at_sale(renovation_cost, snapshot.renovation_return_rate);
    trace!("renovation {renovation_cost}, forgone interest {renovation_opportunity_cost}");

    // --- Rental ---
    let rental = income::project_rental_income(
        snapshot.monthly_rent,
        &inflation,
        snapshot.analysis_period,
        snapshot.completion_year,
        snapshot.as_of_year,
    );
    trace!("rental income total {}", rental.total);

    let total_invested = snapshot.down_payment + payments.total_paid;

    // --- Strategy A: sell ---
    let net_proceeds_from_sale = property_value_at_end.less(remaining_debt);
    let strategy_a = StrategyAResult {
        property_value_at_end,
        remaining_debt,
        total_mortgage_payments: payments.total_paid,
        total_interest_paid: payments.total_interest,
        down_payment: snapshot.down_payment,
        renovation_cost,
        renovation_recovered_at_sale,
        net_proceeds_from_sale,
        profit_loss: net_proceeds_from_sale.less(total_invested),
        total_invested,
    };

    // --- Strategy B: rent ---
    let strategy_b = StrategyBResult {
        property_value_at_end,
        remaining_debt,
        total_mortgage_payments: payments.total_paid,
        total_interest_paid: payments.total_interest,
        down_payment: snapshot.down_payment,
        renovation_cost,
        total_rental_income: rental.total,
        net_equity: property_value_at_end.less(remaining_debt),
        cash_flow: rental.total - payments.total_paid,
        monthly_cash_flow: income::monthly_cash_flow(snapshot.monthly_rent, total_monthly_payment),
        rental_yield: income::rental_yield(snapshot.monthly_rent, snapshot.property_price)
            .round_dp(2),
        total_invested,
        rental,
    };

    // --- Strategy C: deposit ---
    let deposit_schedule = growth::deposit_schedule(
        snapshot.down_payment,
        total_monthly_payment,
        &deposit_rates,
        analysis_months,
    );
    let strategy_c = StrategyCResult {
        final_balance: growth::final_balance(&deposit_schedule),
        total_contributions: deposit_schedule
            .last()
            .map(|row| row.cumulative_contributions)
            .unwrap_or(Decimal::ZERO),
        total_interest_earned: growth::total_interest(&deposit_schedule),
        renovation_savings_interest: renovation_opportunity_cost,
    };

    // --- Winner (base case) ---
    let values = StrategyValues {
        a: strategy_a.profit_loss.base + snapshot.down_payment + payments.total_paid,
        b: strategy_b.net_equity.base + strategy_b.total_rental_income,
        c: strategy_c.final_balance,
    };
    let (winner, difference_best_vs_worst) = select_winner(&values);
    debug!(
        "strategy values A={} B={} C={}: winner {winner:?}",
        values.a, values.b, values.c
    );

    Ok(ComparisonResult {
        strategy_a,
        strategy_b,
        strategy_c,
        values,
        winner,
        winner_name: winner.name().to_string(),
        difference_best_vs_worst,
        mortgage_schedule,
        deposit_schedule,
        annuity_payment,
        loan_amount,
        actual_loan_term_months,
        interest_saved,
        price_per_area: renovation::price_per_area(snapshot.property_price, snapshot.area),
        renovation_year: (renovation_cost > Decimal::ZERO)
            .then(|| renovation::renovation_year(snapshot.completion_year, snapshot.as_of_year)),
        initial_investment: renovation::initial_investment(snapshot.down_payment, renovation_cost),
    })
}

/// Pick the strategy with the highest value; ties go to A, then B, then C.
///
/// Returns the winner and the gap between the best and worst values.
pub fn select_winner(values: &StrategyValues) -> (Strategy, Money) {
    let best = values.a.max(values.b).max(values.c);
    let worst = values.a.min(values.b).min(values.c);

    let winner = if values.a >= values.b && values.a >= values.c {
        Strategy::A
    } else if values.b >= values.c {
        Strategy::B
    } else {
        Strategy::C
    };

    (winner, best - worst)
}

/// Compare the strategies and wrap the result with methodology,
/// assumptions, warnings, and timing metadata.
pub fn run_comparison(
    snapshot: &InputSnapshot,
) -> HomesteadResult<ComputationOutput<ComparisonResult>> {
    let start = Instant::now();

    let result = compare(snapshot)?;
    let warnings = collect_warnings(snapshot, &result);
    for w in &warnings {
        warn!("{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Mortgage sale vs mortgage rental vs deposit (monthly amortisation, \
         annual inflation indexing, base-case ranking)",
        snapshot,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(snapshot: &InputSnapshot, result: &ComparisonResult) -> Vec<String> {
    let mut warnings = Vec::new();
    let inflation = snapshot.inflation_series();

    if let Some(defined) = inflation.defined_years() {
        if defined < snapshot.analysis_period as usize {
            warnings.push(format!(
                "Yearly inflation covers {defined} of {} years; the last rate is reused",
                snapshot.analysis_period
            ));
        }
        let negative = snapshot
            .deposit_series()
            .negative_years(snapshot.analysis_period as usize);
        if !negative.is_empty() {
            warnings.push(format!(
                "Linked deposit rate is negative in {} year(s)",
                negative.len()
            ));
        }
    }

    let years_to_completion = snapshot.years_to_completion();
    if years_to_completion >= snapshot.analysis_period as i32 {
        warnings.push(format!(
            "Completion in {} falls outside the {}-year horizon; no rental income",
            snapshot.completion_year, snapshot.analysis_period
        ));
    }

    if snapshot.expected_price_per_area_at_completion.is_some() && years_to_completion <= 0 {
        warnings.push(
            "Property already completed; expected price at completion ignored".into(),
        );
    }

    if !snapshot.renovation_required
        && renovation::renovation_likely_needed(snapshot.completion_year, snapshot.as_of_year)
    {
        warnings.push(format!(
            "Completion in {} usually means an unfinished property; renovation is off",
            snapshot.completion_year
        ));
    }

    if snapshot.renovation_required && snapshot.area.is_none() {
        warnings.push("Renovation requested without an area; renovation cost is 0".into());
    }

    if result.strategy_a.remaining_debt > Decimal::ZERO {
        warnings.push(format!(
            "Mortgage not repaid within the horizon: {} outstanding",
            result.strategy_a.remaining_debt
        ));
    }

    warnings
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
