use homestead_core::inflation::projection;
use homestead_core::renovation::cost as renovation;
use homestead_core::strategies::comparison::{compare, run_comparison, Strategy};
use homestead_core::strategies::time_series::{rent_vs_mortgage, time_series};
use homestead_core::{HomesteadError, InputSnapshot, RateSeries};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const YEAR: i32 = 2026;

fn reference_snapshot() -> InputSnapshot {
    InputSnapshot::with_defaults(YEAR)
}

// ===========================================================================
// End-to-end scenarios
// ===========================================================================

#[test]
fn test_reference_mortgage_full_term() {
    let mut s = reference_snapshot();
    s.analysis_period = 30;
    let r = compare(&s).unwrap();

    // Annuity formula at r = 0.005, n = 360 on 8m
    let rate = 0.005_f64;
    let factor = (1.0 + rate).powi(360);
    let expected = (8_000_000.0 * rate * factor / (factor - 1.0)).round();
    assert_eq!(r.annuity_payment, Decimal::from(expected as i64));
    assert_eq!(r.annuity_payment, dec!(47964));

    assert_eq!(r.loan_amount, dec!(8_000_000));
    assert_eq!(r.mortgage_schedule.len(), 360);
    assert_eq!(r.mortgage_schedule[359].balance, Decimal::ZERO);
    assert_eq!(r.actual_loan_term_months, 360);
    assert_eq!(r.strategy_a.remaining_debt, Decimal::ZERO);
}

#[test]
fn test_deposit_outgrows_contributions() {
    let s = reference_snapshot();
    let r = compare(&s).unwrap();
    let c = &r.strategy_c;

    assert_eq!(r.deposit_schedule.len(), 120);
    // Down payment plus 119 monthly contributions of the annuity
    assert_eq!(c.total_contributions, dec!(2_000_000) + dec!(119) * r.annuity_payment);
    assert!(c.final_balance > c.total_contributions);
    assert_eq!(c.final_balance, c.total_contributions + c.total_interest_earned);
}

#[test]
fn test_reference_scenario_strategies() {
    let s = reference_snapshot();
    let r = compare(&s).unwrap();

    let expected_value = projection::scenarios(dec!(10_000_000), &RateSeries::Flat(dec!(5)), 10);
    assert_eq!(r.strategy_a.property_value_at_end, expected_value);
    assert_eq!(r.strategy_b.property_value_at_end, expected_value);

    // Horizon is shorter than the term: debt outstanding, 120 payments made
    assert!(r.strategy_a.remaining_debt > Decimal::ZERO);
    assert_eq!(r.strategy_a.total_mortgage_payments, dec!(120) * r.annuity_payment);
    assert_eq!(
        r.strategy_a.net_proceeds_from_sale.base,
        expected_value.base - r.strategy_a.remaining_debt
    );
    assert_eq!(
        r.strategy_b.cash_flow,
        r.strategy_b.total_rental_income - r.strategy_b.total_mortgage_payments
    );

    let best = r.values.a.max(r.values.b).max(r.values.c);
    let worst = r.values.a.min(r.values.b).min(r.values.c);
    assert_eq!(r.difference_best_vs_worst, best - worst);
    let winning_value = match r.winner {
        Strategy::A => r.values.a,
        Strategy::B => r.values.b,
        Strategy::C => r.values.c,
    };
    assert_eq!(winning_value, best);
}

#[test]
fn test_determinism() {
    let mut s = reference_snapshot();
    s.use_equalizer = true;
    s.yearly_inflation = vec![dec!(8), dec!(6.5), dec!(4)];
    s.extra_monthly_payment = dec!(15_000);

    let first = compare(&s).unwrap();
    let second = compare(&s.clone()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_three_way_tie_goes_to_a() {
    let s = InputSnapshot {
        property_price: dec!(1_000_000),
        down_payment: dec!(1_000_000),
        area: None,
        analysis_period: 1,
        mortgage_rate: Decimal::ZERO,
        loan_term: 1,
        extra_monthly_payment: Decimal::ZERO,
        deposit_rate: Decimal::ZERO,
        inflation_rate: Decimal::ZERO,
        use_equalizer: false,
        yearly_inflation: vec![],
        monthly_rent: Decimal::ZERO,
        renovation_required: false,
        renovation_cost_per_area: Decimal::ZERO,
        renovation_return_rate: dec!(60),
        completion_year: YEAR,
        as_of_year: YEAR,
        expected_price_per_area_at_completion: None,
        expected_price_per_area_at_sale: None,
    };
    let r = compare(&s).unwrap();

    assert_eq!(r.values.a, dec!(1_000_000));
    assert_eq!(r.values.b, dec!(1_000_000));
    assert_eq!(r.values.c, dec!(1_000_000));
    assert_eq!(r.winner, Strategy::A);
    assert_eq!(r.difference_best_vs_worst, Decimal::ZERO);
    assert!(r.mortgage_schedule.is_empty());
}

// ===========================================================================
// Off-plan, renovation, overpayment, equalizer
// ===========================================================================

#[test]
fn test_off_plan_purchase() {
    let mut s = reference_snapshot();
    s.completion_year = YEAR + 2;
    s.expected_price_per_area_at_completion = Some(dec!(250_000));
    let r = compare(&s).unwrap();

    // Planned 12.5m at completion, then 8 years of 5% indexing
    let expected =
        projection::scenarios(dec!(12_500_000), &RateSeries::Flat(dec!(5)), 8);
    assert_eq!(r.strategy_a.property_value_at_end, expected);

    let rental = &r.strategy_b.rental;
    assert_eq!(rental.yearly[0], Decimal::ZERO);
    assert_eq!(rental.yearly[1], Decimal::ZERO);
    // Rent indexed twice before occupancy: 50,000 -> 52,500 -> 55,125
    assert_eq!(rental.yearly[2], dec!(661_500));

    // Renovation indexed to completion, then forgone interest for 8 years at 8%
    assert_eq!(r.strategy_a.renovation_cost, dec!(9_371_250));
    let forgone = renovation::renovation_opportunity_cost(
        dec!(9_371_250),
        &RateSeries::Flat(dec!(8)),
        8,
    );
    assert_eq!(r.strategy_c.renovation_savings_interest, forgone);
}

#[test]
fn test_renovation_does_not_change_outcomes() {
    let with = reference_snapshot();
    let mut without = reference_snapshot();
    without.renovation_required = false;

    let a = compare(&with).unwrap();
    let b = compare(&without).unwrap();

    assert_eq!(a.strategy_a.renovation_cost, dec!(8_500_000));
    assert_eq!(a.strategy_a.renovation_recovered_at_sale, dec!(5_100_000));
    assert_eq!(b.strategy_a.renovation_cost, Decimal::ZERO);
    assert_eq!(a.strategy_a.profit_loss, b.strategy_a.profit_loss);
    assert_eq!(a.strategy_b.cash_flow, b.strategy_b.cash_flow);
    assert_eq!(a.values, b.values);
}

#[test]
fn test_overpayment_feeds_deposit_and_shortens_loan() {
    let mut s = reference_snapshot();
    s.extra_monthly_payment = dec!(30_000);
    let r = compare(&s).unwrap();

    assert!(r.actual_loan_term_months < 360);
    assert!(r.interest_saved > Decimal::ZERO);
    assert_eq!(r.deposit_schedule[1].contribution, r.annuity_payment + dec!(30_000));
}

#[test]
fn test_equalizer_links_deposit_rate() {
    let mut s = reference_snapshot();
    s.use_equalizer = true;
    s.yearly_inflation = vec![dec!(10)];
    s.deposit_rate = dec!(1); // ignored while the equalizer is on
    let r = compare(&s).unwrap();

    // Linked deposit at 12%: 1% a month on the opening 2m
    assert_eq!(r.deposit_schedule[0].interest, dec!(20_000));
    let expected = projection::scenarios(dec!(10_000_000), &RateSeries::Flat(dec!(10)), 10);
    assert_eq!(r.strategy_a.property_value_at_end, expected);

    let out = run_comparison(&s).unwrap();
    assert!(out
        .warnings
        .iter()
        .any(|w| w.starts_with("Yearly inflation covers 1 of 10 years")));
}

#[test]
fn test_sale_target_overrides_base_value() {
    let mut s = reference_snapshot();
    s.expected_price_per_area_at_sale = Some(dec!(300_000));
    let r = compare(&s).unwrap();
    assert_eq!(r.strategy_a.property_value_at_end.base, dec!(15_000_000));
    assert!(r.strategy_a.property_value_at_end.pessimistic < dec!(15_000_000));
    assert!(r.strategy_a.property_value_at_end.optimistic > dec!(15_000_000));
}

// ===========================================================================
// Validation and collaborators
// ===========================================================================

#[test]
fn test_invalid_snapshot_fails_fast() {
    let mut s = reference_snapshot();
    s.down_payment = dec!(-1);
    match compare(&s) {
        Err(HomesteadError::InvalidInput { field, .. }) => assert_eq!(field, "down_payment"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_accepted_extremes_compute_without_overflow() {
    let mut steep_mortgage = reference_snapshot();
    steep_mortgage.mortgage_rate = dec!(100);

    let mut long_horizon = reference_snapshot();
    long_horizon.analysis_period = 50;
    long_horizon.extra_monthly_payment = dec!(100_000);

    let mut volatile = reference_snapshot();
    volatile.use_equalizer = true;
    volatile.yearly_inflation = vec![dec!(100), dec!(-10), dec!(100)];

    let mut distant_completion = reference_snapshot();
    distant_completion.completion_year = 2100;
    distant_completion.expected_price_per_area_at_completion = Some(dec!(1_000_000));

    for s in [steep_mortgage, long_horizon, volatile, distant_completion] {
        assert!(s.validate().is_ok());
        let r = compare(&s).unwrap();
        assert!(r.strategy_c.final_balance >= Decimal::ZERO);
        assert!(r.strategy_b.rental.yearly.iter().all(|y| *y >= Decimal::ZERO));
        assert!(r.strategy_a.property_value_at_end.pessimistic >= Decimal::ZERO);
    }
}

#[test]
fn test_out_of_range_snapshots_error_instead_of_panicking() {
    let mut cases = Vec::new();

    let mut s = reference_snapshot();
    s.mortgage_rate = dec!(1000);
    cases.push((s, "mortgage_rate"));

    let mut s = reference_snapshot();
    s.analysis_period = 1200;
    cases.push((s, "analysis_period"));

    let mut s = reference_snapshot();
    s.loan_term = 400_000_000;
    cases.push((s, "loan_term"));

    let mut s = reference_snapshot();
    s.inflation_rate = dec!(-150);
    cases.push((s, "inflation_rate"));

    let mut s = reference_snapshot();
    s.property_price = dec!(1_000_000_000);
    s.down_payment = dec!(1_000_000_000);
    s.deposit_rate = dec!(100);
    s.analysis_period = 50;
    cases.push((s, "analysis_period"));

    for (s, expected) in cases {
        match compare(&s) {
            Err(HomesteadError::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected InvalidInput for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_time_series_matches_result() {
    let s = reference_snapshot();
    let r = compare(&s).unwrap();
    let points = time_series(&r, &s);
    assert_eq!(points.len(), 120);
    let last = points.last().unwrap();
    assert_eq!(last.debt_balance, r.strategy_a.remaining_debt);
    assert_eq!(last.deposit_balance, r.strategy_c.final_balance);
    assert_eq!(last.property_value, r.strategy_a.property_value_at_end.base);
    assert_eq!(last.rental_accumulated, r.strategy_b.total_rental_income);

    let annual = rent_vs_mortgage(&r, &s);
    let paid: Decimal = annual.iter().map(|y| y.mortgage_payment).sum();
    assert_eq!(paid, r.strategy_a.total_mortgage_payments);
}

#[test]
fn test_envelope_serializes() {
    let out = run_comparison(&reference_snapshot()).unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(json["result"]["winner"], serde_json::json!(format!("{:?}", out.result.winner)));
    assert!(json["assumptions"]["property_price"].is_string());
}
