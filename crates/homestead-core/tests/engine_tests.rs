use homestead_core::deposit::growth;
use homestead_core::inflation::projection;
use homestead_core::mortgage::amortization;
use homestead_core::rental::income;
use homestead_core::time_value::round_unit;
use homestead_core::RateSeries;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Amortisation
// ===========================================================================

fn loan_cases() -> Vec<(Decimal, Decimal, u32, Decimal)> {
    vec![
        (dec!(8_000_000), dec!(6), 360, Decimal::ZERO),
        (dec!(8_000_000), dec!(6), 360, dec!(25_000)),
        (dec!(2_500_000), dec!(12.5), 120, Decimal::ZERO),
        (dec!(750_000), dec!(0), 60, Decimal::ZERO),
        (dec!(750_000), dec!(3.1), 84, dec!(1_000)),
        (dec!(123_457), dec!(9.99), 13, Decimal::ZERO),
    ]
}

#[test]
fn test_balances_strictly_decrease_to_zero() {
    for (principal, rate, term, extra) in loan_cases() {
        let sched = amortization::amortization_schedule(principal, rate, term, extra);
        assert!(sched.len() <= term as usize);

        let mut previous = principal;
        for row in &sched {
            assert!(
                row.balance < previous,
                "balance did not decrease at month {} for {principal} @ {rate}%",
                row.month
            );
            previous = row.balance;
        }
        assert_eq!(sched.last().unwrap().balance, Decimal::ZERO);
    }
}

#[test]
fn test_principal_portions_sum_to_loan() {
    for (principal, rate, term, extra) in loan_cases() {
        let sched = amortization::amortization_schedule(principal, rate, term, extra);
        let repaid: Decimal = sched.iter().map(|row| row.principal).sum();
        assert_eq!(repaid, principal);
        assert_eq!(sched.last().unwrap().cumulative_principal, principal);
    }
}

#[test]
fn test_each_row_pays_interest_plus_principal() {
    let sched = amortization::amortization_schedule(dec!(3_000_000), dec!(7.5), 240, dec!(5_000));
    for row in &sched {
        assert_eq!(row.payment, row.principal + row.interest);
    }
}

#[test]
fn test_zero_rate_annuity_is_rounded_straight_line() {
    for (principal, term) in [
        (dec!(1_000_000), 360u32),
        (dec!(999_999), 7),
        (dec!(10), 3),
    ] {
        assert_eq!(
            amortization::annuity_payment(principal, Decimal::ZERO, term),
            round_unit(principal / Decimal::from(term))
        );
    }
}

#[test]
fn test_overpayment_shortens_schedule() {
    let plain = amortization::amortization_schedule(dec!(8_000_000), dec!(6), 360, Decimal::ZERO);
    let faster = amortization::amortization_schedule(dec!(8_000_000), dec!(6), 360, dec!(25_000));
    assert_eq!(plain.len(), 360);
    assert!(faster.len() < plain.len());
    assert!(
        faster.last().unwrap().cumulative_interest < plain.last().unwrap().cumulative_interest
    );
}

// ===========================================================================
// Deposit
// ===========================================================================

#[test]
fn test_deposit_balance_non_decreasing() {
    let cases = vec![
        (RateSeries::Flat(dec!(8)), dec!(47_964)),
        (RateSeries::Flat(dec!(0)), dec!(0)),
        (RateSeries::Yearly(vec![dec!(16), dec!(0), dec!(3.5)]), dec!(10_000)),
    ];
    for (rates, contribution) in cases {
        let sched = growth::deposit_schedule(dec!(2_000_000), contribution, &rates, 60);
        let mut previous = dec!(2_000_000);
        for row in &sched {
            assert!(row.balance >= previous);
            previous = row.balance;
        }
    }
}

#[test]
fn test_deposit_cumulative_sums_reconcile() {
    let sched = growth::deposit_schedule(dec!(500_000), dec!(12_345), &RateSeries::Flat(dec!(7)), 48);
    let last = sched.last().unwrap();
    let contributed: Decimal = sched.iter().map(|row| row.contribution).sum();
    let earned: Decimal = sched.iter().map(|row| row.interest).sum();
    assert_eq!(last.cumulative_contributions, dec!(500_000) + contributed);
    assert_eq!(last.cumulative_interest, earned);
    assert_eq!(last.balance, last.cumulative_contributions + last.cumulative_interest);
}

#[test]
fn test_opportunity_cost_matches_future_value_for_flat_rate() {
    let amount = dec!(1_000_000);
    let fv = growth::future_value(amount, dec!(8), 5);
    let cost = growth::opportunity_cost(amount, &RateSeries::Flat(dec!(8)), 5);
    assert_eq!(cost, fv - amount);
}

// ===========================================================================
// Inflation scenarios
// ===========================================================================

#[test]
fn test_scenario_ordering_flat_rates() {
    for rate in [-8, -5, -1, 0, 2, 5, 9, 15] {
        let s = projection::scenarios(dec!(10_000_000), &RateSeries::Flat(Decimal::from(rate)), 10);
        assert!(s.pessimistic <= s.base, "rate {rate}");
        assert!(s.base <= s.optimistic, "rate {rate}");
    }
}

#[test]
fn test_scenario_ordering_yearly_rates() {
    let rates = RateSeries::Yearly(vec![dec!(12), dec!(-7), dec!(4), dec!(-9.5)]);
    let s = projection::scenarios(dec!(5_000_000), &rates, 8);
    assert!(s.pessimistic <= s.base && s.base <= s.optimistic);
}

#[test]
fn test_floor_makes_clamped_scenarios_coincide() {
    // -10 and -12 both floor to -10
    let s = projection::scenarios(dec!(1_000_000), &RateSeries::Flat(dec!(-10)), 3);
    assert_eq!(s.pessimistic, s.base);
    assert_eq!(s.base, dec!(729_000));

    // At -9 only the pessimistic case hits the floor
    let s = projection::scenarios(dec!(1_000_000), &RateSeries::Flat(dec!(-9)), 1);
    assert_eq!(s.pessimistic, dec!(900_000));
    assert_eq!(s.base, dec!(910_000));
}

// ===========================================================================
// Rental income
// ===========================================================================

#[test]
fn test_rental_zero_before_completion_then_increasing() {
    let p = income::project_rental_income(dec!(50_000), &RateSeries::Flat(dec!(5)), 10, 2029, 2026);
    assert_eq!(p.yearly.len(), 10);
    assert!(p.yearly[..3].iter().all(|y| y.is_zero()));
    for pair in p.yearly[3..].windows(2) {
        assert!(pair[1] > pair[0]);
    }
    assert_eq!(p.total, p.yearly.iter().copied().sum::<Decimal>());
}

#[test]
fn test_rental_with_yearly_rates() {
    let rates = RateSeries::Yearly(vec![dec!(10), dec!(0)]);
    let p = income::project_rental_income(dec!(10_000), &rates, 3, 2026, 2026);
    assert_eq!(p.yearly, vec![dec!(120_000), dec!(132_000), dec!(132_000)]);
    assert_eq!(p.monthly_rent_at_end, dec!(11_000));
}
