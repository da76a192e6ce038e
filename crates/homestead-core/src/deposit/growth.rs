//! Interest-bearing deposit: monthly capitalisation with contributions,
//! single-sum future value, and the opportunity cost of money not deposited.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::rate_series::RateSeries;
use crate::time_value::{compound_factor, monthly_rate, round_unit};
use crate::types::Money;

pub use crate::time_value::future_value;

/// One month of deposit growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRow {
    pub month: u32,
    pub contribution: Money,
    pub interest: Money,
    pub balance: Money,
    /// Includes the initial deposit
    pub cumulative_contributions: Money,
    pub cumulative_interest: Money,
}

/// Month-by-month balance of a deposit with monthly capitalisation.
///
/// Month `m` earns interest at the rate of year `(m - 1) / 12`. The initial
/// deposit stands in for month 1's contribution; every later month adds
/// `monthly_contribution` after interest is credited.
pub fn deposit_schedule(
    initial_deposit: Money,
    monthly_contribution: Money,
    rates: &RateSeries,
    months: u32,
) -> Vec<DepositRow> {
    let mut schedule = Vec::with_capacity(months as usize);

    let mut balance = initial_deposit;
    let mut cumulative_contributions = initial_deposit;
    let mut cumulative_interest = Decimal::ZERO;

    for month in 1..=months {
        let year = ((month - 1) / 12) as usize;
        let interest = round_unit(balance * monthly_rate(rates.rate_for_year(year)));
        let contribution = if month == 1 {
            Decimal::ZERO
        } else {
            monthly_contribution
        };

        cumulative_interest += interest;
        cumulative_contributions += contribution;
        balance = round_unit(balance + interest + contribution);

        schedule.push(DepositRow {
            month,
            contribution,
            interest,
            balance,
            cumulative_contributions,
            cumulative_interest,
        });
    }

    schedule
}

pub fn final_balance(schedule: &[DepositRow]) -> Money {
    schedule
        .last()
        .map(|row| row.balance)
        .unwrap_or(Decimal::ZERO)
}

pub fn total_interest(schedule: &[DepositRow]) -> Money {
    schedule
        .last()
        .map(|row| row.cumulative_interest)
        .unwrap_or(Decimal::ZERO)
}

/// Balance after `month` months, clamped to the schedule's range.
pub fn balance_at_month(schedule: &[DepositRow], month: u32) -> Money {
    let index = (month.max(1) as usize - 1).min(schedule.len().saturating_sub(1));
    schedule
        .get(index)
        .map(|row| row.balance)
        .unwrap_or(Decimal::ZERO)
}

/// Interest forgone by spending `amount` instead of depositing it for
/// `years`, compounding annually year by year.
pub fn opportunity_cost(amount: Money, rates: &RateSeries, years: u32) -> Money {
    if years == 0 || amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let grown = amount * compound_factor(rates, years, Decimal::ZERO, None);
    round_unit(grown - amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_month_has_no_contribution() {
        let sched = deposit_schedule(dec!(1_200_000), dec!(10_000), &RateSeries::Flat(dec!(12)), 2);
        assert_eq!(sched[0].contribution, Decimal::ZERO);
        // 1.2m * 1% = 12,000
        assert_eq!(sched[0].interest, dec!(12000));
        assert_eq!(sched[0].balance, dec!(1_212_000));
        assert_eq!(sched[1].contribution, dec!(10_000));
        assert_eq!(sched[1].interest, dec!(12120));
        assert_eq!(sched[1].balance, dec!(1_234_120));
        assert_eq!(sched[1].cumulative_contributions, dec!(1_210_000));
        assert_eq!(sched[1].cumulative_interest, dec!(24120));
    }

    #[test]
    fn test_yearly_rates_switch_on_month_13() {
        let rates = RateSeries::Yearly(vec![dec!(0), dec!(12)]);
        let sched = deposit_schedule(dec!(1000), Decimal::ZERO, &rates, 14);
        assert!(sched[..12].iter().all(|row| row.interest.is_zero()));
        assert_eq!(sched[12].interest, dec!(10));
        assert_eq!(sched[13].interest, dec!(10));
    }

    #[test]
    fn test_zero_months_is_empty() {
        let sched = deposit_schedule(dec!(1000), dec!(10), &RateSeries::Flat(dec!(5)), 0);
        assert!(sched.is_empty());
        assert_eq!(final_balance(&sched), Decimal::ZERO);
        assert_eq!(total_interest(&sched), Decimal::ZERO);
    }

    #[test]
    fn test_balance_at_month_clamps() {
        let sched = deposit_schedule(dec!(1000), dec!(100), &RateSeries::Flat(dec!(0)), 3);
        assert_eq!(balance_at_month(&sched, 0), dec!(1000));
        assert_eq!(balance_at_month(&sched, 2), dec!(1100));
        assert_eq!(balance_at_month(&sched, 10), dec!(1200));
    }

    #[test]
    fn test_opportunity_cost_flat() {
        // 1000 at 10% for 2 years grows to 1210
        assert_eq!(opportunity_cost(dec!(1000), &RateSeries::Flat(dec!(10)), 2), dec!(210));
    }

    #[test]
    fn test_opportunity_cost_yearly() {
        let rates = RateSeries::Yearly(vec![dec!(10), dec!(20)]);
        // 1000 * 1.1 * 1.2 * 1.2 = 1584
        assert_eq!(opportunity_cost(dec!(1000), &rates, 3), dec!(584));
    }

    #[test]
    fn test_opportunity_cost_degenerate() {
        let rates = RateSeries::Flat(dec!(10));
        assert_eq!(opportunity_cost(dec!(1000), &rates, 0), Decimal::ZERO);
        assert_eq!(opportunity_cost(dec!(0), &rates, 5), Decimal::ZERO);
    }
}
