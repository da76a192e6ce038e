//! Fixed-payment mortgage: annuity payment, month-by-month amortisation
//! schedule with overpayments, and payoff analytics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::{monthly_rate, round_unit};
use crate::types::{Money, RatePct};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One month of the amortisation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    /// Total paid this month (annuity + overpayment, smaller in the final month)
    pub payment: Money,
    pub principal: Money,
    pub interest: Money,
    /// Outstanding balance after this month's payment
    pub balance: Money,
    pub cumulative_interest: Money,
    pub cumulative_principal: Money,
}

/// Totals over the first N months of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTotals {
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fixed monthly payment: P * r(1+r)^n / ((1+r)^n - 1), rounded to whole units.
///
/// A non-positive rate degrades to straight-line `principal / n`. A
/// non-positive principal or zero term pays nothing.
pub fn annuity_payment(principal: Money, annual_rate: RatePct, term_months: u32) -> Money {
    if principal <= Decimal::ZERO || term_months == 0 {
        return Decimal::ZERO;
    }
    if annual_rate <= Decimal::ZERO {
        return round_unit(principal / Decimal::from(term_months));
    }

    let r = monthly_rate(annual_rate);

    // (1 + r)^n via iterative multiplication
    let mut compound = Decimal::ONE;
    for _ in 0..term_months {
        compound *= Decimal::ONE + r;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return round_unit(principal / Decimal::from(term_months));
    }

    round_unit(principal * r * compound / denominator)
}

/// Month-by-month schedule with an optional fixed overpayment.
///
/// Interest is rounded each month on the outstanding balance. The principal
/// portion never exceeds the balance: the month that would overshoot, and
/// the last month of the term, pay exactly `balance + interest`. The
/// schedule stops as soon as the balance reaches zero.
pub fn amortization_schedule(
    principal: Money,
    annual_rate: RatePct,
    term_months: u32,
    extra_payment: Money,
) -> Vec<AmortizationRow> {
    if principal <= Decimal::ZERO || term_months == 0 {
        return Vec::new();
    }

    let r = monthly_rate(annual_rate);
    let base_payment = annuity_payment(principal, annual_rate, term_months);

    let mut schedule = Vec::with_capacity(term_months as usize);
    let mut balance = principal;
    let mut cumulative_interest = Decimal::ZERO;
    let mut cumulative_principal = Decimal::ZERO;

    for month in 1..=term_months {
        let interest = round_unit(balance * r);
        let mut payment = base_payment + extra_payment;
        let mut principal_part = (payment - interest).max(Decimal::ZERO);

        if principal_part >= balance || month == term_months {
            principal_part = balance;
            payment = principal_part + interest;
        }

        cumulative_interest += interest;
        cumulative_principal += principal_part;
        balance -= principal_part;

        schedule.push(AmortizationRow {
            month,
            payment,
            principal: principal_part,
            interest,
            balance,
            cumulative_interest,
            cumulative_principal,
        });

        if balance.is_zero() {
            break;
        }
    }

    schedule
}

/// Outstanding balance after `month` payments.
///
/// Month 0 is the opening balance; past the end of the schedule the loan is
/// repaid.
pub fn balance_at_month(schedule: &[AmortizationRow], month: u32) -> Money {
    if month == 0 {
        return schedule
            .first()
            .map(|row| row.balance + row.principal)
            .unwrap_or(Decimal::ZERO);
    }
    schedule
        .get(month as usize - 1)
        .map(|row| row.balance)
        .unwrap_or(Decimal::ZERO)
}

/// Sum of payments, interest and principal over the first `months` rows.
pub fn payments_through(schedule: &[AmortizationRow], months: u32) -> PaymentTotals {
    let rows = &schedule[..schedule.len().min(months as usize)];
    match rows.last() {
        Some(last) => PaymentTotals {
            total_paid: rows.iter().map(|row| row.payment).sum(),
            total_interest: last.cumulative_interest,
            total_principal: last.cumulative_principal,
        },
        None => PaymentTotals {
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            total_principal: Decimal::ZERO,
        },
    }
}

/// Month in which the loan is fully repaid (the schedule length otherwise).
pub fn payoff_month(schedule: &[AmortizationRow]) -> u32 {
    match schedule.last() {
        Some(last) if last.balance.is_zero() => last.month,
        _ => schedule.len() as u32,
    }
}

/// Interest avoided by paying `extra_payment` on top of the annuity each month.
pub fn interest_saved(
    principal: Money,
    annual_rate: RatePct,
    term_months: u32,
    extra_payment: Money,
) -> Money {
    let without = amortization_schedule(principal, annual_rate, term_months, Decimal::ZERO);
    let with = amortization_schedule(principal, annual_rate, term_months, extra_payment);

    let total = |s: &[AmortizationRow]| {
        s.last()
            .map(|row| row.cumulative_interest)
            .unwrap_or(Decimal::ZERO)
    };
    total(&without) - total(&with)
}

/// Months cut from the term by paying `extra_payment` each month.
pub fn term_reduction(
    principal: Money,
    annual_rate: RatePct,
    term_months: u32,
    extra_payment: Money,
) -> u32 {
    if extra_payment <= Decimal::ZERO {
        return 0;
    }
    let with = amortization_schedule(principal, annual_rate, term_months, extra_payment);
    term_months.saturating_sub(payoff_month(&with))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
