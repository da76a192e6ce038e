//! Annual rate series: a single flat rate, or a year-by-year schedule
//! (the "equalizer") whose last entry applies to every later year.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::RatePct;

/// A flat or year-varying annual rate, in percent.
///
/// Serialises untagged: a bare number is a flat rate, an array is a yearly
/// schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RateSeries {
    Flat(RatePct),
    Yearly(Vec<RatePct>),
}

impl RateSeries {
    /// Rate for the zero-based year `index`.
    ///
    /// Yearly schedules clamp to their last entry; an empty schedule reads as 0.
    pub fn rate_for_year(&self, index: usize) -> RatePct {
        match self {
            RateSeries::Flat(rate) => *rate,
            RateSeries::Yearly(rates) => match rates.last() {
                Some(last) => rates.get(index).copied().unwrap_or(*last),
                None => Decimal::ZERO,
            },
        }
    }

    /// Re-base the series so that year `index` becomes year 0.
    ///
    /// Past the end of a yearly schedule the result is the last rate alone,
    /// which keeps the clamp-to-last behaviour of the original series.
    pub fn starting_at(&self, index: usize) -> RateSeries {
        match self {
            RateSeries::Flat(rate) => RateSeries::Flat(*rate),
            RateSeries::Yearly(rates) => {
                if index < rates.len() {
                    RateSeries::Yearly(rates[index..].to_vec())
                } else {
                    RateSeries::Yearly(rates.last().copied().into_iter().collect())
                }
            }
        }
    }

    /// Add `premium` percentage points to every entry.
    pub fn with_premium(&self, premium: RatePct) -> RateSeries {
        match self {
            RateSeries::Flat(rate) => RateSeries::Flat(*rate + premium),
            RateSeries::Yearly(rates) => {
                RateSeries::Yearly(rates.iter().map(|r| *r + premium).collect())
            }
        }
    }

    /// Highest rate any year can read; an empty schedule reads as 0.
    pub fn peak(&self) -> RatePct {
        match self {
            RateSeries::Flat(rate) => *rate,
            RateSeries::Yearly(rates) => rates.iter().copied().max().unwrap_or(Decimal::ZERO),
        }
    }

    /// Lowest rate any year can read; an empty schedule reads as 0.
    pub fn trough(&self) -> RatePct {
        match self {
            RateSeries::Flat(rate) => *rate,
            RateSeries::Yearly(rates) => rates.iter().copied().min().unwrap_or(Decimal::ZERO),
        }
    }

    /// Number of explicitly defined years, `None` for a flat rate.
    pub fn defined_years(&self) -> Option<usize> {
        match self {
            RateSeries::Flat(_) => None,
            RateSeries::Yearly(rates) => Some(rates.len()),
        }
    }

    /// Zero-based years in `0..years` whose rate is negative.
    pub fn negative_years(&self, years: usize) -> Vec<usize> {
        (0..years)
            .filter(|&y| self.rate_for_year(y) < Decimal::ZERO)
            .collect()
    }
}

impl Default for RateSeries {
    fn default() -> Self {
        RateSeries::Flat(Decimal::ZERO)
    }
}

impl From<RatePct> for RateSeries {
    fn from(rate: RatePct) -> Self {
        RateSeries::Flat(rate)
    }
}
