//! Cycle statistics over a user's logged period starts.
//!
//! [`compute_statistics`] is pure and total: it never fails, and degraded
//! history (fewer than two entries, or no usable gaps) falls back to
//! [`DEFAULT_CYCLE_LENGTH`].

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::CycleEntry;

/// Cycle length assumed when the history has no usable gaps.
pub const DEFAULT_CYCLE_LENGTH: i64 = 28;

/// Gaps are kept only when strictly inside these bounds.
pub const MIN_GAP_EXCLUSIVE: i64 = 10;
pub const MAX_GAP_EXCLUSIVE: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CyclePhase {
    Menstrual,
    Follicular,
    Ovulation,
    Luteal,
}

/// `(first cycle day, phase)`, ascending. The last row whose day is
/// `<=` the current cycle day wins.
const PHASE_TABLE: [(i64, CyclePhase); 4] = [
    (1, CyclePhase::Menstrual),
    (6, CyclePhase::Follicular),
    (11, CyclePhase::Ovulation),
    (15, CyclePhase::Luteal),
];

impl CyclePhase {
    /// Classifies a 1-based cycle day. Days before day 1 (a start logged in
    /// the future) count as menstrual.
    pub fn for_cycle_day(day: i64) -> Self {
        PHASE_TABLE
            .iter()
            .rev()
            .find(|(first_day, _)| *first_day <= day)
            .map_or(CyclePhase::Menstrual, |(_, phase)| *phase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleStatistics {
    pub average_cycle_length: i64,
    pub next_period_date: Option<NaiveDate>,
    pub days_until_next_period: Option<i64>,
    pub current_cycle_day: Option<i64>,
    pub cycle_phase: Option<CyclePhase>,
    pub cycle_length_history: Vec<i64>,
    /// True when `average_cycle_length` is the default rather than measured.
    pub provisional: bool,
}

impl CycleStatistics {
    fn insufficient_history() -> Self {
        Self {
            average_cycle_length: DEFAULT_CYCLE_LENGTH,
            next_period_date: None,
            days_until_next_period: None,
            current_cycle_day: None,
            cycle_phase: None,
            cycle_length_history: Vec::new(),
            provisional: true,
        }
    }
}

/// Day counts between adjacent starts, newest pair first, with outliers
/// dropped. `cycles` must be ordered most-recent-first.
pub fn cycle_gaps(cycles: &[CycleEntry]) -> Vec<i64> {
    cycles
        .windows(2)
        .map(|pair| (pair[0].start_date - pair[1].start_date).num_days())
        .filter(|gap| *gap > MIN_GAP_EXCLUSIVE && *gap < MAX_GAP_EXCLUSIVE)
        .collect()
}

/// Rounded mean of the gaps, half rounding up.
fn average_length(gaps: &[i64]) -> Option<i64> {
    if gaps.is_empty() {
        return None;
    }
    let count = gaps.len() as i64;
    let sum: i64 = gaps.iter().sum();
    Some((2 * sum + count).div_euclid(2 * count))
}

/// Summarises `cycles` (most-recent-first; not re-sorted here) as of `today`.
pub fn compute_statistics(cycles: &[CycleEntry], today: NaiveDate) -> CycleStatistics {
    let Some(latest) = cycles.first().filter(|_| cycles.len() >= 2) else {
        return CycleStatistics::insufficient_history();
    };

    let gaps = cycle_gaps(cycles);
    let measured = average_length(&gaps);
    let average_cycle_length = measured.unwrap_or(DEFAULT_CYCLE_LENGTH);

    let last_start = latest.start_date;
    let next_period_date = last_start + Duration::days(average_cycle_length);
    let current_cycle_day = (today - last_start).num_days() + 1;

    CycleStatistics {
        average_cycle_length,
        next_period_date: Some(next_period_date),
        days_until_next_period: Some((next_period_date - today).num_days()),
        current_cycle_day: Some(current_cycle_day),
        cycle_phase: Some(CyclePhase::for_cycle_day(current_cycle_day)),
        cycle_length_history: gaps,
        provisional: measured.is_none(),
    }
}
