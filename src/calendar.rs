//! Period days projected onto a date range, for calendar rendering.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::models::{CycleEntry, FlowIntensity};

/// Period length assumed when an entry has no `end_date`.
pub const ASSUMED_PERIOD_DAYS: i64 = 5;

/// Longest range a single calendar request may span.
pub const MAX_RANGE_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodDay {
    pub date: NaiveDate,
    pub flow_intensity: FlowIntensity,
    pub is_first_day: bool,
}

fn period_end(entry: &CycleEntry) -> NaiveDate {
    entry
        .end_date
        .unwrap_or(entry.start_date + Duration::days(ASSUMED_PERIOD_DAYS))
}

pub fn validate_range(from: NaiveDate, to: NaiveDate) -> Result<(), String> {
    if from > to {
        return Err(format!("from {from} is after to {to}"));
    }
    if (to - from).num_days() >= MAX_RANGE_DAYS {
        return Err(format!("range longer than {MAX_RANGE_DAYS} days"));
    }
    Ok(())
}

/// Every date in `from..=to` covered by a logged period. When entries
/// overlap, the earliest one in `entries` wins.
pub fn period_days(entries: &[CycleEntry], from: NaiveDate, to: NaiveDate) -> Vec<PeriodDay> {
    from.iter_days()
        .take_while(|date| *date <= to)
        .filter_map(|date| {
            entries
                .iter()
                .find(|entry| entry.start_date <= date && date <= period_end(entry))
                .map(|entry| PeriodDay {
                    date,
                    flow_intensity: entry.flow_intensity,
                    is_first_day: entry.start_date == date,
                })
        })
        .collect()
}
