//! Placeholder history substituted by the HTTP layer when a read fails and
//! the caller asked for `on_error=sample`.

use chrono::{Duration, NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::models::{CycleEntry, FlowIntensity};

const SAMPLE_CYCLES: i64 = 6;
const SAMPLE_CYCLE_LENGTH: i64 = 28;
const SAMPLE_DAYS_SINCE_LAST_START: i64 = 5;
const SAMPLE_PERIOD_DAYS: i64 = 5;

/// Six regular cycles ending with one that started five days before
/// `today`, most-recent-first.
pub fn sample_cycles(user_id: Uuid, today: NaiveDate) -> Vec<CycleEntry> {
    (0..SAMPLE_CYCLES)
        .map(|i| {
            let start_date =
                today - Duration::days(i * SAMPLE_CYCLE_LENGTH + SAMPLE_DAYS_SINCE_LAST_START);
            let flow_intensity = match i % 3 {
                0 => FlowIntensity::Heavy,
                1 => FlowIntensity::Medium,
                _ => FlowIntensity::Light,
            };
            CycleEntry {
                id: Uuid::new_v4(),
                user_id,
                start_date,
                end_date: Some(start_date + Duration::days(SAMPLE_PERIOD_DAYS)),
                flow_intensity,
                notes: (i == 0).then(|| "Had some cramps on day 2".to_string()),
                created_at: start_date.and_time(NaiveTime::MIN).and_utc(),
            }
        })
        .collect()
}
