use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::sample::sample_cycles;
use crate::stats::{compute_statistics, CycleStatistics};

/// What to compute over when the cycle history cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    #[default]
    Fail,
    Empty,
    Sample,
}

#[derive(Deserialize)]
pub struct CycleStatsQuery {
    user_id: Uuid,
    today: Option<NaiveDate>,
    #[serde(default)]
    on_error: OnError,
}

pub async fn get_cycle_stats(
    State(state): State<AppState>,
    Query(query): Query<CycleStatsQuery>,
) -> Result<Json<CycleStatistics>, ApiError> {
    let today = query.today.unwrap_or_else(|| Utc::now().date_naive());

    let cycles = match state.store.list_cycles(query.user_id).await {
        Ok(cycles) => cycles,
        Err(e) => match query.on_error {
            OnError::Fail => return Err(e.into()),
            OnError::Empty => {
                tracing::warn!("⚠️ Cycle history unavailable, using empty history: {}", e);
                Vec::new()
            }
            OnError::Sample => {
                tracing::warn!("⚠️ Cycle history unavailable, using sample history: {}", e);
                sample_cycles(query.user_id, today)
            }
        },
    };

    Ok(Json(compute_statistics(&cycles, today)))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle-stats", get(get_cycle_stats))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{CycleEntry, FlowIntensity};
    use crate::routes::test_support::{body_json, get_request};
    use crate::store::memory::MemoryStore;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    fn entry(user_id: Uuid, start: &str) -> CycleEntry {
        CycleEntry {
            id: Uuid::new_v4(),
            user_id,
            start_date: start.parse().unwrap(),
            end_date: None,
            flow_intensity: FlowIntensity::Medium,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn computes_statistics_for_user() {
        let user_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        // Stored out of order; the store returns them most-recent-first.
        let store = MemoryStore::with_cycles(vec![
            entry(user_id, "2025-01-01"),
            entry(user_id, "2025-02-26"),
            entry(other, "2025-02-10"),
            entry(user_id, "2025-01-29"),
        ]);
        let app = routes(AppState::new(Arc::new(store)));

        let response = app
            .oneshot(get_request(&format!(
                "/cycle-stats?user_id={user_id}&today=2025-03-08"
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["average_cycle_length"], 28);
        assert_eq!(body["next_period_date"], "2025-03-26");
        assert_eq!(body["days_until_next_period"], 18);
        assert_eq!(body["current_cycle_day"], 11);
        assert_eq!(body["cycle_phase"], "ovulation");
        assert_eq!(body["cycle_length_history"], serde_json::json!([28, 28]));
        assert_eq!(body["provisional"], false);
    }

    #[tokio::test]
    async fn new_user_gets_provisional_defaults() {
        let app = routes(AppState::new(Arc::new(MemoryStore::default())));
        let response = app
            .oneshot(get_request(&format!(
                "/cycle-stats?user_id={}",
                Uuid::new_v4()
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["average_cycle_length"], 28);
        assert!(body["next_period_date"].is_null());
        assert!(body["cycle_phase"].is_null());
        assert_eq!(body["provisional"], true);
    }

    #[tokio::test]
    async fn read_failure_follows_on_error_policy() {
        let app = routes(AppState::new(Arc::new(MemoryStore::failing())));
        let user_id = Uuid::new_v4();

        let failed = app
            .clone()
            .oneshot(get_request(&format!("/cycle-stats?user_id={user_id}")))
            .await
            .unwrap();
        assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let empty = app
            .clone()
            .oneshot(get_request(&format!(
                "/cycle-stats?user_id={user_id}&on_error=empty"
            )))
            .await
            .unwrap();
        assert_eq!(empty.status(), StatusCode::OK);
        let body = body_json(empty).await;
        assert!(body["next_period_date"].is_null());
        assert_eq!(body["provisional"], true);

        let sample = app
            .oneshot(get_request(&format!(
                "/cycle-stats?user_id={user_id}&on_error=sample&today=2025-07-15"
            )))
            .await
            .unwrap();
        assert_eq!(sample.status(), StatusCode::OK);
        let body = body_json(sample).await;
        assert_eq!(body["current_cycle_day"], 6);
        assert_eq!(body["cycle_phase"], "follicular");
        assert_eq!(body["next_period_date"], "2025-08-07");
    }
}
