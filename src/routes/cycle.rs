use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::models::{CycleEntry, NewCycleEntry};

#[derive(Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle", post(create_cycle))
        .route("/cycles", get(list_cycles))
        .with_state(state)
}

async fn create_cycle(
    State(state): State<AppState>,
    Json(body): Json<NewCycleEntry>,
) -> Result<(StatusCode, Json<CycleEntry>), ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let entry = state.store.insert_cycle(body).await?;
    tracing::info!("🩸 Logged cycle {} starting {}", entry.id, entry.start_date);

    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_cycles(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<CycleEntry>>, ApiError> {
    let cycles = state.store.list_cycles(params.user_id).await?;
    Ok(Json(cycles))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::routes::test_support::{body_json, get_request, json_request};
    use crate::store::memory::MemoryStore;
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        routes(AppState::new(Arc::new(MemoryStore::default())))
    }

    #[tokio::test]
    async fn logged_cycles_list_most_recent_first() {
        let app = app();
        let user_id = Uuid::new_v4();

        for start in ["2025-01-01", "2025-02-26", "2025-01-29"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/cycle",
                    json!({ "user_id": user_id, "start_date": start, "flow_intensity": "medium" }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .oneshot(get_request(&format!("/cycles?user_id={user_id}")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let starts: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["start_date"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(starts, ["2025-02-26", "2025-01-29", "2025-01-01"]);
    }

    #[tokio::test]
    async fn create_returns_stored_entry() {
        let user_id = Uuid::new_v4();
        let response = app()
            .oneshot(json_request(
                "POST",
                "/cycle",
                json!({
                    "user_id": user_id,
                    "start_date": "2025-03-03",
                    "end_date": "2025-03-07",
                    "flow_intensity": "heavy",
                    "notes": "cramps on day 2"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["user_id"], user_id.to_string());
        assert_eq!(body["end_date"], "2025-03-07");
        assert_eq!(body["flow_intensity"], "heavy");
        assert!(body["id"].is_string());
    }

    #[tokio::test]
    async fn end_before_start_is_rejected() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/cycle",
                json!({
                    "user_id": Uuid::new_v4(),
                    "start_date": "2025-03-03",
                    "end_date": "2025-03-01",
                    "flow_intensity": "light"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let app = routes(AppState::new(Arc::new(MemoryStore::failing())));
        let response = app
            .oneshot(get_request(&format!("/cycles?user_id={}", Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
