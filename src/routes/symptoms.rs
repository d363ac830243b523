use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;
use crate::models::{DeleteSymptomRequest, NewSymptom, SymptomLog, SymptomsByDate};

#[derive(Deserialize)]
struct UserQuery {
    user_id: Uuid,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/symptom", post(log_symptom).delete(delete_symptom))
        .route("/symptoms", get(get_symptoms_grouped))
        .route("/symptom/all", get(get_symptoms_flat))
        .with_state(state)
}

async fn log_symptom(
    State(state): State<AppState>,
    Json(body): Json<NewSymptom>,
) -> Result<(StatusCode, Json<SymptomLog>), ApiError> {
    body.validate().map_err(ApiError::Validation)?;

    let log = state.store.insert_symptom(body).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn delete_symptom(
    State(state): State<AppState>,
    Json(payload): Json<DeleteSymptomRequest>,
) -> Result<StatusCode, ApiError> {
    let symptom_type = payload.symptom_type.trim();
    if symptom_type.is_empty() {
        return Err(ApiError::Validation("symptom_type must not be blank".into()));
    }

    let removed = state
        .store
        .delete_symptoms(payload.user_id, payload.date, symptom_type)
        .await?;

    if removed == 0 {
        return Err(ApiError::NotFound("No symptom found"));
    }
    tracing::info!("🗑️ Removed {} '{}' log(s) on {}", removed, symptom_type, payload.date);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_symptoms_flat(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<SymptomLog>>, ApiError> {
    let logs = state.store.list_symptoms(query.user_id).await?;
    Ok(Json(logs))
}

async fn get_symptoms_grouped(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<SymptomsByDate>>, ApiError> {
    let logs = state.store.list_symptoms(query.user_id).await?;
    Ok(Json(group_by_date(logs)))
}

/// Symptom types per day, most recent day first.
fn group_by_date(logs: Vec<SymptomLog>) -> Vec<SymptomsByDate> {
    let mut map = BTreeMap::<NaiveDate, Vec<String>>::new();
    for log in logs {
        map.entry(log.date).or_default().push(log.symptom_type);
    }

    map.into_iter()
        .rev()
        .map(|(date, symptoms)| SymptomsByDate { date, symptoms })
        .collect()
}
