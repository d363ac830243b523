use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::AppState;
use crate::calendar::{period_days, validate_range, PeriodDay};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub user_id: Uuid,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle-calendar", get(get_cycle_calendar))
        .with_state(state)
}

pub async fn get_cycle_calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarQuery>,
) -> Result<Json<Vec<PeriodDay>>, ApiError> {
    validate_range(params.from, params.to).map_err(ApiError::Validation)?;

    let cycles = state.store.list_cycles(params.user_id).await?;
    Ok(Json(period_days(&cycles, params.from, params.to)))
}
