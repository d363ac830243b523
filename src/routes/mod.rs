use std::sync::Arc;

use axum::{routing::get, Router};

use crate::store::CycleStore;

pub mod calendar;
pub mod cycle;
pub mod cycle_stats;
pub mod symptoms;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CycleStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CycleStore>) -> Self {
        Self { store }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(cycle::routes(state.clone()))
        .merge(cycle_stats::routes(state.clone()))
        .merge(symptoms::routes(state.clone()))
        .merge(calendar::routes(state))
        .route("/health", get(|| async { "✅ Backend up" }))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use axum::http::StatusCode;
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_responds() {
        let app = router(AppState::new(Arc::new(MemoryStore::default())));
        let response = app.oneshot(test_support::get_request("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
