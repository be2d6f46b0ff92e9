use crate::{models::HealthStatus, services::FeeOptimizer};
use axum::{extract::State, Json};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct HealthState {
    pub optimizer: Arc<FeeOptimizer>,
    pub start_time: Instant,
}

pub async fn health_check(
    State(state): State<HealthState>,
) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        configured_chains: state.optimizer.chains().len(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: Utc::now(),
    })
}
