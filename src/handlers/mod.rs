pub mod fees;
pub mod health;

pub use fees::*;
pub use health::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Instant;

use crate::services::FeeOptimizer;

/// Routes of the fee API, without the tracing and CORS layers.
pub fn router(optimizer: Arc<FeeOptimizer>) -> Router {
    let health_state = HealthState {
        optimizer: optimizer.clone(),
        start_time: Instant::now(),
    };

    Router::new()
        .route("/health", get(health_check))
        .with_state(health_state)
        .route("/api/fees", get(get_optimized_fees))
        .route("/api/fees/:chain_id", get(get_chain_fee))
        .with_state(AppState { optimizer })
}
