use crate::{
    error::FeeError,
    models::{ApiResponse, ChainCost, FeeOptimization},
    services::FeeOptimizer,
};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const DATA_SOURCE: &str = "lifi+coingecko";

#[derive(Clone)]
pub struct AppState {
    pub optimizer: Arc<FeeOptimizer>,
}

pub async fn get_optimized_fees(
    State(state): State<AppState>,
) -> Json<ApiResponse<FeeOptimization>> {
    let optimization = state.optimizer.get_optimized_fees().await;

    Json(ApiResponse {
        success: true,
        data: optimization,
        timestamp: Utc::now(),
        data_source: DATA_SOURCE.to_string(),
        request_id: Uuid::new_v4().to_string(),
    })
}

pub async fn get_chain_fee(
    State(state): State<AppState>,
    Path(chain_id): Path<u64>,
) -> Result<Json<ApiResponse<ChainCost>>, FeeError> {
    let cost = state.optimizer.chain_cost(chain_id).await?;

    Ok(Json(ApiResponse {
        success: true,
        data: cost,
        timestamp: Utc::now(),
        data_source: DATA_SOURCE.to_string(),
        request_id: Uuid::new_v4().to_string(),
    }))
}
