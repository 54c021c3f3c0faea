//! Inactivity sweep trigger.

use axum::Json;
use axum::extract::State;
use axum::http::Method;
use axum::response::{IntoResponse, Response};

use crate::dto::response::SweepResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// ANY /api/check-inactive-users
///
/// `OPTIONS` answers `ok` without touching the store. Every other method
/// runs one full sweep.
pub async fn check_inactive_users(
    State(state): State<AppState>,
    method: Method,
) -> ApiResult<Response> {
    if method == Method::OPTIONS {
        return Ok("ok".into_response());
    }

    let summary = state.sweep.run().await?;
    Ok(Json(SweepResponse::from(&summary)).into_response())
}
