//! Caller identity route. Separate from the topology core; the UI uses it
//! to label which account and region it is looking at.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::AppState;
use crate::topology::state::CallerIdentity;
use crate::topology::FaultEnvelope;

pub async fn caller_identity(State(state): State<AppState>) -> Response {
    match state.client.account_id().await {
        Ok(account) => Json(CallerIdentity {
            account,
            region: state.region.clone(),
        })
        .into_response(),
        Err(fault) => Json(FaultEnvelope::from(fault)).into_response(),
    }
}
