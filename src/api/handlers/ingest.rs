use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method},
    response::Response,
};
use futures_util::future::join;
use serde_json::json;
use std::sync::Arc;

use crate::api::{AppState, gate};
use crate::telemetry::{HEART_RATE_KEY, IngestPayload, LOCATION_KEY};

use super::format_update_time;

/// POST /api/push
///
/// Accepts a telemetry reading and writes each present metric to the store
/// under its fixed key. Validation happens before any store access; the (at
/// most two) writes then run concurrently.
pub async fn ingest(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    const ALLOW: &str = gate::INGEST_METHODS;

    if let Some(response) = gate::preflight(&method, ALLOW) {
        return response;
    }
    if let Some(response) = gate::require_method(&method, Method::POST, ALLOW) {
        return response;
    }
    if let Some(response) = gate::require_token(&headers, &state.config.api_token, ALLOW) {
        return response;
    }

    let payload: IngestPayload = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::debug!("Rejected unparseable ingest body: {}", e);
            return gate::bad_request(ALLOW);
        }
    };
    if let Err(e) = payload.validate() {
        tracing::debug!("Rejected ingest payload: {}", e);
        return gate::bad_request(ALLOW);
    }

    let heart_rate = payload.heart_rate.as_ref().map(ToString::to_string);
    let location = match payload.location.as_ref().map(serde_json::to_string).transpose() {
        Ok(location) => location,
        Err(e) => {
            tracing::error!("Failed to serialize location: {}", e);
            return gate::internal_error(ALLOW);
        }
    };

    let ttl = state.config.cache_ttl_seconds;
    let store = &state.store;

    // Both writes run to completion; one failing does not cancel the other,
    // and a value that was already written stays written.
    let (heart_rate_result, location_result) = join(
        async {
            match &heart_rate {
                Some(value) => store.set(HEART_RATE_KEY, value, ttl).await,
                None => Ok(()),
            }
        },
        async {
            match &location {
                Some(value) => store.set(LOCATION_KEY, value, ttl).await,
                None => Ok(()),
            }
        },
    )
    .await;

    for result in [heart_rate_result, location_result] {
        if let Err(e) = result {
            tracing::error!("Store write failed: {}", e);
            return gate::internal_error(ALLOW);
        }
    }

    gate::ok_json(
        ALLOW,
        json!({
            "success": true,
            "updated": format_update_time(),
        }),
    )
}
