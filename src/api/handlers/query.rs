use axum::{
    extract::State,
    http::{HeaderMap, Method},
    response::Response,
};
use futures_util::future::join;
use serde::Serialize;
use std::sync::Arc;

use crate::api::{AppState, gate};
use crate::telemetry::{HEART_RATE_KEY, LOCATION_KEY, Location};

use super::format_update_time;

/// Latest-readings response body
#[derive(Debug, Serialize)]
struct QueryResponse {
    heart_rate: Option<serde_json::Number>,
    location: Option<Location>,
    updated: String,
    status: &'static str,
}

/// GET /api/get
///
/// Returns the latest stored readings. Both keys are read concurrently;
/// absent values come back as null, which is not an error.
pub async fn query(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
) -> Response {
    const ALLOW: &str = gate::QUERY_METHODS;

    if let Some(response) = gate::preflight(&method, ALLOW) {
        return response;
    }
    if let Some(response) = gate::require_method(&method, Method::GET, ALLOW) {
        return response;
    }
    if let Some(response) = gate::require_token(&headers, &state.config.api_token, ALLOW) {
        return response;
    }

    let store = &state.store;
    let (heart_rate_raw, location_raw) =
        match join(store.get(HEART_RATE_KEY), store.get(LOCATION_KEY)).await {
            (Ok(heart_rate), Ok(location)) => (heart_rate, location),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!("Store read failed: {}", e);
                return gate::internal_error(ALLOW);
            }
        };

    let heart_rate = match heart_rate_raw
        .as_deref()
        .map(serde_json::from_str::<serde_json::Number>)
        .transpose()
    {
        Ok(heart_rate) => heart_rate,
        Err(e) => {
            tracing::error!("Stored heart rate is not a valid reading: {}", e);
            return gate::internal_error(ALLOW);
        }
    };
    let location = match location_raw
        .as_deref()
        .map(serde_json::from_str::<Location>)
        .transpose()
    {
        Ok(location) => location,
        Err(e) => {
            tracing::error!("Stored location is not a valid reading: {}", e);
            return gate::internal_error(ALLOW);
        }
    };

    gate::ok_json(
        ALLOW,
        QueryResponse {
            heart_rate,
            location,
            updated: format_update_time(),
            status: "success",
        },
    )
}
