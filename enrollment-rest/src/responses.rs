//! Response construction helpers shared by the handlers.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use enrollment_core::{context::RequestContext, error::StoreError};
use serde::Serialize;

use crate::error::{RestError, RestResult};

/// Content type of every successful response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Serializes `body` into a JSON response with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> RestResult<Response> {
    let bytes = serde_json::to_vec(body).map_err(|e| RestError::from(StoreError::from(e)))?;

    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
        bytes,
    )
        .into_response())
}

/// Attaches `context` to the response for the context subscribers.
pub fn publish(response: &mut Response, context: RequestContext) {
    response.extensions_mut().insert(context);
}
