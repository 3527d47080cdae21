//! Search handler: `GET [base]/[type]`

use axum::{extract::State, http::StatusCode, response::Response};
use enrollment_core::{
    backend::StoreBackend,
    bundle::Bundle,
    context::{Action, RequestContext},
    error::StoreError,
    resource::Resource,
};
use tracing::debug;

use crate::{
    error::{Failure, RestError, RestResult},
    responses::{json_response, publish},
    state::AppState,
};

/// Handler for the search interaction.
///
/// Returns at most `R::SEARCH_LIMIT` resources wrapped in a searchset [`Bundle`]. No
/// query parameters are interpreted and the order is whatever the store yields.
///
/// # Response
///
/// - `200 OK` - Bundle with `total` equal to the number of entries
/// - `500 Internal Server Error` - The store call failed
pub async fn search_handler<S, R>(State(state): State<AppState<S>>) -> Result<Response, Failure>
where
    S: StoreBackend + 'static,
    R: Resource,
{
    search::<S, R>(&state)
        .await
        .map_err(|e| e.into_failure(Action::Search, state.error_policy()))
}

async fn search<S: StoreBackend, R: Resource>(state: &AppState<S>) -> RestResult<Response> {
    debug!(resource_type = R::RESOURCE_TYPE, limit = R::SEARCH_LIMIT, "Processing search request");

    let resources = state.collection::<R>().find_many(R::SEARCH_LIMIT).await?;
    let loaded = serde_json::to_value(&resources).map_err(|e| RestError::from(StoreError::from(e)))?;

    let bundle = Bundle::assemble(resources);
    debug!(resource_type = R::RESOURCE_TYPE, count = bundle.total, "Search completed");

    let mut response = json_response(StatusCode::OK, &bundle)?;
    publish(&mut response, RequestContext::for_resource::<R>(Action::Search, loaded));

    Ok(response)
}
