//! Delete handler: `DELETE [base]/[type]/[id]`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enrollment_core::{
    backend::StoreBackend,
    context::{Action, RequestContext},
    id::ResourceId,
    resource::Resource,
};
use serde_json::Value;
use tracing::debug;

use crate::{
    error::{Failure, RestResult},
    responses::publish,
    state::AppState,
};

/// Handler for the delete interaction.
///
/// Deleting an id that is not stored still succeeds.
///
/// # Response
///
/// - `200 OK` - Empty body
/// - `400 Bad Request` - Malformed id
/// - `500 Internal Server Error` - The store call failed
pub async fn delete_handler<S, R>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Response, Failure>
where
    S: StoreBackend + 'static,
    R: Resource,
{
    delete::<S, R>(&state, &id)
        .await
        .map_err(|e| e.into_failure(Action::Delete, state.error_policy()))
}

async fn delete<S: StoreBackend, R: Resource>(state: &AppState<S>, id: &str) -> RestResult<Response> {
    debug!(resource_type = R::RESOURCE_TYPE, id = %id, "Processing delete request");

    let id = ResourceId::parse(id)?;
    state.collection::<R>().delete_one(&id).await?;

    let mut response = StatusCode::OK.into_response();
    publish(
        &mut response,
        RequestContext::for_resource::<R>(Action::Delete, Value::String(id.to_hex())),
    );

    Ok(response)
}
