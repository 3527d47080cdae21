//! Read handler: `GET [base]/[type]/[id]`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
};
use enrollment_core::{
    backend::StoreBackend,
    context::{Action, RequestContext},
    id::ResourceId,
    resource::{Resource, ResourceExt},
};
use tracing::debug;

use crate::{
    error::{Failure, RestResult},
    responses::{json_response, publish},
    state::AppState,
};

/// Handler for the read interaction.
///
/// # Response
///
/// - `200 OK` - The stored resource
/// - `400 Bad Request` / `500 Internal Server Error` - Malformed id, depending on the
///   error policy
/// - `404 Not Found` / `500 Internal Server Error` - No such resource
pub async fn read_handler<S, R>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Response, Failure>
where
    S: StoreBackend + 'static,
    R: Resource,
{
    read::<S, R>(&state, &id)
        .await
        .map_err(|e| e.into_failure(Action::Read, state.error_policy()))
}

async fn read<S: StoreBackend, R: Resource>(state: &AppState<S>, id: &str) -> RestResult<Response> {
    debug!(resource_type = R::RESOURCE_TYPE, id = %id, "Processing read request");

    let id = ResourceId::parse(id)?;
    let resource = state.collection::<R>().find_one(&id).await?;
    let value = resource.to_json()?;

    let mut response = json_response(StatusCode::OK, &value)?;
    publish(&mut response, RequestContext::for_resource::<R>(Action::Read, value));

    Ok(response)
}
