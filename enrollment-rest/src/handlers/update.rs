//! Update handler: `PUT [base]/[type]/[id]`

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use enrollment_core::{
    backend::StoreBackend,
    context::{Action, RequestContext},
    id::ResourceId,
    resource::{Resource, ResourceExt},
};
use tracing::debug;

use crate::{
    error::{Failure, RestError, RestResult},
    responses::publish,
    state::AppState,
};

/// Handler for the update interaction.
///
/// Replaces the whole stored document. The id comes from the path; an id in the body is
/// overwritten. Updating a missing resource fails, it is never created.
///
/// # Response
///
/// - `200 OK` - Empty body
/// - `400 Bad Request` - Malformed id
/// - `400 Bad Request` / `500 Internal Server Error` - Undecodable body, depending on the
///   error policy
/// - `404 Not Found` / `500 Internal Server Error` - No such resource
pub async fn update_handler<S, R>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, Failure>
where
    S: StoreBackend + 'static,
    R: Resource,
{
    update::<S, R>(&state, &id, &body)
        .await
        .map_err(|e| e.into_failure(Action::Update, state.error_policy()))
}

async fn update<S: StoreBackend, R: Resource>(state: &AppState<S>, id: &str, body: &[u8]) -> RestResult<Response> {
    debug!(resource_type = R::RESOURCE_TYPE, id = %id, "Processing update request");

    let id = ResourceId::parse(id)?;
    let resource: R = serde_json::from_slice(body).map_err(RestError::decode)?;
    let resource = resource.with_id(&id);

    state.collection::<R>().replace_one(&id, &resource).await?;

    debug!(resource_type = R::RESOURCE_TYPE, id = %id, "Resource updated");

    let mut response = StatusCode::OK.into_response();
    publish(
        &mut response,
        RequestContext::for_resource::<R>(Action::Update, resource.to_json()?),
    );

    Ok(response)
}
