//! Create handler: `POST [base]/[type]`

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderValue, header},
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

/// Handler for the create interaction.
///
/// The body is decoded as JSON whatever its content type. The server always assigns a
/// fresh id, replacing any id the body carries.
///
/// # Response
///
/// - `200 OK` (compatible) or `201 Created` (strict) - Empty body, with a `Location`
///   header pointing at the new resource
/// - `400 Bad Request` / `500 Internal Server Error` - Undecodable body, depending on the
///   error policy
/// - `500 Internal Server Error` - The host could not be resolved or the store call failed
pub async fn create_handler<S, R>(State(state): State<AppState<S>>, body: Bytes) -> Result<Response, Failure>
where
    S: StoreBackend + 'static,
    R: Resource,
{
    create::<S, R>(&state, &body)
        .await
        .map_err(|e| e.into_failure(Action::Create, state.error_policy()))
}

async fn create<S: StoreBackend, R: Resource>(state: &AppState<S>, body: &[u8]) -> RestResult<Response> {
    debug!(resource_type = R::RESOURCE_TYPE, "Processing create request");

    let resource: R = serde_json::from_slice(body).map_err(RestError::decode)?;
    let id = ResourceId::generate();
    let resource = resource.with_id(&id);

    // Resolved before the insert so an unresolvable host leaves nothing behind.
    let location = state.location_for::<R>(&id)?;
    let location = HeaderValue::from_str(&location).map_err(|e| RestError::HostResolution(e.to_string()))?;

    state.collection::<R>().insert(&resource).await?;

    debug!(resource_type = R::RESOURCE_TYPE, id = %id, "Resource created");

    let mut response = (state.error_policy().created_status(), [(header::LOCATION, location)]).into_response();
    publish(
        &mut response,
        RequestContext::for_resource::<R>(Action::Create, resource.to_json()?),
    );

    Ok(response)
}
