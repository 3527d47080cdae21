//! Route table for one resource type.

use axum::{Router, routing::get};
use enrollment_core::{backend::StoreBackend, resource::Resource};

use crate::{handlers, state::AppState};

/// Mounts the five handlers for `R` under `/{R::RESOURCE_TYPE}`.
///
/// | Method | Path | Handler |
/// |--------|------|---------|
/// | GET | `/[type]` | search |
/// | POST | `/[type]` | create |
/// | GET | `/[type]/{id}` | read |
/// | PUT | `/[type]/{id}` | update |
/// | DELETE | `/[type]/{id}` | delete |
pub fn resource_routes<S, R>(state: AppState<S>) -> Router
where
    S: StoreBackend + 'static,
    R: Resource,
{
    let base = format!("/{}", R::RESOURCE_TYPE);

    Router::new()
        .route(
            &base,
            get(handlers::search_handler::<S, R>).post(handlers::create_handler::<S, R>),
        )
        .route(
            &format!("{base}/{{id}}"),
            get(handlers::read_handler::<S, R>)
                .put(handlers::update_handler::<S, R>)
                .delete(handlers::delete_handler::<S, R>),
        )
        .with_state(state)
}
