//! EnrollmentResponse resource service.
//!
//! This crate is the entry point of the enrollment workspace. It declares the
//! [`EnrollmentResponse`](models::EnrollmentResponse) resource, re-exports the storage and
//! HTTP building blocks from the sub-crates, and wires them into a ready-to-serve router.
//!
//! # Quick Start
//!
//! ```ignore
//! use enrollment::{memory::InMemoryStore, rest::ServerConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let app = enrollment::app(Arc::new(InMemoryStore::new()), ServerConfig::default()).build();
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! Requests are then answered under `/EnrollmentResponse`:
//!
//! ```text
//! POST   /EnrollmentResponse        -> Location: http://<host>:3001/EnrollmentResponse/<id>
//! GET    /EnrollmentResponse        -> searchset Bundle of up to 100 resources
//! GET    /EnrollmentResponse/<id>   -> the resource
//! PUT    /EnrollmentResponse/<id>   -> full replace
//! DELETE /EnrollmentResponse/<id>   -> delete
//! ```
//!
//! # Backends
//!
//! - [`memory`] - In-memory storage for development and testing
//! - [`mongodb`] - Persistent MongoDB backend (requires `mongodb` feature)

pub mod models;
pub mod prelude;

pub use enrollment_core::{backend, bundle, collection, context, error, id, resource};

// Re-export BSON types for convenience
pub use bson;

/// HTTP handler set, configuration and middleware.
pub mod rest {
    pub use enrollment_rest::*;
}

/// In-memory storage backend implementations.
pub mod memory {
    pub use enrollment_memory::{InMemoryStore, InMemoryStoreBuilder};
}

/// MongoDB storage backend implementations.
///
/// This module is only available when the `mongodb` feature is enabled.
#[cfg(feature = "mongodb")]
pub mod mongodb {
    pub use enrollment_mongodb::{MongoDbStore, MongoDbStoreBuilder};
}

use std::sync::Arc;

use enrollment_core::backend::StoreBackend;
use enrollment_rest::{AppBuilder, AppState, AuditLogSubscriber, ServerConfig};

use crate::models::EnrollmentResponse;

/// Router builder with the `EnrollmentResponse` routes mounted and audit logging
/// subscribed. More resources or subscribers can be added before calling `build`.
pub fn app<S: StoreBackend + 'static>(storage: Arc<S>, config: ServerConfig) -> AppBuilder<S> {
    AppBuilder::from_state(AppState::new(storage, config))
        .resource::<EnrollmentResponse>()
        .subscriber(AuditLogSubscriber)
}
