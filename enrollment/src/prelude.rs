//! Convenient re-exports of commonly used types.
//!
//! ```ignore
//! use enrollment::prelude::*;
//! ```

pub use enrollment_core::{
    Resource,
    backend::{StoreBackend, StoreBackendBuilder},
    bundle::{Bundle, BundleEntry, BundleType},
    collection::ResourceCollection,
    context::{Action, ContextSubscriber, RequestContext},
    error::{StoreError, StoreResult},
    id::ResourceId,
    resource::{Resource, ResourceExt},
};
pub use enrollment_rest::{AppBuilder, AppState, ErrorPolicy, ServerConfig};

pub use crate::models::EnrollmentResponse;
