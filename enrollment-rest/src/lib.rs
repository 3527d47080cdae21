//! # enrollment-rest
//!
//! HTTP handler set for resources stored through an
//! [`enrollment_core::backend::StoreBackend`].
//!
//! For every registered resource type `R` the router exposes:
//!
//! | Method | Path | Interaction |
//! |--------|------|-------------|
//! | GET | `/[type]` | search, at most `R::SEARCH_LIMIT` results in a searchset bundle |
//! | GET | `/[type]/{id}` | read |
//! | POST | `/[type]` | create with a server-assigned id and a `Location` header |
//! | PUT | `/[type]/{id}` | full replace |
//! | DELETE | `/[type]/{id}` | delete |
//!
//! After a successful store call each handler publishes a
//! [`RequestContext`](enrollment_core::context::RequestContext), which is delivered to
//! the [`ContextSubscriber`]s registered on the [`AppBuilder`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use enrollment_rest::{AppBuilder, AuditLogSubscriber, ServerConfig};
//! use enrollment_memory::InMemoryStore;
//!
//! let app = AppBuilder::new(InMemoryStore::new(), ServerConfig::default())
//!     .resource::<EnrollmentResponse>()
//!     .subscriber(AuditLogSubscriber)
//!     .build();
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod host;
pub mod middleware;
pub mod responses;
pub mod routing;
pub mod state;

use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    middleware::from_fn_with_state,
};
use enrollment_core::{backend::StoreBackend, context::ContextSubscriber, resource::Resource};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};
use tracing::info;

pub use config::{ErrorPolicy, ServerConfig, StorageKind};
pub use error::{Failure, RestError, RestResult};
pub use host::{HostResolver, StaticHostResolver, SystemHostResolver};
pub use middleware::{AuditLogSubscriber, ContextSubscribers};
pub use responses::JSON_CONTENT_TYPE;
pub use state::AppState;

/// Assembles the router: one route set per resource type plus the shared middleware.
pub struct AppBuilder<S> {
    state: AppState<S>,
    router: Router,
    subscribers: Vec<Arc<dyn ContextSubscriber>>,
}

impl<S: StoreBackend + 'static> AppBuilder<S> {
    pub fn new(storage: S, config: ServerConfig) -> Self {
        Self::from_state(AppState::new(Arc::new(storage), config))
    }

    pub fn from_state(state: AppState<S>) -> Self {
        Self {
            state,
            router: Router::new(),
            subscribers: Vec::new(),
        }
    }

    /// Mounts the handler set for `R`.
    pub fn resource<R: Resource>(mut self) -> Self {
        self.router = self
            .router
            .merge(routing::resource_routes::<S, R>(self.state.clone()));
        self
    }

    /// Registers a subscriber for published request contexts.
    pub fn subscriber(mut self, subscriber: impl ContextSubscriber + 'static) -> Self {
        self.subscribers.push(Arc::new(subscriber));
        self
    }

    pub fn shared_subscriber(mut self, subscriber: Arc<dyn ContextSubscriber>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Applies the middleware stack and returns the finished router.
    pub fn build(self) -> Router {
        let Self { state, router, subscribers } = self;
        let config = state.config();

        info!(
            backend = state.storage().backend_name(),
            error_policy = %config.error_policy,
            subscribers = subscribers.len(),
            "Creating REST API server"
        );

        let service_builder = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(SetResponseHeaderLayer::overriding(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            ))
            .layer(build_cors_layer())
            .layer(SetResponseHeaderLayer::if_not_present(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_CONTENT_TYPE),
            ))
            .layer(DefaultBodyLimit::max(config.max_body_size));

        router
            .layer(from_fn_with_state(
                ContextSubscribers::new(subscribers),
                middleware::publish_context,
            ))
            .layer(service_builder)
    }
}

/// Answers CORS preflight requests for any origin, method and header.
fn build_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Initializes the tracing subscriber. `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "enrollment={level},enrollment_rest={level},enrollment_memory={level},\
             enrollment_mongodb={level},audit={level},tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
