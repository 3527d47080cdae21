//! Application state shared by every handler.
//!
//! Holds the store handle, the server configuration and the host resolver used for
//! `Location` headers. The store is constructed once at startup and injected here.

use std::sync::Arc;

use enrollment_core::{
    backend::StoreBackend, collection::ResourceCollection, id::ResourceId, resource::Resource,
};

use crate::{
    config::{ErrorPolicy, ServerConfig},
    error::{RestError, RestResult},
    host::{HostResolver, StaticHostResolver, SystemHostResolver},
};

/// Shared application state for the REST API.
///
/// # Example
///
/// ```rust,ignore
/// use enrollment_rest::{AppState, ServerConfig};
/// use enrollment_memory::InMemoryStore;
/// use std::sync::Arc;
///
/// let state = AppState::new(Arc::new(InMemoryStore::new()), ServerConfig::default());
/// ```
pub struct AppState<S> {
    storage: Arc<S>,
    config: Arc<ServerConfig>,
    host_resolver: Arc<dyn HostResolver>,
}

// S lives behind an Arc and does not need to be Clone
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            config: Arc::clone(&self.config),
            host_resolver: Arc::clone(&self.host_resolver),
        }
    }
}

impl<S: StoreBackend> AppState<S> {
    /// Creates the state. The host resolver is a [`StaticHostResolver`] when
    /// `config.public_host` is set and a [`SystemHostResolver`] otherwise.
    pub fn new(storage: Arc<S>, config: ServerConfig) -> Self {
        let host_resolver: Arc<dyn HostResolver> = match &config.public_host {
            Some(host) => Arc::new(StaticHostResolver::new(host.clone())),
            None => Arc::new(SystemHostResolver),
        };

        Self {
            storage,
            config: Arc::new(config),
            host_resolver,
        }
    }

    pub fn with_host_resolver(mut self, resolver: impl HostResolver + 'static) -> Self {
        self.host_resolver = Arc::new(resolver);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.config.error_policy
    }

    /// Typed access to the collection that stores `R`.
    pub fn collection<R: Resource>(&self) -> ResourceCollection<'_, S, R> {
        ResourceCollection::new(self.storage.as_ref())
    }

    /// Absolute URL of the resource `R` with the given id, as written into `Location`.
    ///
    /// # Errors
    ///
    /// Returns [`RestError::HostResolution`] if the host name cannot be determined.
    pub fn location_for<R: Resource>(&self, id: &ResourceId) -> RestResult<String> {
        let host = self
            .host_resolver
            .hostname()
            .map_err(|e| RestError::HostResolution(e.to_string()))?;

        Ok(format!(
            "http://{}:{}/{}/{}",
            host,
            self.config.public_port,
            R::RESOURCE_TYPE,
            id
        ))
    }
}
