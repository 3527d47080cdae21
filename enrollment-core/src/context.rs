//! Request context published by the handler set.
//!
//! After its store call succeeds, every handler publishes exactly one [`RequestContext`]:
//! the resource label, the action performed and the value acted upon. Collaborators that
//! run after the handler (audit, authorization, formatting) receive it through a
//! [`ContextSubscriber`]. Nothing is published for a failed request.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::resource::Resource;

/// The action a handler performed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Search,
    Read,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::Read => "read",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The record a handler publishes after a successful store operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Resource type label, e.g. `EnrollmentResponse`.
    pub resource_type: &'static str,
    pub action: Action,
    /// The loaded or produced value: the resource list for search, the resource for
    /// read/create/update, the id string for delete.
    pub value: Value,
}

impl RequestContext {
    pub fn new(resource_type: &'static str, action: Action, value: Value) -> Self {
        Self { resource_type, action, value }
    }

    /// Creates a context labelled with `R`'s resource type.
    pub fn for_resource<R: Resource>(action: Action, value: Value) -> Self {
        Self::new(R::RESOURCE_TYPE, action, value)
    }
}

/// A downstream collaborator that consumes published contexts.
///
/// Subscribers are invoked once per successful request, after the handler has produced
/// its response. They cannot alter the response.
pub trait ContextSubscriber: Send + Sync {
    fn on_context(&self, context: &RequestContext);
}

impl<F> ContextSubscriber for F
where
    F: Fn(&RequestContext) + Send + Sync,
{
    fn on_context(&self, context: &RequestContext) {
        self(context)
    }
}
