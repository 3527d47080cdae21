//! Delivery of published request contexts.
//!
//! Handlers attach a [`RequestContext`] to their response. [`publish_context`] runs after
//! the handler and hands that context to every registered [`ContextSubscriber`]. Failed
//! requests carry no context, so subscribers only ever see successful ones.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use enrollment_core::context::{Action, ContextSubscriber, RequestContext};
use serde_json::Value;
use tracing::info;

/// The subscribers registered on an application.
#[derive(Clone, Default)]
pub struct ContextSubscribers(Arc<Vec<Arc<dyn ContextSubscriber>>>);

impl ContextSubscribers {
    pub fn new(subscribers: Vec<Arc<dyn ContextSubscriber>>) -> Self {
        Self(Arc::new(subscribers))
    }

    fn notify(&self, context: &RequestContext) {
        for subscriber in self.0.iter() {
            subscriber.on_context(context);
        }
    }
}

/// Forwards the response's [`RequestContext`], if any, to every subscriber.
pub async fn publish_context(
    State(subscribers): State<ContextSubscribers>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if let Some(context) = response.extensions().get::<RequestContext>() {
        subscribers.notify(context);
    }

    response
}

/// Emits one `audit` event per successful request.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuditLogSubscriber;

impl ContextSubscriber for AuditLogSubscriber {
    fn on_context(&self, context: &RequestContext) {
        match (&context.action, &context.value) {
            (Action::Search, Value::Array(resources)) => info!(
                target: "audit",
                resource_type = context.resource_type,
                action = %context.action,
                count = resources.len(),
                "Resources searched"
            ),
            (Action::Delete, Value::String(id)) => info!(
                target: "audit",
                resource_type = context.resource_type,
                action = %context.action,
                id = %id,
                "Resource deleted"
            ),
            (_, value) => {
                let id = value.get("id").and_then(serde_json::Value::as_str).unwrap_or_default();
                info!(
                    target: "audit",
                    resource_type = context.resource_type,
                    action = %context.action,
                    id = id,
                    "Resource accessed"
                )
            }
        }
    }
}
