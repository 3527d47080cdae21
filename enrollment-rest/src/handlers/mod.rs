//! HTTP request handlers for one resource type.
//!
//! Every handler is generic over the store backend `S` and the resource type `R`:
//!
//! - [`search`] - List up to `R::SEARCH_LIMIT` resources as a searchset bundle
//! - [`read`] - Read a resource by id
//! - [`create`] - Create a resource with a server-assigned id
//! - [`update`] - Replace a resource by id
//! - [`delete`] - Delete a resource by id
//!
//! Each one validates its input, performs a single store call, publishes a
//! [`RequestContext`](enrollment_core::context::RequestContext) and responds. Any failure
//! ends the request with an error response and publishes nothing.

pub mod create;
pub mod delete;
pub mod read;
pub mod search;
pub mod update;

pub use create::create_handler;
pub use delete::delete_handler;
pub use read::read_handler;
pub use search::search_handler;
pub use update::update_handler;
