//! Core of the enrollment resource service: a generic resource-handler contract over a JSON
//! document store.
//!
//! This crate provides:
//!
//! - **Resource traits** ([`resource`]) - The per-type declaration a stored resource implements
//! - **Identifier codec** ([`id`]) - Parsing and generating store keys from their hex form
//! - **Store backend abstraction** ([`backend`]) - The five collection operations every backend provides
//! - **Typed collections** ([`collection`]) - Resource-typed access to one collection
//! - **Result bundles** ([`bundle`]) - The `searchset` envelope returned by search
//! - **Request context** ([`context`]) - The record each handler publishes for downstream middleware
//! - **Error handling** ([`error`]) - Store error and result types
//!
//! # Example
//!
//! ```ignore
//! use enrollment_core::{Resource, id::ResourceId};
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, Resource)]
//! #[resource(name = "EnrollmentResponse", collection = "enrollmentresponses")]
//! pub struct EnrollmentResponse {
//!     #[serde(default, skip_serializing_if = "Option::is_none")]
//!     pub id: Option<String>,
//!     #[serde(flatten)]
//!     pub fields: serde_json::Map<String, serde_json::Value>,
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as enrollment_core;

pub mod backend;
pub mod bundle;
pub mod collection;
pub mod context;
pub mod error;
pub mod id;
pub mod resource;

pub use enrollment_macros::Resource;
