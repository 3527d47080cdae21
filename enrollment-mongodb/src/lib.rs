//! MongoDB backend implementation for the enrollment resource service.
//!
//! This crate provides a MongoDB-based implementation of the `StoreBackend` trait.
//!
//! To use this backend, include the `mongodb` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! enrollment = { version = "x.y.z", features = ["mongodb"] }
//! ```
//!
//! # Storage layout
//!
//! Each resource is one MongoDB document. The resource's hex id is stored as the string
//! `_id` of the document and moved back into `id` on read, so the two can never diverge.
//! Field names MongoDB rejects (containing `.` or `$`) are escaped on write and restored
//! on read.
//!
//! # Example
//!
//! ```ignore
//! use enrollment::{backend::StoreBackendBuilder, mongodb::MongoDbStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = MongoDbStore::builder("mongodb://localhost:27017", "fhir")
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

#[allow(unused_extern_crates)]
extern crate self as enrollment_mongodb;

pub mod store;
mod sanitizer;

pub use store::{MongoDbStore, MongoDbStoreBuilder};
