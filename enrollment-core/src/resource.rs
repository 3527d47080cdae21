//! Core traits for resource representation and serialization.
//!
//! A resource is an opaque document. The handler set only reads its identity field and the
//! labels declared on its type; every other field is carried through untouched.

use bson::{Bson, de::deserialize_from_bson, ser::serialize_to_bson};
use serde::{Deserialize, Serialize};
use serde_json::{Value, from_value, to_value};

use crate::{error::StoreResult, id::ResourceId};

/// Core trait that all resources stored through the handler set must implement.
///
/// Usually derived with `#[derive(Resource)]`.
///
/// # Example
///
/// ```ignore
/// use enrollment_core::{Resource, id::ResourceId};
/// use serde::{Serialize, Deserialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Resource)]
/// #[resource(name = "Coverage", collection = "coverages")]
/// pub struct Coverage {
///     pub id: Option<String>,
///     pub status: String,
/// }
/// ```
pub trait Resource: Serialize + for<'de> Deserialize<'de> + Send + Sync + Clone + 'static {
    /// The resource type label, used as the route segment and the published resource label.
    const RESOURCE_TYPE: &'static str;

    /// Upper bound on the number of resources a search returns.
    const SEARCH_LIMIT: usize = 100;

    /// Returns the name of the collection this resource is stored in.
    fn collection_name() -> &'static str;

    /// Returns the hex form of this resource's identifier, if one has been assigned.
    fn id(&self) -> Option<&str>;

    /// Overwrites this resource's identifier.
    fn set_id(&mut self, id: &ResourceId);
}

/// Extension trait providing serialization utilities for resources.
///
/// This trait is automatically implemented for all types that implement [`Resource`].
pub trait ResourceExt: Resource {
    /// Converts this resource to a BSON value for storage.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn to_bson(&self) -> StoreResult<Bson>;

    /// Creates a resource from a BSON value.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the structure is invalid.
    fn from_bson(bson: Bson) -> StoreResult<Self>;

    /// Converts this resource to a JSON value.
    fn to_json(&self) -> StoreResult<Value>;

    /// Creates a resource from a JSON value.
    fn from_json(value: Value) -> StoreResult<Self>;

    /// Returns a copy of this resource carrying `id`.
    fn with_id(&self, id: &ResourceId) -> Self {
        let mut resource = self.clone();
        resource.set_id(id);
        resource
    }
}

impl<R: Resource> ResourceExt for R {
    fn to_bson(&self) -> StoreResult<Bson> {
        Ok(serialize_to_bson(self)?)
    }

    fn from_bson(bson: Bson) -> StoreResult<Self> {
        Ok(deserialize_from_bson(bson)?)
    }

    fn to_json(&self) -> StoreResult<Value> {
        Ok(to_value(self)?)
    }

    fn from_json(value: Value) -> StoreResult<Self> {
        Ok(from_value(value)?)
    }
}
