//! Search result envelopes.
//!
//! A [`Bundle`] wraps the resources returned by a search in a `searchset` envelope with
//! a freshly generated envelope id and an element count. Bundles are built per request
//! and never stored.

use serde::{Deserialize, Serialize};

use crate::id::ResourceId;

/// Resource type label of the envelope itself.
pub const BUNDLE_RESOURCE_TYPE: &str = "Bundle";

/// Bundle types produced by the handler set.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    /// Search results.
    Searchset,
}

/// One wrapped resource.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BundleEntry<T> {
    pub resource: T,
}

/// A search result envelope.
///
/// # Example
///
/// ```ignore
/// use enrollment_core::{bundle::Bundle, id::ResourceId};
///
/// let bundle = Bundle::searchset(vec!["a", "b"], ResourceId::generate());
/// assert_eq!(bundle.total, 2);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bundle<T> {
    #[serde(rename = "resourceType")]
    pub resource_type: String,
    /// Envelope id, generated per response.
    pub id: String,
    #[serde(rename = "type")]
    pub bundle_type: BundleType,
    /// Number of entries.
    pub total: usize,
    /// Wrapped resources, in the order they were supplied. Omitted when empty.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry<T>>,
}

impl<T> Bundle<T> {
    /// Wraps `resources` in a searchset bundle identified by `id`.
    ///
    /// This is a pure function of its inputs.
    pub fn searchset(resources: Vec<T>, id: ResourceId) -> Self {
        let entry: Vec<_> = resources
            .into_iter()
            .map(|resource| BundleEntry { resource })
            .collect();

        Self {
            resource_type: BUNDLE_RESOURCE_TYPE.to_string(),
            id: id.to_hex(),
            bundle_type: BundleType::Searchset,
            total: entry.len(),
            entry,
        }
    }

    /// Wraps `resources` in a searchset bundle with a freshly generated envelope id.
    pub fn assemble(resources: Vec<T>) -> Self {
        Self::searchset(resources, ResourceId::generate())
    }

    /// Iterates over the wrapped resources in order.
    pub fn resources(&self) -> impl Iterator<Item = &T> {
        self.entry.iter().map(|e| &e.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_searchset_keeps_order_and_counts() {
        let id = ResourceId::parse("5f1b2c3d4e5f60718293a4b5").unwrap();
        let bundle = Bundle::searchset(vec![3, 1, 2], id);

        assert_eq!(bundle.id, "5f1b2c3d4e5f60718293a4b5");
        assert_eq!(bundle.bundle_type, BundleType::Searchset);
        assert_eq!(bundle.total, 3);
        assert_eq!(bundle.resources().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn test_searchset_is_deterministic_for_injected_id() {
        let id = ResourceId::generate();
        assert_eq!(
            Bundle::searchset(vec!["a"], id),
            Bundle::searchset(vec!["a"], id),
        );
    }

    #[test]
    fn test_assemble_generates_fresh_ids() {
        let a = Bundle::<u8>::assemble(vec![]);
        let b = Bundle::<u8>::assemble(vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serialized_shape() {
        let id = ResourceId::parse("5f1b2c3d4e5f60718293a4b5").unwrap();
        let bundle = Bundle::searchset(vec![json!({ "id": "x" })], id);

        assert_eq!(
            serde_json::to_value(&bundle).unwrap(),
            json!({
                "resourceType": "Bundle",
                "id": "5f1b2c3d4e5f60718293a4b5",
                "type": "searchset",
                "total": 1,
                "entry": [{ "resource": { "id": "x" } }],
            })
        );
    }

    #[test]
    fn test_empty_bundle_omits_entry() {
        let bundle = Bundle::<serde_json::Value>::assemble(vec![]);
        let value = serde_json::to_value(&bundle).unwrap();

        assert_eq!(value["total"], json!(0));
        assert!(value.get("entry").is_none());
    }
}
