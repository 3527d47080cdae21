//! Identifier codec between external hex ids and store keys.
//!
//! A [`ResourceId`] wraps a BSON [`ObjectId`]. Its external form is the 24-character
//! lower-case hex string, which is also what a persisted resource carries in its `id`
//! field. Parsing is purely syntactic and never touches storage.

use std::{fmt, str::FromStr};

use bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::error::{StoreError, StoreResult};

/// Length of the external hex form of an identifier.
pub const HEX_LENGTH: usize = 24;

/// A validated store key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(ObjectId);

impl ResourceId {
    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parses an external identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidIdentifier`] unless `input` is exactly 24 hex digits.
    pub fn parse(input: &str) -> StoreResult<Self> {
        if input.len() != HEX_LENGTH || !input.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidIdentifier(input.to_string()));
        }

        ObjectId::parse_str(input)
            .map(Self)
            .map_err(|_| StoreError::InvalidIdentifier(input.to_string()))
    }

    /// Returns the external (hex) form.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for ResourceId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for ResourceId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_hex() {
        let id = ResourceId::parse("5f1b2c3d4e5f60718293a4b5").unwrap();
        assert_eq!(id.to_hex(), "5f1b2c3d4e5f60718293a4b5");
    }

    #[test]
    fn test_parse_accepts_upper_case() {
        let id = ResourceId::parse("5F1B2C3D4E5F60718293A4B5").unwrap();
        assert_eq!(id.to_hex(), "5f1b2c3d4e5f60718293a4b5");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "not-an-id",
            "5f1b2c3d4e5f60718293a4b",
            "5f1b2c3d4e5f60718293a4b5c",
            "5f1b2c3d4e5f60718293a4bz",
            " 5f1b2c3d4e5f60718293a4b",
            "é5f1b2c3d4e5f60718293a4",
        ] {
            assert!(
                matches!(ResourceId::parse(input), Err(StoreError::InvalidIdentifier(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_generated_ids_are_valid_and_distinct() {
        let a = ResourceId::generate();
        let b = ResourceId::generate();
        assert_ne!(a, b);
        assert_eq!(a.to_hex().len(), HEX_LENGTH);
        assert_eq!(ResourceId::parse(&a.to_hex()).unwrap(), a);
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let id = ResourceId::parse("5f1b2c3d4e5f60718293a4b5").unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!("5f1b2c3d4e5f60718293a4b5"));

        let back: ResourceId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_value::<ResourceId>(serde_json::json!("nope")).is_err());
    }
}
