//! Resource models served by the enrollment API.

use enrollment_core::Resource;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de::IgnoredAny};
use serde_json::{Map, Value};

/// A payer's answer to an enrollment request.
///
/// Only the identity is interpreted. Every other field, known to FHIR or not, is kept in
/// [`fields`](Self::fields) and written back unchanged. `resourceType` is always emitted
/// as `EnrollmentResponse` whatever the incoming document said.
///
/// ```
/// use enrollment::models::EnrollmentResponse;
///
/// let response: EnrollmentResponse = serde_json::from_str(r#"{ "outcome": "complete" }"#).unwrap();
/// assert_eq!(response.field("outcome").and_then(|v| v.as_str()), Some("complete"));
///
/// let json = serde_json::to_value(&response).unwrap();
/// assert_eq!(json["resourceType"], "EnrollmentResponse");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Resource)]
#[resource(name = "EnrollmentResponse", collection = "enrollmentresponses")]
pub struct EnrollmentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(
        rename = "resourceType",
        default,
        deserialize_with = "discard_resource_type",
        serialize_with = "serialize_resource_type"
    )]
    resource_type: (),

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn serialize_resource_type<S: Serializer>(_: &(), serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(<EnrollmentResponse as enrollment_core::resource::Resource>::RESOURCE_TYPE)
}

fn discard_resource_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<(), D::Error> {
    IgnoredAny::deserialize(deserializer).map(|_| ())
}

impl EnrollmentResponse {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            id: None,
            resource_type: (),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
