//! Records returned to the host.

use serde::Serialize;

use crate::value::{Params, Value};

/// One row reshaped into the host's generic form.
///
/// Built fresh on every read and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    params: Params,
    #[serde(rename = "resourceId")]
    resource_id: String,
    #[serde(skip)]
    id_field: String,
}

impl Record {
    /// Create a record owned by `resource_id` whose identity lives in `id_field`.
    pub fn new(
        params: Params,
        resource_id: impl Into<String>,
        id_field: impl Into<String>,
    ) -> Self {
        Self {
            params,
            resource_id: resource_id.into(),
            id_field: id_field.into(),
        }
    }

    /// All field values.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// One field value.
    pub fn param(&self, field: &str) -> Option<&Value> {
        self.params.get(field)
    }

    /// The primary key value.
    pub fn id(&self) -> Option<&Value> {
        self.params.get(&self.id_field)
    }

    /// Identifier of the owning resource.
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    /// Consume the record, returning its params.
    pub fn into_params(self) -> Params {
        self.params
    }

    /// Field values as a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.params
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}
