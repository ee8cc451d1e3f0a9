//! Passive typed view over a decoded JSON Schema document.
//!
//! Only the keywords the IR builder reads are modeled; everything else
//! (`minimum`, `pattern`, `oneOf`, ...) is ignored by serde.
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::error::BuildError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Schema {
    #[serde(rename = "type")]
    pub ty: String,
    /// Sorted by key, which is the canonical field order of the builder.
    pub properties: BTreeMap<String, Schema>,
    pub items: Option<Box<Schema>>,
    #[serde(rename = "$ref")]
    pub reference: String,
    pub description: String,
    #[serde(rename = "enum")]
    pub enumeration: Option<Vec<serde_json::Value>>,
    pub definitions: BTreeMap<String, Schema>,
    /// Kept apart from `definitions`: a document may carry both.
    #[serde(rename = "$defs")]
    pub defs: BTreeMap<String, Schema>,
    pub required: Vec<String>,
}

impl Schema {
    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }

    /// Definitions may omit `"type": "object"` when they declare properties.
    pub fn with_inferred_object(&self) -> Cow<'_, Schema> {
        if self.ty.is_empty() && !self.properties.is_empty() {
            Cow::Owned(Schema {
                ty: "object".to_string(),
                ..self.clone()
            })
        } else {
            Cow::Borrowed(self)
        }
    }

    /// Decode a schema document; `location` only feeds diagnostics.
    pub fn decode(reader: impl Read, location: &str) -> Result<Self, BuildError> {
        crate::path_de::from_reader_with_path(reader).map_err(|err| BuildError::Decode {
            location: location.to_string(),
            path: err.path,
            message: err.message,
        })
    }
}
