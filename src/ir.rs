// Emitter-agnostic IR: an ordered list of record types. No schema nodes here.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    String,
    Number,
    Boolean,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordType {
    /// Unique within one build.
    pub name: String,
    /// Origin document; `None` for nested anonymous records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub description: String,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub required: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Property key as written in the schema.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scalar: Option<ScalarKind>,
    /// Target record name when the field references a record type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default)]
    pub repeated: bool,
}

/// What a field holds once validated; emitters match on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind<'a> {
    Scalar(ScalarKind),
    Record(&'a str),
}

impl Field {
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self {
            name: name.into(),
            scalar: Some(kind),
            reference: None,
            repeated: false,
        }
    }

    pub fn record(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scalar: None,
            reference: Some(target.into()),
            repeated: false,
        }
    }

    pub fn repeated(self) -> Self {
        Self { repeated: true, ..self }
    }

    pub fn renamed(self, name: impl Into<String>) -> Self {
        Self { name: name.into(), ..self }
    }

    pub fn is_record_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Exactly one of scalar / record reference must be set.
    pub fn kind(&self, record: &str) -> Result<FieldKind<'_>, RenderError> {
        match (&self.scalar, &self.reference) {
            (Some(kind), None) => Ok(FieldKind::Scalar(*kind)),
            (None, Some(target)) if !target.is_empty() => Ok(FieldKind::Record(target)),
            _ => Err(RenderError::UnsupportedScalarType {
                record: record.to_string(),
                field: self.name.clone(),
            }),
        }
    }
}

impl RecordType {
    pub fn is_required(&self, field: &Field) -> bool {
        self.required.contains(&field.name)
    }
}

/// Checks every record before an emitter touches the list: names are unique,
/// every field has exactly one shape and record references point into the list.
pub fn validate(records: &[RecordType]) -> Result<(), RenderError> {
    let mut names = HashSet::with_capacity(records.len());
    for record in records {
        if !names.insert(record.name.as_str()) {
            return Err(RenderError::DuplicateRecord {
                name: record.name.clone(),
            });
        }
    }
    for record in records {
        for field in &record.fields {
            if let FieldKind::Record(target) = field.kind(&record.name)? {
                if !names.contains(target) {
                    return Err(RenderError::UnknownRecord {
                        record: record.name.clone(),
                        field: field.name.clone(),
                        target: target.to_string(),
                    });
                }
            }
        }
    }
    Ok(())
}
