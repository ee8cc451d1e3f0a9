//! Error kinds raised while building the IR and while rendering it.
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a schema node could not become a record type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecord {
    #[error("schema type is not object (no type declared)")]
    NoType,
    #[error("schema type is not object: {found:?}")]
    NotObject { found: String },
    #[error("schema type has no properties")]
    NoProperties,
}

/// Terminal failures of a build. There is no partial IR.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{reason}: {name:?} (root={root})")]
    InvalidRecordSchema {
        name: String,
        root: bool,
        reason: InvalidRecord,
    },

    #[error("unknown reference for {field:?}: {reference:?}")]
    UnresolvedReference { field: String, reference: String },

    #[error("unknown field type for {record}.{field}: {ty:?}")]
    UnsupportedFieldType {
        record: String,
        field: String,
        ty: String,
    },

    #[error("failed to open schema source {location}")]
    SourceFetch {
        location: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode schema {location} at JSON path {path} → {message}")]
    Decode {
        location: String,
        path: String,
        message: String,
    },

    #[error("malformed reference {reference:?}: {reason}")]
    MalformedReference { reference: String, reason: String },
}

impl BuildError {
    pub(crate) fn malformed(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("unsupported scalar type for {record}.{field}: field is neither a known scalar nor a record reference")]
    UnsupportedScalarType { record: String, field: String },

    #[error("record {name:?} is declared more than once")]
    DuplicateRecord { name: String },

    #[error("{record}.{field} references unknown record {target:?}")]
    UnknownRecord {
        record: String,
        field: String,
        target: String,
    },
}
