//! JSON Schema → record-type IR → type declarations.
//!
//! [`lower::build`] walks one or more schema documents (following local and
//! cross-document `$ref`s) into a flat, ordered list of [`ir::RecordType`]s.
//! The [`codegen`] emitters render that list; they never touch schemas.
pub mod cli;
pub mod codegen;
pub mod error;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod path_de;
pub mod resolve;
pub mod schema;
pub mod source;

pub use error::{BuildError, RenderError};
pub use ir::{Field, RecordType, ScalarKind};
pub use lower::{BuildContext, build, build_all};
pub use source::{DefaultResolver, Location, SourceResolver};
