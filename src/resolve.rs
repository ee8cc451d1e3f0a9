//! `$ref` interpretation.
//!
//! A reference is one of: a pointer into the current document's definitions,
//! the current document's root, or another document (whose fragment, if any,
//! is ignored: the other document's root type is referenced).
use std::borrow::Cow;

use tracing::debug;

use crate::error::BuildError;
use crate::ir::Field;
use crate::lower::{BuildContext, Document};
use crate::schema::Schema;

/// Which definitions table of a document a pointer reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionTable {
    /// `#/definitions/`
    Definitions,
    /// `#/$defs/`
    Defs,
}

impl DefinitionTable {
    const PREFIXES: [(&'static str, Self); 2] = [("/definitions/", Self::Definitions), ("/$defs/", Self::Defs)];

    fn lookup<'s>(self, schema: &'s Schema, key: &str) -> Option<&'s Schema> {
        match self {
            Self::Definitions => schema.definitions.get(key),
            Self::Defs => schema.defs.get(key),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference<'a> {
    /// `#/definitions/<key>` or `#/$defs/<key>`.
    Definition(DefinitionTable, Cow<'a, str>),
    /// `#` or `#/`.
    Root,
    /// Anything with a path component; not yet joined with the base location.
    External(&'a str),
}

impl<'a> Reference<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, BuildError> {
        let (path, fragment) = match raw.split_once('#') {
            Some((path, fragment)) => (path, fragment),
            None => (raw, ""),
        };
        if !path.is_empty() {
            return Ok(Reference::External(path));
        }
        if fragment.is_empty() || fragment == "/" {
            return Ok(Reference::Root);
        }
        let (table, key) = DefinitionTable::PREFIXES
            .iter()
            .find_map(|(prefix, table)| fragment.strip_prefix(prefix).map(|key| (*table, key)))
            .ok_or_else(|| BuildError::malformed(raw, "only definitions can be referenced"))?;
        if key.is_empty() || key.contains('/') {
            return Err(BuildError::malformed(raw, "expected a single definition key"));
        }
        Ok(Reference::Definition(table, unescape_pointer(key)))
    }
}

impl BuildContext<'_> {
    /// Lowers a property whose schema is a `$ref`.
    ///
    /// Local definitions are named under the document's root type, never
    /// under the referencing record. External documents are built into the
    /// same context and referenced by their root type.
    pub(crate) fn resolve_reference(
        &mut self,
        doc: &Document,
        key: &str,
        schema: &Schema,
    ) -> Result<Field, BuildError> {
        let raw = schema.reference.as_str();
        match Reference::parse(raw)? {
            Reference::Definition(table, def_key) => {
                let def = table.lookup(&doc.schema, &def_key).ok_or_else(|| {
                    BuildError::UnresolvedReference {
                        field: key.to_string(),
                        reference: raw.to_string(),
                    }
                })?;
                if self.resolving.iter().any(|seen| seen == raw) {
                    return Err(BuildError::malformed(raw, "circular $ref chain"));
                }
                self.resolving.push(raw.to_string());
                let field = self.compile_field(doc, &doc.root_type, &def_key, &def.with_inferred_object());
                self.resolving.pop();
                Ok(field?.renamed(key))
            }
            Reference::Root => Ok(Field::record(key, doc.root_type.clone())),
            Reference::External(path) => {
                let location = doc.location.join(path)?;
                debug!(from = %doc.location, to = %location, "cross-document reference");
                let root_type = self.build_document(location)?;
                Ok(Field::record(key, root_type))
            }
        }
    }
}

/// JSON pointer escapes: `~1` is `/`, `~0` is `~`.
fn unescape_pointer(token: &str) -> Cow<'_, str> {
    if token.contains('~') {
        Cow::Owned(token.replace("~1", "/").replace("~0", "~"))
    } else {
        Cow::Borrowed(token)
    }
}
