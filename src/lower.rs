//! Lowering: schema documents → ordered list of record types.
//!
//! One [`BuildContext`] owns the generated-name set and the output list for a
//! whole build, including every document pulled in through a cross-document
//! `$ref`. The walk is depth-first and strictly sequential.
use indexmap::IndexSet;
use tracing::{debug, info};

use crate::error::{BuildError, InvalidRecord};
use crate::ir::{Field, RecordType, ScalarKind};
use crate::naming;
use crate::schema::Schema;
use crate::source::{Location, SourceResolver};

/// One decoded document while its records are being lowered.
pub(crate) struct Document {
    pub location: Location,
    pub root_type: String,
    pub schema: Schema,
}

pub struct BuildContext<'r> {
    resolver: &'r dyn SourceResolver,
    /// Names already generated (or being generated). A hit means "skip".
    pub(crate) generated: IndexSet<String>,
    pub(crate) records: Vec<RecordType>,
    /// Definition pointers on the current `$ref` chain, for alias-loop detection.
    pub(crate) resolving: Vec<String>,
}

/// Builds the IR for the schema at `location`.
pub fn build(resolver: &dyn SourceResolver, location: &str) -> Result<Vec<RecordType>, BuildError> {
    build_all(resolver, [location])
}

/// Builds several root documents into one IR list with one shared name set.
pub fn build_all<I>(resolver: &dyn SourceResolver, locations: I) -> Result<Vec<RecordType>, BuildError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut cx = BuildContext::new(resolver);
    for location in locations {
        cx.build_location(location.as_ref())?;
    }
    let records = cx.finish();
    info!(records = records.len(), "build complete");
    Ok(records)
}

impl<'r> BuildContext<'r> {
    pub fn new(resolver: &'r dyn SourceResolver) -> Self {
        Self {
            resolver,
            generated: IndexSet::new(),
            records: Vec::new(),
            resolving: Vec::new(),
        }
    }

    pub fn build_location(&mut self, raw: &str) -> Result<String, BuildError> {
        let location = Location::parse(raw)?;
        self.build_document(location)
    }

    pub fn finish(self) -> Vec<RecordType> {
        self.records
    }

    /// Fetches, decodes and lowers one document. Returns its root type name.
    ///
    /// A document whose root name is already generated is not fetched again.
    pub(crate) fn build_document(&mut self, location: Location) -> Result<String, BuildError> {
        let root_type = naming::name_from_file(&location.file_name());
        if root_type.is_empty() {
            return Err(BuildError::malformed(location.to_string(), "file name yields no type name"));
        }
        if self.generated.contains(&root_type) {
            debug!(%location, %root_type, "document already generated");
            return Ok(root_type);
        }
        let schema = self.load(&location)?;
        let doc = Document {
            location,
            root_type,
            schema,
        };
        let source = doc.location.to_string();
        self.build_record(&doc, &doc.root_type, Some(source.as_str()), &doc.schema)?;
        Ok(doc.root_type)
    }

    fn load(&self, location: &Location) -> Result<Schema, BuildError> {
        debug!(%location, "loading schema");
        let reader = self.resolver.open(location)?;
        // the stream is released when `reader` is consumed, success or not
        Schema::decode(reader, &location.to_string())
    }

    /// Lowers `schema` into a record named `name` and appends it.
    ///
    /// `source` is set for document roots only.
    pub(crate) fn build_record(
        &mut self,
        doc: &Document,
        name: &str,
        source: Option<&str>,
        schema: &Schema,
    ) -> Result<(), BuildError> {
        if !self.generated.insert(name.to_string()) {
            debug!(name, "record already generated");
            return Ok(());
        }
        // a record boundary ends any `$ref` alias chain
        let chain = std::mem::take(&mut self.resolving);
        let result = self.lower_record(doc, name, source, schema);
        self.resolving = chain;
        result
    }

    fn lower_record(
        &mut self,
        doc: &Document,
        name: &str,
        source: Option<&str>,
        schema: &Schema,
    ) -> Result<(), BuildError> {
        let invalid = |reason| BuildError::InvalidRecordSchema {
            name: name.to_string(),
            root: source.is_some(),
            reason,
        };
        if schema.ty.is_empty() {
            return Err(invalid(InvalidRecord::NoType));
        }
        if schema.ty != "object" {
            return Err(invalid(InvalidRecord::NotObject {
                found: schema.ty.clone(),
            }));
        }
        if schema.properties.is_empty() {
            return Err(invalid(InvalidRecord::NoProperties));
        }

        let mut fields = Vec::with_capacity(schema.properties.len());
        for (key, property) in &schema.properties {
            fields.push(self.compile_field(doc, name, key, property)?);
        }

        let required = schema
            .required
            .iter()
            .filter(|key| schema.properties.contains_key(*key))
            .cloned()
            .collect();

        debug!(name, fields = fields.len(), "record generated");
        self.records.push(RecordType {
            name: name.to_string(),
            source: source.map(str::to_string),
            description: schema.description.clone(),
            fields,
            required,
        });
        Ok(())
    }

    /// Lowers one property of record `parent`.
    pub(crate) fn compile_field(
        &mut self,
        doc: &Document,
        parent: &str,
        key: &str,
        schema: &Schema,
    ) -> Result<Field, BuildError> {
        if schema.has_reference() {
            return self.resolve_reference(doc, key, schema);
        }

        match schema.ty.as_str() {
            "string" => Ok(Field::scalar(key, ScalarKind::String)),
            "number" => Ok(Field::scalar(key, ScalarKind::Number)),
            "boolean" => Ok(Field::scalar(key, ScalarKind::Boolean)),
            "array" => {
                let items = schema.items.as_deref().ok_or_else(|| BuildError::UnsupportedFieldType {
                    record: parent.to_string(),
                    field: key.to_string(),
                    ty: "array (without items)".to_string(),
                })?;
                Ok(self.compile_field(doc, parent, key, items)?.repeated())
            }
            "object" => {
                let nested = naming::nested_name(parent, key);
                self.build_record(doc, &nested, None, schema)?;
                Ok(Field::record(key, nested))
            }
            // enums are not modeled; their values are strings on the wire
            _ if schema.enumeration.is_some() => Ok(Field::scalar(key, ScalarKind::String)),
            other => Err(BuildError::UnsupportedFieldType {
                record: parent.to_string(),
                field: key.to_string(),
                ty: other.to_string(),
            }),
        }
    }
}
