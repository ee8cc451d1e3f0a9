//! Thrift IDL structs.
use std::collections::BTreeMap;

use crate::codegen::{Emitter, Provenance, write_record_header};
use crate::error::RenderError;
use crate::ir::{FieldKind, RecordType, ScalarKind};
use crate::naming::{name_from, words};

#[derive(Debug, Clone)]
pub struct ThriftOptions {
    /// `"<language> <namespace>"` pairs, one `namespace` line each.
    pub namespaces: Vec<String>,
    pub provenance: Provenance,
}

impl Default for ThriftOptions {
    fn default() -> Self {
        Self {
            namespaces: vec!["go schema".to_string(), "py schema".to_string()],
            provenance: Provenance::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThriftEmitter {
    options: ThriftOptions,
}

impl ThriftEmitter {
    pub fn new(options: ThriftOptions) -> Self {
        Self { options }
    }
}

fn thrift_scalar(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Boolean => "bool",
        ScalarKind::Number => "double",
        ScalarKind::String => "string",
    }
}

/// Thrift field names keep the key's words, joined by `_`.
fn field_name(key: &str) -> String {
    words(key).collect::<Vec<_>>().join("_")
}

impl Emitter for ThriftEmitter {
    fn render(&self, records: &[RecordType]) -> Result<String, RenderError> {
        let mut out = String::from("// This thrift spec was auto-generated.\n");
        self.options.provenance.write_lines(&mut out, "//");
        out.push('\n');

        for namespace in &self.options.namespaces {
            out.push_str(&format!("namespace {}\n", namespace.trim()));
        }
        out.push('\n');

        for record in records {
            let struct_name = name_from(&record.name);
            write_record_header(&mut out, "//", &struct_name, record);
            out.push_str(&format!("struct {struct_name} {{\n"));

            // keyed by field name: ordering and numbering follow the names
            let mut fields = BTreeMap::new();
            for field in &record.fields {
                let ty = match field.kind(&record.name)? {
                    FieldKind::Record(target) => name_from(target),
                    FieldKind::Scalar(kind) => thrift_scalar(kind).to_string(),
                };
                let ty = if field.repeated { format!("list<{ty}>") } else { ty };
                let name = field_name(&field.name);
                let line = format!("{ty} {name};");
                fields.insert(name, line);
            }

            for (i, line) in fields.values().enumerate() {
                out.push_str(&format!(" {}: {line}\n", i + 1));
            }
            out.push_str("}\n\n");
        }
        Ok(out)
    }
}
