//! Rust structs deriving serde.
//!
//! Fields outside a record's required set become `Option<T>`. With
//! `indirect`, record-typed fields are boxed so recursive records compile.
use crate::codegen::{Emitter, Provenance, one_line_description};
use crate::error::RenderError;
use crate::ir::{FieldKind, RecordType, ScalarKind};
use crate::naming::{name_from, words};

#[derive(Debug, Clone, Default)]
pub struct RustOptions {
    /// Record-typed fields as `Box<T>` instead of `T`.
    pub indirect: bool,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default)]
pub struct RustEmitter {
    options: RustOptions,
}

impl RustEmitter {
    pub fn new(options: RustOptions) -> Self {
        Self { options }
    }
}

fn rust_scalar(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Boolean => "bool",
        ScalarKind::Number => "f64",
        ScalarKind::String => "String",
    }
}

const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do", "dyn",
    "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// These cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "super", "Self"];

/// snake_case identifier for a property key. Returns (identifier, serde name).
fn field_ident(key: &str) -> (String, String) {
    let mut snake = String::new();
    for word in words(key) {
        if !snake.is_empty() {
            snake.push('_');
        }
        let mut prev: Option<char> = None;
        for c in word.chars() {
            if c.is_ascii_uppercase() && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit()) {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
            prev = Some(c);
        }
    }
    if snake.is_empty() {
        snake.push_str("field");
    }
    if snake.starts_with(|c: char| c.is_ascii_digit()) {
        snake.insert(0, '_');
    }
    if RESERVED.contains(&snake.as_str()) {
        snake.push('_');
    }
    let serde_name = snake.clone();
    if RAW_KEYWORDS.contains(&snake.as_str()) {
        snake.insert_str(0, "r#");
    }
    (snake, serde_name)
}

impl Emitter for RustEmitter {
    fn render(&self, records: &[RecordType]) -> Result<String, RenderError> {
        let mut out = String::from("// Code generated by schema2code. DO NOT EDIT.\n");
        self.options.provenance.write_lines(&mut out, "//");
        out.push_str("\nuse serde::{Deserialize, Serialize};\n\n");

        for record in records {
            let struct_name = name_from(&record.name);
            out.push_str(&format!("/// {struct_name} was auto-generated.\n"));
            if let Some(description) = one_line_description(record) {
                out.push_str(&format!("/// {description}\n"));
            }
            if let Some(source) = &record.source {
                out.push_str(&format!("///\n/// Source: {source}\n"));
            }
            out.push_str("#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]\n");
            out.push_str(&format!("pub struct {struct_name} {{\n"));

            let mut fields = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                let mut ty = match field.kind(&record.name)? {
                    FieldKind::Record(target) if self.options.indirect && !field.repeated => {
                        format!("Box<{}>", name_from(target))
                    }
                    FieldKind::Record(target) => name_from(target),
                    FieldKind::Scalar(kind) => rust_scalar(kind).to_string(),
                };
                if field.repeated {
                    ty = format!("Vec<{ty}>");
                }

                let (ident, serde_name) = field_ident(&field.name);
                let mut attrs = Vec::new();
                if serde_name != field.name {
                    attrs.push(format!("rename = {:?}", field.name));
                }
                if !record.is_required(field) {
                    ty = format!("Option<{ty}>");
                    attrs.push("default".to_string());
                    attrs.push("skip_serializing_if = \"Option::is_none\"".to_string());
                }

                let mut block = String::new();
                if !attrs.is_empty() {
                    block.push_str(&format!("    #[serde({})]\n", attrs.join(", ")));
                }
                block.push_str(&format!("    pub {ident}: {ty},\n"));
                fields.push((serde_name, block));
            }
            fields.sort();

            for (_, block) in fields {
                out.push_str(&block);
            }
            out.push_str("}\n\n");
        }
        Ok(out)
    }
}
