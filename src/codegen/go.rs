//! Go structs with `encoding/json` tags.
use crate::codegen::{Emitter, Provenance, write_record_header};
use crate::error::RenderError;
use crate::ir::{FieldKind, RecordType, ScalarKind};
use crate::naming::name_from;

#[derive(Debug, Clone)]
pub struct GoOptions {
    pub package: String,
    /// Record-typed fields as `*T` instead of `T`.
    pub pointers: bool,
    pub provenance: Provenance,
}

impl Default for GoOptions {
    fn default() -> Self {
        Self {
            package: "schema".to_string(),
            pointers: false,
            provenance: Provenance::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GoEmitter {
    options: GoOptions,
}

impl GoEmitter {
    pub fn new(options: GoOptions) -> Self {
        Self { options }
    }
}

fn go_scalar(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::Boolean => "bool",
        ScalarKind::Number => "float64",
        ScalarKind::String => "string",
    }
}

impl Emitter for GoEmitter {
    fn render(&self, records: &[RecordType]) -> Result<String, RenderError> {
        let package = &self.options.package;
        let mut out = format!("// Package {package} was auto-generated.\n");
        self.options.provenance.write_lines(&mut out, "//");
        out.push_str(&format!("package {package}\n\n"));

        for record in records {
            let struct_name = name_from(&record.name);
            write_record_header(&mut out, "//", &struct_name, record);
            out.push_str(&format!("type {struct_name} struct {{\n"));

            let mut lines = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                let mut ty = String::new();
                if field.repeated {
                    ty.push_str("[]");
                }
                match field.kind(&record.name)? {
                    FieldKind::Record(target) => {
                        if self.options.pointers {
                            ty.push('*');
                        }
                        ty.push_str(&name_from(target));
                    }
                    FieldKind::Scalar(kind) => ty.push_str(go_scalar(kind)),
                }
                lines.push(format!("\t{} {ty} `json:\"{}\"`", name_from(&field.name), field.name));
            }
            lines.sort();

            out.push_str(&lines.join("\n"));
            out.push_str("\n}\n\n");
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::tests::widget_ir;

    #[test]
    fn renders_structs_in_ir_order_with_sorted_fields() {
        let out = GoEmitter::default().render(&widget_ir()).unwrap();
        let expected = "\
// Package schema was auto-generated.
package schema

// WidgetOwner was auto-generated.
type WidgetOwner struct {
\tName string `json:\"name\"`
}

// Widget was auto-generated.
// A widget. With a second line.
// Source: widget.schema
type Widget struct {
\tCVEDataMeta bool `json:\"CVE_data_meta\"`
\tId string `json:\"id\"`
\tOwner WidgetOwner `json:\"owner\"`
\tScore float64 `json:\"score\"`
\tTags []string `json:\"tags\"`
}

";
        assert_eq!(out, expected);
    }

    #[test]
    fn pointers_and_package_are_configurable() {
        let emitter = GoEmitter::new(GoOptions {
            package: "feeds".into(),
            pointers: true,
            provenance: Provenance {
                command: Some("schema2code go widget.schema".into()),
                generated_at: None,
            },
        });
        let out = emitter.render(&widget_ir()).unwrap();
        assert!(out.starts_with(
            "// Package feeds was auto-generated.\n// Command: schema2code go widget.schema\npackage feeds\n\n"
        ));
        assert!(out.contains("\tOwner *WidgetOwner `json:\"owner\"`\n"));
    }
}
