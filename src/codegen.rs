//! Emitters: pure renderers over the ordered IR list.
//!
//! Each backend owns its scalar table, its field ordering and its syntax for
//! repeated and record-typed fields. None of them look at schemas.
pub mod go;
pub mod rust;
pub mod thrift;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::RenderError;
use crate::ir::{self, RecordType};

pub use go::{GoEmitter, GoOptions};
pub use rust::{RustEmitter, RustOptions};
pub use thrift::{ThriftEmitter, ThriftOptions};

pub trait Emitter {
    fn render(&self, records: &[RecordType]) -> Result<String, RenderError>;
}

/// Validates the IR, then renders it. Nothing is returned on failure.
pub fn render(emitter: &dyn Emitter, records: &[RecordType]) -> Result<String, RenderError> {
    ir::validate(records)?;
    emitter.render(records)
}

// ------------------------------ Provenance -------------------------------- //

/// File-level header lines. Both parts vary between runs, so tests and
/// reproducible builds leave them empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    pub command: Option<String>,
    pub generated_at: Option<DateTime<Utc>>,
}

impl Provenance {
    /// The running process's command line and the current time.
    pub fn current() -> Self {
        Self {
            command: Some(command_line(std::env::args())),
            generated_at: Some(Utc::now()),
        }
    }

    pub(crate) fn write_lines(&self, out: &mut String, comment: &str) {
        if let Some(command) = &self.command {
            out.push_str(&format!("{comment} Command: {command}\n"));
        }
        if let Some(at) = &self.generated_at {
            out.push_str(&format!(
                "{comment} Generated: {}\n",
                at.to_rfc3339_opts(SecondsFormat::Secs, true)
            ));
        }
    }
}

/// Joins arguments, quoting the value of `-flag=value with spaces`.
pub fn command_line<I>(args: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    args.into_iter()
        .map(|arg| {
            let arg = arg.as_ref();
            if !arg.contains(' ') || !arg.starts_with('-') {
                return arg.to_string();
            }
            let split = arg.find('=').map_or(0, |eq| eq + 1);
            format!("{}{:?}", &arg[..split], &arg[split..])
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// --------------------------- Record headers ------------------------------- //

/// Description collapsed to one line, ending with a period.
pub(crate) fn one_line_description(record: &RecordType) -> Option<String> {
    let text = record
        .description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    Some(if text.ends_with('.') { text } else { text + "." })
}

/// `// <Name> was auto-generated.`, description, and the source of roots.
pub(crate) fn write_record_header(out: &mut String, comment: &str, name: &str, record: &RecordType) {
    out.push_str(&format!("{comment} {name} was auto-generated.\n"));
    if let Some(description) = one_line_description(record) {
        out.push_str(&format!("{comment} {description}\n"));
    }
    if let Some(source) = &record.source {
        out.push_str(&format!("{comment} Source: {source}\n"));
    }
}
