//! Minimal CLI: schema → (go | thrift | rust | ir)
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::codegen::{self, Emitter, GoEmitter, GoOptions, Provenance, RustEmitter, RustOptions, ThriftEmitter, ThriftOptions};
use crate::ir::{self, RecordType};
use crate::lower;
use crate::source::DefaultResolver;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate JSON Schema documents (local files or URLs) into type declarations
#[derive(Parser, Debug)]
#[command(name = "schema2code", version)]
pub struct CommandLineInterface {
    /// log resolution and fetch activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit Go structs with json tags
    Go(GoOut),
    /// emit a thrift spec
    Thrift(ThriftOut),
    /// emit Rust structs deriving serde
    Rust(RustOut),
    /// print the intermediate record list as JSON
    Ir(IrOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// inputs are IR dumps written by the `ir` subcommand, not schemas
    #[arg(long, default_value_t = false)]
    from_ir: bool,

    /// One or more schemas. May be literal paths, quoted glob patterns or absolute URLs
    #[arg(num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(Args, Debug, Clone)]
struct OutputSettings {
    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// omit the command line and timestamp from the header
    #[arg(long, default_value_t = false)]
    no_provenance: bool,
}

#[derive(clap::Parser, Debug)]
struct GoOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// name of the generated go package
    #[arg(long, default_value = "schema")]
    package: String,

    /// generate record fields as pointers
    #[arg(long)]
    pointers: bool,
}

#[derive(clap::Parser, Debug)]
struct ThriftOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// comma separated thrift namespaces, e.g. "go schema,py schema"
    #[arg(long = "namespace", value_delimiter = ',', default_values = ["go schema", "py schema"])]
    namespaces: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct RustOut {
    #[command(flatten)]
    input_settings: InputSettings,

    #[command(flatten)]
    output_settings: OutputSettings,

    /// box record fields (needed for recursive schemas)
    #[arg(long)]
    indirect: bool,
}

#[derive(clap::Parser, Debug)]
struct IrOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    /// Builds (or reads back) the complete IR. Any failure aborts; there is
    /// no partial record list.
    fn load_records(&self) -> Result<Vec<RecordType>> {
        let locations = resolve_location_patterns(&self.input)?;
        if !self.from_ir {
            return lower::build_all(&DefaultResolver, &locations).context("failed to build schema IR");
        }
        let mut records = Vec::new();
        for location in &locations {
            let source = std::fs::read_to_string(location)
                .with_context(|| format!("failed to read IR dump {location}"))?;
            let dump: Vec<RecordType> = crate::path_de::from_str_with_path(&source)
                .with_context(|| format!("failed to parse IR dump {location}"))?;
            records.extend(dump);
        }
        ir::validate(&records)?;
        Ok(records)
    }
}

impl OutputSettings {
    fn provenance(&self) -> Provenance {
        if self.no_provenance { Provenance::default() } else { Provenance::current() }
    }
}

/// Writes only complete output; callers render to memory first.
fn write_output(out: Option<&PathBuf>, text: &str) -> Result<()> {
    match out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(out, text).with_context(|| format!("failed to write {}", out.display()))
        }
        None => {
            print!("{text}");
            Ok(())
        }
    }
}

fn emit(emitter: &dyn Emitter, input: &InputSettings, output: &OutputSettings) -> Result<()> {
    let records = input.load_records()?;
    let text = codegen::render(emitter, &records)?;
    write_output(output.out.as_ref(), &text)
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn run(&self) -> Result<()> {
        match &self.cmd {
            Command::Go(target) => {
                let emitter = GoEmitter::new(GoOptions {
                    package: target.package.clone(),
                    pointers: target.pointers,
                    provenance: target.output_settings.provenance(),
                });
                emit(&emitter, &target.input_settings, &target.output_settings)
            }
            Command::Thrift(target) => {
                let emitter = ThriftEmitter::new(ThriftOptions {
                    namespaces: target.namespaces.clone(),
                    provenance: target.output_settings.provenance(),
                });
                emit(&emitter, &target.input_settings, &target.output_settings)
            }
            Command::Rust(target) => {
                let emitter = RustEmitter::new(RustOptions {
                    indirect: target.indirect,
                    provenance: target.output_settings.provenance(),
                });
                emit(&emitter, &target.input_settings, &target.output_settings)
            }
            Command::Ir(target) => {
                let records = target.input_settings.load_records()?;
                let mut src = serde_json::to_string_pretty(&records)?;
                src.push('\n');
                write_output(target.out.as_ref(), &src)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_location_patterns<I>(patterns: I) -> Result<Vec<String>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<String>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if pattern.contains("://") || !has_glob_chars(pattern) {
            // URLs and literal paths go to the resolver untouched
            out.push(pattern.to_string());
            continue;
        }

        let mut matched_any = false;
        for entry in glob::glob(pattern).with_context(|| format!("invalid glob pattern: {pattern}"))? {
            let path = entry?;
            matched_any = true;
            out.push(path.to_string_lossy().into_owned());
        }
        if !matched_any {
            // Pattern was explicitly a glob but matched nothing -> surface as an error
            bail!("glob pattern matched no files: {pattern}");
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CommandLineInterface {
        CommandLineInterface::try_parse_from(args).unwrap()
    }

    #[test]
    fn thrift_namespaces_split_on_commas() {
        let cli = parse(&["schema2code", "thrift", "--namespace", "go feeds,rb feeds", "a.json"]);
        match cli.cmd {
            Command::Thrift(target) => assert_eq!(target.namespaces, ["go feeds", "rb feeds"]),
            other => panic!("unexpected command: {other:?}"),
        }
        match parse(&["schema2code", "thrift", "a.json"]).cmd {
            Command::Thrift(target) => assert_eq!(target.namespaces, ["go schema", "py schema"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn input_is_required() {
        assert!(CommandLineInterface::try_parse_from(["schema2code", "go"]).is_err());
    }

    #[test]
    fn globs_expand_and_urls_pass_through() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.schema", "a.schema", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let pattern = format!("{}/*.schema", dir.path().display());
        let found = resolve_location_patterns([pattern.as_str(), "https://example.com/x.json"]).unwrap();
        assert_eq!(found.len(), 3);
        assert!(found[0].ends_with("a.schema"));
        assert!(found[1].ends_with("b.schema"));
        assert_eq!(found[2], "https://example.com/x.json");

        let empty = format!("{}/*.missing", dir.path().display());
        assert!(resolve_location_patterns([empty]).is_err());
    }

    #[test]
    fn go_end_to_end_writes_complete_file() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("widget.schema");
        std::fs::write(&schema, crate::lower::tests::widget().to_string()).unwrap();
        let out = dir.path().join("gen/widget.go");

        let cli = parse(&[
            "schema2code",
            "go",
            "--no-provenance",
            "--package",
            "widgets",
            "-o",
            out.to_str().unwrap(),
            schema.to_str().unwrap(),
        ]);
        cli.run().unwrap();

        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("// Package widgets was auto-generated.\npackage widgets\n\n"));
        assert!(text.contains("type WidgetOwner struct {\n\tName string `json:\"name\"`\n}\n"));
        assert!(text.contains("\tOwner WidgetOwner `json:\"owner\"`\n"));
    }

    #[test]
    fn failed_builds_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("bad.schema");
        std::fs::write(&schema, r#"{"type": "object", "properties": {"n": {"type": "integer"}}}"#).unwrap();
        let out = dir.path().join("bad.go");

        let cli = parse(&["schema2code", "go", "-o", out.to_str().unwrap(), schema.to_str().unwrap()]);
        assert!(cli.run().is_err());
        assert!(!out.exists());
    }

    #[test]
    fn ir_dump_renders_like_the_schema() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("widget.schema");
        std::fs::write(&schema, crate::lower::tests::widget().to_string()).unwrap();
        let dump = dir.path().join("widget.ir.json");
        let from_schema = dir.path().join("a.thrift");
        let from_dump = dir.path().join("b.thrift");

        parse(&["schema2code", "ir", "-o", dump.to_str().unwrap(), schema.to_str().unwrap()])
            .run()
            .unwrap();
        parse(&[
            "schema2code", "thrift", "--no-provenance", "-o", from_schema.to_str().unwrap(),
            schema.to_str().unwrap(),
        ])
        .run()
        .unwrap();
        parse(&[
            "schema2code", "thrift", "--no-provenance", "--from-ir", "-o", from_dump.to_str().unwrap(),
            dump.to_str().unwrap(),
        ])
        .run()
        .unwrap();

        assert_eq!(
            std::fs::read_to_string(from_schema).unwrap(),
            std::fs::read_to_string(from_dump).unwrap()
        );
    }

    #[test]
    fn overlapping_ir_dumps_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let schema = dir.path().join("widget.schema");
        std::fs::write(&schema, crate::lower::tests::widget().to_string()).unwrap();
        let first = dir.path().join("first.ir.json");
        let second = dir.path().join("second.ir.json");
        for dump in [&first, &second] {
            parse(&["schema2code", "ir", "-o", dump.to_str().unwrap(), schema.to_str().unwrap()])
                .run()
                .unwrap();
        }
        let out = dir.path().join("both.go");

        let cli = parse(&[
            "schema2code", "go", "--from-ir", "-o", out.to_str().unwrap(),
            first.to_str().unwrap(), second.to_str().unwrap(),
        ]);
        let err = cli.run().unwrap_err();
        assert!(format!("{err:#}").contains("declared more than once"));
        assert!(!out.exists());
    }
}
