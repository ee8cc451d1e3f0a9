//! Naming policy: deterministic identifier tokens from schema names.
//!
//! Every generated type name goes through [`name_from`], so the same schema
//! shape always produces the same names. No counters, no hashes.
use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9A-Za-z]+").expect("static regex"));

/// Minified schema files carry the extension as a compound suffix.
static MIN_EXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[._]min[.](json|schema)([.]gz)?$").expect("static regex"));

/// Maximal alphanumeric runs of `raw`; all punctuation is a separator.
pub fn words(raw: &str) -> impl Iterator<Item = &str> {
    WORD.find_iter(raw).map(|m| m.as_str())
}

/// Title-cases each alphanumeric run and joins them with no separator.
///
/// `"CVE_data_meta"` → `"CVEDataMeta"`, `"foo-bar.baz"` → `"FooBarBaz"`.
pub fn name_from(raw: &str) -> String {
    words(raw).map(title).collect()
}

/// Type name of a document root, derived from its file name.
pub fn name_from_file(file: &str) -> String {
    name_from(&file_stem(file))
}

/// Name of an anonymous object nested under `parent` at property `key`.
///
/// Two different objects under the same (parent, key) pair share this name;
/// the first one built wins.
pub fn nested_name(parent: &str, key: &str) -> String {
    format!("{parent}{}", name_from(key))
}

fn file_stem(file: &str) -> String {
    if let Some(m) = MIN_EXT.find(file) {
        return file[..m.start()].replace('.', "");
    }
    let stem = match file.rfind('.') {
        Some(dot) => &file[..dot],
        None => file,
    };
    stem.replace('.', "")
}

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}
