//! Schema locations and the resolver that opens them.
//!
//! The builder only sees [`SourceResolver`]; whether bytes come from disk or
//! from the network is decided here.
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

use crate::error::BuildError;

/// Where a schema document lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Path(PathBuf),
    Url(Url),
}

impl Location {
    /// Parses an entry-point location: a local path or an absolute URL with
    /// both a host and a path.
    pub fn parse(raw: &str) -> Result<Self, BuildError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BuildError::malformed(raw, "empty schema location"));
        }
        let location = match Url::parse(raw) {
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => Location::Path(path),
                Err(()) => return Err(BuildError::malformed(raw, "invalid file URL")),
            },
            // Single-letter schemes are drive letters (`C:\schemas\a.json`).
            Ok(url) if url.scheme().len() > 1 => {
                if url.host_str().is_none_or(str::is_empty) {
                    return Err(BuildError::malformed(raw, "URL has no host"));
                }
                Location::Url(url)
            }
            _ => Location::Path(PathBuf::from(raw)),
        };
        if location.file_name().is_empty() {
            return Err(BuildError::malformed(raw, "location has no path"));
        }
        Ok(location)
    }

    /// Resolves `reference` (without fragment) against this document.
    ///
    /// Host-qualified references are used as-is; anything else is relative to
    /// the directory of `self`.
    pub fn join(&self, reference: &str) -> Result<Self, BuildError> {
        if let Ok(url) = Url::parse(reference) {
            if url.scheme().len() > 1 {
                return Location::parse(reference);
            }
        }
        let joined = match self {
            Location::Url(base) => {
                let url = base
                    .join(reference)
                    .map_err(|err| BuildError::malformed(reference, err.to_string()))?;
                Location::Url(url)
            }
            Location::Path(base) => {
                let dir = base.parent().unwrap_or_else(|| Path::new(""));
                Location::Path(dir.join(reference))
            }
        };
        if joined.file_name().is_empty() {
            return Err(BuildError::malformed(reference, "reference has no file name"));
        }
        Ok(joined)
    }

    /// Last path segment, used to name the document's root type.
    pub fn file_name(&self) -> String {
        match self {
            Location::Path(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            Location::Url(url) => {
                let segment = url
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .unwrap_or_default();
                percent_decode_str(segment).decode_utf8_lossy().into_owned()
            }
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Path(path) => write!(f, "{}", path.display()),
            Location::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Opens schema documents. One call per document; the returned stream is
/// dropped by the caller as soon as it has been decoded.
pub trait SourceResolver {
    fn open(&self, location: &Location) -> Result<Box<dyn Read + '_>, BuildError>;
}

/// Local files through `std::fs`, URLs through a blocking HTTP GET.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl SourceResolver for DefaultResolver {
    fn open(&self, location: &Location) -> Result<Box<dyn Read + '_>, BuildError> {
        let fetch_error = |source: crate::error::BoxError| BuildError::SourceFetch {
            location: location.to_string(),
            source,
        };
        match location {
            Location::Path(path) => {
                debug!(path = %path.display(), "opening schema file");
                let file = File::open(path).map_err(|err| fetch_error(Box::new(err)))?;
                Ok(Box::new(file))
            }
            Location::Url(url) => {
                debug!(%url, "fetching schema");
                let response = ureq::get(url.as_str())
                    .call()
                    .map_err(|err| fetch_error(Box::new(err)))?;
                Ok(Box::new(response.into_reader()))
            }
        }
    }
}
