use std::io::Read;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// A deserialization failure located by JSON path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("at JSON path {path} → {message}")]
pub struct PathError {
    pub path: String,
    pub message: String,
}

fn locate(err: serde_path_to_error::Error<serde_json::Error>) -> PathError {
    PathError {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    }
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, PathError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(locate)
}

pub fn from_reader_with_path<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, PathError> {
    let de = &mut serde_json::Deserializer::from_reader(reader);
    serde_path_to_error::deserialize::<_, T>(de).map_err(locate)
}
