use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenomeParseError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("{0}")]
    Malformed(String),
}

impl From<serde_json::Error> for GenomeParseError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            GenomeParseError::Io(err.into())
        } else {
            GenomeParseError::Malformed(err.to_string())
        }
    }
}

/// What an archive needs from a genome record. The archive never looks
/// inside a record beyond these accessors.
pub trait GenomeRecord: Sized {
    /// Parses one archive line.
    fn from_json(text: &str) -> Result<Self, GenomeParseError>;

    /// Reads a record in its native on-disk form (a bin file).
    fn from_path(path: &Path) -> Result<Self, GenomeParseError>;

    fn id(&self) -> &str;

    fn name(&self) -> &str;

    fn has_quality(&self) -> bool;

    /// Serializes the record onto a single line, without the terminator.
    fn to_json_line(&self) -> Result<String, GenomeParseError>;
}

/// A genome typed object: the JSON document the annotation pipeline writes
/// for every genome. Members other than the handful read here are kept
/// verbatim and in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Gto {
    id: String,
    fields: Map<String, Value>,
}

impl Gto {
    pub fn from_value(value: Value) -> Result<Self, GenomeParseError> {
        let Value::Object(fields) = value else {
            return Err(GenomeParseError::Malformed(
                "genome is not a JSON object".to_string(),
            ));
        };
        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.trim().is_empty() => id.clone(),
            Some(_) => {
                return Err(GenomeParseError::Malformed(
                    "genome id is not a non-empty string".to_string(),
                ));
            }
            None => {
                return Err(GenomeParseError::Malformed(
                    "genome has no id".to_string(),
                ));
            }
        };
        Ok(Self { id, fields })
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn quality(&self) -> Option<&Map<String, Value>> {
        self.fields.get("quality").and_then(Value::as_object)
    }
}

impl GenomeRecord for Gto {
    fn from_json(text: &str) -> Result<Self, GenomeParseError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    fn from_path(path: &Path) -> Result<Self, GenomeParseError> {
        let file = File::open(path)?;
        let value: Value = serde_json::from_reader(BufReader::new(file))?;
        Self::from_value(value)
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        self.fields
            .get("scientific_name")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    fn has_quality(&self) -> bool {
        self.quality().is_some()
    }

    fn to_json_line(&self) -> Result<String, GenomeParseError> {
        Ok(serde_json::to_string(&self.fields)?)
    }
}
