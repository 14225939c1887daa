use serde_json::{Map, Value};

const NAME_KEY: &str = "name";

/// Sample-level metadata. Stored as an ordered JSON object so keys written
/// by newer releases survive a load and re-save untouched; only `name` is
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleMetadata {
    entries: Map<String, Value>,
}

impl SampleMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sample name, or an empty string when it was never set.
    pub fn name(&self) -> &str {
        self.entries
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.entries
            .insert(NAME_KEY.to_string(), Value::String(name.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Parses the header line of an archive. Anything but a JSON object is
    /// rejected.
    pub fn from_json_line(text: &str) -> Result<Self, String> {
        match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(entries)) => Ok(Self { entries }),
            Ok(_) => Err("metadata is not a JSON object".to_string()),
            Err(err) => Err(format!("metadata is not valid JSON: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_defaults_to_empty() {
        let mut meta = SampleMetadata::new();
        assert_eq!(meta.name(), "");
        meta.insert("name", 42);
        assert_eq!(meta.name(), "");
        meta.set_name("SRS014683");
        assert_eq!(meta.name(), "SRS014683");
    }

    #[test]
    fn header_line_keeps_unknown_keys() {
        let line = r#"{"site":"gut","name":"SRS1","depth":3}"#;
        let meta = SampleMetadata::from_json_line(line).unwrap();
        assert_eq!(meta.name(), "SRS1");
        assert_eq!(meta.len(), 3);
        assert_eq!(meta.to_json_line().unwrap(), line);
    }

    #[test]
    fn header_line_must_be_object() {
        assert!(SampleMetadata::from_json_line("[]").is_err());
        assert!(SampleMetadata::from_json_line("").is_err());
        assert!(SampleMetadata::from_json_line("\"name\"").is_err());
    }
}
