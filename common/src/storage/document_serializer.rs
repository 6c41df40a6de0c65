use serde::{Deserialize, Serialize};

pub trait DocumentSerializer<TDocument> {
    fn serialize(&self, document: &TDocument) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TDocument, String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSerializer;

impl YamlSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl<TDocument> DocumentSerializer<TDocument> for YamlSerializer
where
    TDocument: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, document: &TDocument) -> Result<String, String> {
        serde_yaml_ng::to_string(document).map_err(|e| format!("Failed to serialize document: {}", e))
    }

    fn deserialize(&self, content: &str) -> Result<TDocument, String> {
        serde_yaml_ng::from_str(content).map_err(|e| format!("Failed to deserialize document: {}", e))
    }
}
