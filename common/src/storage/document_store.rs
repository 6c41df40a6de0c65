use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use super::{
    ContentProvider, DocumentSerializer, FileContentProvider, Validate, YamlSerializer,
};

/// Cached, validated access to a single serialized document.
///
/// The first successful read is cached; writes replace both the stored content
/// and the cache. A provider with no content yields `TDocument::default()`.
pub struct DocumentStore<TContentProvider, TDocument, TSerializer = YamlSerializer>
where
    TContentProvider: ContentProvider,
    TDocument: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TSerializer: DocumentSerializer<TDocument>,
{
    serializer: TSerializer,
    content_provider: TContentProvider,
    document: Arc<Mutex<Option<TDocument>>>,
}

impl<TDocument> DocumentStore<FileContentProvider, TDocument, YamlSerializer>
where
    TDocument: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(FileContentProvider::new(file_path), YamlSerializer::new())
    }
}

impl<TContentProvider, TDocument, TSerializer>
    DocumentStore<TContentProvider, TDocument, TSerializer>
where
    TContentProvider: ContentProvider,
    TDocument: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TSerializer: DocumentSerializer<TDocument>,
{
    pub fn new(content_provider: TContentProvider, serializer: TSerializer) -> Self {
        Self {
            serializer,
            content_provider,
            document: Arc::new(Mutex::new(None)),
        }
    }

    pub fn content_provider(&self) -> &TContentProvider {
        &self.content_provider
    }

    pub fn get(&self) -> Result<TDocument, String> {
        let mut current = self
            .document
            .lock()
            .map_err(|e| format!("Document lock poisoned: {}", e))?;

        if let Some(document) = current.as_ref() {
            return Ok(document.clone());
        }

        let Some(content) = self.content_provider.get_content()? else {
            return Ok(TDocument::default());
        };

        let document = self.serializer.deserialize(&content)?;
        document
            .validate()
            .map_err(|e| format!("Validation error: {}", e))?;

        *current = Some(document.clone());
        Ok(document)
    }

    pub fn set(&self, document: &TDocument) -> Result<(), String> {
        document
            .validate()
            .map_err(|e| format!("Validation error: {}", e))?;

        let serialized = self.serializer.serialize(document)?;
        self.content_provider.set_content(&serialized)?;

        let mut current = self
            .document
            .lock()
            .map_err(|e| format!("Document lock poisoned: {}", e))?;
        *current = Some(document.clone());
        Ok(())
    }
}
