mod content_provider;
mod document_serializer;
mod document_store;
mod validate;

pub use content_provider::{ContentProvider, FileContentProvider, MemoryContentProvider};
pub use document_serializer::{DocumentSerializer, YamlSerializer};
pub use document_store::DocumentStore;
pub use validate::Validate;
