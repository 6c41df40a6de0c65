use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Raw text behind a stored document. `Ok(None)` means nothing has been stored yet.
pub trait ContentProvider {
    fn get_content(&self) -> Result<Option<String>, String>;
    fn set_content(&self, content: &str) -> Result<(), String>;
}

pub struct FileContentProvider {
    file_path: PathBuf,
}

impl FileContentProvider {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

impl ContentProvider for FileContentProvider {
    fn get_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(format!(
                    "Failed to read {}: {}",
                    self.file_path.display(),
                    err
                )),
            },
        }
    }

    fn set_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&self.file_path, content)
            .map_err(|e| format!("Failed to write {}: {}", self.file_path.display(), e))
    }
}

/// Keeps the content in memory; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryContentProvider {
    content: Arc<Mutex<Option<String>>>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Arc::new(Mutex::new(Some(content.to_string()))),
        }
    }
}

impl ContentProvider for MemoryContentProvider {
    fn get_content(&self) -> Result<Option<String>, String> {
        let content = self
            .content
            .lock()
            .map_err(|e| format!("Content lock poisoned: {}", e))?;
        Ok(content.clone())
    }

    fn set_content(&self, content: &str) -> Result<(), String> {
        let mut current = self
            .content
            .lock()
            .map_err(|e| format!("Content lock poisoned: {}", e))?;
        *current = Some(content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_temp_file_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("tictactoe_{}_{}.yaml", name, std::process::id()));
        path
    }

    #[test]
    fn test_missing_file_has_no_content() {
        let provider = FileContentProvider::new("this_file_does_not_exist.yaml");
        assert_eq!(provider.get_content().unwrap(), None);
    }

    #[test]
    fn test_file_content_written_then_read() {
        let path = get_temp_file_path("content_provider");
        let provider = FileContentProvider::new(path.clone());

        provider.set_content("draws: 3\n").unwrap();
        assert_eq!(provider.get_content().unwrap().as_deref(), Some("draws: 3\n"));

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_memory_provider_clones_share_content() {
        let provider = MemoryContentProvider::new();
        let clone = provider.clone();

        assert_eq!(provider.get_content().unwrap(), None);
        clone.set_content("value").unwrap();
        assert_eq!(provider.get_content().unwrap().as_deref(), Some("value"));
    }
}
