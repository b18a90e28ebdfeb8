use crate::{CommonError, CommonResult};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// File system abstraction for document load/save and testing
pub trait FileSystem: Send + Sync {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> CommonResult<String>;

    /// Write bytes to a file, replacing any previous contents
    fn write(&self, path: &Path, contents: &[u8]) -> CommonResult<()>;
}

/// Real file system implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> CommonResult<String> {
        if !path.exists() {
            return Err(CommonError::NotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        String::from_utf8(bytes).map_err(|_| CommonError::InvalidUtf8(path.display().to_string()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> CommonResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

/// Mock file system for testing
pub struct MockFileSystem {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    pub fn add_file(&mut self, path: PathBuf, contents: impl Into<Vec<u8>>) {
        self.files
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(path, contents.into());
    }

    /// Contents of a file written through this mock, if any
    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.lock().get(path).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> CommonResult<String> {
        let bytes = self
            .lock()
            .get(path)
            .cloned()
            .ok_or_else(|| CommonError::NotFound(path.display().to_string()))?;
        String::from_utf8(bytes).map_err(|_| CommonError::InvalidUtf8(path.display().to_string()))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> CommonResult<()> {
        self.lock().insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
