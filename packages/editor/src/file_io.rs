//! # Document I/O
//!
//! Load/save, clipboard and download encoding for the document.
//!
//! Only YAML files are accepted. A file picked with any other extension is a
//! validation error reported to the user; nothing is read and no editor state
//! changes. Names typed by the user are normalized to carry a `.yml`
//! extension when they have neither allowed extension.

use crate::document::Document;
use crate::errors::{EditorError, EditorResult};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use wiredit_common::{Download, FileSystem};

/// Name used when saving a document that has never been named
pub const DEFAULT_FILE_NAME: &str = "wiring-diagram.yml";

/// MIME type of a downloaded document
pub const DOCUMENT_MIME_TYPE: &str = "text/yaml";

fn yaml_extension() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\.(yml|yaml)$").expect("static pattern"))
}

/// File name guaranteed to end in `.yml` or `.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileName(String);

impl FileName {
    /// Validate a name picked for loading
    pub fn parse(name: &str) -> EditorResult<Self> {
        if yaml_extension().is_match(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(EditorError::Validation(
                "Please select a YAML file (.yml or .yaml)".to_string(),
            ))
        }
    }

    /// Normalize a name typed by the user.
    ///
    /// Blank input yields `None` (keep the current name).
    pub fn normalize(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        if yaml_extension().is_match(trimmed) {
            Some(Self(trimmed.to_string()))
        } else {
            Some(Self(format!("{trimmed}.yml")))
        }
    }

    pub fn default_name() -> Self {
        Self(DEFAULT_FILE_NAME.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contents of a file accepted for loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedFile {
    pub file_name: FileName,
    pub path: PathBuf,
    pub text: String,
}

/// Destination for the copy affordance
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> EditorResult<()>;
}

/// Document load/save over a [`FileSystem`]
pub struct DocumentIO<F: FileSystem> {
    fs: F,
}

impl<F: FileSystem> DocumentIO<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Read a YAML file.
    ///
    /// The extension is checked before touching the file system.
    pub fn load(&self, path: &Path) -> EditorResult<LoadedFile> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| EditorError::Validation(format!("Not a file: {}", path.display())))?;
        let file_name = FileName::parse(name)?;

        let text = self.fs.read_to_string(path)?;
        tracing::debug!(file = %file_name, bytes = text.len(), "loaded document");

        Ok(LoadedFile {
            file_name,
            path: path.to_path_buf(),
            text,
        })
    }

    /// Write the document into `dir` under its own name, or the default
    /// name if it has none. Returns the name written.
    pub fn save(&self, doc: &Document, dir: &Path) -> EditorResult<(FileName, PathBuf)> {
        let download = document_download(doc);
        let path = dir.join(&download.file_name);
        self.fs.write(&path, &download.bytes)?;
        tracing::info!(path = %path.display(), bytes = download.len(), "saved document");

        let file_name = doc.file_name().cloned().unwrap_or_else(FileName::default_name);
        Ok((file_name, path))
    }
}

/// Encode the document as a download
pub fn document_download(doc: &Document) -> Download {
    let file_name = doc
        .file_name()
        .map(|n| n.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
    Download::new(file_name, DOCUMENT_MIME_TYPE, doc.text().as_bytes())
}

/// Hand the document text to a clipboard
pub fn copy_document(doc: &Document, clipboard: &mut dyn Clipboard) -> EditorResult<()> {
    clipboard.set_text(doc.text())
}
