//! # Document Handle
//!
//! The single text buffer under edit.
//!
//! A Document tracks:
//! - **text**: the current harness YAML
//! - **source file name**: set on load, rename or first save
//! - **saved snapshot**: the text as last loaded or saved, used for the
//!   dirty flag
//!
//! ## Lifecycle
//!
//! ```text
//! Template/Load → Edit → Save
//!       ↓          ↓       ↓
//!   snapshot    dirty   snapshot
//! ```

use crate::file_io::FileName;
use crate::template::DEFAULT_TEMPLATE;

/// Editable wiring document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    source_file_name: Option<FileName>,
    saved_snapshot: String,
}

impl Document {
    /// Create an unnamed document whose saved snapshot is `text`
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            saved_snapshot: text.clone(),
            text,
            source_file_name: None,
        }
    }

    /// Create a document from the built-in template
    pub fn from_template() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }

    /// Create a document loaded from a named file
    pub fn loaded(text: impl Into<String>, file_name: FileName) -> Self {
        let mut doc = Self::new(text);
        doc.source_file_name = Some(file_name);
        doc
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file_name(&self) -> Option<&FileName> {
        self.source_file_name.as_ref()
    }

    /// Check if the text differs from the last saved/loaded snapshot
    pub fn is_dirty(&self) -> bool {
        self.text != self.saved_snapshot
    }

    /// Number of lines, as shown in the editor footer
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }

    /// Replace the text. Returns whether anything changed.
    pub(crate) fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.text == text {
            return false;
        }
        self.text = text;
        true
    }

    pub(crate) fn rename(&mut self, file_name: FileName) {
        self.source_file_name = Some(file_name);
    }

    /// Record the current text as saved
    pub(crate) fn mark_saved(&mut self) {
        self.saved_snapshot = self.text.clone();
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::from_template()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_document_is_clean() {
        let doc = Document::from_template();
        assert_eq!(doc.text(), DEFAULT_TEMPLATE);
        assert!(!doc.is_dirty());
        assert!(doc.file_name().is_none());
    }

    #[test]
    fn test_edit_marks_dirty_and_save_clears() {
        let mut doc = Document::new("a");
        assert!(doc.set_text("b"));
        assert!(doc.is_dirty());

        doc.mark_saved();
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_editing_back_to_snapshot_is_clean() {
        let mut doc = Document::new("a");
        doc.set_text("b");
        doc.set_text("a");
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_set_same_text_reports_no_change() {
        let mut doc = Document::new("a");
        assert!(!doc.set_text("a"));
    }

    #[test]
    fn test_line_count() {
        assert_eq!(Document::new("a\nb\nc").line_count(), 3);
        assert_eq!(Document::new("a\n").line_count(), 1);
        assert_eq!(Document::new("a\r\nb\r\n").line_count(), 2);
        assert_eq!(Document::new("").line_count(), 0);
    }
}
