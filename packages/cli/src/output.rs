//! Files and terminal sinks fed by the editing session

use crate::display::render_summary;
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use wiredit_common::{CommonResult, Download, FileSystem, RealFileSystem};
use wiredit_editor::{Clipboard, EditorError, EditorResult};
use wiredit_preview::{parts_list_download, RenderResult};

/// Writes downloads into one directory
#[derive(Debug, Clone)]
pub struct DownloadDir {
    dir: PathBuf,
}

impl DownloadDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }

    pub fn write(&self, download: &Download) -> CommonResult<PathBuf> {
        let path = self.dir.join(&download.file_name);
        RealFileSystem.write(&path, &download.bytes)?;
        tracing::debug!(
            path = %path.display(),
            mime = download.mime_type,
            bytes = download.len(),
            "wrote download"
        );
        Ok(path)
    }

    /// Diagram and parts list of a successful render; nothing for a failure
    pub fn write_render(&self, result: &RenderResult) -> CommonResult<Vec<PathBuf>> {
        let Some(diagram) = result.diagram() else {
            return Ok(Vec::new());
        };

        let mut written = vec![self.write(&diagram.artifact.download())?];
        if let Some(tsv) = diagram.parts_list.as_deref() {
            if diagram.parts().is_some() {
                written.push(self.write(&parts_list_download(tsv))?);
            }
        }
        Ok(written)
    }
}

/// Mirror every published render into `dir` and report it on stderr
pub fn spawn_preview_writer(
    mut results: watch::Receiver<Option<RenderResult>>,
    dir: DownloadDir,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while results.changed().await.is_ok() {
            let Some(result) = results.borrow_and_update().clone() else {
                continue;
            };

            if let Err(err) = dir.write_render(&result) {
                tracing::error!(error = %err, "could not write preview");
            }
            eprintln!("{}", render_summary(&result));
        }
    })
}

/// Clipboard that prints the text to stdout, framed on stderr
#[derive(Debug, Default)]
pub struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn set_text(&mut self, text: &str) -> EditorResult<()> {
        eprintln!("{}", "--- copied document ---".dimmed());
        write_stdout(text).map_err(|e| EditorError::FileSystem(e.into()))?;
        eprintln!("{}", "--- end ---".dimmed());
        Ok(())
    }
}

fn write_stdout(text: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()
}
