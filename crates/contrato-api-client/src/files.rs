//! Staged attachments and their rendered list.

use crate::controller::FormEvent;
use bytes::Bytes;
use contrato_core::format_file_size;
use contrato_core::validator::{content_type_for_extension, file_extension};
use std::path::Path;

/// A file selected by the user but not yet transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub content: Bytes,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Bytes) -> Self {
        Self {
            name: name.into(),
            size: content.len() as u64,
            mime_type: mime_type.into(),
            content,
        }
    }

    /// Read a file from disk; the MIME type is derived from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("Invalid file name: {}", path.display()),
                )
            })?
            .to_string();
        let mime_type = file_extension(&name)
            .map(|ext| content_type_for_extension(&ext))
            .unwrap_or("application/octet-stream");
        let content = tokio::fs::read(path).await?;

        Ok(Self::new(name, mime_type, Bytes::from(content)))
    }
}

/// Ordered collection of staged files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFiles {
    files: Vec<StagedFile>,
}

impl StagedFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append newly selected files after the existing ones. Duplicates are kept.
    pub fn append(&mut self, files: impl IntoIterator<Item = StagedFile>) {
        self.files.extend(files);
    }

    /// Remove the file at `index`; out-of-range indexes change nothing.
    pub fn remove(&mut self, index: usize) -> Option<StagedFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StagedFile> {
        self.files.iter()
    }
}

/// One rendered row of the staged file list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListItem {
    pub label: String,
    index: usize,
}

impl FileListItem {
    /// Event that removes exactly this row's file.
    pub fn remove_action(&self) -> FormEvent {
        FormEvent::RemoveFile(self.index)
    }
}

/// Renders staged files as list rows, `"{name} ({size})"`.
pub struct FileListView;

impl FileListView {
    pub fn render(files: &StagedFiles) -> Vec<FileListItem> {
        files
            .iter()
            .enumerate()
            .map(|(index, file)| FileListItem {
                label: format!("{} ({})", file.name, format_file_size(file.size)),
                index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str, size: usize) -> StagedFile {
        StagedFile::new(name, "application/pdf", Bytes::from(vec![0u8; size]))
    }

    fn names(files: &StagedFiles) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn append_keeps_selection_order_and_duplicates() {
        let mut files = StagedFiles::new();
        files.append([staged("a.pdf", 1), staged("b.pdf", 1)]);
        files.append([staged("a.pdf", 1)]);
        assert_eq!(names(&files), vec!["a.pdf", "b.pdf", "a.pdf"]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut files = StagedFiles::new();
        files.append([staged("a.pdf", 1), staged("b.pdf", 1), staged("c.pdf", 1)]);

        let removed = files.remove(1).expect("removed");
        assert_eq!(removed.name, "b.pdf");
        assert_eq!(names(&files), vec!["a.pdf", "c.pdf"]);

        assert!(files.remove(5).is_none());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn rendered_rows_show_name_and_size() {
        let mut files = StagedFiles::new();
        files.append([staged("a.pdf", 1536), staged("b.txt", 0)]);

        let rows = FileListView::render(&files);
        assert_eq!(rows[0].label, "a.pdf (1.5 KB)");
        assert_eq!(rows[1].label, "b.txt (0 Bytes)");
        assert_eq!(rows[1].remove_action(), FormEvent::RemoveFile(1));
    }

    #[tokio::test]
    async fn from_path_reads_content_and_type() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("contrato.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let file = StagedFile::from_path(&path).await.expect("staged");
        assert_eq!(file.name, "contrato.pdf");
        assert_eq!(file.size, 8);
        assert_eq!(file.mime_type, "application/pdf");
    }
}
