//! Pending upload selection for AI detection.
//!
//! At most one file is staged at a time. While one is staged the free-text
//! AI input is disabled, so a detection request is fed by exactly one source.

use std::path::{Path, PathBuf};

use crate::ValidationError;

/// Upload types accepted by `/detect-ai/file`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileExtension {
    Txt,
    Docx,
}

impl FileExtension {
    /// Case-sensitive suffix match on the file name.
    pub fn from_name(name: &str) -> Option<Self> {
        if name.ends_with(".docx") {
            Some(Self::Docx)
        } else if name.ends_with(".txt") {
            Some(Self::Txt)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Txt => ".txt",
            Self::Docx => ".docx",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

/// A file offered by the picker or a drop, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Build a candidate from a path, using its final component as the name.
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_string();
        Some(Self::new(name, path))
    }
}

/// The staged upload. Content is read from `path` when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    name: String,
    path: PathBuf,
    extension: FileExtension,
}

impl PendingFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn extension(&self) -> FileExtension {
        self.extension
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Owner of the single pending file.
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    pending: Option<PendingFile>,
}

impl FileSelection {
    /// Validate and stage `candidate`, replacing any previous file.
    /// On rejection the current selection is left untouched.
    pub fn select(&mut self, candidate: FileCandidate) -> Result<&PendingFile, ValidationError> {
        let Some(extension) = FileExtension::from_name(&candidate.name) else {
            tracing::debug!(name = %candidate.name, "rejected unsupported file type");
            return Err(ValidationError::InvalidFileType {
                name: candidate.name,
            });
        };
        tracing::debug!(name = %candidate.name, "staged file for upload");
        Ok(&*self.pending.insert(PendingFile {
            name: candidate.name,
            path: candidate.path,
            extension,
        }))
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingFile> {
        self.pending.as_ref()
    }

    /// Text shown in the file badge.
    pub fn badge(&self) -> Option<&str> {
        self.pending.as_ref().map(|f| f.name())
    }

    /// The free-text AI input is usable only while no file is staged.
    pub fn text_input_enabled(&self) -> bool {
        self.pending.is_none()
    }
}
