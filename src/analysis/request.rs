// src/analysis/request.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the bytes of a picked file live until the upload reads them.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContents {
    InMemory(Vec<u8>),
    /// Read by the transport task, off the UI thread.
    OnDisk(PathBuf),
}

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile {
    pub name: String,
    pub contents: FileContents,
}

impl PickedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: FileContents::InMemory(bytes.into()),
        }
    }

    /// Takes the name from the path. The file itself is not opened here.
    pub fn from_path(path: &Path) -> Result<Self> {
        let name = path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .with_context(|| format!("Path has no file name: {}", path.display()))?;

        Ok(Self {
            name,
            contents: FileContents::OnDisk(path.to_path_buf()),
        })
    }

    /// Converts a file dropped onto the window. Some platforms hand over the bytes,
    /// others only a path.
    pub fn from_dropped(file: &eframe::egui::DroppedFile) -> Result<Self> {
        if let Some(bytes) = &file.bytes {
            let name = if file.name.is_empty() {
                file.path.as_deref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            } else {
                file.name.clone()
            };
            return Ok(Self::new(name, bytes.to_vec()));
        }

        match &file.path {
            Some(path) => Self::from_path(path),
            None => Err(anyhow::anyhow!("Dropped file '{}' has neither bytes nor a path", file.name)),
        }
    }
}

/// Start and end values of the two filter inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub file: Option<PickedFile>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl AnalysisRequest {
    pub fn upload(file: PickedFile) -> Self {
        Self {
            file: Some(file),
            ..Default::default()
        }
    }

    pub fn filters(range: &DateRange) -> Self {
        Self {
            file: None,
            start_date: non_empty(&range.start),
            end_date: non_empty(&range.end),
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
