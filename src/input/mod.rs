// src/input/mod.rs
use crate::analysis::PickedFile;
use crate::input::command::{Command, RejectFileCommand, UploadFileCommand};

pub mod command;
pub mod drop_zone;

pub use drop_zone::{DragEvent, DropZone};

pub fn is_csv(file_name: &str) -> bool {
    file_name.ends_with(".csv")
}

/// Turns picked or dropped files into commands. Only the first file counts.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn select_files(&self, files: Vec<PickedFile>) -> Option<Box<dyn Command>> {
        let file = files.into_iter().next()?;

        if !is_csv(&file.name) {
            tracing::info!(file = %file.name, "rejecting non-CSV file");
            return Some(Box::new(RejectFileCommand));
        }

        Some(Box::new(UploadFileCommand(file)))
    }
}
