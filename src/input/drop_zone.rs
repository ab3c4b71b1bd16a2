// src/input/drop_zone.rs
use crate::analysis::PickedFile;

#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<PickedFile>),
}

/// The upload area. Highlights while something is dragged over it.
#[derive(Debug, Default)]
pub struct DropZone {
    active: bool,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Updates the highlight. Only a drop hands files on to the input handler.
    pub fn handle(&mut self, event: DragEvent) -> Vec<PickedFile> {
        match event {
            DragEvent::Enter | DragEvent::Over => {
                self.active = true;
                Vec::new()
            }
            DragEvent::Leave => {
                self.active = false;
                Vec::new()
            }
            DragEvent::Drop(files) => {
                self.active = false;
                files
            }
        }
    }

    /// Derives this frame's drag events from what egui reports as hovered and dropped.
    pub fn events_for_frame(&self, hovering: bool, dropped: Vec<PickedFile>) -> Vec<DragEvent> {
        let mut events = Vec::new();
        if hovering {
            if !self.active {
                events.push(DragEvent::Enter);
            }
            events.push(DragEvent::Over);
        } else if self.active && dropped.is_empty() {
            events.push(DragEvent::Leave);
        }
        if !dropped.is_empty() {
            events.push(DragEvent::Drop(dropped));
        }
        events
    }
}
