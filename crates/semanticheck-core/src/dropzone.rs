//! Drop region feeding the file selection.

use crate::file::FileCandidate;

/// Drag lifecycle events delivered to the drop region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragEvent {
    Enter,
    Over,
    Leave,
    Drop(Vec<FileCandidate>),
}

/// What the drop region did with an event. The region consumes every drag
/// event, so the host never applies its own handling (such as inserting the
/// dropped path as text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropResponse {
    /// First dropped file, to be passed on to the file selection.
    pub candidate: Option<FileCandidate>,
}

/// Tracks the drag-active indicator for the drop region.
#[derive(Debug, Clone, Default)]
pub struct DropZone {
    active: bool,
}

impl DropZone {
    pub fn handle(&mut self, event: DragEvent) -> DropResponse {
        let candidate = match event {
            DragEvent::Enter | DragEvent::Over => {
                self.active = true;
                None
            }
            DragEvent::Leave => {
                self.active = false;
                None
            }
            DragEvent::Drop(files) => {
                self.active = false;
                files.into_iter().next()
            }
        };
        DropResponse { candidate }
    }

    /// Whether the drag-active indicator is lit.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
