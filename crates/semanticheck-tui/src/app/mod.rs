mod backend;
mod update;
mod update_file_picker;

use std::path::PathBuf;

use tokio::sync::mpsc;

use semanticheck_core::{DropZone, FileExtension, InFlight, Mode, Session};

use crate::model::field::{EditCursor, Focus};
use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Which screen is currently displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Analyze,
    FilePicker,
}

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    TextInput,
}

/// State for the file picker screen.
#[derive(Debug, Clone)]
pub struct FilePickerState {
    /// Current directory being browsed.
    pub current_dir: PathBuf,
    /// Entries in the current directory (dirs first, then files).
    pub entries: Vec<FileEntry>,
    /// Cursor position in the entries list.
    pub cursor: usize,
}

/// A single entry in the file picker.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// `.txt` or `.docx`, the only uploads the service accepts.
    pub is_supported: bool,
}

impl FilePickerState {
    pub fn new() -> Self {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::at(current_dir)
    }

    pub fn at(dir: PathBuf) -> Self {
        let mut state = Self {
            current_dir: dir,
            entries: Vec::new(),
            cursor: 0,
        };
        state.refresh_entries();
        state
    }

    /// Refresh the entries list from the current directory.
    pub fn refresh_entries(&mut self) {
        let mut entries = Vec::new();

        // Parent directory entry
        if let Some(parent) = self.current_dir.parent() {
            entries.push(FileEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
                is_supported: false,
            });
        }

        match std::fs::read_dir(&self.current_dir) {
            Ok(read_dir) => {
                let mut dirs = Vec::new();
                let mut files = Vec::new();

                for entry in read_dir.flatten() {
                    let path = entry.path();
                    let name = entry.file_name().to_string_lossy().to_string();

                    // Skip hidden files/dirs
                    if name.starts_with('.') {
                        continue;
                    }

                    if path.is_dir() {
                        dirs.push(FileEntry {
                            name,
                            path,
                            is_dir: true,
                            is_supported: false,
                        });
                    } else {
                        let is_supported = FileExtension::from_name(&name).is_some();
                        files.push(FileEntry {
                            name,
                            path,
                            is_dir: false,
                            is_supported,
                        });
                    }
                }

                dirs.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

                entries.extend(dirs);
                entries.extend(files);
            }
            Err(e) => {
                tracing::warn!(dir = %self.current_dir.display(), error = %e, "cannot list directory");
            }
        }

        self.entries = entries;
        self.cursor = 0;
    }

    /// Enter the directory at cursor, or return false if not a directory.
    pub fn enter_directory(&mut self) -> bool {
        if let Some(entry) = self.entries.get(self.cursor)
            && entry.is_dir
        {
            self.current_dir = entry.path.clone();
            self.refresh_entries();
            return true;
        }
        false
    }

    pub fn current(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }
}

/// Main application state.
pub struct App {
    pub session: Session,
    pub screen: Screen,
    pub input_mode: InputMode,
    pub focus: Focus,
    /// Cursor inside the field being edited.
    pub cursor: EditCursor,
    /// Ticket for the request the backend is working on.
    pub in_flight: Option<InFlight>,
    pub drop_zone: DropZone,
    pub file_picker: FilePickerState,
    pub theme: Theme,
    /// Service URL, shown in the header.
    pub server_url: String,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    pub detail_scroll: u16,
    /// Height of the visible detail area (set on resize, used for page up/down).
    pub visible_rows: usize,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
}

impl App {
    pub fn new(theme: Theme, server_url: String) -> Self {
        Self {
            session: Session::new(),
            screen: Screen::Analyze,
            input_mode: InputMode::Normal,
            focus: Focus::TextA,
            cursor: EditCursor::default(),
            in_flight: None,
            drop_zone: DropZone::default(),
            file_picker: FilePickerState::new(),
            theme,
            server_url,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            detail_scroll: 0,
            visible_rows: 10,
            backend_cmd_tx: None,
        }
    }

    /// Input mode used to interpret the next key. A blocking notice always
    /// takes keys in normal mode so Enter/Esc can dismiss it.
    pub fn effective_input_mode(&self) -> InputMode {
        if self.session.notice().is_some() {
            InputMode::Normal
        } else {
            self.input_mode.clone()
        }
    }

    /// Focus ring for the current mode.
    pub fn focus_ring(&self) -> &'static [Focus] {
        match self.session.mode() {
            Mode::Plagiarism => Focus::plagiarism(),
            Mode::AiDetection => Focus::ai_detection(),
        }
    }

    /// The text buffer behind a focus target, if it is editable right now.
    pub(crate) fn field_mut(&mut self, focus: Focus) -> Option<&mut String> {
        match focus {
            Focus::TextA => Some(&mut self.session.text_a),
            Focus::TextB => Some(&mut self.session.text_b),
            Focus::AiText if self.session.ai_text_enabled() => Some(&mut self.session.ai_text),
            Focus::AiText | Focus::Results => None,
        }
    }

    pub fn field(&self, focus: Focus) -> Option<&str> {
        match focus {
            Focus::TextA => Some(&self.session.text_a),
            Focus::TextB => Some(&self.session.text_b),
            Focus::AiText => Some(&self.session.ai_text),
            Focus::Results => None,
        }
    }

    pub fn is_editing(&self, focus: Focus) -> bool {
        focus.is_text() && self.input_mode == InputMode::TextInput && self.focus == focus
    }

    /// Render the current screen.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();

        match self.screen {
            Screen::Analyze => crate::view::analyze::render(f, self, area),
            Screen::FilePicker => crate::view::file_picker::render_in(f, self, area),
        }

        if let Some(notice) = self.session.notice() {
            crate::view::notice::render(f, notice, &self.theme);
        }

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(f, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests;
