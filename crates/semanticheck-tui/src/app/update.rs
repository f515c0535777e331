use semanticheck_core::{AnalysisError, Begin, DragEvent, FileCandidate, Mode, Trigger};

use super::{App, InputMode, Screen};
use crate::action::Action;
use crate::model::field::{EditCursor, Focus};
use crate::model::paste::dropped_paths;
use crate::tui_event::BackendCommand;

impl App {
    /// Process a user action and update state. Returns true if the app should quit.
    pub fn update(&mut self, action: Action) -> bool {
        match action {
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
                return false;
            }
            Action::Resize(_w, h) => {
                // Header, inputs, controls and footer take the rest.
                self.visible_rows = (h as usize).saturating_sub(16).max(1);
                return false;
            }
            _ => {}
        }

        // Quit confirmation modal: q confirms, Esc cancels
        if self.confirm_quit {
            match action {
                Action::Quit => {
                    self.should_quit = true;
                    return true;
                }
                Action::NavigateBack => {
                    self.confirm_quit = false;
                }
                _ => {}
            }
            return false;
        }

        // Blocking notice: nothing else happens until it is acknowledged.
        if self.session.notice().is_some() {
            match action {
                Action::DrillIn | Action::NavigateBack | Action::StopEditing => {
                    self.session.dismiss_notice();
                }
                Action::Quit => {
                    self.confirm_quit = true;
                }
                _ => {}
            }
            return false;
        }

        if self.show_help {
            match action {
                Action::ToggleHelp | Action::NavigateBack | Action::DrillIn => {
                    self.show_help = false;
                }
                Action::Quit => {
                    self.confirm_quit = true;
                }
                _ => {}
            }
            return false;
        }

        match self.screen {
            Screen::FilePicker => self.handle_file_picker_action(action),
            Screen::Analyze => match self.input_mode {
                InputMode::Normal => self.handle_analyze_action(action),
                InputMode::TextInput => self.handle_text_input(action),
            },
        }
        self.should_quit
    }

    fn handle_analyze_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.confirm_quit = true;
            }
            Action::ToggleHelp => {
                self.show_help = true;
            }
            Action::FocusNext => self.cycle_focus(true),
            Action::FocusPrev => self.cycle_focus(false),
            Action::DrillIn => self.start_editing(),
            Action::ToggleMode => {
                let mode = self.session.mode().toggled();
                self.switch_mode(mode);
            }
            Action::SetMode(mode) => self.switch_mode(mode),
            Action::Trigger(trigger) => self.trigger(trigger),
            Action::OpenFilePicker => {
                if self.session.mode() == Mode::AiDetection {
                    self.file_picker.refresh_entries();
                    self.screen = Screen::FilePicker;
                }
            }
            Action::RemoveFile => {
                if self.session.mode() == Mode::AiDetection {
                    self.session.clear_file();
                }
            }
            Action::Paste(text) => self.handle_paste(text),
            Action::MoveDown => self.scroll_detail(1),
            Action::MoveUp => self.scroll_detail(-1),
            Action::PageDown => self.scroll_detail(self.visible_rows as i32),
            Action::PageUp => self.scroll_detail(-(self.visible_rows as i32)),
            Action::GoTop => {
                self.detail_scroll = 0;
            }
            Action::GoBottom => self.scroll_detail(i32::MAX),
            _ => {}
        }
    }

    fn handle_text_input(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::StopEditing => {
                self.input_mode = InputMode::Normal;
            }
            Action::FocusNext => {
                self.input_mode = InputMode::Normal;
                self.cycle_focus(true);
            }
            Action::FocusPrev => {
                self.input_mode = InputMode::Normal;
                self.cycle_focus(false);
            }
            Action::InsertChar('\x08') => self.edit(|cur, buf| cur.backspace(buf)),
            Action::InsertChar(ch) => self.edit(|cur, buf| cur.insert(buf, ch)),
            Action::DeleteForward => self.edit(|cur, buf| cur.delete(buf)),
            Action::CursorLeft => self.edit(|cur, buf| cur.left(buf)),
            Action::CursorRight => self.edit(|cur, buf| cur.right(buf)),
            Action::CursorHome => self.edit(|cur, _| cur.home()),
            Action::CursorEnd => self.edit(|cur, buf| cur.end(buf)),
            Action::Paste(text) => self.handle_paste(text),
            _ => {}
        }
    }

    /// Apply an edit to the focused field. No-op if it is not editable.
    fn edit(&mut self, op: impl FnOnce(&mut EditCursor, &mut String)) {
        let focus = self.focus;
        let mut cursor = self.cursor;
        if let Some(buf) = self.field_mut(focus) {
            op(&mut cursor, buf);
        }
        self.cursor = cursor;
    }

    fn start_editing(&mut self) {
        let focus = self.focus;
        if let Some(buf) = self.field_mut(focus) {
            let cursor = EditCursor::at_end(buf);
            self.cursor = cursor;
            self.input_mode = InputMode::TextInput;
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let ring = self.focus_ring();
        let pos = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (pos + 1) % ring.len()
        } else {
            (pos + ring.len() - 1) % ring.len()
        };
        self.focus = ring[next];
    }

    fn switch_mode(&mut self, mode: Mode) {
        self.session.set_mode(mode);
        self.focus = self.focus_ring()[0];
        self.input_mode = InputMode::Normal;
        self.detail_scroll = 0;
    }

    fn scroll_detail(&mut self, delta: i32) {
        let max = self.detail_line_count().saturating_sub(1) as i64;
        let next = (self.detail_scroll as i64 + delta as i64).clamp(0, max.max(0));
        self.detail_scroll = next as u16;
    }

    /// Number of lines in the expanded detail panel, if any.
    pub(crate) fn detail_line_count(&self) -> usize {
        self.session
            .view()
            .and_then(|v| v.detail)
            .map(|d| d.rich_text().len())
            .unwrap_or(0)
    }

    /// A paste over the AI text region that names files is a drop; anything
    /// else is typed text.
    fn handle_paste(&mut self, text: String) {
        let over_drop_zone = self.screen == Screen::Analyze
            && self.session.mode() == Mode::AiDetection
            && self.focus == Focus::AiText;

        if over_drop_zone {
            let candidates: Vec<FileCandidate> = dropped_paths(&text)
                .iter()
                .filter_map(|p| FileCandidate::from_path(p))
                .collect();
            if !candidates.is_empty() {
                self.drop_zone.handle(DragEvent::Enter);
                let response = self.drop_zone.handle(DragEvent::Drop(candidates));
                if let Some(candidate) = response.candidate
                    && self.session.select_file(candidate).is_ok()
                    && !self.session.ai_text_enabled()
                {
                    self.input_mode = InputMode::Normal;
                }
                return;
            }
        }

        if self.input_mode == InputMode::TextInput {
            self.edit(|cur, buf| cur.insert_str(buf, &text));
        }
    }

    /// Start a request for `trigger` and hand it to the backend.
    fn trigger(&mut self, trigger: Trigger) {
        if self.in_flight.is_some() {
            return;
        }
        let flight = match self.session.begin(trigger) {
            Begin::Started(flight) => flight,
            Begin::Ignored | Begin::Rejected(_) => return,
        };

        self.detail_scroll = 0;
        let request = flight.request().clone();
        let fallback = request.endpoint.failure_message();
        self.in_flight = Some(flight);

        if let Some(tx) = &self.backend_cmd_tx
            && tx.send(BackendCommand::Analyze { request }).is_err()
        {
            tracing::error!("backend listener is gone");
            self.finish_request(Err(AnalysisError::Transport {
                status: None,
                message: fallback.to_string(),
            }));
        }
    }
}
