use semanticheck_core::{Mode, Trigger};

/// Everything the user (or the clock) can ask the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Tick,
    Resize(u16, u16),

    // Navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    GoTop,
    GoBottom,
    /// Enter: edit the focused field, open a directory, confirm a dialog.
    DrillIn,
    /// Esc: leave the picker, dismiss a dialog.
    NavigateBack,
    FocusNext,
    FocusPrev,
    ToggleHelp,

    // Modes and triggers
    ToggleMode,
    SetMode(Mode),
    Trigger(Trigger),

    // File selection
    OpenFilePicker,
    RemoveFile,
    /// Bracketed paste. Terminals deliver dropped files this way.
    Paste(String),

    // Text editing; `'\x08'` is the backspace sentinel.
    InsertChar(char),
    StopEditing,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    DeleteForward,

    None,
}
