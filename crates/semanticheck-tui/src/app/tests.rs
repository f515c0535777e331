use std::io::Write;

use semanticheck_core::client::DEFAULT_BASE_URL;
use semanticheck_core::{
    AiDetectionResult, AnalysisError, AnalysisResult, Endpoint, Payload, PlagiarismResult,
    RiskLevel, Trigger, Verdict,
};

use super::*;
use crate::action::Action;
use crate::tui_event::BackendEvent;

/// Create a minimal App for testing (no backend channel).
fn test_app() -> App {
    App::new(Theme::hacker(), DEFAULT_BASE_URL.to_string())
}

/// App wired to a command channel so sent requests can be inspected.
fn wired_app() -> (App, mpsc::UnboundedReceiver<BackendCommand>) {
    let mut app = test_app();
    let (tx, rx) = mpsc::unbounded_channel();
    app.backend_cmd_tx = Some(tx);
    (app, rx)
}

fn type_text(app: &mut App, text: &str) {
    app.update(Action::DrillIn);
    for ch in text.chars() {
        app.update(Action::InsertChar(ch));
    }
    app.update(Action::StopEditing);
}

fn fill_comparison(app: &mut App) {
    app.session.text_a = "The quick brown fox".into();
    app.session.text_b = "A quick brown fox".into();
}

fn plag_ok(score: f64) -> Result<AnalysisResult, AnalysisError> {
    Ok(AnalysisResult::Plagiarism(PlagiarismResult {
        similarity_score: score,
        risk_level: RiskLevel::High,
        detailed_analysis: Some("## Findings\n\n- shared phrasing".into()),
        message: None,
    }))
}

fn finished(outcome: Result<AnalysisResult, AnalysisError>) -> BackendEvent {
    BackendEvent::AnalysisFinished { outcome }
}

fn temp_file(suffix: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("essay")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    writeln!(file, "some essay text").unwrap();
    file
}

// ── Modes ───────────────────────────────────────────────────────

#[test]
fn starts_in_plagiarism_mode() {
    let app = test_app();
    assert_eq!(app.session.mode(), Mode::Plagiarism);
    assert_eq!(app.focus, Focus::TextA);
    assert_eq!(app.screen, Screen::Analyze);
}

#[test]
fn toggle_mode_switches_focus_ring() {
    let mut app = test_app();
    app.update(Action::ToggleMode);
    assert_eq!(app.session.mode(), Mode::AiDetection);
    assert_eq!(app.focus, Focus::AiText);

    app.update(Action::SetMode(Mode::Plagiarism));
    assert_eq!(app.session.mode(), Mode::Plagiarism);
    assert_eq!(app.focus, Focus::TextA);
}

#[test]
fn mode_switch_clears_result() {
    let (mut app, _rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::QuickCheck));
    app.handle_backend_event(finished(plag_ok(0.5)));
    assert!(app.session.view().is_some());

    app.update(Action::ToggleMode);
    assert!(app.session.view().is_none());
}

#[test]
fn hidden_trigger_does_nothing() {
    let (mut app, mut rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::DetectAi));
    assert!(!app.session.is_busy());
    assert!(rx.try_recv().is_err());
}

// ── Editing ─────────────────────────────────────────────────────

#[test]
fn typing_fills_focused_field() {
    let mut app = test_app();
    type_text(&mut app, "hello");
    assert_eq!(app.session.text_a, "hello");
    assert_eq!(app.input_mode, InputMode::Normal);

    app.update(Action::FocusNext);
    assert_eq!(app.focus, Focus::TextB);
    type_text(&mut app, "world");
    assert_eq!(app.session.text_b, "world");
}

#[test]
fn backspace_and_cursor_moves() {
    let mut app = test_app();
    app.update(Action::DrillIn);
    for ch in "abc".chars() {
        app.update(Action::InsertChar(ch));
    }
    app.update(Action::CursorLeft);
    app.update(Action::InsertChar('\x08'));
    assert_eq!(app.session.text_a, "ac");
    app.update(Action::CursorHome);
    app.update(Action::DeleteForward);
    assert_eq!(app.session.text_a, "c");
}

#[test]
fn tab_while_editing_leaves_text_mode() {
    let mut app = test_app();
    app.update(Action::DrillIn);
    assert_eq!(app.input_mode, InputMode::TextInput);
    app.update(Action::FocusNext);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.focus, Focus::TextB);
}

#[test]
fn results_focus_is_not_editable() {
    let mut app = test_app();
    app.focus = Focus::Results;
    app.update(Action::DrillIn);
    assert_eq!(app.input_mode, InputMode::Normal);
}

// ── Validation notices ──────────────────────────────────────────

#[test]
fn empty_comparison_raises_notice() {
    let (mut app, mut rx) = wired_app();
    app.session.text_a = "only one".into();
    app.update(Action::Trigger(Trigger::QuickCheck));

    let notice = app.session.notice().unwrap();
    assert_eq!(notice.message, "Please enter both texts.");
    assert!(!app.session.is_busy());
    assert!(rx.try_recv().is_err());
}

#[test]
fn notice_blocks_input_until_dismissed() {
    let mut app = test_app();
    app.update(Action::Trigger(Trigger::QuickCheck));
    assert!(app.session.notice().is_some());
    assert_eq!(app.effective_input_mode(), InputMode::Normal);

    app.update(Action::ToggleMode);
    assert_eq!(app.session.mode(), Mode::Plagiarism);

    app.update(Action::DrillIn);
    assert!(app.session.notice().is_none());
    // The dismissing key does not also start editing.
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn notice_forces_normal_input_mode() {
    let mut app = test_app();
    app.update(Action::DrillIn);
    assert_eq!(app.effective_input_mode(), InputMode::TextInput);

    let _ = app
        .session
        .select_file(semanticheck_core::FileCandidate::new("paper.pdf", "/tmp/paper.pdf"));
    assert!(app.session.notice().is_some());
    assert_eq!(app.effective_input_mode(), InputMode::Normal);
    // Editing resumes once the notice is acknowledged.
    app.update(Action::NavigateBack);
    assert_eq!(app.effective_input_mode(), InputMode::TextInput);
}

#[test]
fn missing_detection_input_raises_notice() {
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.session.ai_text = "   \n".into();
    app.update(Action::Trigger(Trigger::DetectAi));
    assert_eq!(
        app.session.notice().unwrap().message,
        "Please enter text or upload a file."
    );
}

// ── Requests ────────────────────────────────────────────────────

#[test]
fn trigger_sends_request_and_goes_busy() {
    let (mut app, mut rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::DetailedCheck));

    assert!(app.session.is_busy());
    assert!(app.in_flight.is_some());
    let controls = app.session.controls();
    assert!(!controls.quick_check.enabled);
    assert!(!controls.detailed_check.enabled);

    let BackendCommand::Analyze { request } = rx.try_recv().unwrap();
    assert_eq!(request.endpoint, Endpoint::AnalyzeDetailed);
    assert!(matches!(request.payload, Payload::Compare { .. }));
}

#[test]
fn busy_trigger_is_ignored() {
    let (mut app, mut rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::QuickCheck));
    app.update(Action::Trigger(Trigger::QuickCheck));
    app.update(Action::Trigger(Trigger::DetailedCheck));

    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[test]
fn success_renders_result() {
    let (mut app, _rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::QuickCheck));
    app.handle_backend_event(finished(plag_ok(0.87)));

    assert!(!app.session.is_busy());
    assert!(app.in_flight.is_none());
    let view = app.session.view().unwrap();
    assert_eq!(view.headline, "87%");
    assert_eq!(view.label, "High");
    assert!(app.detail_line_count() > 0);
}

#[test]
fn failure_shows_notice_and_keeps_previous_result() {
    let (mut app, _rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::QuickCheck));
    app.handle_backend_event(finished(plag_ok(0.3)));

    app.update(Action::Trigger(Trigger::QuickCheck));
    app.handle_backend_event(finished(Err(AnalysisError::Transport {
        status: Some(400),
        message: "Text too short".into(),
    })));

    assert!(!app.session.is_busy());
    assert_eq!(app.session.notice().unwrap().message, "Text too short");
    assert_eq!(app.session.view().unwrap().headline, "30%");
}

#[test]
fn stray_result_is_ignored() {
    let mut app = test_app();
    app.handle_backend_event(finished(plag_ok(0.9)));
    assert!(app.session.view().is_none());
    assert!(!app.session.is_busy());
}

#[test]
fn closed_backend_channel_fails_request() {
    let (mut app, rx) = wired_app();
    drop(rx);
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::QuickCheck));

    assert!(!app.session.is_busy());
    assert!(app.in_flight.is_none());
    assert_eq!(app.session.notice().unwrap().message, "Analysis failed");
}

#[test]
fn detection_result_renders_reasoning() {
    let (mut app, _rx) = wired_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.session.ai_text = "Some text to check".into();
    app.update(Action::Trigger(Trigger::DetectAi));
    app.handle_backend_event(finished(Ok(AnalysisResult::AiDetection(
        AiDetectionResult {
            ai_probability: 92,
            verdict: Verdict::LikelyAi,
            reasoning: Some("uniform sentence length".into()),
        },
    ))));

    let view = app.session.view().unwrap();
    assert_eq!(view.headline, "92%");
    assert_eq!(view.label, "Likely AI");
    assert_eq!(app.detail_line_count(), 1);
}

#[test]
fn detail_scroll_is_clamped() {
    let (mut app, _rx) = wired_app();
    fill_comparison(&mut app);
    app.update(Action::Trigger(Trigger::DetailedCheck));
    app.handle_backend_event(finished(Ok(AnalysisResult::Plagiarism(PlagiarismResult {
        similarity_score: 0.6,
        risk_level: RiskLevel::Medium,
        detailed_analysis: Some("one\n\ntwo\n\nthree\n\nfour".into()),
        message: None,
    }))));

    let lines = app.detail_line_count();
    assert!(lines >= 4);
    app.update(Action::MoveDown);
    assert_eq!(app.detail_scroll, 1);
    app.update(Action::GoBottom);
    assert_eq!(app.detail_scroll as usize, lines - 1);
    app.update(Action::MoveDown);
    assert_eq!(app.detail_scroll as usize, lines - 1);
    app.update(Action::GoTop);
    assert_eq!(app.detail_scroll, 0);
}

// ── Files and drops ─────────────────────────────────────────────

#[test]
fn pasting_file_path_selects_file() {
    let file = temp_file(".txt");
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.session.ai_text = "typed".into();
    app.update(Action::DrillIn);

    app.update(Action::Paste(file.path().display().to_string()));

    let name = file.path().file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(app.session.file_badge(), Some(name.as_str()));
    assert!(!app.session.ai_text_enabled());
    // The path is not inserted as text.
    assert_eq!(app.session.ai_text, "typed");
    assert_eq!(app.input_mode, InputMode::Normal);
}

#[test]
fn pasting_unsupported_file_raises_notice() {
    let file = temp_file(".pdf");
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.update(Action::Paste(file.path().display().to_string()));

    assert_eq!(
        app.session.notice().unwrap().message,
        "Only .txt and .docx files are supported."
    );
    assert!(app.session.file_badge().is_none());
}

#[test]
fn pasting_several_files_stages_only_the_first() {
    let first = temp_file(".docx");
    let second = temp_file(".pdf");
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.update(Action::Paste(format!(
        "{}\n{}",
        first.path().display(),
        second.path().display()
    )));

    let name = first.path().file_name().unwrap().to_string_lossy().to_string();
    assert_eq!(app.session.file_badge(), Some(name.as_str()));
    // The unsupported second file is never validated.
    assert!(app.session.notice().is_none());
    assert!(!app.drop_zone.is_active());
}

#[test]
fn rejected_drop_is_not_inserted_as_text() {
    let file = temp_file(".pdf");
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.update(Action::DrillIn);
    app.update(Action::Paste(file.path().display().to_string()));

    assert!(app.session.notice().is_some());
    assert!(app.session.ai_text.is_empty());
    assert!(!app.drop_zone.is_active());
}

#[test]
fn pasting_plain_text_inserts_it() {
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.update(Action::DrillIn);
    app.update(Action::Paste("not a path at all".into()));
    assert_eq!(app.session.ai_text, "not a path at all");
}

#[test]
fn pasting_path_in_plagiarism_mode_is_text() {
    let file = temp_file(".txt");
    let mut app = test_app();
    app.update(Action::DrillIn);
    let path = file.path().display().to_string();
    app.update(Action::Paste(path.clone()));
    assert_eq!(app.session.text_a, path);
    assert!(app.session.file_badge().is_none());
}

#[test]
fn remove_file_reenables_text() {
    let file = temp_file(".docx");
    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.update(Action::Paste(file.path().display().to_string()));
    assert!(app.session.file_badge().is_some());

    // Text field is locked while a file is staged.
    app.update(Action::DrillIn);
    assert_eq!(app.input_mode, InputMode::Normal);

    app.update(Action::RemoveFile);
    assert!(app.session.file_badge().is_none());
    assert!(app.session.ai_text_enabled());
    app.update(Action::DrillIn);
    assert_eq!(app.input_mode, InputMode::TextInput);
}

#[test]
fn file_request_uses_upload_endpoint() {
    let file = temp_file(".txt");
    let (mut app, mut rx) = wired_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.session.ai_text = "ignored".into();
    app.update(Action::Paste(file.path().display().to_string()));
    app.update(Action::Trigger(Trigger::DetectAi));

    let BackendCommand::Analyze { request } = rx.try_recv().unwrap();
    assert_eq!(request.endpoint, Endpoint::DetectAiFile);
}

#[test]
fn file_picker_only_opens_in_ai_mode() {
    let mut app = test_app();
    app.update(Action::OpenFilePicker);
    assert_eq!(app.screen, Screen::Analyze);

    app.update(Action::SetMode(Mode::AiDetection));
    app.update(Action::OpenFilePicker);
    assert_eq!(app.screen, Screen::FilePicker);
}

// ── File picker ─────────────────────────────────────────────────

#[test]
fn picker_lists_dirs_first_and_marks_supported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    std::fs::write(dir.path().join("b.txt"), "b").unwrap();
    std::fs::write(dir.path().join("a.pdf"), "a").unwrap();
    std::fs::write(dir.path().join(".hidden.txt"), "h").unwrap();

    let picker = FilePickerState::at(dir.path().to_path_buf());
    let names: Vec<&str> = picker.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["..", "sub", "a.pdf", "b.txt"]);
    assert!(!picker.entries[2].is_supported);
    assert!(picker.entries[3].is_supported);
}

#[test]
fn picker_selects_supported_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("essay.txt"), "text").unwrap();

    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.screen = Screen::FilePicker;
    app.file_picker = FilePickerState::at(dir.path().to_path_buf());

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);

    assert_eq!(app.screen, Screen::Analyze);
    assert_eq!(app.focus, Focus::AiText);
    assert_eq!(app.session.file_badge(), Some("essay.txt"));
}

#[test]
fn picker_rejects_unsupported_file_and_stays_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("paper.pdf"), "pdf").unwrap();

    let mut app = test_app();
    app.update(Action::SetMode(Mode::AiDetection));
    app.screen = Screen::FilePicker;
    app.file_picker = FilePickerState::at(dir.path().to_path_buf());

    app.update(Action::MoveDown);
    app.update(Action::DrillIn);

    assert_eq!(app.screen, Screen::FilePicker);
    assert!(app.session.notice().is_some());
    assert!(app.session.file_badge().is_none());
}

#[test]
fn picker_enters_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("inner")).unwrap();

    let mut app = test_app();
    app.screen = Screen::FilePicker;
    app.file_picker = FilePickerState::at(dir.path().to_path_buf());
    app.update(Action::MoveDown);
    app.update(Action::DrillIn);

    assert_eq!(app.file_picker.current_dir, dir.path().join("inner"));
    assert_eq!(app.screen, Screen::FilePicker);

    app.update(Action::NavigateBack);
    assert_eq!(app.screen, Screen::Analyze);
}

// ── Quit and help ───────────────────────────────────────────────

#[test]
fn quit_requires_confirmation() {
    let mut app = test_app();
    assert!(!app.update(Action::Quit));
    assert!(app.confirm_quit);

    app.update(Action::NavigateBack);
    assert!(!app.confirm_quit);
    assert!(!app.should_quit);

    app.update(Action::Quit);
    assert!(app.update(Action::Quit));
    assert!(app.should_quit);
}

#[test]
fn help_overlay_swallows_keys() {
    let mut app = test_app();
    app.update(Action::ToggleHelp);
    assert!(app.show_help);
    app.update(Action::ToggleMode);
    assert_eq!(app.session.mode(), Mode::Plagiarism);
    app.update(Action::NavigateBack);
    assert!(!app.show_help);
}

#[test]
fn tick_advances_while_modal() {
    let mut app = test_app();
    app.update(Action::Quit);
    app.update(Action::Tick);
    app.update(Action::Tick);
    assert_eq!(app.tick, 2);
}
