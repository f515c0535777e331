use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use semanticheck_core::{Mode, Trigger};

use crate::app::App;
use crate::model::field::Focus;
use crate::theme::Theme;
use crate::view::{results, spinner_char, truncate};

/// Render the main screen: mode tabs, inputs, triggers, results, footer.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let input_height = match app.session.mode() {
        Mode::Plagiarism => 10,
        Mode::AiDetection => 11,
    };
    let chunks = Layout::vertical([
        Constraint::Length(1),            // header + tabs
        Constraint::Length(input_height), // input region
        Constraint::Length(1),            // trigger buttons
        Constraint::Min(5),               // results
        Constraint::Length(1),            // footer
    ])
    .split(area);

    render_header(f, app, chunks[0]);
    match app.session.mode() {
        Mode::Plagiarism => render_plagiarism_inputs(f, app, chunks[1]),
        Mode::AiDetection => render_ai_inputs(f, app, chunks[1]),
    }
    render_controls(f, app, chunks[2]);
    results::render_in(f, app, chunks[3]);
    render_footer(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(" SemantiCheck ", theme.header_style()), Span::raw(" ")];
    for (key, mode) in [("1", Mode::Plagiarism), ("2", Mode::AiDetection)] {
        let style = if app.session.inputs_visible(mode) {
            theme.highlight_style().fg(theme.active)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!(" [{key}] {} ", mode.label()), style));
    }
    spans.push(Span::styled(
        format!("  {}", app.server_url),
        Style::default().fg(theme.dim),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_plagiarism_inputs(f: &mut Frame, app: &App, area: Rect) {
    let cols = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_text_field(f, app, Focus::TextA, true, cols[0]);
    render_text_field(f, app, Focus::TextB, true, cols[1]);
}

fn render_ai_inputs(f: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).split(area);
    render_text_field(f, app, Focus::AiText, app.session.ai_text_enabled(), rows[0]);
    render_drop_zone(f, app, rows[1]);
}

fn render_text_field(f: &mut Frame, app: &App, focus: Focus, enabled: bool, area: Rect) {
    let theme = &app.theme;
    let editing = app.is_editing(focus);
    let border = if app.focus == focus {
        theme.focus_border_style(editing)
    } else {
        theme.border_style()
    };
    let title = if editing {
        format!(" {} (editing) ", focus.label())
    } else {
        format!(" {} ", focus.label())
    };

    let text = app.field(focus).unwrap_or_default();
    let body: Vec<Line> = if !enabled {
        vec![Line::from(Span::styled(
            "A file is selected; text input is ignored.",
            Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
        ))]
    } else if text.is_empty() && !editing {
        vec![Line::from(Span::styled(
            "Press Enter to type or paste text...",
            Style::default().fg(theme.dim),
        ))]
    } else if editing {
        with_caret(text, app.cursor.pos, theme)
    } else {
        text.lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.text))))
            .collect()
    };

    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(title),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Text lines with a block caret drawn at byte offset `pos`.
fn with_caret(text: &str, pos: usize, theme: &Theme) -> Vec<Line<'static>> {
    let pos = pos.min(text.len());
    let (before, after) = text.split_at(if text.is_char_boundary(pos) { pos } else { text.len() });
    let caret = Style::default().fg(theme.header_fg).bg(theme.active);
    let plain = Style::default().fg(theme.text);

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut before_lines: Vec<&str> = before.split('\n').collect();
    let current = before_lines.pop().unwrap_or_default();
    for l in before_lines {
        lines.push(Line::from(Span::styled(l.to_string(), plain)));
    }

    let mut after_lines = after.split('\n');
    let rest = after_lines.next().unwrap_or_default();
    let mut rest_chars = rest.chars();
    let under = rest_chars.next();
    let mut spans = vec![Span::styled(current.to_string(), plain)];
    match under {
        Some(c) => {
            spans.push(Span::styled(c.to_string(), caret));
            spans.push(Span::styled(rest_chars.as_str().to_string(), plain));
        }
        None => spans.push(Span::styled(" ", caret)),
    }
    lines.push(Line::from(spans));
    for l in after_lines {
        lines.push(Line::from(Span::styled(l.to_string(), plain)));
    }
    lines
}

fn render_drop_zone(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let width = area.width.saturating_sub(4) as usize;
    let (line, border) = match app.session.file_badge() {
        Some(name) => (
            Line::from(vec![
                Span::styled(" \u{1F4C4} ", Style::default().fg(theme.active)),
                Span::styled(
                    truncate(name, width.saturating_sub(20)),
                    Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (x: remove)", Style::default().fg(theme.dim)),
            ]),
            Style::default().fg(theme.active),
        ),
        // A terminal only sees the finished drop (as a paste), never the drag.
        None => (
            Line::from(Span::styled(
                " Drop a .txt or .docx file here, or press o to browse",
                Style::default().fg(theme.dim),
            )),
            theme.border_style(),
        ),
    };
    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" File "),
    );
    f.render_widget(paragraph, area);
}

fn render_controls(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let controls = app.session.controls();
    let mut spans = vec![Span::raw(" ")];

    for (key, trigger) in [
        ("c", Trigger::QuickCheck),
        ("d", Trigger::DetailedCheck),
        ("a", Trigger::DetectAi),
    ] {
        let control = controls.get(trigger);
        if !control.visible {
            continue;
        }
        let style = if control.enabled {
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.dim)
        };
        spans.push(Span::styled(format!(" [{key}] {} ", trigger.label()), style));
        spans.push(Span::raw("  "));
    }

    if app.session.is_busy() {
        spans.push(Span::styled(
            format!("{} Analyzing...", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let text = if app.is_editing(app.focus) {
        " Esc/Enter:done  Alt+Enter:newline  Tab:next field  Ctrl+c:quit"
    } else {
        match app.session.mode() {
            Mode::Plagiarism => {
                " Tab:focus  Enter:edit  c:quick  d:detailed  m:mode  j/k:scroll  ?:help  q:quit"
            }
            Mode::AiDetection => {
                " Tab:focus  Enter:edit  a:detect  o:open file  x:remove file  m:mode  ?:help  q:quit"
            }
        }
    };
    let footer = Line::from(Span::styled(text, app.theme.footer_style()));
    f.render_widget(Paragraph::new(footer), area);
}
