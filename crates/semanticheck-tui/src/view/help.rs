use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(64, 34, f.area());

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            Style::default()
                .fg(theme.header_fg)
                .bg(theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section_header("Modes", theme),
        key_line("m / F2", "Switch mode", theme),
        key_line("1 / 2", "Plagiarism Check / AI Detection", theme),
        Line::from(""),
        section_header("Analysis", theme),
        key_line("c", "Quick Check", theme),
        key_line("d", "Detailed Analysis", theme),
        key_line("a", "Detect AI", theme),
        Line::from(""),
        section_header("Editing", theme),
        key_line("Tab / Shift+Tab", "Next / previous field", theme),
        key_line("Enter", "Edit focused field", theme),
        key_line("Esc / Enter", "Stop editing", theme),
        key_line("Alt+Enter", "Insert newline", theme),
        Line::from(""),
        section_header("Files (AI Detection)", theme),
        key_line("o", "Browse for a .txt or .docx file", theme),
        key_line("drop / paste", "Drop a file path onto the text field", theme),
        key_line("x", "Remove selected file", theme),
        Line::from(""),
        section_header("Results", theme),
        key_line("j / k", "Scroll detail", theme),
        key_line("Ctrl+d / Ctrl+u", "Page down / up", theme),
        key_line("g / G", "Top / bottom", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {key:<18}"), Style::default().fg(theme.text)),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
