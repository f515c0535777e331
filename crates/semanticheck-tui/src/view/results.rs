use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use semanticheck_core::markdown::{LineKind, RichLine, RichText, SpanStyle};
use semanticheck_core::{Detail, ViewState};

use crate::app::App;
use crate::model::field::Focus;
use crate::theme::Theme;
use crate::view::spinner_char;

/// Render the results region: spinner while busy, the latest view, or a hint.
pub fn render_in(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let border = if app.focus == Focus::Results {
        theme.focus_border_style(false)
    } else {
        theme.border_style()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Results ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    if app.session.is_busy() {
        let line = Line::from(Span::styled(
            format!(" {} Analyzing...", spinner_char(app.tick)),
            Style::default()
                .fg(theme.spinner)
                .add_modifier(Modifier::BOLD),
        ));
        f.render_widget(Paragraph::new(line), inner);
        return;
    }

    let Some(view) = app.session.view() else {
        let hint = Line::from(Span::styled(
            " No results yet.",
            Style::default().fg(theme.dim),
        ));
        f.render_widget(Paragraph::new(hint), inner);
        return;
    };

    let has_footnote = view.footnote.is_some();
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(if has_footnote { 1 } else { 0 }),
    ])
    .split(inner);

    f.render_widget(Paragraph::new(summary_lines(&view, theme)), chunks[0]);

    if let Some(detail) = &view.detail {
        let title = match detail {
            Detail::Analysis(_) => " Detailed Analysis ",
            Detail::Reasoning(_) => "",
        };
        let lines = rich_text_lines(&detail.rich_text(), theme);
        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(theme.border_style())
                    .title(title),
            )
            .wrap(Wrap { trim: false })
            .scroll((app.detail_scroll, 0));
        f.render_widget(paragraph, chunks[1]);
    }

    if let Some(note) = &view.footnote {
        let line = Line::from(Span::styled(
            format!(" {note}"),
            Style::default()
                .fg(theme.dim)
                .add_modifier(Modifier::ITALIC),
        ));
        f.render_widget(Paragraph::new(line), chunks[2]);
    }
}

/// Headline and label rows for one panel.
pub fn summary_lines(view: &ViewState, theme: &Theme) -> Vec<Line<'static>> {
    vec![
        Line::from(vec![
            Span::styled(
                format!(" {}: ", view.headline_caption()),
                Style::default().fg(theme.dim),
            ),
            Span::styled(
                view.headline.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!(" {}: ", view.label_caption()),
                Style::default().fg(theme.dim),
            ),
            Span::styled(
                view.label.clone(),
                Style::default()
                    .fg(theme.tone_color(view.tone))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ]
}

/// Convert display-neutral rich text into styled ratatui lines.
pub fn rich_text_lines(text: &RichText, theme: &Theme) -> Vec<Line<'static>> {
    text.lines.iter().map(|l| rich_line(l, theme)).collect()
}

fn rich_line(line: &RichLine, theme: &Theme) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let base = match line.kind {
        LineKind::Heading(_) => Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
        LineKind::Code => Style::default().fg(theme.dim),
        _ => Style::default().fg(theme.text),
    };

    match line.kind {
        LineKind::Heading(level) => {
            spans.push(Span::styled(format!("{} ", "#".repeat(level as usize)), base));
        }
        LineKind::Bullet { depth, ordinal } => {
            let indent = "  ".repeat(depth);
            let marker = match ordinal {
                Some(n) => format!("{indent}{n}. "),
                None => format!("{indent}\u{2022} "),
            };
            spans.push(Span::styled(marker, Style::default().fg(theme.active)));
        }
        LineKind::Code => spans.push(Span::styled("    ", base)),
        LineKind::Rule => {
            return Line::from(Span::styled(
                "\u{2500}".repeat(40),
                Style::default().fg(theme.border),
            ));
        }
        LineKind::Paragraph | LineKind::Blank => {}
    }

    for span in &line.spans {
        spans.push(Span::styled(span.text.clone(), span_style(base, span.style, theme)));
    }
    Line::from(spans)
}

fn span_style(base: Style, style: SpanStyle, theme: &Theme) -> Style {
    let mut out = base;
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.code {
        out = out.fg(theme.active);
    }
    out
}
