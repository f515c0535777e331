use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use semanticheck_core::Notice;

use crate::theme::Theme;
use crate::view::centered_rect;

/// Render a blocking notice. It stays up until acknowledged with Enter or Esc.
pub fn render(f: &mut Frame, notice: &Notice, theme: &Theme) {
    let area = f.area();
    let width = 56.min(area.width.saturating_sub(2)).max(20);
    let height = popup_height(&notice.message, width, area.height);
    let popup = centered_rect(width, height, area);

    let mut lines = vec![Line::from("")];
    for l in notice.message.lines() {
        lines.push(Line::from(Span::styled(
            format!(" {l}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            " Enter/Esc",
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": OK", Style::default().fg(theme.dim)),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.error))
                .title(" Notice "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

/// Rough wrapped height of the message plus spacing and the hint row,
/// capped at `max`.
fn popup_height(message: &str, width: u16, max: u16) -> u16 {
    let inner_width = width.saturating_sub(4).max(1) as usize;
    let message_rows = message
        .lines()
        .map(|l| l.chars().count().div_ceil(inner_width).max(1))
        .sum::<usize>()
        .max(1);
    u16::try_from(message_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(5)
        .min(max)
}
