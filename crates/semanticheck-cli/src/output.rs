use std::io::Write;

use owo_colors::OwoColorize;
use semanticheck_core::markdown::{LineKind, RichLine, RichText};
use semanticheck_core::{Detail, Notice, Tone, ViewState};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print a rendered result: headline, label, optional detail and footnote.
pub fn print_view(w: &mut dyn Write, view: &ViewState, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}: {}", view.headline_caption(), view.headline.bold())?;
    } else {
        writeln!(w, "{}: {}", view.headline_caption(), view.headline)?;
    }

    let label = colorize_label(&view.label, view.tone, color);
    writeln!(w, "{}: {}", view.label_caption(), label)?;

    if let Some(detail) = &view.detail {
        writeln!(w)?;
        // Reasoning carries its own "Reasoning:" prefix.
        if let Detail::Analysis(_) = detail {
            let title = "Detailed Analysis";
            if color.enabled() {
                writeln!(w, "{}", title.bold().underline())?;
            } else {
                writeln!(w, "{title}")?;
            }
        }
        print_rich_text(w, &detail.rich_text(), color)?;
    }

    if let Some(note) = &view.footnote {
        writeln!(w)?;
        if color.enabled() {
            writeln!(w, "{}", note.dimmed().italic())?;
        } else {
            writeln!(w, "{note}")?;
        }
    }
    Ok(())
}

fn colorize_label(label: &str, tone: Option<Tone>, color: ColorMode) -> String {
    if !color.enabled() {
        return label.to_string();
    }
    match tone {
        Some(Tone::Low) => label.green().bold().to_string(),
        Some(Tone::Medium) => label.yellow().bold().to_string(),
        Some(Tone::High) => label.red().bold().to_string(),
        None => label.bold().to_string(),
    }
}

/// Print formatted detail text line by line.
pub fn print_rich_text(w: &mut dyn Write, text: &RichText, color: ColorMode) -> std::io::Result<()> {
    for line in &text.lines {
        print_rich_line(w, line, color)?;
    }
    Ok(())
}

fn print_rich_line(w: &mut dyn Write, line: &RichLine, color: ColorMode) -> std::io::Result<()> {
    let mut out = String::new();
    match line.kind {
        LineKind::Heading(level) => {
            let text = format!("{} {}", "#".repeat(level as usize), line.text());
            if color.enabled() {
                return writeln!(w, "{}", text.cyan().bold());
            }
            return writeln!(w, "{text}");
        }
        LineKind::Rule => return writeln!(w, "{}", "-".repeat(40)),
        LineKind::Blank => return writeln!(w),
        LineKind::Bullet { depth, ordinal } => {
            out.push_str(&"  ".repeat(depth));
            match ordinal {
                Some(n) => out.push_str(&format!("{n}. ")),
                None => out.push_str("- "),
            }
        }
        LineKind::Code => out.push_str("    "),
        LineKind::Paragraph => {}
    }

    for span in &line.spans {
        if !color.enabled() {
            out.push_str(&span.text);
            continue;
        }
        let styled = match (span.style.bold, span.style.italic, span.style.code) {
            (_, _, true) => span.text.cyan().to_string(),
            (true, true, _) => span.text.bold().italic().to_string(),
            (true, false, _) => span.text.bold().to_string(),
            (false, true, _) => span.text.italic().to_string(),
            (false, false, _) => span.text.clone(),
        };
        out.push_str(&styled);
    }
    writeln!(w, "{out}")
}

/// Print a user-facing notice.
pub fn print_notice(w: &mut dyn Write, notice: &Notice, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{} {}", "error:".red().bold(), notice.message)
    } else {
        writeln!(w, "error: {}", notice.message)
    }
}
