//! Markdown to display-neutral rich text.
//!
//! The detailed analysis arrives as markdown. Frontends render the resulting
//! [`RichText`] with their own styling (ratatui spans, ANSI colors).

use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichSpan {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(u8),
    Paragraph,
    /// List item; `ordinal` is set for ordered lists.
    Bullet { depth: usize, ordinal: Option<u64> },
    Code,
    Rule,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichLine {
    pub kind: LineKind,
    pub spans: Vec<RichSpan>,
}

impl RichLine {
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    pub lines: Vec<RichLine>,
}

impl RichText {
    /// Parse markdown source. Inline HTML is kept as literal text.
    pub fn from_markdown(source: &str) -> Self {
        let mut b = Builder::default();
        for event in Parser::new(source) {
            b.event(event);
        }
        b.finish()
    }

    /// A single unstyled paragraph line.
    pub fn plain(text: &str) -> Self {
        Self {
            lines: vec![RichLine {
                kind: LineKind::Paragraph,
                spans: vec![RichSpan {
                    text: text.to_string(),
                    style: SpanStyle::default(),
                }],
            }],
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Default)]
struct Builder {
    lines: Vec<RichLine>,
    current: Option<RichLine>,
    bold: usize,
    italic: usize,
    /// Next ordinal per open list (`None` for bullet lists).
    lists: Vec<Option<u64>>,
    in_code_block: bool,
    /// Set right after an item opens so its first paragraph stays on the bullet line.
    item_open: bool,
}

impl Builder {
    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    for line in text.lines() {
                        self.lines.push(RichLine {
                            kind: LineKind::Code,
                            spans: vec![RichSpan {
                                text: line.to_string(),
                                style: SpanStyle {
                                    code: true,
                                    ..SpanStyle::default()
                                },
                            }],
                        });
                    }
                } else {
                    self.push_text(&text, false);
                }
            }
            Event::Code(text) => self.push_text(&text, true),
            Event::Html(text) | Event::InlineHtml(text) => self.push_text(&text, false),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => {
                self.flush();
                self.open(LineKind::Paragraph);
            }
            Event::Rule => {
                self.flush();
                self.lines.push(RichLine {
                    kind: LineKind::Rule,
                    spans: Vec::new(),
                });
                self.blank();
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.item_open {
                    self.item_open = false;
                } else {
                    self.open(LineKind::Paragraph);
                }
            }
            Tag::Heading { level, .. } => self.open(LineKind::Heading(heading_depth(level))),
            Tag::List(start) => {
                self.flush();
                self.item_open = false;
                self.lists.push(start);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                let ordinal = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let current = *n;
                        *n += 1;
                        Some(current)
                    }
                    _ => None,
                };
                self.open(LineKind::Bullet { depth, ordinal });
                self.item_open = true;
            }
            Tag::Strong => self.bold += 1,
            Tag::Emphasis => self.italic += 1,
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = true;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                let in_list = !self.lists.is_empty();
                self.flush();
                if !in_list {
                    self.blank();
                }
            }
            TagEnd::Heading(_) => {
                self.flush();
                self.blank();
            }
            TagEnd::Item => {
                self.flush();
                self.item_open = false;
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            TagEnd::Strong => self.bold = self.bold.saturating_sub(1),
            TagEnd::Emphasis => self.italic = self.italic.saturating_sub(1),
            TagEnd::CodeBlock => {
                self.in_code_block = false;
                self.blank();
            }
            _ => {}
        }
    }

    fn open(&mut self, kind: LineKind) {
        self.flush();
        self.current = Some(RichLine {
            kind,
            spans: Vec::new(),
        });
    }

    fn flush(&mut self) {
        if let Some(line) = self.current.take()
            && !line.spans.is_empty()
        {
            self.lines.push(line);
        }
    }

    fn blank(&mut self) {
        if self
            .lines
            .last()
            .is_some_and(|l| l.kind != LineKind::Blank)
        {
            self.lines.push(RichLine {
                kind: LineKind::Blank,
                spans: Vec::new(),
            });
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        let style = SpanStyle {
            bold: self.bold > 0,
            italic: self.italic > 0,
            code,
        };
        let line = self.current.get_or_insert_with(|| RichLine {
            kind: LineKind::Paragraph,
            spans: Vec::new(),
        });
        // Merge runs of identical style so frontends get fewer spans.
        if let Some(last) = line.spans.last_mut()
            && last.style == style
        {
            last.text.push_str(text);
            return;
        }
        line.spans.push(RichSpan {
            text: text.to_string(),
            style,
        });
    }

    fn finish(mut self) -> RichText {
        self.flush();
        while self.lines.last().is_some_and(|l| l.kind == LineKind::Blank) {
            self.lines.pop();
        }
        RichText { lines: self.lines }
    }
}

fn heading_depth(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
