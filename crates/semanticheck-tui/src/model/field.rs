/// Which input field has focus on the Analyze screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    TextA,
    TextB,
    AiText,
    Results,
}

impl Focus {
    /// Focus ring for the plagiarism inputs.
    pub fn plagiarism() -> &'static [Focus] {
        &[Focus::TextA, Focus::TextB, Focus::Results]
    }

    /// Focus ring for the AI-detection inputs.
    pub fn ai_detection() -> &'static [Focus] {
        &[Focus::AiText, Focus::Results]
    }

    pub fn is_text(self) -> bool {
        !matches!(self, Focus::Results)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TextA => "Original Text",
            Self::TextB => "Text to Compare",
            Self::AiText => "Text to Analyze",
            Self::Results => "Results",
        }
    }
}

/// Byte-offset cursor into a `String` being edited. Always on a char boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditCursor {
    pub pos: usize,
}

impl EditCursor {
    /// Place the cursor at the end of `buf`.
    pub fn at_end(buf: &str) -> Self {
        Self { pos: buf.len() }
    }

    pub fn insert(&mut self, buf: &mut String, ch: char) {
        self.clamp(buf);
        buf.insert(self.pos, ch);
        self.pos += ch.len_utf8();
    }

    pub fn insert_str(&mut self, buf: &mut String, s: &str) {
        self.clamp(buf);
        buf.insert_str(self.pos, s);
        self.pos += s.len();
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self, buf: &mut String) {
        self.clamp(buf);
        if self.pos > 0 {
            let prev = prev_boundary(buf, self.pos);
            buf.drain(prev..self.pos);
            self.pos = prev;
        }
    }

    /// Delete the char under the cursor.
    pub fn delete(&mut self, buf: &mut String) {
        self.clamp(buf);
        let next = next_boundary(buf, self.pos);
        buf.drain(self.pos..next);
    }

    pub fn left(&mut self, buf: &str) {
        self.clamp(buf);
        self.pos = prev_boundary(buf, self.pos);
    }

    pub fn right(&mut self, buf: &str) {
        self.clamp(buf);
        self.pos = next_boundary(buf, self.pos);
    }

    pub fn home(&mut self) {
        self.pos = 0;
    }

    pub fn end(&mut self, buf: &str) {
        self.pos = buf.len();
    }

    /// The buffer may have been replaced under us; never index past it.
    fn clamp(&mut self, buf: &str) {
        if self.pos > buf.len() {
            self.pos = buf.len();
        }
        while !buf.is_char_boundary(self.pos) {
            self.pos -= 1;
        }
    }
}

fn prev_boundary(buf: &str, pos: usize) -> usize {
    buf[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

fn next_boundary(buf: &str, pos: usize) -> usize {
    pos + buf[pos..].chars().next().map(|c| c.len_utf8()).unwrap_or(0)
}
