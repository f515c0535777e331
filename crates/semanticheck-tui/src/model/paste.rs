//! Recognise terminal file drops.
//!
//! Dragging a file onto a terminal pastes its path. Depending on the terminal
//! the path may be quoted, backslash-escaped, or a `file://` URL, and several
//! files arrive separated by spaces or newlines.

use std::path::PathBuf;

/// Paths named by a paste, if every token is an existing regular file.
/// Returns an empty vec for ordinary text.
pub fn dropped_paths(text: &str) -> Vec<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }

    let tokens = tokenize(text);
    if !tokens.is_empty() && tokens.iter().all(|p| p.is_file()) {
        return tokens;
    }

    // A single unquoted path containing spaces.
    let whole = to_path(text);
    if whole.is_file() {
        return vec![whole];
    }
    Vec::new()
}

/// Shell-like split: whitespace separates, quotes group, `\` escapes.
fn tokenize(text: &str) -> Vec<PathBuf> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => quote = Some(c),
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(to_path(&current));
                    current.clear();
                }
            }
            (None, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(to_path(&current));
    }
    tokens
}

/// Local `file://` URLs (no host or `localhost`) become paths; anything
/// else is taken literally.
fn to_path(token: &str) -> PathBuf {
    if token.starts_with("file:")
        && let Some(path) = url::Url::parse(token)
            .ok()
            .and_then(|u| u.to_file_path().ok())
    {
        return path;
    }
    PathBuf::from(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &std::path::Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, "x").unwrap();
        path
    }

    #[test]
    fn plain_text_is_not_a_drop() {
        assert!(dropped_paths("The quick brown fox").is_empty());
        assert!(dropped_paths("   ").is_empty());
    }

    #[test]
    fn bare_and_quoted_paths() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "essay.txt");
        let b = touch(dir.path(), "my notes.docx");

        assert_eq!(dropped_paths(&a.display().to_string()), vec![a.clone()]);
        assert_eq!(dropped_paths(&format!("'{}'", b.display())), vec![b.clone()]);
        assert_eq!(dropped_paths(&b.display().to_string()), vec![b.clone()]);
        assert_eq!(
            dropped_paths(&format!("{} '{}'\n", a.display(), b.display())),
            vec![a, b]
        );
    }

    #[test]
    fn escaped_and_url_forms() {
        let dir = tempfile::tempdir().unwrap();
        let b = touch(dir.path(), "my notes.txt");
        let escaped = b.display().to_string().replace(' ', "\\ ");
        assert_eq!(dropped_paths(&escaped), vec![b.clone()]);

        let url = format!("file://{}", b.display().to_string().replace(' ', "%20"));
        assert_eq!(dropped_paths(&url), vec![b]);
    }

    #[test]
    fn file_url_with_localhost_host() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "essay.txt");
        let url = format!("file://localhost{}", a.display());
        assert_eq!(dropped_paths(&url), vec![a]);
    }

    #[test]
    fn file_url_with_multibyte_escape() {
        let dir = tempfile::tempdir().unwrap();
        let a = touch(dir.path(), "r\u{e9}sum\u{e9}.txt");
        let encoded = a.display().to_string().replace('\u{e9}', "%C3%A9");
        assert_eq!(dropped_paths(&format!("file://{encoded}")), vec![a]);
    }

    #[test]
    fn malformed_file_url_is_text() {
        assert!(dropped_paths("file://remote-host/tmp/x.txt").is_empty());
    }

    #[test]
    fn directories_and_missing_files_are_text() {
        let dir = tempfile::tempdir().unwrap();
        assert!(dropped_paths(&dir.path().display().to_string()).is_empty());
        assert!(dropped_paths("/definitely/not/here.txt").is_empty());
    }
}
