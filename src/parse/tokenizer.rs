//! Tokenizer: jianpu source text to a flat token stream
//!
//! Works line by line. A metadata header (`key: value` lines drawn from a
//! fixed bilingual key set) is split off first; every following line is
//! notation, a `Q` melody line or a `C` lyric line. The tokenizer never
//! fails: characters it cannot place become `Error` tokens.

use once_cell::sync::Lazy;
use regex::Regex;

use super::tokens::{is_flat_at, is_octave_marker_at, Token, TokenType};

/// Accepted metadata identifiers (Latin ones match case-insensitively)
pub const METADATA_KEYS: [&str; 8] = ["标题", "调号", "拍号", "速度", "title", "key", "time", "tempo"];

static METADATA_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([\x{4e00}-\x{9fa5}a-zA-Z]+)\s*[:：]\s*(.+)$")
        .expect("metadata line pattern is valid")
});

pub fn is_metadata_key(identifier: &str) -> bool {
    let lowered = identifier.to_lowercase();
    METADATA_KEYS.contains(&lowered.as_str())
}

/// Tokenize a whole source document
pub fn tokenize(source: &str) -> Vec<Token> {
    let lines: Vec<&str> = source.split('\n').collect();
    let mut scanner = Scanner::default();

    // Char offset of the first char of every line
    let mut line_starts = Vec::with_capacity(lines.len());
    let mut offset = 0;
    for line in &lines {
        line_starts.push(offset);
        offset += line.chars().count() + 1;
    }

    let body_start = scanner.scan_header(&lines, &line_starts);
    for (index, line) in lines.iter().enumerate().skip(body_start) {
        scanner.scan_body_line(line, index + 1, line_starts[index]);
    }

    let eof_line = lines.len() + 1;
    scanner
        .tokens
        .push(Token::new(TokenType::Eof, "", eof_line, 1, source.chars().count()));

    log::debug!(
        "tokenized {} lines into {} tokens (body starts at line {})",
        lines.len(),
        scanner.tokens.len(),
        body_start + 1
    );
    scanner.tokens
}

#[derive(Default)]
struct Scanner {
    tokens: Vec<Token>,
    /// Whitespace seen since the last notation token on this line
    space_pending: bool,
}

impl Scanner {
    /// Emit header tokens; returns the index of the first body line
    fn scan_header(&mut self, lines: &[&str], line_starts: &[usize]) -> usize {
        let mut body_start = 0;
        let mut saw_metadata = false;

        for (index, raw) in lines.iter().enumerate() {
            let text = raw.trim();
            if text.is_empty() {
                if saw_metadata {
                    body_start = index + 1;
                    break;
                }
                continue;
            }

            let Some(caps) = METADATA_LINE.captures(text) else {
                break;
            };
            let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
                break;
            };
            if !is_metadata_key(key.as_str()) {
                break;
            }

            let line = index + 1;
            let indent = raw.chars().take_while(|c| c.is_whitespace()).count();
            let key_start = line_starts[index] + indent;
            let value_column = indent + text[..value.start()].chars().count();

            self.tokens.push(Token::new(
                TokenType::MetadataKey,
                key.as_str(),
                line,
                indent + 1,
                key_start,
            ));
            self.tokens.push(Token::new(
                TokenType::MetadataValue,
                value.as_str().trim(),
                line,
                value_column + 1,
                line_starts[index] + value_column,
            ));

            saw_metadata = true;
            body_start = index + 1;
        }

        body_start
    }

    fn scan_body_line(&mut self, raw: &str, line: usize, line_start: usize) {
        let chars: Vec<char> = raw.chars().collect();
        self.space_pending = false;

        let mut content_start = 0;
        if is_marker_line(&chars, 'Q') {
            let marker = leading_whitespace(&chars, 0);
            self.tokens.push(Token::new(
                TokenType::MelodyMarker,
                "Q",
                line,
                marker + 1,
                line_start + marker,
            ));
            content_start = leading_whitespace(&chars, marker + 1);
        }

        let content = &chars[content_start..];
        if content.iter().all(|c| c.is_whitespace()) {
            self.push_newline(&chars, line, line_start);
            return;
        }

        if is_marker_line(content, 'C') {
            let marker = leading_whitespace(&chars, content_start);
            self.tokens.push(Token::new(
                TokenType::LyricsMarker,
                "C",
                line,
                marker + 1,
                line_start + marker,
            ));

            let text_start = leading_whitespace(&chars, marker + 1);
            let text: String = chars[text_start..].iter().collect();
            let text = text.trim_end();
            if !text.is_empty() {
                self.tokens.push(Token::new(
                    TokenType::LyricsText,
                    text,
                    line,
                    text_start + 1,
                    line_start + text_start,
                ));
            }
            self.push_newline(&chars, line, line_start);
            return;
        }

        for (index, &ch) in content.iter().enumerate() {
            let column_index = content_start + index;
            let token_type = match ch {
                ' ' | '\t' | '\r' => {
                    self.space_pending = true;
                    continue;
                }
                '\'' if is_octave_marker_at(content, index) => TokenType::OctaveUp,
                ',' if is_octave_marker_at(content, index) => TokenType::OctaveDown,
                'b' if is_flat_at(content, index) => TokenType::Flat,
                // Stray octave marks and a lone `b` are ordinary text
                '\'' | ',' | 'b' => continue,
                other => TokenType::from_symbol(other).unwrap_or(TokenType::Error),
            };

            let token = Token::new(
                token_type,
                ch,
                line,
                column_index + 1,
                line_start + column_index,
            )
            .with_space_before(std::mem::take(&mut self.space_pending));
            self.tokens.push(token);
        }

        self.push_newline(&chars, line, line_start);
    }

    fn push_newline(&mut self, chars: &[char], line: usize, line_start: usize) {
        self.tokens.push(Token::new(
            TokenType::Newline,
            "\n",
            line,
            chars.len() + 1,
            line_start + chars.len(),
        ));
    }
}

/// `Q 1 2 3`, `C 一 闪`, or the marker letter alone
fn is_marker_line(chars: &[char], marker: char) -> bool {
    let start = leading_whitespace(chars, 0);
    match chars[start..].split_first() {
        Some((first, tail)) if *first == marker => {
            tail.first() == Some(&' ') || tail.iter().all(|c| c.is_whitespace())
        }
        _ => false,
    }
}

/// Index of the first non-whitespace char at or after `from`
fn leading_whitespace(chars: &[char], from: usize) -> usize {
    let from = from.min(chars.len());
    from + chars[from..].iter().take_while(|c| c.is_whitespace()).count()
}
