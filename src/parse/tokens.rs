//! Token types for jianpu source text
//!
//! The token set is closed. Most symbols map to a token type on their own;
//! the few whose meaning depends on their neighbours (`'`, `,`, `b`) are
//! decided by the small window predicates at the bottom of this module.

use serde::{Deserialize, Serialize};

use crate::diagnostics::SourcePosition;

/// Token types for jianpu notation
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    /// `标题`, `title`, ... in the header
    MetadataKey,
    MetadataValue,
    /// 1-7
    Note,
    /// 0
    Rest,
    /// -
    Tie,
    /// |
    Barline,
    /// ' after a note or underline
    OctaveUp,
    /// , after a note or underline
    OctaveDown,
    /// / duration-underline
    Underline,
    /// . articulation dot
    Dot,
    Sharp,
    /// b directly before 1-7
    Flat,
    SlurStart,
    SlurEnd,
    /// v or V
    Breath,
    /// ^
    GracePrefix,
    /// ~
    Trill,
    /// Q at the start of a melody line
    MelodyMarker,
    /// C at the start of a lyric line
    LyricsMarker,
    LyricsText,
    Newline,
    Eof,
    Error,
}

impl TokenType {
    /// Tokens whose meaning never depends on context
    pub fn from_symbol(ch: char) -> Option<Self> {
        let token_type = match ch {
            '1'..='7' => TokenType::Note,
            '0' => TokenType::Rest,
            '-' => TokenType::Tie,
            '|' => TokenType::Barline,
            '(' => TokenType::SlurStart,
            ')' => TokenType::SlurEnd,
            '/' => TokenType::Underline,
            '.' => TokenType::Dot,
            '#' => TokenType::Sharp,
            'v' | 'V' => TokenType::Breath,
            '~' => TokenType::Trill,
            '^' => TokenType::GracePrefix,
            _ => return None,
        };
        Some(token_type)
    }

    pub fn is_octave_marker(self) -> bool {
        matches!(self, TokenType::OctaveUp | TokenType::OctaveDown)
    }

    pub fn is_accidental(self) -> bool {
        matches!(self, TokenType::Sharp | TokenType::Flat)
    }

    pub fn is_lyrics(self) -> bool {
        matches!(self, TokenType::LyricsMarker | TokenType::LyricsText)
    }

    /// Tokens that never take part in note parsing
    pub fn is_side_channel(self) -> bool {
        matches!(
            self,
            TokenType::MetadataKey
                | TokenType::MetadataValue
                | TokenType::Newline
                | TokenType::Eof
                | TokenType::MelodyMarker
                | TokenType::LyricsMarker
                | TokenType::LyricsText
        )
    }
}

/// Token with position metadata
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub value: String,
    /// 1-based
    pub line: usize,
    /// 1-based
    pub column: usize,
    /// Char offset into the whole source
    pub offset: usize,
    /// Whitespace came directly before this token on its line
    pub has_space_before: bool,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        value: impl Into<String>,
        line: usize,
        column: usize,
        offset: usize,
    ) -> Self {
        Self {
            token_type,
            value: value.into(),
            line,
            column,
            offset,
            has_space_before: false,
        }
    }

    pub fn with_space_before(mut self, has_space_before: bool) -> Self {
        self.has_space_before = has_space_before;
        self
    }

    /// Length of the token text in chars
    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Offset just past the token
    pub fn end(&self) -> usize {
        self.offset + self.len()
    }

    pub fn position(&self) -> SourcePosition {
        SourcePosition::new(self.line, self.column, self.offset)
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

/// Degree digits 1-7
pub fn is_note_digit(ch: char) -> bool {
    matches!(ch, '1'..='7')
}

/// Whether the octave marker at `index` belongs to a note
///
/// Scans back over a run of the same marker; the nearest other character
/// must be a note digit or a duration-underline. Anywhere else the marker
/// is plain text (an apostrophe in lyrics, a comma in prose).
pub fn is_octave_marker_at(line: &[char], index: usize) -> bool {
    let Some(&marker) = line.get(index) else {
        return false;
    };
    line[..index]
        .iter()
        .rev()
        .find(|&&ch| ch != marker)
        .is_some_and(|&ch| is_note_digit(ch) || ch == '/')
}

/// Whether the `b` at `index` is a flat sign (directly followed by 1-7)
pub fn is_flat_at(line: &[char], index: usize) -> bool {
    line.get(index + 1).is_some_and(|&ch| is_note_digit(ch))
}
