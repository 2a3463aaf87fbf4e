//! Note/modifier parser
//!
//! Consumes the body token stream with a single cursor and builds measures.
//! A note is a `Note` token plus the modifier tokens around it:
//!
//! ```text
//! [~ | ~~ | ~.] [# | b] 1-7 [' | , | .]* [/]* [' | , | .]*
//! ```
//!
//! Prefix modifiers (accidentals, trills) are found by scanning backward
//! over the already-classified tokens; suffix modifiers are consumed forward.

use crate::diagnostics::{ParseError, ParseErrorKind};
use crate::models::{
    Accidental, BaseDuration, Duration, GraceType, Measure, Note, NoteElement, SourceRange,
    TrillType,
};

use super::tokens::{Token, TokenType};

/// Body tokens and lyric tokens of one document
#[derive(Clone, Debug, Default)]
pub struct TokenStreams {
    /// Notation tokens, in source order
    pub body: Vec<Token>,
    /// `LyricsMarker`/`LyricsText` tokens, in source order
    pub lyrics: Vec<Token>,
}

impl TokenStreams {
    pub fn split(tokens: &[Token]) -> Self {
        let mut streams = TokenStreams::default();
        for token in tokens {
            if token.token_type.is_lyrics() {
                streams.lyrics.push(token.clone());
            } else if !token.token_type.is_side_channel() {
                streams.body.push(token.clone());
            }
        }
        streams
    }
}

/// Measures and diagnostics from the note pass
#[derive(Clone, Debug)]
pub struct ParsedBody {
    pub measures: Vec<Measure>,
    pub errors: Vec<ParseError>,
    pub streams: TokenStreams,
}

/// Parse the body of a tokenized document into measures
pub fn parse_body(tokens: &[Token]) -> Result<ParsedBody, ParseErrorKind> {
    let streams = TokenStreams::split(tokens);
    let mut parser = BodyParser::new(&streams.body);
    parser.run()?;
    let BodyParser {
        measures, errors, ..
    } = parser;

    log::debug!(
        "parsed {} body tokens into {} measures ({} diagnostics)",
        streams.body.len(),
        measures.len(),
        errors.len()
    );
    Ok(ParsedBody {
        measures,
        errors,
        streams,
    })
}

struct BodyParser<'a> {
    tokens: &'a [Token],
    pos: usize,
    measures: Vec<Measure>,
    current: Vec<NoteElement>,
    measure_number: u32,
    measure_start: usize,
    errors: Vec<ParseError>,
}

impl<'a> BodyParser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            measures: Vec::new(),
            current: Vec::new(),
            measure_number: 1,
            measure_start: tokens.first().map(|t| t.offset).unwrap_or(0),
            errors: Vec::new(),
        }
    }

    fn run(&mut self) -> Result<(), ParseErrorKind> {
        let tokens = self.tokens;
        while let Some(token) = tokens.get(self.pos) {
            match token.token_type {
                TokenType::Barline => {
                    self.close_measure(token.offset);
                    self.measure_start = token.end();
                    self.pos += 1;
                }
                TokenType::GracePrefix => self.parse_grace()?,
                TokenType::Note => {
                    let (mut note, next) = parse_note(tokens, self.pos)?;
                    note.trill_type = trill_before(tokens, self.pos);
                    self.current.push(NoteElement::Note(note));
                    self.pos = next;
                }
                TokenType::Rest => {
                    let has_space_before = token.has_space_before;
                    let (base, next) = consume_underlines(tokens, self.pos + 1);
                    self.current.push(NoteElement::Rest {
                        duration: Duration::new(base, 0),
                        has_space_before,
                    });
                    self.pos = next;
                }
                TokenType::Tie => {
                    self.current.push(NoteElement::Tie {
                        duration: Duration::QUARTER,
                    });
                    self.pos += 1;
                }
                TokenType::Breath => {
                    self.current.push(NoteElement::Breath);
                    self.pos += 1;
                }
                TokenType::Error => {
                    let character = token.value.chars().next().unwrap_or('\u{FFFD}');
                    self.errors.push(ParseError::at_token(
                        ParseErrorKind::UnrecognizedCharacter { character },
                        token,
                    ));
                    self.pos += 1;
                }
                // Slurs are grouped in a later pass; stray modifiers are inert
                _ => self.pos += 1,
            }
        }

        if !self.current.is_empty() {
            let end = tokens
                .last()
                .map(Token::end)
                .unwrap_or(self.measure_start);
            self.close_measure(end);
        }
        Ok(())
    }

    /// Push the buffered notes as a measure; empty buffers produce nothing
    fn close_measure(&mut self, end: usize) {
        if self.current.is_empty() {
            return;
        }
        let notes = std::mem::take(&mut self.current);
        self.measures.push(Measure::new(
            self.measure_number,
            notes,
            SourceRange::new(self.measure_start, end),
        ));
        self.measure_number += 1;
    }

    /// `^` [octave/accidental]* note underline+
    fn parse_grace(&mut self) -> Result<(), ParseErrorKind> {
        let tokens = self.tokens;
        let prefix = &tokens[self.pos];
        let note_index = tokens[self.pos + 1..]
            .iter()
            .position(|t| !(t.token_type.is_octave_marker() || t.token_type.is_accidental()))
            .map(|skipped| self.pos + 1 + skipped)
            .filter(|&index| tokens[index].is(TokenType::Note));

        let Some(note_index) = note_index else {
            self.errors
                .push(ParseError::at_token(ParseErrorKind::GraceWithoutNote, prefix));
            self.pos += 1;
            return Ok(());
        };

        let underlines = count_underlines(tokens, note_index + 1);
        let (mut note, next) = parse_note(tokens, note_index)?;
        note.is_grace = true;
        note.grace_type = match GraceType::from_underlines(underlines) {
            Some(grace_type) => Some(grace_type),
            None => {
                self.errors.push(ParseError::at_token(
                    ParseErrorKind::GraceWithoutUnderline,
                    prefix,
                ));
                Some(GraceType::Long)
            }
        };

        self.current.push(NoteElement::Note(note));
        self.pos = next;
        Ok(())
    }
}

/// Parse the note at `index` with its modifiers; returns the note and the
/// index of the first token after it
pub fn parse_note(tokens: &[Token], index: usize) -> Result<(Note, usize), ParseErrorKind> {
    let token = tokens
        .get(index)
        .filter(|t| t.is(TokenType::Note))
        .ok_or_else(|| ParseErrorKind::internal(format!("expected a note token at {}", index)))?;
    let pitch = token
        .value
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .and_then(|d| u8::try_from(d).ok())
        .ok_or_else(|| ParseErrorKind::internal(format!("bad note token '{}'", token.value)))?;

    let mut note = Note::new(pitch);
    note.accidental = accidental_before(tokens, index);
    note.has_space_before = token.has_space_before;

    let mut i = consume_suffixes(tokens, index + 1, &mut note);
    let (base, next) = consume_underlines(tokens, i);
    i = consume_suffixes(tokens, next, &mut note);

    note.duration = Duration::new(base, u8::from(note.dot));
    Ok((note, i))
}

/// Octave marks and the articulation dot, allowed before and after underlines
fn consume_suffixes(tokens: &[Token], mut i: usize, note: &mut Note) -> usize {
    while let Some(token) = tokens.get(i) {
        match token.token_type {
            TokenType::OctaveUp => note.octave += 1,
            TokenType::OctaveDown => note.octave -= 1,
            TokenType::Dot => note.dot = true,
            _ => break,
        }
        i += 1;
    }
    i
}

fn count_underlines(tokens: &[Token], start: usize) -> usize {
    tokens
        .get(start..)
        .map(|rest| rest.iter().take_while(|t| t.is(TokenType::Underline)).count())
        .unwrap_or(0)
}

/// Consume a run of underlines; returns the base duration and next index
pub fn consume_underlines(tokens: &[Token], start: usize) -> (BaseDuration, usize) {
    let count = count_underlines(tokens, start);
    (BaseDuration::from_underlines(count), start + count)
}

/// Nearest `#`/`b` before the note, stopping at the previous note, rest or barline
fn accidental_before(tokens: &[Token], index: usize) -> Option<Accidental> {
    for token in tokens[..index].iter().rev() {
        match token.token_type {
            TokenType::Sharp => return Some(Accidental::Sharp),
            TokenType::Flat => return Some(Accidental::Flat),
            TokenType::Barline | TokenType::Note | TokenType::Rest => return None,
            _ => {}
        }
    }
    None
}

/// Trill marks before the note: `~` single, `~~` double, `~.` lower
fn trill_before(tokens: &[Token], index: usize) -> Option<TrillType> {
    let mut trills = 0;
    let mut dot_before_note = false;

    for token in tokens[..index].iter().rev() {
        match token.token_type {
            TokenType::Dot => {
                if trills == 0 {
                    dot_before_note = true;
                }
            }
            TokenType::Trill => trills += 1,
            t if t.is_octave_marker() || t.is_accidental() => {}
            _ => break,
        }
    }

    match trills {
        0 => None,
        _ if dot_before_note => Some(TrillType::Lower),
        1 => Some(TrillType::Single),
        _ => Some(TrillType::Double),
    }
}
