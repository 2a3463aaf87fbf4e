//! Lyrics association
//!
//! Lyric lines (`C ...`) are split into syllables and bound, in order, to
//! the main notes of the score. Grace notes, rests, ties and breath marks
//! receive no syllable.

use crate::models::{LyricsSyllable, Measure, MeasureLyrics};
use crate::parse::{Token, TokenType};

/// Parse a lyric line into syllables
///
/// # Examples
/// `"一 闪 (我的) _"` gives `一`, `闪`, the group `我的` and a placeholder.
///
/// - whitespace separates syllables and is dropped
/// - `(...)` is one group syllable (unterminated runs to the end)
/// - `_` is a placeholder: the note is sung without new text
/// - any other character is a syllable of its own
pub fn parse_lyrics(text: &str) -> Vec<LyricsSyllable> {
    let chars: Vec<char> = text.chars().collect();
    let mut syllables = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            ' ' | '\t' => i += 1,
            '(' => {
                let close = chars[i + 1..].iter().position(|&c| c == ')');
                let end = close.map(|offset| i + 1 + offset).unwrap_or(chars.len());
                let group: String = chars[i + 1..end].iter().collect();
                syllables.push(LyricsSyllable::group(group.trim()));
                i = end + 1;
            }
            '_' => {
                syllables.push(LyricsSyllable::placeholder());
                i += 1;
            }
            ch => {
                syllables.push(LyricsSyllable::single(ch));
                i += 1;
            }
        }
    }

    syllables
}

/// All syllables of all lyric lines, in source order
///
/// Only a `LyricsMarker` directly followed by its `LyricsText` contributes.
pub fn collect_syllables(lyrics_tokens: &[Token]) -> Vec<LyricsSyllable> {
    lyrics_tokens
        .windows(2)
        .filter(|pair| pair[0].is(TokenType::LyricsMarker) && pair[1].is(TokenType::LyricsText))
        .flat_map(|pair| parse_lyrics(&pair[1].value))
        .collect()
}

/// Bind syllables to main notes across all measures
///
/// Measures that receive at least one syllable get a `lyrics` list.
/// Returns the number of syllables left over.
pub fn associate_lyrics(measures: &mut [Measure], lyrics_tokens: &[Token]) -> usize {
    let mut syllables = collect_syllables(lyrics_tokens).into_iter();

    for measure in measures.iter_mut() {
        let main_notes = measure.notes.iter().filter(|el| el.is_main_note()).count();
        let bound: Vec<LyricsSyllable> = syllables.by_ref().take(main_notes).collect();
        if !bound.is_empty() {
            measure.lyrics = Some(MeasureLyrics { syllables: bound });
        }
    }

    let leftover = syllables.count();
    if leftover > 0 {
        log::debug!("{} lyric syllable(s) without a note", leftover);
    }
    leftover
}
