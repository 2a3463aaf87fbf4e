//! Measures, lyrics and the score AST

use serde::{Deserialize, Serialize};

use super::elements::NoteElement;
use super::metadata::Metadata;

/// Half-open char range `[from, to)` into the source text
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct SourceRange {
    pub from: usize,
    pub to: usize,
}

impl SourceRange {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One lyric syllable bound to a note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LyricsSyllable {
    pub text: String,
    /// Written as `_`: the note is sung without new text
    pub is_placeholder: bool,
    /// Written as `(...)`: several characters on one note
    pub is_group: bool,
}

impl LyricsSyllable {
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_placeholder: false,
            is_group: false,
        }
    }

    pub fn group(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_placeholder: false,
            is_group: true,
        }
    }

    pub fn placeholder() -> Self {
        Self {
            text: String::new(),
            is_placeholder: true,
            is_group: false,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct MeasureLyrics {
    pub syllables: Vec<LyricsSyllable>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    /// 1-based, contiguous
    pub number: u32,
    pub notes: Vec<NoteElement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<MeasureLyrics>,
    /// Span between the surrounding barlines (barlines excluded)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_range: Option<SourceRange>,
}

impl Measure {
    pub fn new(number: u32, notes: Vec<NoteElement>, source_range: SourceRange) -> Self {
        Self {
            number,
            notes,
            lyrics: None,
            source_range: Some(source_range),
        }
    }
}

/// Complete score AST
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Score {
    pub metadata: Metadata,
    pub measures: Vec<Measure>,
}

impl Score {
    /// All elements in playing order, paired with their measure number
    pub fn notes(&self) -> impl Iterator<Item = (u32, &NoteElement)> {
        self.measures
            .iter()
            .flat_map(|measure| measure.notes.iter().map(move |note| (measure.number, note)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::elements::{Duration, Note};

    #[test]
    fn test_score_notes_flattens_in_order() {
        let score = Score {
            metadata: Metadata::default(),
            measures: vec![
                Measure::new(1, vec![NoteElement::Note(Note::new(1))], SourceRange::new(0, 2)),
                Measure::new(
                    2,
                    vec![
                        NoteElement::Tie {
                            duration: Duration::QUARTER,
                        },
                        NoteElement::Breath,
                    ],
                    SourceRange::new(3, 7),
                ),
            ],
        };

        let numbers: Vec<u32> = score.notes().map(|(number, _)| number).collect();
        assert_eq!(numbers, vec![1, 2, 2]);
    }

    #[test]
    fn test_source_range_len() {
        assert_eq!(SourceRange::new(3, 9).len(), 6);
        assert!(SourceRange::new(4, 4).is_empty());
    }
}
