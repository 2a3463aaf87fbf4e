//! Element types for numbered musical notation
//!
//! This module defines the note-level building blocks of a parsed score:
//! durations, accidentals, ornaments and the `NoteElement` tagged union
//! that makes up the contents of a measure.

use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Base duration as the denominator of a fraction of a whole note
///
/// Serialized as the bare number (1, 2, 4, 8, 16).
#[repr(u8)]
#[derive(Serialize_repr, Deserialize_repr, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BaseDuration {
    Whole = 1,
    Half = 2,
    Quarter = 4,
    Eighth = 8,
    Sixteenth = 16,
}

impl BaseDuration {
    /// Numeric denominator (1, 2, 4, 8 or 16)
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Resolve a base duration from a run of duration-underlines
    ///
    /// No underline is a quarter, one is an eighth, two or more a sixteenth.
    pub fn from_underlines(count: usize) -> Self {
        match count {
            0 => BaseDuration::Quarter,
            1 => BaseDuration::Eighth,
            _ => BaseDuration::Sixteenth,
        }
    }

    /// Eighth notes and shorter can share a beam
    pub fn is_beamable(self) -> bool {
        self.value() >= BaseDuration::Eighth.value()
    }
}

/// Note duration: base value plus augmentation dots
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Duration {
    pub base: BaseDuration,
    /// Augmentation dots (0, 1 or 2), each adding half of the remaining value
    pub dots: u8,
}

impl Duration {
    pub const QUARTER: Duration = Duration {
        base: BaseDuration::Quarter,
        dots: 0,
    };

    pub fn new(base: BaseDuration, dots: u8) -> Self {
        Self { base, dots }
    }

    /// Length in beats when `beat_value` is the note value that gets one beat
    pub fn beats(&self, beat_value: u32) -> f64 {
        let mut beats = f64::from(beat_value) / f64::from(self.base.value());
        if self.dots > 0 {
            beats *= 1.0 + 0.5 * f64::from(self.dots);
        }
        beats
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::QUARTER
    }
}

/// Accidental carried by a note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
}

/// Grace note kind, decided by the number of underlines after the note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GraceType {
    /// `^n//` and more underlines
    Short,
    /// `^n/`
    Long,
}

impl GraceType {
    /// `None` when the grace note carries no underline at all
    pub fn from_underlines(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(GraceType::Long),
            _ => Some(GraceType::Short),
        }
    }
}

/// Trill ornament written as `~` marks before the note
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrillType {
    /// `~n`
    Single,
    /// `~~n`
    Double,
    /// `~.n`
    Lower,
}

/// A sounding note
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Scale degree 1-7 (do-ti)
    pub pitch: u8,
    /// Octave offset, 0 is the middle octave
    pub octave: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accidental: Option<Accidental>,
    pub duration: Duration,
    pub dot: bool,
    #[serde(default)]
    pub is_grace: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grace_type: Option<GraceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trill_type: Option<TrillType>,
    /// Notes sharing an id are drawn under one beam
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beam_group: Option<u32>,
    /// Notes sharing an id are under one slur, possibly across barlines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slur_group: Option<u32>,
    #[serde(default)]
    pub has_space_before: bool,
}

impl Note {
    /// Plain quarter note in the middle octave
    pub fn new(pitch: u8) -> Self {
        Self {
            pitch,
            octave: 0,
            accidental: None,
            duration: Duration::QUARTER,
            dot: false,
            is_grace: false,
            grace_type: None,
            trill_type: None,
            beam_group: None,
            slur_group: None,
            has_space_before: false,
        }
    }
}

/// One element of a measure
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum NoteElement {
    Note(Note),
    Rest {
        duration: Duration,
        #[serde(default)]
        has_space_before: bool,
    },
    /// Continuation (`-`) of the previous sounding note
    Tie { duration: Duration },
    /// Zero-duration breath mark
    Breath,
}

impl NoteElement {
    pub fn as_note(&self) -> Option<&Note> {
        match self {
            NoteElement::Note(note) => Some(note),
            _ => None,
        }
    }

    pub fn as_note_mut(&mut self) -> Option<&mut Note> {
        match self {
            NoteElement::Note(note) => Some(note),
            _ => None,
        }
    }

    /// True for notes that occupy their own time (everything but grace notes)
    pub fn is_main_note(&self) -> bool {
        matches!(self, NoteElement::Note(note) if !note.is_grace)
    }

    pub fn duration(&self) -> Option<Duration> {
        match self {
            NoteElement::Note(note) => Some(note.duration),
            NoteElement::Rest { duration, .. } | NoteElement::Tie { duration } => Some(*duration),
            NoteElement::Breath => None,
        }
    }

    /// Contribution to the measure's beat count
    ///
    /// Breath marks and grace notes take no counted time.
    pub fn beats(&self, beat_value: u32) -> f64 {
        match self {
            NoteElement::Breath => 0.0,
            NoteElement::Note(note) if note.is_grace => 0.0,
            other => other
                .duration()
                .map(|duration| duration.beats(beat_value))
                .unwrap_or(0.0),
        }
    }
}
