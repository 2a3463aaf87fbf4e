//! Beat validation
//!
//! Sums the beat contribution of every element in a measure and compares
//! it with the time signature. Mismatches are diagnostics, never failures.

use crate::diagnostics::{ParseError, ParseErrorKind, SourcePosition};
use crate::models::{Measure, TimeSignature};

/// Default tolerance for floating point beat sums
pub const BEAT_TOLERANCE: f64 = 0.001;

/// Total beats of a measure under the given beat value
pub fn measure_beats(measure: &Measure, beat_value: u32) -> f64 {
    measure.notes.iter().map(|note| note.beats(beat_value)).sum()
}

/// One diagnostic per measure whose length differs from the time signature
pub fn validate_measure_beats(
    measures: &[Measure],
    time_signature: &TimeSignature,
    tolerance: f64,
) -> Vec<ParseError> {
    let expected = time_signature.beats;

    measures
        .iter()
        .filter_map(|measure| {
            let actual = measure_beats(measure, time_signature.beat_value);
            if (actual - f64::from(expected)).abs() <= tolerance {
                return None;
            }

            log::debug!(
                "measure {}: {} beats, time signature wants {}",
                measure.number,
                actual,
                expected
            );
            let range = measure.source_range.unwrap_or_default();
            Some(ParseError::new(
                ParseErrorKind::DurationMismatch {
                    measure: measure.number,
                    expected,
                    actual,
                },
                SourcePosition::new(1, 0, range.from),
                range.len(),
            ))
        })
        .collect()
}
