//! Compile pipeline: source text to `ParseResult`
//!
//! source → tokenize → metadata + note pass → beam groups → slur groups →
//! lyrics → beat validation. Each call allocates its own state, so
//! concurrent calls on different inputs share nothing.

use serde::{Deserialize, Serialize};

use crate::beat_groups::{assign_beam_groups, GroupCounter};
use crate::diagnostics::{ParseErrorKind, ParseResult};
use crate::lyrics::associate_lyrics;
use crate::models::Score;
use crate::slurs::assign_slur_groups;

use super::beats::{validate_measure_beats, BEAT_TOLERANCE};
use super::grammar::{parse_body, ParsedBody};
use super::metadata::parse_metadata;
use super::tokenizer::tokenize;

/// Options for one parse
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ParseOptions {
    /// Report measures whose length differs from the time signature
    pub validate_beats: bool,
    /// Allowed difference between counted and expected beats
    pub beat_tolerance: f64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            validate_beats: true,
            beat_tolerance: BEAT_TOLERANCE,
        }
    }
}

/// Parse jianpu source into a score plus diagnostics
pub fn parse(source: &str) -> ParseResult {
    parse_with_options(source, &ParseOptions::default())
}

/// Parse with explicit options; never panics on user input and never fails
/// outright: internal errors become a single fatal diagnostic
pub fn parse_with_options(source: &str, options: &ParseOptions) -> ParseResult {
    match compile(source, options) {
        Ok(result) => result,
        Err(kind) => {
            log::error!("{}", kind);
            ParseResult::fatal(kind)
        }
    }
}

fn compile(source: &str, options: &ParseOptions) -> Result<ParseResult, ParseErrorKind> {
    let tokens = tokenize(source);
    let metadata = parse_metadata(&tokens);
    let ParsedBody {
        mut measures,
        mut errors,
        streams,
    } = parse_body(&tokens)?;

    if measures.is_empty() {
        return Ok(ParseResult::fatal(ParseErrorKind::NoNotes));
    }

    let mut beam_ids = GroupCounter::new();
    assign_beam_groups(&mut measures, &mut beam_ids);

    let mut slur_ids = GroupCounter::new();
    assign_slur_groups(&mut measures, &streams.body, &mut slur_ids);

    associate_lyrics(&mut measures, &streams.lyrics);

    if options.validate_beats {
        errors.extend(validate_measure_beats(
            &measures,
            &metadata.time_signature,
            options.beat_tolerance,
        ));
    }

    log::debug!(
        "compiled {} measures: {} beam groups, {} slur groups, {} diagnostics",
        measures.len(),
        beam_ids.issued(),
        slur_ids.issued(),
        errors.len()
    );

    Ok(ParseResult {
        score: Some(Score { metadata, measures }),
        errors,
    })
}
