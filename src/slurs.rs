//! Slur groups - notes inside parentheses share a slur id
//!
//! Uses depth counting over the body token stream so nested parentheses
//! stay one slur:
//! - On `(`: depth += 1; entering depth 1 opens a new group
//! - On `)`: depth -= 1; returning to depth 0 closes the group
//! - Every note token seen while a group is open gets its id
//!
//! Notes are matched to note tokens by parse order, not by measure, so a
//! slur can run across barlines.

use crate::beat_groups::GroupCounter;
use crate::models::{Measure, Note};
use crate::parse::{Token, TokenType};

/// Assign slur group ids to the parsed notes of `measures`
///
/// `body_tokens` must be the token stream the measures were parsed from.
/// An unmatched `)` is ignored; an unmatched `(` runs to the end.
pub fn assign_slur_groups(measures: &mut [Measure], body_tokens: &[Token], ids: &mut GroupCounter) {
    let mut notes: Vec<&mut Note> = measures
        .iter_mut()
        .flat_map(|measure| measure.notes.iter_mut())
        .filter_map(|element| element.as_note_mut())
        .collect();

    let mut depth = 0usize;
    let mut active: Option<u32> = None;
    let mut note_index = 0;

    for token in body_tokens {
        match token.token_type {
            TokenType::SlurStart => {
                depth += 1;
                if depth == 1 {
                    active = Some(ids.next_id());
                }
            }
            TokenType::SlurEnd => {
                if depth == 0 {
                    log::debug!("unmatched ')' at line {}, column {}", token.line, token.column);
                    continue;
                }
                depth -= 1;
                if depth == 0 {
                    active = None;
                }
            }
            TokenType::Note => {
                if let (Some(id), Some(note)) = (active, notes.get_mut(note_index)) {
                    note.slur_group = Some(id);
                }
                note_index += 1;
            }
            _ => {}
        }
    }

    if depth > 0 {
        log::debug!("{} slur(s) left open at end of body", depth);
    }
}
