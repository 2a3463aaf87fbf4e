// Beam groups - consecutive short notes written without spaces share a beam

use std::ops::Range;

use crate::models::{Measure, NoteElement};

/// Explicit id allocator for beam and slur groups
///
/// Ids start at 1 and are unique within one parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GroupCounter {
    last: u32,
}

impl GroupCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> u32 {
        self.last += 1;
        self.last
    }

    /// Number of ids handed out so far
    pub fn issued(&self) -> u32 {
        self.last
    }
}

/// Extract beam runs from a measure's elements
///
/// A run starts at a note of eighth value or shorter and extends while the
/// next element is also such a note with no whitespace before it. Mixed
/// values (dotted eighth then sixteenth) may share a run.
/// Returns index ranges of runs with at least two notes.
pub fn extract_beam_runs(notes: &[NoteElement]) -> Vec<Range<usize>> {
    let beamable = |el: &NoteElement| {
        el.as_note()
            .is_some_and(|note| note.duration.base.is_beamable())
    };

    let mut runs = vec![];
    let mut i = 0;
    while i < notes.len() {
        if !beamable(&notes[i]) {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < notes.len()
            && beamable(&notes[end])
            && notes[end].as_note().is_some_and(|note| !note.has_space_before)
        {
            end += 1;
        }

        if end - i >= 2 {
            runs.push(i..end);
        }
        i = end;
    }
    runs
}

/// Stamp every beam run in every measure with a fresh id
pub fn assign_beam_groups(measures: &mut [Measure], ids: &mut GroupCounter) {
    for measure in measures.iter_mut() {
        for run in extract_beam_runs(&measure.notes) {
            let id = ids.next_id();
            for element in &mut measure.notes[run] {
                if let Some(note) = element.as_note_mut() {
                    note.beam_group = Some(id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BaseDuration, Duration, Note};

    fn short(pitch: u8, base: BaseDuration, has_space_before: bool) -> NoteElement {
        let mut note = Note::new(pitch);
        note.duration = Duration::new(base, 0);
        note.has_space_before = has_space_before;
        NoteElement::Note(note)
    }

    #[test]
    fn test_extract_beam_runs_basic() {
        let notes = vec![
            short(1, BaseDuration::Eighth, false),
            short(2, BaseDuration::Eighth, false),
            short(3, BaseDuration::Quarter, true),
        ];

        let runs = extract_beam_runs(&notes);

        // Only the two eighths form a run
        assert_eq!(runs, vec![0..2]);
    }

    #[test]
    fn test_space_breaks_run() {
        let notes = vec![
            short(1, BaseDuration::Eighth, false),
            short(2, BaseDuration::Eighth, true),
            short(3, BaseDuration::Eighth, false),
        ];

        assert_eq!(extract_beam_runs(&notes), vec![1..3]);
    }

    #[test]
    fn test_mixed_values_share_run() {
        let mut dotted = Note::new(1);
        dotted.duration = Duration::new(BaseDuration::Eighth, 1);
        dotted.dot = true;
        let notes = vec![
            NoteElement::Note(dotted),
            short(2, BaseDuration::Sixteenth, false),
        ];

        assert_eq!(extract_beam_runs(&notes), vec![0..2]);
    }

    #[test]
    fn test_rest_breaks_run() {
        let notes = vec![
            short(1, BaseDuration::Eighth, false),
            NoteElement::Rest {
                duration: Duration::new(BaseDuration::Eighth, 0),
                has_space_before: false,
            },
            short(2, BaseDuration::Eighth, false),
        ];

        assert!(extract_beam_runs(&notes).is_empty());
    }

    #[test]
    fn test_ids_are_unique_across_measures() {
        let run = || {
            vec![
                short(1, BaseDuration::Eighth, false),
                short(2, BaseDuration::Eighth, false),
            ]
        };
        let mut measures = vec![
            Measure::new(1, run(), Default::default()),
            Measure::new(2, run(), Default::default()),
        ];

        let mut ids = GroupCounter::new();
        assign_beam_groups(&mut measures, &mut ids);

        assert_eq!(ids.issued(), 2);
        assert_eq!(measures[0].notes[1].as_note().unwrap().beam_group, Some(1));
        assert_eq!(measures[1].notes[0].as_note().unwrap().beam_group, Some(2));
    }
}
