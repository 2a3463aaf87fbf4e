// Beam and slur grouping over parsed scores

use jianpu_wasm::{parse, Note, Score};

fn score(source: &str) -> Score {
    parse(source).score.expect("score")
}

fn notes(score: &Score) -> Vec<Note> {
    score
        .notes()
        .filter_map(|(_, el)| el.as_note().cloned())
        .collect()
}

#[test]
fn test_unspaced_eighths_share_a_beam() {
    let parsed = notes(&score("1/2/3/4/"));
    assert_eq!(parsed.len(), 4);
    let group = parsed[0].beam_group;
    assert!(group.is_some());
    assert!(parsed.iter().all(|n| n.beam_group == group));
}

#[test]
fn test_spaced_eighths_have_no_beam() {
    let parsed = notes(&score("1/ 2/ 3/ 4/"));
    assert!(parsed.iter().all(|n| n.beam_group.is_none()));
}

#[test]
fn test_quarter_notes_never_beam() {
    let parsed = notes(&score("1234 |"));
    assert!(parsed.iter().all(|n| n.beam_group.is_none()));
}

#[test]
fn test_beam_ids_are_fresh_per_run() {
    let parsed = notes(&score("1/2/ 3/4/ | 5/6/ 7 - |"));
    let ids: Vec<Option<u32>> = parsed.iter().map(|n| n.beam_group).collect();
    assert_eq!(
        ids,
        vec![Some(1), Some(1), Some(2), Some(2), Some(3), Some(3), None]
    );
}

#[test]
fn test_slur_spans_barlines() {
    let parsed = notes(&score("(1 2 | 3 4) 5 |"));
    let group = parsed[0].slur_group;
    assert!(group.is_some());
    assert!(parsed[..4].iter().all(|n| n.slur_group == group));
    assert_eq!(parsed[4].slur_group, None);
}

#[test]
fn test_beams_and_slurs_are_independent() {
    let parsed = notes(&score("(1/2/) 3/4/ |"));
    let beams: Vec<Option<u32>> = parsed.iter().map(|n| n.beam_group).collect();
    let slurs: Vec<Option<u32>> = parsed.iter().map(|n| n.slur_group).collect();
    assert_eq!(beams, vec![Some(1), Some(1), Some(2), Some(2)]);
    assert_eq!(slurs, vec![Some(1), Some(1), None, None]);
}

#[test]
fn test_unclosed_slur_runs_to_end() {
    let parsed = notes(&score("1 (2 3 | 4"));
    let slurs: Vec<Option<u32>> = parsed.iter().map(|n| n.slur_group).collect();
    assert_eq!(slurs, vec![None, Some(1), Some(1), Some(1)]);
}

#[test]
fn test_ids_restart_per_parse() {
    let first = notes(&score("(1/2/)"));
    let second = notes(&score("(3/4/)"));
    assert_eq!(first[0].beam_group, second[0].beam_group);
    assert_eq!(first[0].slur_group, second[0].slur_group);
}
