// End-to-end parsing of notes, rests, modifiers and metadata

use jianpu_wasm::{
    parse, parse_with_options, Accidental, BaseDuration, GraceType, KeyName, Note, NoteElement,
    ParseErrorKind, ParseOptions, Score, TimeSignature, TrillType,
};

fn score(source: &str) -> Score {
    let options = ParseOptions {
        validate_beats: false,
        ..ParseOptions::default()
    };
    let result = parse_with_options(source, &options);
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);
    result.score.expect("score")
}

fn notes(score: &Score) -> Vec<&Note> {
    score.notes().filter_map(|(_, el)| el.as_note()).collect()
}

#[test]
fn test_octave_stacking() {
    let score = score("1,, 1, 1 1' 1''");
    let parsed = notes(&score);
    assert_eq!(parsed.len(), 5);
    assert!(parsed.iter().all(|n| n.pitch == 1));
    let octaves: Vec<i32> = parsed.iter().map(|n| n.octave).collect();
    assert_eq!(octaves, vec![-2, -1, 0, 1, 2]);
}

#[test]
fn test_duration_from_underlines() {
    let score = score("1 2/ 3// 4///");
    let bases: Vec<BaseDuration> = notes(&score).iter().map(|n| n.duration.base).collect();
    assert_eq!(
        bases,
        vec![
            BaseDuration::Quarter,
            BaseDuration::Eighth,
            BaseDuration::Sixteenth,
            BaseDuration::Sixteenth
        ]
    );
}

#[test]
fn test_well_formed_melody_has_no_errors() {
    let source = "标题: 茉莉花\n调号: F\n拍号: 4/4\n速度: 88\n\n\
                  3 3/5/ 6/1'/ 1'/6/ | 5 5/6/ 5 - | #4. 5/ ~6 ^7/ 1' | 0 v 2 - 0/ 0// 0// |";
    let result = parse(source);
    assert!(result.errors.is_empty(), "unexpected errors: {:?}", result.errors);

    let score = result.score.unwrap();
    assert_eq!(score.metadata.title.as_deref(), Some("茉莉花"));
    assert_eq!(score.metadata.key, KeyName::F);
    assert_eq!(score.metadata.time_signature, TimeSignature::new(4, 4));
    assert_eq!(score.metadata.tempo, 88);
    assert_eq!(score.measures.len(), 4);
}

#[test]
fn test_metadata_defaults() {
    let score = score("1 2 3 4 |");
    assert_eq!(score.metadata.title, None);
    assert_eq!(score.metadata.key, KeyName::C);
    assert_eq!(score.metadata.time_signature, TimeSignature::new(4, 4));
    assert_eq!(score.metadata.tempo, 120);
}

#[test]
fn test_invalid_metadata_values_fall_back() {
    let score = score("调号: H\n拍号: 0/4\n速度: fast\n\n1 |");
    assert_eq!(score.metadata.key, KeyName::C);
    assert_eq!(score.metadata.time_signature, TimeSignature::new(4, 4));
    assert_eq!(score.metadata.tempo, 120);
}

#[test]
fn test_modifiers() {
    let score = score("#4 b7 ~1 ~~2 ~.3 5.");
    let parsed = notes(&score);
    assert_eq!(parsed[0].accidental, Some(Accidental::Sharp));
    assert_eq!(parsed[1].accidental, Some(Accidental::Flat));
    assert_eq!(parsed[2].trill_type, Some(TrillType::Single));
    assert_eq!(parsed[3].trill_type, Some(TrillType::Double));
    assert_eq!(parsed[4].trill_type, Some(TrillType::Lower));
    assert!(parsed[5].dot);
    assert_eq!(parsed[5].duration.dots, 1);
}

#[test]
fn test_rests_ties_and_breaths() {
    let score = score("0 0/ - v |");
    let elements: Vec<&NoteElement> = score.notes().map(|(_, el)| el).collect();
    assert!(matches!(elements[0], NoteElement::Rest { duration, .. } if duration.base == BaseDuration::Quarter));
    assert!(matches!(elements[1], NoteElement::Rest { duration, .. } if duration.base == BaseDuration::Eighth));
    assert!(matches!(elements[2], NoteElement::Tie { .. }));
    assert_eq!(elements[3], &NoteElement::Breath);
}

#[test]
fn test_measure_numbers_follow_barlines() {
    let score = score("1 | 2 || 3");
    let numbers: Vec<u32> = score.measures.iter().map(|m| m.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn test_grace_note_error_keeps_score() {
    let result = parse("^3 5 - - - |");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, ParseErrorKind::GraceWithoutUnderline);
    assert!(result.errors[0].message.contains("grace note"));
    assert!(result.errors[0].message.contains("underline"));

    let score = result.score.expect("score survives grace error");
    let first = score.measures[0].notes[0].as_note().unwrap();
    assert!(first.is_grace);
    assert_eq!(first.grace_type, Some(GraceType::Long));
}

#[test]
fn test_unrecognized_character_keeps_score() {
    let result = parse("1 2 x 3 4 |");
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        result.errors[0].kind,
        ParseErrorKind::UnrecognizedCharacter { character: 'x' }
    );
    assert_eq!(result.errors[0].position.offset, 4);
    assert_eq!(result.score.unwrap().measures[0].notes.len(), 4);
}

#[test]
fn test_empty_input_is_fatal() {
    let result = parse("");
    assert!(result.score.is_none());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].position.line, 1);
    assert_eq!(result.errors[0].position.column, 1);
}

#[test]
fn test_parse_is_pure() {
    let source = "标题: 小星星\n\n1 1 5 5 | 6 6 5 - |\nC 一 闪 一 闪 亮 晶 晶";
    let first = parse(source);
    let second = parse(source);
    assert_eq!(first, second);
}
