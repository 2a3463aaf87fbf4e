// Lyric lines bound to the main notes of a score

use jianpu_wasm::parse;

#[test]
fn test_placeholders_are_bound_like_syllables() {
    let score = parse("1 2 3 4 |\nC 一 _ _ 四").score.unwrap();
    let lyrics = score.measures[0].lyrics.as_ref().unwrap();

    assert_eq!(lyrics.syllables.len(), 4);
    assert_eq!(lyrics.syllables[0].text, "一");
    assert!(lyrics.syllables[1].is_placeholder);
    assert!(lyrics.syllables[2].is_placeholder);
    assert_eq!(lyrics.syllables[3].text, "四");
    assert!(!lyrics.syllables[3].is_placeholder);
}

#[test]
fn test_group_syllable_covers_one_note() {
    let score = parse("1 2 3 4 |\nC 啊 (我的) 好 人").score.unwrap();
    let lyrics = score.measures[0].lyrics.as_ref().unwrap();
    assert_eq!(lyrics.syllables.len(), 4);
    assert!(lyrics.syllables[1].is_group);
    assert_eq!(lyrics.syllables[1].text, "我的");
}

#[test]
fn test_syllables_flow_across_measures() {
    let score = parse("1 1 5 5 | 6 6 5 - |\nC 一 闪 一 闪 亮 晶 晶").score.unwrap();
    let first = score.measures[0].lyrics.as_ref().unwrap();
    let second = score.measures[1].lyrics.as_ref().unwrap();
    assert_eq!(first.syllables.len(), 4);
    // The tie takes no syllable
    assert_eq!(second.syllables.len(), 3);
    assert_eq!(second.syllables[2].text, "晶");
}

#[test]
fn test_grace_notes_take_no_syllable() {
    let score = parse("^5/ 1 2 3 4 |\nC 甲 乙 丙 丁").score.unwrap();
    let lyrics = score.measures[0].lyrics.as_ref().unwrap();
    assert_eq!(lyrics.syllables.len(), 4);
    assert_eq!(lyrics.syllables[0].text, "甲");
}

#[test]
fn test_no_lyric_line_means_no_lyrics() {
    let score = parse("1 2 3 4 |").score.unwrap();
    assert!(score.measures[0].lyrics.is_none());
}

#[test]
fn test_lyrics_do_not_create_errors() {
    let result = parse("1 2 3 4 |\nC 一 二 三 四 五 六");
    assert!(result.errors.is_empty());
}
