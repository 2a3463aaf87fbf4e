//! Metadata header parsing
//!
//! Turns `MetadataKey`/`MetadataValue` token pairs into a `Metadata`.
//! Values that cannot be understood keep their defaults; the source is
//! still compiled.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{KeyName, Metadata, TimeSignature, DEFAULT_TEMPO};

use super::tokens::{Token, TokenType};

static TIME_SIGNATURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)/(\d+)$").expect("time signature pattern is valid"));

/// Build metadata from the header tokens of a token stream
pub fn parse_metadata(tokens: &[Token]) -> Metadata {
    let mut metadata = Metadata::default();

    let mut i = 0;
    while i + 1 < tokens.len() {
        let (key, value) = (&tokens[i], &tokens[i + 1]);
        if !(key.is(TokenType::MetadataKey) && value.is(TokenType::MetadataValue)) {
            i += 1;
            continue;
        }

        match key.value.to_lowercase().as_str() {
            "标题" | "title" => metadata.title = Some(value.value.clone()),
            "调号" | "key" => match value.value.parse::<KeyName>() {
                Ok(key_name) => metadata.key = key_name,
                Err(e) => log::warn!("{} (line {}), keeping {}", e, value.line, metadata.key),
            },
            "拍号" | "time" => match parse_time_signature(&value.value) {
                Some(time_signature) => metadata.time_signature = time_signature,
                None => log::warn!(
                    "unreadable time signature '{}' (line {}), keeping 4/4",
                    value.value,
                    value.line
                ),
            },
            "速度" | "tempo" => metadata.tempo = parse_tempo(&value.value),
            other => log::debug!("ignoring metadata key '{}'", other),
        }
        i += 2;
    }

    metadata
}

/// `3/4` style time signature; both numbers must be positive
pub fn parse_time_signature(value: &str) -> Option<TimeSignature> {
    let caps = TIME_SIGNATURE.captures(value.trim())?;
    let beats: u32 = caps.get(1)?.as_str().parse().ok()?;
    let beat_value: u32 = caps.get(2)?.as_str().parse().ok()?;
    (beats > 0 && beat_value > 0).then(|| TimeSignature::new(beats, beat_value))
}

/// Leading integer of the value (`96bpm` reads as 96); 120 when absent or zero
pub fn parse_tempo(value: &str) -> u32 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u32>() {
        Ok(tempo) if tempo > 0 => tempo,
        _ => {
            log::warn!("unreadable tempo '{}', using {}", value, DEFAULT_TEMPO);
            DEFAULT_TEMPO
        }
    }
}
