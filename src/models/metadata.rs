//! Score metadata: title, key, time signature and tempo

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key of the piece (the pitch of degree 1)
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum KeyName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
    Db,
    Eb,
    Gb,
    Ab,
    Bb,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "A#")]
    ASharp,
}

impl KeyName {
    pub const ALL: [KeyName; 17] = [
        KeyName::C,
        KeyName::D,
        KeyName::E,
        KeyName::F,
        KeyName::G,
        KeyName::A,
        KeyName::B,
        KeyName::Db,
        KeyName::Eb,
        KeyName::Gb,
        KeyName::Ab,
        KeyName::Bb,
        KeyName::CSharp,
        KeyName::DSharp,
        KeyName::FSharp,
        KeyName::GSharp,
        KeyName::ASharp,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyName::C => "C",
            KeyName::D => "D",
            KeyName::E => "E",
            KeyName::F => "F",
            KeyName::G => "G",
            KeyName::A => "A",
            KeyName::B => "B",
            KeyName::Db => "Db",
            KeyName::Eb => "Eb",
            KeyName::Gb => "Gb",
            KeyName::Ab => "Ab",
            KeyName::Bb => "Bb",
            KeyName::CSharp => "C#",
            KeyName::DSharp => "D#",
            KeyName::FSharp => "F#",
            KeyName::GSharp => "G#",
            KeyName::ASharp => "A#",
        }
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyName::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown key name: {}", s))
    }
}

/// Time signature, e.g. 3/4
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimeSignature {
    /// Beats per measure
    pub beats: u32,
    /// Note value that gets one beat
    pub beat_value: u32,
}

impl TimeSignature {
    pub fn new(beats: u32, beat_value: u32) -> Self {
        Self { beats, beat_value }
    }
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self::new(4, 4)
    }
}

pub const DEFAULT_TEMPO: u32 = 120;

/// Header information of a score
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub key: KeyName,
    pub time_signature: TimeSignature,
    /// Beats per minute
    pub tempo: u32,
    /// Free-text notes attached by the editor; never produced from source text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            title: None,
            key: KeyName::default(),
            time_signature: TimeSignature::default(),
            tempo: DEFAULT_TEMPO,
            other: None,
        }
    }
}
