//! Parsing module for jianpu source text
//!
//! This module contains the compiler front end: tokenizer, metadata
//! reader, note/modifier parser, beat validator and the pipeline tying
//! them together.

pub mod beats;
pub mod grammar;
pub mod metadata;
pub mod pipeline;
pub mod tokenizer;
pub mod tokens;

// Re-export commonly used types
pub use beats::{measure_beats, validate_measure_beats, BEAT_TOLERANCE};
pub use grammar::{parse_body, ParsedBody, TokenStreams};
pub use metadata::parse_metadata;
pub use pipeline::{parse, parse_with_options, ParseOptions};
pub use tokenizer::tokenize;
pub use tokens::{Token, TokenType};
