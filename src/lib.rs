//! Jianpu Compiler WASM Module
//!
//! Compiles jianpu (numbered musical notation) source text into a
//! structured score: metadata, measures of notes, rests, ties and breath
//! marks, with beam groups, slur groups, lyrics and diagnostics.

pub mod api;
pub mod beat_groups;
pub mod diagnostics;
pub mod lyrics;
pub mod models;
pub mod parse;
pub mod slurs;

// Re-export commonly used types
pub use diagnostics::{ParseError, ParseErrorKind, ParseResult, SourcePosition};
pub use models::*;
pub use parse::{parse, parse_with_options, tokenize, ParseOptions, Token, TokenType};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            log::warn!("logger already initialized");
        }
    }

    log::info!("Jianpu compiler WASM module initialized");
}
