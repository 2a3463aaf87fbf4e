//! WASM API for the jianpu compiler
//!
//! Every function is stateless: each call tokenizes and parses its own
//! input, so nothing is shared between calls.

use wasm_bindgen::prelude::*;

use super::helpers::{deserialize_or_default, serialize};
use crate::parse::{self, ParseOptions};

/// Parse jianpu source into `{ score, errors }`
///
/// `score` is `null` only when nothing could be parsed at all; user
/// mistakes are reported in `errors` alongside a partial score.
#[wasm_bindgen(js_name = parseJianpu)]
pub fn parse_jianpu(source: &str) -> Result<JsValue, JsValue> {
    log::debug!("parseJianpu: {} chars", source.chars().count());
    let result = parse::parse(source);
    serialize(&result, "Failed to serialize parse result")
}

/// Parse with options, e.g. `{ validateBeats: false }`
///
/// Missing fields fall back to their defaults; `undefined` or `null`
/// options behave like `parseJianpu`.
#[wasm_bindgen(js_name = parseJianpuWithOptions)]
pub fn parse_jianpu_with_options(source: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options: ParseOptions = deserialize_or_default(options, "Invalid parse options")?;
    log::debug!(
        "parseJianpuWithOptions: {} chars, validateBeats={}",
        source.chars().count(),
        options.validate_beats
    );
    let result = parse::parse_with_options(source, &options);
    serialize(&result, "Failed to serialize parse result")
}

/// Raw token stream, for editors that highlight source text
#[wasm_bindgen(js_name = tokenizeJianpu)]
pub fn tokenize_jianpu(source: &str) -> Result<JsValue, JsValue> {
    let tokens = parse::tokenize(source);
    serialize(&tokens, "Failed to serialize tokens")
}
