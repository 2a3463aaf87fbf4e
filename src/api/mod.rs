//! Jianpu WASM API
//!
//! JavaScript-facing entry points for the compiler.
//!
//! # Module Structure
//!
//! - `helpers`: serialization, deserialization and error logging shared by
//!   every entry point
//! - `core`: `parseJianpu`, `parseJianpuWithOptions` and `tokenizeJianpu`

pub mod core;
pub mod helpers;

pub use self::core::*;
