//! Models module for the jianpu score AST
//!
//! This module contains the data structures produced by one parse:
//! metadata, note elements, measures and the score itself.

pub mod elements;
pub mod metadata;
pub mod score;

// Re-export commonly used types
pub use elements::*;
pub use metadata::*;
pub use score::*;
