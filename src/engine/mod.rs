//! Structural source-patching engine.
//!
//! The engine parses a Rust source file into a syntax tree with byte-exact
//! position information, decides whether a declared struct structurally
//! satisfies a named capability set, locates individual methods, and splices
//! an edited version of the original text together without disturbing any
//! byte outside the edited spans.

pub mod capability;
pub mod extract;
pub mod locate;
pub mod patch;
pub mod source;

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed source. The consuming step must abort; the engine never
    /// produces partial edits from a file it could not parse.
    #[error("{path}:{line}:{column}: failed to parse: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The factory function backing a manifest extraction is missing or does
    /// not have the expected single-return struct-literal shape.
    #[error("cannot extract from `{function}`: {reason}")]
    Extraction { function: String, reason: String },
}
