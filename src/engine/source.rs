//! Parsed source files with byte-exact position information.

use std::path::{Path, PathBuf};

use proc_macro2::LineColumn;

use crate::engine::patch::Span;
use crate::engine::EngineError;

/// A source file together with its parsed syntax tree.
///
/// The original text is immutable once loaded; every span handed out by the
/// engine is a byte range into that exact text. A `SourceFile` lives for a
/// single migration-step invocation and is discarded after the step writes
/// its result.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    text: String,
    ast: syn::File,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Parse `text` into a syntax tree. A parse failure aborts with the
    /// offending location; no partial state is retained.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, EngineError> {
        let path = path.into();
        let text = text.into();

        let ast = syn::parse_file(&text).map_err(|e| {
            let pos = e.span().start();
            EngineError::Parse {
                path: path.clone(),
                line: pos.line,
                column: pos.column + 1,
                message: e.to_string(),
            }
        })?;

        let line_starts = line_starts(&text);

        Ok(SourceFile {
            path,
            text,
            ast,
            line_starts,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The original text, byte for byte.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn ast(&self) -> &syn::File {
        &self.ast
    }

    /// Convert a parser span into a byte range against the original text.
    pub fn byte_span(&self, span: proc_macro2::Span) -> Span {
        Span::new(self.offset_of(span.start()), self.offset_of(span.end()))
    }

    /// Byte offset of the start of the line containing `offset`.
    pub fn line_start(&self, offset: usize) -> usize {
        let idx = self.line_starts.partition_point(|&s| s <= offset);
        self.line_starts[idx.saturating_sub(1)]
    }

    /// Byte offset of a line/column position. proc-macro2 columns count
    /// characters, not bytes, so the column is re-measured within the line.
    fn offset_of(&self, pos: LineColumn) -> usize {
        let line_start = self
            .line_starts
            .get(pos.line.saturating_sub(1))
            .copied()
            .unwrap_or(self.text.len());
        let line_end = self
            .line_starts
            .get(pos.line)
            .copied()
            .unwrap_or(self.text.len());
        let line = &self.text[line_start..line_end];

        let byte_col = line
            .char_indices()
            .nth(pos.column)
            .map(|(i, _)| i)
            .unwrap_or(line.len());

        line_start + byte_col
    }
}

fn line_starts(text: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        starts.push(offset);
        offset += line.len();
    }
    if starts.is_empty() {
        starts.push(0);
    }
    starts
}
