//! Byte-span edits over an immutable source text.
//!
//! All positions are computed against the original text and the output is
//! assembled in a single ascending-offset pass, so earlier edits can never
//! shift the spans of later ones.

/// A contiguous byte range `[start, end)` in a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span start {start} is past end {end}");
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// A single edit against the original text.
#[derive(Debug, Clone)]
pub enum Edit {
    /// Remove the bytes covered by the span.
    Delete(Span),
    /// Insert `text` at `offset`, ahead of any deletion starting there.
    InsertBefore { offset: usize, text: String },
    /// Insert `text` at `offset`, behind any deletion starting there.
    InsertAfter { offset: usize, text: String },
}

impl Edit {
    fn anchor(&self) -> usize {
        match self {
            Edit::Delete(span) => span.start,
            Edit::InsertBefore { offset, .. } => *offset,
            Edit::InsertAfter { offset, .. } => *offset,
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Edit::InsertBefore { .. } => 0,
            Edit::Delete(_) => 1,
            Edit::InsertAfter { .. } => 2,
        }
    }
}

/// An ordered collection of non-overlapping edits over one source text.
#[derive(Debug, Clone, Default)]
pub struct Patch {
    edits: Vec<Edit>,
}

impl Patch {
    pub fn new() -> Self {
        Patch::default()
    }

    pub fn delete(&mut self, span: Span) {
        self.edits.push(Edit::Delete(span));
    }

    pub fn insert_before(&mut self, offset: usize, text: impl Into<String>) {
        self.edits.push(Edit::InsertBefore {
            offset,
            text: text.into(),
        });
    }

    pub fn insert_after(&mut self, offset: usize, text: impl Into<String>) {
        self.edits.push(Edit::InsertAfter {
            offset,
            text: text.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }
}

/// Apply `patch` to `original`, producing the edited text.
///
/// Pure: the same inputs always yield the same output. Every region of the
/// original not covered by an edit appears byte-identical in the result.
///
/// # Panics
///
/// A malformed patch is a programmer error, not a recoverable condition:
/// panics if any span or insertion point is out of bounds or off a char
/// boundary, if delete spans overlap, or if an insertion point lies strictly
/// inside a deleted span.
pub fn apply(original: &str, patch: &Patch) -> String {
    let mut edits: Vec<&Edit> = patch.edits.iter().collect();
    edits.sort_by_key(|e| (e.anchor(), e.rank()));

    validate(original, &edits);

    let inserted: usize = edits
        .iter()
        .map(|e| match e {
            Edit::InsertBefore { text, .. } | Edit::InsertAfter { text, .. } => text.len(),
            Edit::Delete(_) => 0,
        })
        .sum();

    let mut out = String::with_capacity(original.len() + inserted);
    let mut cursor = 0;

    for edit in edits {
        let anchor = edit.anchor();
        if anchor > cursor {
            out.push_str(&original[cursor..anchor]);
            cursor = anchor;
        }
        match edit {
            Edit::Delete(span) => cursor = span.end,
            Edit::InsertBefore { text, .. } | Edit::InsertAfter { text, .. } => {
                out.push_str(text);
            }
        }
    }
    out.push_str(&original[cursor..]);

    out
}

/// Check the patch preconditions against the original text. `edits` must
/// already be sorted by (anchor, rank).
fn validate(original: &str, edits: &[&Edit]) {
    let len = original.len();
    let mut open_delete: Option<Span> = None;

    for edit in edits {
        match edit {
            Edit::Delete(span) => {
                assert!(
                    span.end <= len,
                    "delete span {}..{} is out of bounds (text is {len} bytes)",
                    span.start,
                    span.end
                );
                assert!(
                    original.is_char_boundary(span.start) && original.is_char_boundary(span.end),
                    "delete span {}..{} is not on char boundaries",
                    span.start,
                    span.end
                );
                if let Some(prev) = open_delete {
                    assert!(
                        span.start >= prev.end,
                        "delete spans {}..{} and {}..{} overlap",
                        prev.start,
                        prev.end,
                        span.start,
                        span.end
                    );
                }
                open_delete = Some(*span);
            }
            Edit::InsertBefore { offset, .. } | Edit::InsertAfter { offset, .. } => {
                assert!(
                    *offset <= len,
                    "insertion at {offset} is out of bounds (text is {len} bytes)"
                );
                assert!(
                    original.is_char_boundary(*offset),
                    "insertion at {offset} is not on a char boundary"
                );
                if let Some(prev) = open_delete {
                    assert!(
                        *offset <= prev.start || *offset >= prev.end,
                        "insertion at {offset} lies inside deleted span {}..{}",
                        prev.start,
                        prev.end
                    );
                }
            }
        }
    }
}
