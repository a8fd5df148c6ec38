//! Locating named methods and their exact byte spans.

use syn::spanned::Spanned;

use crate::engine::capability::{has_receiver, impl_target_name};
use crate::engine::patch::Span;
use crate::engine::source::SourceFile;

/// A function bound to a receiver type, with its span in the original text.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub name: String,
    pub receiver_type: String,
    /// Covers the method item including attributes and doc comments, plus
    /// any contiguous `//` comment lines directly above it, snapped to the
    /// start of the first line. Deleting the span never orphans a comment.
    pub span: Span,
}

/// Find `method_name` on `type_name`. Absence is not an error; callers treat
/// `None` as "nothing to remove or annotate here".
pub fn locate_method(
    file: &SourceFile,
    type_name: &str,
    method_name: &str,
) -> Option<MethodDecl> {
    for item in &file.ast().items {
        let syn::Item::Impl(item_impl) = item else {
            continue;
        };
        if impl_target_name(item_impl).as_deref() != Some(type_name) {
            continue;
        }
        for impl_item in &item_impl.items {
            let syn::ImplItem::Fn(method) = impl_item else {
                continue;
            };
            if method.sig.ident != method_name || !has_receiver(&method.sig) {
                continue;
            }

            let span = file.byte_span(method.span());
            let span = widen_over_leading_comments(file, span);
            return Some(MethodDecl {
                name: method_name.to_string(),
                receiver_type: type_name.to_string(),
                span,
            });
        }
    }
    None
}

/// Extend `span` backward over contiguous `//` comment lines directly above
/// it. Doc comments are attributes and already inside the parsed span; this
/// catches the plain comments the parser treats as trivia. The start is
/// snapped to the beginning of its line, unless the method shares that line
/// with other tokens, in which case the parsed start stands.
fn widen_over_leading_comments(file: &SourceFile, span: Span) -> Span {
    let text = file.text();
    let line_start = file.line_start(span.start);
    if !text[line_start..span.start].trim().is_empty() {
        return span;
    }

    let mut start = line_start;
    while start > 0 {
        let prev_start = file.line_start(start - 1);
        let prev_line = text[prev_start..start].trim();
        if prev_line.starts_with("//") {
            start = prev_start;
        } else {
            break;
        }
    }

    Span::new(start, span.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> SourceFile {
        SourceFile::parse("test.rs", text).unwrap()
    }

    #[test]
    fn test_locates_method_span() {
        let file = parse(
            r#"struct S;
impl S {
    fn parameters(&self) -> u32 {
        42
    }
}
"#,
        );
        let method = locate_method(&file, "S", "parameters").unwrap();
        let text = &file.text()[method.span.start..method.span.end];
        assert!(text.starts_with("    fn parameters"));
        assert!(text.ends_with('}'));
        assert_eq!(method.receiver_type, "S");
    }

    #[test]
    fn test_span_includes_doc_comments() {
        let file = parse(
            r#"struct S;
impl S {
    /// Returns the declared parameters.
    ///
    /// Deprecated in the new generation.
    fn parameters(&self) -> u32 {
        42
    }
}
"#,
        );
        let method = locate_method(&file, "S", "parameters").unwrap();
        let text = &file.text()[method.span.start..method.span.end];
        assert!(text.starts_with("    /// Returns the declared parameters."));
    }

    #[test]
    fn test_span_includes_plain_leading_comments() {
        let file = parse(
            r#"struct S;
impl S {
    fn other(&self) {}

    // kept for 0.12 compatibility
    // remove once everyone is on specgen
    fn parameters(&self) -> u32 {
        42
    }
}
"#,
        );
        let method = locate_method(&file, "S", "parameters").unwrap();
        let text = &file.text()[method.span.start..method.span.end];
        assert!(text.starts_with("    // kept for 0.12 compatibility"));
        // The blank line above the comment block is not consumed.
        assert_eq!(file.text().as_bytes()[method.span.start - 1], b'\n');
        assert_eq!(file.text().as_bytes()[method.span.start - 2], b'\n');
    }

    #[test]
    fn test_method_sharing_a_line_keeps_its_parsed_start() {
        // Deleting the span must not swallow the impl header.
        let file = parse("struct S;\nimpl S { fn parameters(&self) -> u32 { 42 } }\n");
        let method = locate_method(&file, "S", "parameters").unwrap();
        let text = &file.text()[method.span.start..method.span.end];
        assert!(text.starts_with("fn parameters"));
        assert!(!text.contains("impl S"));
    }

    #[test]
    fn test_absent_method_is_none() {
        let file = parse("struct S;\nimpl S { fn a(&self) {} }\n");
        assert!(locate_method(&file, "S", "parameters").is_none());
    }

    #[test]
    fn test_wrong_type_is_none() {
        let file = parse("struct S;\nimpl S { fn parameters(&self) {} }\n");
        assert!(locate_method(&file, "T", "parameters").is_none());
    }
}
