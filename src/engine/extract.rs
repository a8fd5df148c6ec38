//! Best-effort extraction of string-literal fields from a factory function.
//!
//! This is a deliberately narrow constant-folder: it reads only plain string
//! literals out of a single struct-literal return statement. Anything
//! computed at runtime is silently left out of the record rather than
//! evaluated, and anything beyond that shape is an error.

use std::collections::BTreeMap;

use crate::engine::source::SourceFile;
use crate::engine::EngineError;

/// Extract the requested string-literal fields from the struct literal
/// returned by the top-level function named `factory`.
///
/// Fields whose values are not plain string literals are absent from the
/// result. Fails only when the function is missing or its body does not
/// start with a struct-literal return.
pub fn extract_literal_fields(
    file: &SourceFile,
    factory: &str,
    fields: &[&str],
) -> Result<BTreeMap<String, String>, EngineError> {
    let func = file
        .ast()
        .items
        .iter()
        .find_map(|item| match item {
            syn::Item::Fn(f) if f.sig.ident == factory => Some(f),
            _ => None,
        })
        .ok_or_else(|| EngineError::Extraction {
            function: factory.to_string(),
            reason: "function not found".to_string(),
        })?;

    let shape_err = || EngineError::Extraction {
        function: factory.to_string(),
        reason: "body does not start with a struct-literal return".to_string(),
    };

    let literal = match func.block.stmts.first() {
        Some(syn::Stmt::Expr(syn::Expr::Struct(lit), _)) => lit,
        Some(syn::Stmt::Expr(syn::Expr::Return(ret), _)) => match ret.expr.as_deref() {
            Some(syn::Expr::Struct(lit)) => lit,
            _ => return Err(shape_err()),
        },
        _ => return Err(shape_err()),
    };

    let mut record = BTreeMap::new();
    for field in &literal.fields {
        let syn::Member::Named(ident) = &field.member else {
            continue;
        };
        let name = ident.to_string();
        if !fields.contains(&name.as_str()) {
            continue;
        }
        // Only plain string literals; computed values stay absent.
        if let syn::Expr::Lit(expr_lit) = &field.expr {
            if let syn::Lit::Str(lit_str) = &expr_lit.lit {
                record.insert(name, lit_str.value());
            }
        }
    }

    Ok(record)
}
