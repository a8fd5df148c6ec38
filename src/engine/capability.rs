//! Duck-typed conformance of struct declarations to capability sets.
//!
//! A capability set is a fixed list of method names. A struct satisfies it
//! when every required name appears among the receiver-taking functions
//! attached to the struct through any top-level impl block, inherent or
//! trait. The receiver form (`self`, `&self`, `&mut self`) is irrelevant;
//! what matters is that the function is bound to the type.

use std::collections::BTreeSet;

use syn::spanned::Spanned;

use crate::engine::patch::Span;
use crate::engine::source::SourceFile;

/// A named set of method names a type must expose to play a role.
#[derive(Debug, Clone, Copy)]
pub struct CapabilitySet {
    pub name: &'static str,
    pub required: &'static [&'static str],
}

/// The source-connector lifecycle.
pub const SOURCE_LIFECYCLE: CapabilitySet = CapabilitySet {
    name: "source",
    required: &["open", "read", "ack", "teardown"],
};

/// The destination-connector lifecycle.
pub const DESTINATION_LIFECYCLE: CapabilitySet = CapabilitySet {
    name: "destination",
    required: &["open", "write", "teardown"],
};

/// A struct that satisfies a capability set.
#[derive(Debug, Clone)]
pub struct Conformance {
    pub type_name: String,
    /// Byte span of the struct declaration, attributes included.
    pub decl_span: Span,
}

/// Find the first struct in declaration order that satisfies `capability`.
///
/// A file with no conforming struct is not an error; callers skip it. If
/// several structs conform, the first one wins and the rest are reported as
/// warnings only.
pub fn find_conforming(file: &SourceFile, capability: &CapabilitySet) -> Option<Conformance> {
    let mut found: Option<Conformance> = None;

    for item in &file.ast().items {
        let syn::Item::Struct(item_struct) = item else {
            continue;
        };
        let type_name = item_struct.ident.to_string();
        let methods = methods_of(file.ast(), &type_name);

        if !capability
            .required
            .iter()
            .all(|name| methods.contains(*name))
        {
            continue;
        }

        match &found {
            Some(first) => {
                tracing::warn!(
                    capability = capability.name,
                    selected = %first.type_name,
                    ignored = %type_name,
                    "multiple types satisfy the capability; keeping the first in declaration order"
                );
            }
            None => {
                found = Some(Conformance {
                    type_name,
                    decl_span: file.byte_span(item_struct.span()),
                });
            }
        }
    }

    found
}

/// Names of receiver-taking functions attached to `type_name` by any
/// top-level impl block.
pub(crate) fn methods_of(ast: &syn::File, type_name: &str) -> BTreeSet<String> {
    let mut methods = BTreeSet::new();

    for item in &ast.items {
        let syn::Item::Impl(item_impl) = item else {
            continue;
        };
        if impl_target_name(item_impl).as_deref() != Some(type_name) {
            continue;
        }
        for impl_item in &item_impl.items {
            if let syn::ImplItem::Fn(method) = impl_item {
                if has_receiver(&method.sig) {
                    methods.insert(method.sig.ident.to_string());
                }
            }
        }
    }

    methods
}

/// The type name an impl block attaches methods to, if it is a plain path.
pub(crate) fn impl_target_name(item_impl: &syn::ItemImpl) -> Option<String> {
    match &*item_impl.self_ty {
        syn::Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|seg| seg.ident.to_string()),
        _ => None,
    }
}

pub(crate) fn has_receiver(sig: &syn::Signature) -> bool {
    matches!(sig.inputs.first(), Some(syn::FnArg::Receiver(_)))
}
