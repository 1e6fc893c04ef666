//! Dependency candidate collection.
//!
//! Collection over-approximates: every capitalized identifier reachable from
//! a declaration is a candidate unless it is a built-in type, part of the
//! declaration vocabulary, or a kind alias. Candidates that name no
//! discovered resource are dropped later by the dependency graph.

use proc_macro2::{Ident, TokenStream, TokenTree};
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::visit::Visit;
use syn::{Attribute, Expr, ExprPath, ExprStruct, Macro, Path, Token, Type};

use graphdecl_foundation::is_kind_alias;

/// Standard library and prelude names that are never dependencies.
const BUILTINS: &[&str] = &[
    "Self", "String", "Vec", "Box", "Arc", "Rc", "Weak", "Option", "Some", "None", "Result",
    "Ok", "Err", "HashMap", "HashSet", "BTreeMap", "BTreeSet", "VecDeque", "Cow", "Cell",
    "RefCell", "Mutex", "RwLock", "LazyLock", "Lazy", "OnceLock", "OnceCell", "PhantomData",
    "Default", "Duration", "Instant", "Path", "PathBuf", "Fn", "FnMut", "FnOnce", "Send",
    "Sync", "Sized", "Clone", "Copy", "Debug", "Display", "Into", "From", "Iterator",
    "ToString", "AsRef", "Pin", "Ordering",
];

/// Types used to spell out declarations rather than to reference resources.
const VOCABULARY: &[&str] = &[
    "Property", "PropertyDef", "PropertyType", "Constraint", "ConstraintDef", "ConstraintKind",
    "ConstraintType", "Index", "IndexDef", "IndexKind", "IndexType", "IndexOptions",
    "Similarity", "SimilarityFunction", "Setting", "DataType", "ValueType", "Direction",
    "Orientation", "Aggregation",
];

/// Returns true if the identifier may name another resource.
#[must_use]
pub fn is_candidate(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
        && !BUILTINS.contains(&name)
        && !VOCABULARY.contains(&name)
        && !is_kind_alias(name)
}

/// An identifier as written, without any `r#` prefix.
pub(crate) fn ident_name(ident: &Ident) -> String {
    ident.unraw().to_string()
}

/// Candidates from every segment and generic argument of the given types.
pub(crate) fn type_candidates<'a>(types: impl IntoIterator<Item = &'a Type>) -> Vec<String> {
    let mut collector = Collector::default();
    for ty in types {
        collector.visit_type(ty);
    }
    collector.names
}

/// Candidates from every sub-expression of the given values.
pub(crate) fn expr_candidates<'a>(exprs: impl IntoIterator<Item = &'a Expr>) -> Vec<String> {
    let mut collector = Collector::default();
    for expr in exprs {
        collector.visit_expr(expr);
    }
    collector.names
}

/// Macro arguments parsed as a comma-separated expression list.
pub(crate) fn macro_args(mac: &Macro) -> Option<Vec<Expr>> {
    mac.parse_body_with(Punctuated::<Expr, Token![,]>::parse_terminated)
        .ok()
        .map(|args| args.into_iter().collect())
}

#[derive(Default)]
struct Collector {
    names: Vec<String>,
}

impl Collector {
    fn push(&mut self, name: String) {
        if is_candidate(&name) && !self.names.contains(&name) {
            self.names.push(name);
        }
    }

    /// For `A::B` with a capitalized `A` the candidate is `A` (an associated
    /// item of a type); otherwise it is the last segment (`schema::PERSON`
    /// gives `PERSON`).
    fn expr_path(&mut self, path: &Path) {
        let names: Vec<String> = path.segments.iter().map(|s| ident_name(&s.ident)).collect();
        let candidate = match names.as_slice() {
            [.., owner, _] if owner.starts_with(char::is_uppercase) => Some(owner),
            [.., last] => Some(last),
            [] => None,
        };
        if let Some(name) = candidate {
            self.push(name.clone());
        }
        for segment in &path.segments {
            self.visit_path_arguments(&segment.arguments);
        }
    }

    fn tokens(&mut self, tokens: TokenStream) {
        for tree in tokens {
            match tree {
                TokenTree::Ident(ident) => self.push(ident_name(&ident)),
                TokenTree::Group(group) => self.tokens(group.stream()),
                TokenTree::Punct(_) | TokenTree::Literal(_) => {}
            }
        }
    }
}

impl<'ast> Visit<'ast> for Collector {
    fn visit_attribute(&mut self, _: &'ast Attribute) {}

    fn visit_expr_path(&mut self, node: &'ast ExprPath) {
        if let Some(qself) = &node.qself {
            self.visit_type(&qself.ty);
        }
        self.expr_path(&node.path);
    }

    fn visit_expr_struct(&mut self, node: &'ast ExprStruct) {
        if let Some(qself) = &node.qself {
            self.visit_type(&qself.ty);
        }
        self.expr_path(&node.path);
        for field in &node.fields {
            self.visit_expr(&field.expr);
        }
        if let Some(rest) = &node.rest {
            self.visit_expr(rest);
        }
    }

    // Type paths and trait bounds: every segment counts.
    fn visit_path(&mut self, node: &'ast Path) {
        for segment in &node.segments {
            self.push(ident_name(&segment.ident));
            self.visit_path_arguments(&segment.arguments);
        }
    }

    fn visit_macro(&mut self, node: &'ast Macro) {
        match macro_args(node) {
            Some(args) => {
                for name in expr_candidates(&args) {
                    self.push(name);
                }
            }
            None => self.tokens(node.tokens.clone()),
        }
    }
}
