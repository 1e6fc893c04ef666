//! Recognition of resource declarations and literal metadata extraction.
//!
//! Two independent forms are recognized: tuple structs embedding a kind alias
//! (structural form) and `static`/`const` items initialized with a struct
//! literal of a kind alias (literal form).

use std::collections::BTreeMap;
use std::path::Path as FsPath;

use proc_macro2::Ident;
use syn::punctuated::Punctuated;
use syn::{
    Attribute, Expr, ExprLit, ExprStruct, FieldValue, Fields, GenericArgument, Item, ItemStruct,
    Lit, Member, Path, PathArguments, Stmt, Token, Type, UnOp,
};

use graphdecl_foundation::{
    ConstraintDef, DiscoveredResource, IndexDef, KindAlias, Location, PropertyDef, ResourceKind,
    Setting, lookup_alias,
};

use super::deps::{self, ident_name, macro_args};
use crate::parse::to_u32;

/// Smart-pointer types looked through when resolving a declared type.
const TYPE_WRAPPERS: &[&str] = &["Box", "Arc", "Rc"];

/// Types whose `::new(..)` call is looked through when unwrapping an initializer.
const CONSTRUCTOR_WRAPPERS: &[&str] = &["Box", "Arc", "Rc", "LazyLock", "Lazy"];

/// Property type assumed when a declaration gives none.
pub const DEFAULT_PROPERTY_TYPE: &str = "String";

/// A recognized declaration before cross-resource reference resolution.
#[derive(Clone, Debug)]
pub(crate) struct Candidate {
    pub resource: DiscoveredResource,
    /// The relationship source was an identifier reference, not a string.
    pub source_is_ref: bool,
    /// The relationship target was an identifier reference, not a string.
    pub target_is_ref: bool,
}

impl Candidate {
    fn new(resource: DiscoveredResource) -> Self {
        Self {
            resource,
            source_is_ref: false,
            target_is_ref: false,
        }
    }
}

/// Resolves a type to a resource-kind alias.
///
/// References, raw pointers, and `Box`/`Arc`/`Rc` wrappers are stripped and
/// the last path segment is looked up in the alias table.
#[must_use]
pub fn resolve_kind(ty: &Type) -> Option<&'static KindAlias> {
    match ty {
        Type::Reference(r) => resolve_kind(&r.elem),
        Type::Ptr(p) => resolve_kind(&p.elem),
        Type::Paren(p) => resolve_kind(&p.elem),
        Type::Group(g) => resolve_kind(&g.elem),
        Type::Path(tp) => {
            let last = tp.path.segments.last()?;
            let name = ident_name(&last.ident);
            if !TYPE_WRAPPERS.contains(&name.as_str()) {
                return lookup_alias(&name);
            }
            let PathArguments::AngleBracketed(generics) = &last.arguments else {
                return None;
            };
            let mut args = generics.args.iter();
            match (args.next(), args.next()) {
                (Some(GenericArgument::Type(inner)), None) => resolve_kind(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

fn is_cfg_test(attrs: &[Attribute]) -> bool {
    attrs.iter().any(|attr| {
        attr.path().is_ident("cfg") && attr.parse_args::<Ident>().is_ok_and(|i| i == "test")
    })
}

/// Extracts declarations from parsed items.
pub(crate) struct DeclarationAnalyzer<'a> {
    file: &'a FsPath,
}

impl<'a> DeclarationAnalyzer<'a> {
    pub fn new(file: &'a FsPath) -> Self {
        Self { file }
    }

    /// Analyzes every item in the file, including inline modules.
    pub fn analyze(&self, file: &syn::File) -> Vec<Candidate> {
        let mut out = Vec::new();
        self.analyze_items(&file.items, &mut out);
        out
    }

    fn analyze_items(&self, items: &[Item], out: &mut Vec<Candidate>) {
        for item in items {
            match item {
                Item::Struct(s) if !is_cfg_test(&s.attrs) => out.extend(self.analyze_struct(s)),
                Item::Static(s) if !is_cfg_test(&s.attrs) => {
                    out.extend(self.analyze_value(&s.ident, &s.expr));
                }
                Item::Const(c) if !is_cfg_test(&c.attrs) => {
                    out.extend(self.analyze_value(&c.ident, &c.expr));
                }
                Item::Mod(m) if !is_cfg_test(&m.attrs) => {
                    if let Some((_, items)) = &m.content {
                        self.analyze_items(items, out);
                    }
                }
                _ => {}
            }
        }
    }

    fn location(&self, ident: &Ident) -> Location {
        let start = ident.span().start();
        Location::new(self.file, to_u32(start.line), to_u32(start.column + 1))
    }

    // =========================================================================
    // Structural form
    // =========================================================================

    fn analyze_struct(&self, item: &ItemStruct) -> Option<Candidate> {
        let Fields::Unnamed(fields) = &item.fields else {
            return None;
        };
        let alias = fields.unnamed.iter().find_map(|f| resolve_kind(&f.ty))?;
        let name = ident_name(&item.ident);

        let mut resource = DiscoveredResource::new(&name, alias.kind);
        resource.type_name = alias.type_name.to_string();
        resource.location = self.location(&item.ident);

        for dependency in deps::type_candidates(fields.unnamed.iter().map(|f| &f.ty)) {
            if dependency != name {
                resource.add_dependency(dependency);
            }
        }

        Some(Candidate::new(resource))
    }

    // =========================================================================
    // Literal form
    // =========================================================================

    fn analyze_value(&self, ident: &Ident, value: &Expr) -> Option<Candidate> {
        let literal = unwrap_literal(value)?;
        let kind = literal.alias.kind;
        let identifier = ident_name(ident);

        let mut resource = DiscoveredResource::new(&identifier, kind);
        resource.type_name = literal.alias.type_name.to_string();
        resource.location = self.location(ident);

        let mut candidate = Candidate::new(resource);
        let mut label = None;

        for field in literal.fields {
            let value = &field.expr;
            let name = member_name(&field.member);
            let resource = &mut candidate.resource;
            match field_key(&name).as_str() {
                "label" | "name" if label.is_none() && lit_str(value).is_some() => {
                    label = lit_str(value);
                }
                "description" if str_value(value).is_some() => {
                    resource.description = str_value(value);
                }
                "properties" | "props" if kind.is_entity() => {
                    resource.properties =
                        elements(value).iter().filter_map(property_from).collect();
                }
                "constraints" if kind.is_entity() => {
                    resource.constraints =
                        elements(value).iter().filter_map(constraint_from).collect();
                }
                "indexes" | "indices" if kind.is_entity() => {
                    resource.indexes = elements(value).iter().filter_map(index_from).collect();
                }
                "source" | "from" | "start" if kind == ResourceKind::RelationshipType => {
                    if let Some((endpoint_label, is_ref)) = endpoint(value) {
                        resource.source = Some(endpoint_label);
                        candidate.source_is_ref = is_ref;
                    }
                }
                "target" | "to" | "end" if kind == ResourceKind::RelationshipType => {
                    if let Some((endpoint_label, is_ref)) = endpoint(value) {
                        resource.target = Some(endpoint_label);
                        candidate.target_is_ref = is_ref;
                    }
                }
                "agentcontext" | "context"
                    if kind == ResourceKind::Schema && str_value(value).is_some() =>
                {
                    resource.agent_context = str_value(value);
                }
                _ => {
                    if let Some(setting) = setting_from(value) {
                        resource.settings.insert(name, setting);
                    }
                }
            }
        }

        if let Some(label) = label {
            candidate.resource.name = label;
        }

        let values = literal.fields.iter().map(|f| &f.expr).chain(literal.rest);
        for dependency in deps::expr_candidates(values) {
            if dependency != identifier {
                candidate.resource.add_dependency(dependency);
            }
        }

        Some(candidate)
    }
}

/// A struct literal of a kind alias found inside an initializer.
struct Literal<'e> {
    alias: &'static KindAlias,
    fields: &'e Punctuated<FieldValue, Token![,]>,
    rest: Option<&'e Expr>,
}

/// Unwraps `&`, parentheses, constructor calls, closures, and block tails
/// down to a struct literal of a kind alias.
fn unwrap_literal(expr: &Expr) -> Option<Literal<'_>> {
    match expr {
        Expr::Reference(r) => unwrap_literal(&r.expr),
        Expr::Paren(p) => unwrap_literal(&p.expr),
        Expr::Group(g) => unwrap_literal(&g.expr),
        Expr::Call(call) if call.args.len() == 1 && is_constructor(&call.func) => {
            unwrap_literal(call.args.first()?)
        }
        Expr::Closure(closure) => unwrap_literal(&closure.body),
        Expr::Block(block) => match block.block.stmts.last() {
            Some(Stmt::Expr(tail, None)) => unwrap_literal(tail),
            _ => None,
        },
        Expr::Struct(ExprStruct {
            path, fields, rest, ..
        }) => Some(Literal {
            alias: lookup_alias(&last_ident(path)?)?,
            fields,
            rest: rest.as_deref(),
        }),
        _ => None,
    }
}

fn as_path(expr: &Expr) -> Option<&Path> {
    match expr {
        Expr::Path(p) => Some(&p.path),
        _ => None,
    }
}

fn last_ident(path: &Path) -> Option<String> {
    path.segments.last().map(|s| ident_name(&s.ident))
}

fn path_text(path: &Path) -> String {
    path.segments
        .iter()
        .map(|s| ident_name(&s.ident))
        .collect::<Vec<_>>()
        .join("::")
}

fn is_constructor(callee: &Expr) -> bool {
    let Some(path) = as_path(callee) else {
        return false;
    };
    let names: Vec<String> = path.segments.iter().map(|s| ident_name(&s.ident)).collect();
    matches!(
        names.as_slice(),
        [.., wrapper, new] if new == "new" && CONSTRUCTOR_WRAPPERS.contains(&wrapper.as_str())
    )
}

fn is_some_call(callee: &Expr) -> bool {
    as_path(callee).is_some_and(|p| p.is_ident("Some"))
}

fn is_vec_macro(path: &Path) -> bool {
    last_ident(path).is_some_and(|name| name == "vec")
}

fn member_name(member: &Member) -> String {
    match member {
        Member::Named(ident) => ident_name(ident),
        Member::Unnamed(index) => index.index.to_string(),
    }
}

/// Normalizes a field key: lowercase with underscores removed.
pub(crate) fn field_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Strips `&`, parentheses, and single-argument constructor calls.
fn strip(expr: &Expr) -> &Expr {
    match expr {
        Expr::Reference(r) => strip(&r.expr),
        Expr::Paren(p) => strip(&p.expr),
        Expr::Group(g) => strip(&g.expr),
        Expr::Call(call) if call.args.len() == 1 && is_constructor(&call.func) => {
            call.args.first().map_or(expr, strip)
        }
        _ => expr,
    }
}

/// Returns the elements of an array-like value (`&[..]`, `vec![..]`), or the
/// value itself when it is not a list.
fn elements(expr: &Expr) -> Vec<Expr> {
    match strip(expr) {
        Expr::Array(array) => array.elems.iter().cloned().collect(),
        Expr::Macro(m) if is_vec_macro(&m.mac.path) => macro_args(&m.mac).unwrap_or_default(),
        Expr::Tuple(tuple) if tuple.elems.is_empty() => Vec::new(),
        other => vec![other.clone()],
    }
}

fn lit(expr: &Expr) -> Option<&Lit> {
    match expr {
        Expr::Lit(ExprLit { lit, .. }) => Some(lit),
        _ => None,
    }
}

/// A string literal value, quoted or raw, without stripping wrappers.
fn lit_str(expr: &Expr) -> Option<String> {
    match lit(expr)? {
        Lit::Str(s) => Some(s.value()),
        _ => None,
    }
}

fn str_value(expr: &Expr) -> Option<String> {
    lit_str(strip(expr))
}

fn bool_value(expr: &Expr) -> Option<bool> {
    match lit(strip(expr))? {
        Lit::Bool(b) => Some(b.value),
        _ => None,
    }
}

/// Renders a type or kind value: strings as written, paths by last segment,
/// and calls like `PropertyType::List(PropertyType::Float)` as `List<Float>`.
fn type_text(expr: &Expr) -> Option<String> {
    match strip(expr) {
        Expr::Lit(_) => str_value(expr),
        Expr::Path(p) => last_ident(&p.path),
        Expr::Call(call) => {
            let name = last_ident(as_path(&call.func)?)?;
            let args: Vec<String> = call.args.iter().filter_map(type_text).collect();
            Some(format!("{name}<{}>", args.join(", ")))
        }
        _ => None,
    }
}

/// Renders an index option value as text.
fn option_text(expr: &Expr) -> Option<String> {
    match strip(expr) {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Some(s.value()),
            Lit::Int(n) => Some(n.base10_digits().to_string()),
            Lit::Float(n) => n.base10_parse::<f64>().ok().map(|f| f.to_string()),
            Lit::Bool(b) => Some(b.value.to_string()),
            _ => None,
        },
        Expr::Unary(u) if matches!(u.op, UnOp::Neg(_)) => {
            option_text(&u.expr).map(|t| format!("-{t}"))
        }
        Expr::Path(p) => last_ident(&p.path).map(|name| name.to_lowercase()),
        _ => None,
    }
}

/// Reads a property list: an array of strings, or a single string.
fn property_names(expr: &Expr) -> Vec<String> {
    elements(expr).iter().filter_map(str_value).collect()
}

/// Splits a call path into its owner type and method, e.g. `Property::required`.
fn call_parts(callee: &Expr) -> Option<(String, String)> {
    let names: Vec<String> = as_path(callee)?
        .segments
        .iter()
        .map(|s| ident_name(&s.ident))
        .collect();
    match names.as_slice() {
        [.., owner, method] => Some((owner.clone(), method.clone())),
        _ => None,
    }
}

/// Owner, method, and arguments of a constructor-style call.
fn kind_and_subject(call: &syn::ExprCall) -> Option<(String, Option<&Expr>)> {
    let (_, method) = call_parts(&call.func)?;
    let mut args = call.args.iter();
    if method == "new" {
        Some((type_text(args.next()?)?, args.next()))
    } else {
        Some((method, args.next()))
    }
}

// =============================================================================
// Properties
// =============================================================================

fn property_from(expr: &Expr) -> Option<PropertyDef> {
    let mut property = match strip(expr) {
        Expr::Struct(literal) => {
            let mut property = PropertyDef::default();
            for field in &literal.fields {
                let value = &field.expr;
                match field_key(&member_name(&field.member)).as_str() {
                    "name" | "key" | "label" => property.name = str_value(value).unwrap_or_default(),
                    "ty" | "type" | "kind" | "datatype" | "valuetype" => {
                        property.ty = type_text(value).unwrap_or_default();
                    }
                    "required" | "notnull" | "mandatory" => {
                        property.required = bool_value(value).unwrap_or(false);
                    }
                    "unique" => property.unique = bool_value(value).unwrap_or(false),
                    "description" => property.description = str_value(value),
                    _ => {}
                }
            }
            property
        }
        Expr::Call(call) => {
            let (_, method) = call_parts(&call.func)?;
            let mut args = call.args.iter();
            let mut property = PropertyDef::new(
                str_value(args.next()?)?,
                args.next().and_then(type_text).unwrap_or_default(),
            );
            match method.as_str() {
                "new" | "optional" => {}
                "required" => property.required = true,
                "unique" => property.unique = true,
                _ => return None,
            }
            property
        }
        Expr::MethodCall(call) => {
            let mut property = property_from(&call.receiver)?;
            match ident_name(&call.method).as_str() {
                "required" => property.required = true,
                "unique" => property.unique = true,
                "optional" => property.required = false,
                "description" | "with_description" | "describe" => {
                    property.description = call.args.first().and_then(str_value);
                }
                _ => {}
            }
            property
        }
        Expr::Tuple(tuple) if !tuple.elems.is_empty() => {
            let mut items = tuple.elems.iter();
            PropertyDef::new(
                str_value(items.next()?)?,
                items.next().and_then(type_text).unwrap_or_default(),
            )
        }
        other => PropertyDef::new(lit_str(other)?, ""),
    };

    if property.name.is_empty() {
        return None;
    }
    if property.ty.is_empty() {
        property.ty = DEFAULT_PROPERTY_TYPE.to_string();
    }
    Some(property)
}

// =============================================================================
// Constraints
// =============================================================================

fn constraint_from(expr: &Expr) -> Option<ConstraintDef> {
    match strip(expr) {
        Expr::Struct(literal) => {
            let mut constraint = ConstraintDef::default();
            for field in &literal.fields {
                let value = &field.expr;
                match field_key(&member_name(&field.member)).as_str() {
                    "kind" | "type" | "ty" => constraint.kind = type_text(value).unwrap_or_default(),
                    "properties" | "property" | "props" | "fields" => {
                        constraint.properties = property_names(value);
                    }
                    "name" => constraint.name = str_value(value),
                    _ => {}
                }
            }
            Some(constraint)
        }
        Expr::Call(call) => {
            let (kind, properties) = kind_and_subject(call)?;
            Some(ConstraintDef {
                kind,
                properties: properties.map(property_names).unwrap_or_default(),
                name: None,
            })
        }
        Expr::MethodCall(call) => {
            let mut constraint = constraint_from(&call.receiver)?;
            if matches!(ident_name(&call.method).as_str(), "named" | "with_name" | "name") {
                constraint.name = call.args.first().and_then(str_value);
            }
            Some(constraint)
        }
        _ => None,
    }
}

// =============================================================================
// Indexes
// =============================================================================

fn index_from(expr: &Expr) -> Option<IndexDef> {
    match strip(expr) {
        Expr::Struct(literal) => {
            let mut index = IndexDef::default();
            for field in &literal.fields {
                let value = &field.expr;
                let name = member_name(&field.member);
                match field_key(&name).as_str() {
                    "kind" | "type" | "ty" => index.kind = type_text(value).unwrap_or_default(),
                    "properties" | "property" | "props" | "fields" => {
                        index.properties = property_names(value);
                    }
                    "name" => index.name = str_value(value),
                    "options" | "config" => index.options.extend(index_options(value)),
                    _ => {
                        if let Some(text) = option_text(value) {
                            index.options.insert(name, text);
                        }
                    }
                }
            }
            Some(index)
        }
        Expr::Call(call) => {
            let (kind, properties) = kind_and_subject(call)?;
            Some(IndexDef::new(
                kind,
                properties.map(property_names).unwrap_or_default(),
            ))
        }
        Expr::MethodCall(call) => {
            let mut index = index_from(&call.receiver)?;
            let args: Vec<&Expr> = call.args.iter().collect();
            match (ident_name(&call.method).as_str(), args.as_slice()) {
                ("named" | "with_name" | "name", [name]) => index.name = str_value(name),
                ("with_option" | "option", [key, value]) => {
                    if let (Some(key), Some(value)) = (str_value(key), option_text(value)) {
                        index.options.insert(key, value);
                    }
                }
                (key, [value]) => {
                    if let Some(value) = option_text(value) {
                        index.options.insert(key.to_string(), value);
                    }
                }
                _ => {}
            }
            Some(index)
        }
        _ => None,
    }
}

/// Reads index options from `&[("k", "v")]` tuples or a struct literal.
fn index_options(expr: &Expr) -> BTreeMap<String, String> {
    let mut options = BTreeMap::new();
    if let Expr::Struct(literal) = strip(expr) {
        for field in &literal.fields {
            if let Some(value) = option_text(&field.expr) {
                options.insert(member_name(&field.member), value);
            }
        }
        return options;
    }
    for element in elements(expr) {
        let Expr::Tuple(pair) = strip(&element) else {
            continue;
        };
        let pair: Vec<&Expr> = pair.elems.iter().collect();
        if let [key, value] = pair.as_slice() {
            if let (Some(key), Some(value)) = (str_value(key), option_text(value)) {
                options.insert(key, value);
            }
        }
    }
    options
}

// =============================================================================
// Endpoints and settings
// =============================================================================

/// Reads a relationship endpoint: a label string, an identifier reference,
/// or an inline node literal. The flag is true for identifier references.
fn endpoint(expr: &Expr) -> Option<(String, bool)> {
    match strip(expr) {
        Expr::Path(p) => last_ident(&p.path).map(|name| (name, true)),
        Expr::Struct(literal) => literal
            .fields
            .iter()
            .find(|f| matches!(field_key(&member_name(&f.member)).as_str(), "label" | "name"))
            .and_then(|f| str_value(&f.expr))
            .map(|label| (label, false)),
        other => lit_str(other).map(|label| (label, false)),
    }
}

fn list_setting<'e>(items: impl IntoIterator<Item = &'e Expr>) -> Option<Setting> {
    items
        .into_iter()
        .map(setting_from)
        .collect::<Option<Vec<_>>>()
        .map(Setting::List)
}

/// Converts a literal scalar, list, or path value into a [`Setting`].
fn setting_from(expr: &Expr) -> Option<Setting> {
    match strip(expr) {
        Expr::Lit(ExprLit { lit, .. }) => match lit {
            Lit::Str(s) => Some(Setting::Text(s.value())),
            Lit::Int(n) => n.base10_parse::<i64>().ok().map(Setting::Int),
            Lit::Float(n) => n.base10_parse::<f64>().ok().map(Setting::Float),
            Lit::Bool(b) => Some(Setting::Bool(b.value)),
            Lit::Char(c) => Some(Setting::Text(c.value().to_string())),
            _ => None,
        },
        Expr::Unary(u) if matches!(u.op, UnOp::Neg(_)) => match setting_from(&u.expr)? {
            Setting::Int(n) => Some(Setting::Int(-n)),
            Setting::Float(n) => Some(Setting::Float(-n)),
            _ => None,
        },
        Expr::Path(p) => Some(Setting::Ref(path_text(&p.path))),
        Expr::Array(array) => list_setting(&array.elems),
        Expr::Tuple(tuple) => list_setting(&tuple.elems),
        Expr::Macro(m) if is_vec_macro(&m.mac.path) => list_setting(&macro_args(&m.mac)?),
        Expr::Call(call) if call.args.len() == 1 && is_some_call(&call.func) => {
            setting_from(call.args.first()?)
        }
        _ => None,
    }
}
