//! Parsing declaration source into a `syn` syntax tree.

use graphdecl_foundation::{Error, Result};

/// Parses a whole source file.
///
/// # Errors
/// Returns a parse error positioned at the offending token, carrying the
/// source line it sits on.
pub fn parse_source(source: &str) -> Result<syn::File> {
    syn::parse_file(source).map_err(|err| parse_error(source, &err))
}

fn parse_error(source: &str, err: &syn::Error) -> Error {
    let start = err.span().start();
    let context = start
        .line
        .checked_sub(1)
        .and_then(|index| source.lines().nth(index))
        .unwrap_or_default()
        .to_string();
    Error::parse(
        err.to_string(),
        to_u32(start.line),
        to_u32(start.column + 1),
        context,
    )
}

/// Saturating conversion for line and column numbers.
pub(crate) fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
