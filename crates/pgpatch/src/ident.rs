//! Quoted SQL identifier rendering.
//!
//! Column and table names are interpolated into the generated SQL (only values
//! travel as bind parameters), so every name is wrapped in double quotes:
//!
//! - empty names and names containing NUL are rejected
//! - an embedded `"` is escaped as `""`, or rejected under [`QuotePolicy::Reject`]
//!
//! # Example
//! ```ignore
//! use pgpatch::{QuotePolicy, quote_ident};
//!
//! assert_eq!(quote_ident("first_name", QuotePolicy::Escape)?, r#""first_name""#);
//! assert_eq!(quote_ident(r#"odd"name"#, QuotePolicy::Escape)?, r#""odd""name""#);
//! # Ok::<(), pgpatch::PatchError>(())
//! ```

use crate::config::QuotePolicy;
use crate::error::{PatchError, PatchResult};

/// Quote a single identifier.
pub fn quote_ident(name: &str, policy: QuotePolicy) -> PatchResult<String> {
    let mut out = String::with_capacity(name.len() + 2);
    write_quoted(&mut out, name, policy)?;
    Ok(out)
}

/// Append `name` to `out` as a quoted identifier.
///
/// On error nothing is written.
pub(crate) fn write_quoted(out: &mut String, name: &str, policy: QuotePolicy) -> PatchResult<()> {
    if name.is_empty() {
        return Err(PatchError::validation("Identifier cannot be empty"));
    }
    if name.contains('\0') {
        return Err(PatchError::validation(
            "Identifier cannot contain NUL character",
        ));
    }
    if policy == QuotePolicy::Reject && name.contains('"') {
        return Err(PatchError::validation(format!(
            "Identifier cannot contain '\"': {name}"
        )));
    }

    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    Ok(())
}
