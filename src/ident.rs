//! Python identifier checks, used when strict generation is requested.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

// Python 3 hard keywords.
const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from",
    "global", "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass",
    "raise", "return", "try", "while", "with", "yield",
];

/// Field names are also `__init__` parameter names next to `self`.
const RESERVED_PARAMS: &[&str] = &["self"];

pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Field names additionally become method parameters, so `self` is out.
pub fn check_field_name(name: &str) -> Result<()> {
    check_identifier("field", name)?;
    if RESERVED_PARAMS.contains(&name) {
        return Err(Error::InvalidIdentifier {
            role: "field",
            name: name.to_string(),
            reason: "clashes with the implicit `self` parameter",
        });
    }
    Ok(())
}

pub fn check_identifier(role: &'static str, name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "empty name"
    } else if !IDENTIFIER.is_match(name) {
        "must start with a letter or `_` and contain only ASCII letters, digits and `_`"
    } else if is_keyword(name) {
        "reserved Python keyword"
    } else {
        return Ok(());
    };
    Err(Error::InvalidIdentifier { role, name: name.to_string(), reason })
}
