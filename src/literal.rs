//! Python literal spelling of primitive values.
use std::fmt::Write;

use crate::model::{Number, Primitive};

pub fn python_literal(value: &Primitive) -> String {
    match value {
        Primitive::String(s) => quote_str(s),
        Primitive::Bool(true) => "True".to_string(),
        Primitive::Bool(false) => "False".to_string(),
        Primitive::Number(n) => number_literal(*n),
        Primitive::Null => "None".to_string(),
    }
}

/// Single-quoted string literal. Non-ASCII text is kept as-is (UTF-8 source).
pub fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

pub fn number_literal(n: Number) -> String {
    match n {
        Number::Int(i) => i.to_string(),
        Number::UInt(u) => u.to_string(),
        Number::Float(f) if f.is_nan() => "float('nan')".to_string(),
        Number::Float(f) if f.is_infinite() => {
            if f > 0.0 { "float('inf')".to_string() } else { "-float('inf')".to_string() }
        }
        // Debug is the shortest round-trip form and always keeps a `.` or exponent
        Number::Float(f) => format!("{f:?}"),
    }
}
