use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::merge::{PARAMETER_DATETIME, PARAMETER_FORMAT_TIME};
use crate::time_expr::replace_time_expressions;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Replace `${name}` placeholders, then `$[...]` time expressions.
///
/// Unknown names stay verbatim. Substituted values are not rescanned, so a
/// second run with the same mapping is a no-op unless a value itself spells a
/// known placeholder. Time expressions are only evaluated when the mapping
/// carries `system.datetime`.
pub fn substitute(text: &str, params: &BTreeMap<String, String>) -> String {
    let replaced = replace_placeholders(text, params);
    match params.get(PARAMETER_DATETIME).and_then(|s| parse_datetime(s)) {
        Some(base) => replace_time_expressions(&replaced, base),
        None => replaced,
    }
}

pub fn replace_placeholders(text: &str, params: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        // an opener inside the name means this one is unterminated
        if name.contains(OPEN) {
            out.push_str(OPEN);
            rest = after;
            continue;
        }
        match params.get(name) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + OPEN.len() + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, PARAMETER_FORMAT_TIME)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}
