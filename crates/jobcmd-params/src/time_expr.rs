//! `$[...]` date expressions, e.g. `$[yyyyMMdd]`, `$[yyyy-MM-dd-1]`,
//! `$[HHmmss+1/24]`, `$[add_months(yyyyMMdd,-1)]`.

use chrono::{Duration, Months, NaiveDateTime};

const OPEN: &str = "$[";
const CLOSE: char = ']';

/// Rewrite every evaluable `$[...]` relative to `base`; others stay verbatim.
pub fn replace_time_expressions(text: &str, base: NaiveDateTime) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            out.push_str(&rest[start..]);
            return out;
        };
        let body = &after[..end];
        // bodies mentioning `$` may still hold placeholders; leave them be
        let value = if body.contains('$') { None } else { evaluate(body, base) };
        match value {
            Some(value) => out.push_str(&value),
            None => out.push_str(&rest[start..start + OPEN.len() + end + 1]),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

pub fn evaluate(expr: &str, base: NaiveDateTime) -> Option<String> {
    let expr = expr.trim();
    if let Some(inner) = expr.strip_prefix("add_months(").and_then(|s| s.strip_suffix(')')) {
        let (pattern, n) = inner.rsplit_once(',')?;
        let n: i32 = n.trim().parse().ok()?;
        let shifted = if n >= 0 {
            base.checked_add_months(Months::new(n.unsigned_abs()))?
        } else {
            base.checked_sub_months(Months::new(n.unsigned_abs()))?
        };
        return format_pattern(pattern.trim(), shifted);
    }

    let (pattern, offset) = split_offset(expr);
    let at = match offset {
        Some(d) => base.checked_add_signed(d)?,
        None => base,
    };
    format_pattern(pattern, at)
}

/// `yyyyMMdd-1` -> (`yyyyMMdd`, -1 day). A trailing sign only counts as an
/// offset when what follows it parses as one.
fn split_offset(expr: &str) -> (&str, Option<Duration>) {
    if let Some(idx) = expr.rfind(['+', '-']) {
        let (pattern, tail) = expr.split_at(idx);
        if !pattern.is_empty() {
            if let Some(d) = parse_offset(tail) {
                return (pattern, Some(d));
            }
        }
    }
    (expr, None)
}

fn parse_offset(tail: &str) -> Option<Duration> {
    let negative = tail.starts_with('-');
    let parts: Vec<&str> = tail[1..].split('/').collect();
    if parts[0].is_empty() || !parts[0].bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n = i64::from(parts[0].parse::<u32>().ok()?);
    let n = if negative { -n } else { n };
    match &parts[1..] {
        [] => Some(Duration::days(n)),
        ["24"] => Some(Duration::hours(n)),
        ["24", "60"] => Some(Duration::minutes(n)),
        _ => None,
    }
}

/// Translate a `yyyyMMddHHmmss`-style pattern to strftime and render it.
/// Patterns without any date field are rejected.
fn format_pattern(pattern: &str, at: NaiveDateTime) -> Option<String> {
    const FIELDS: [(&str, &str); 6] = [
        ("yyyy", "%Y"),
        ("MM", "%m"),
        ("dd", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut fmt = String::with_capacity(pattern.len() * 2);
    let mut fields = 0;
    let mut rest = pattern;
    'outer: while let Some(c) = rest.chars().next() {
        for (field, spec) in FIELDS {
            if let Some(tail) = rest.strip_prefix(field) {
                fmt.push_str(spec);
                fields += 1;
                rest = tail;
                continue 'outer;
            }
        }
        if c == '%' {
            fmt.push_str("%%");
        } else {
            fmt.push(c);
        }
        rest = &rest[c.len_utf8()..];
    }

    if fields == 0 {
        return None;
    }
    Some(at.format(&fmt).to_string())
}
