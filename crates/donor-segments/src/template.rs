//! `{placeholder}` substitution for trigger labels and filter values.
//!
//! `{count}` and `{amount}` are integers, `{percentage}` a short decimal, and
//! any other key is looked up as text in the [`TriggerContext`].

use crate::context::{TriggerContext, UNKNOWN};

const INTEGER_KEYS: &[&str] = &["count", "amount"];
const DECIMAL_KEYS: &[&str] = &["percentage"];

/// How numbers are written into the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// Human-facing: `12,847`.
    Label,
    /// Machine-facing filter values: `12847`.
    Value,
}

pub fn render(template: &str, ctx: &TriggerContext, style: Style) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        out.push_str(&rest[..open]);
        let key = rest[open + 1..open + close].trim();
        out.push_str(&placeholder(key, ctx, style));
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

fn placeholder(key: &str, ctx: &TriggerContext, style: Style) -> String {
    if INTEGER_KEYS.contains(&key) {
        let n = ctx.number(key);
        match style {
            Style::Label => format_count(n),
            Style::Value => format_integer(n),
        }
    } else if DECIMAL_KEYS.contains(&key) {
        format_decimal(ctx.number(key))
    } else {
        ctx.text(key).unwrap_or_else(|| UNKNOWN.to_string())
    }
}

/// Placeholder names in `template`, or a description of the first syntax error.
pub fn placeholders(template: &str) -> Result<Vec<&str>, String> {
    let mut keys = Vec::new();
    let mut rest = template;
    loop {
        let open = rest.find('{');
        let close = rest.find('}');
        match (open, close) {
            (None, None) => return Ok(keys),
            (None, Some(_)) => return Err("unmatched '}'".into()),
            (Some(o), Some(c)) if c < o => return Err("unmatched '}'".into()),
            (Some(_), None) => return Err("unclosed '{'".into()),
            (Some(o), Some(c)) => {
                let key = rest[o + 1..c].trim();
                if key.is_empty() || key.contains('{') {
                    return Err(format!("bad placeholder {:?}", &rest[o..=c]));
                }
                keys.push(key);
                rest = &rest[c + 1..];
            }
        }
    }
}

/// Round to an integer and group thousands with commas. Non-finite input is `0`.
pub fn format_count(n: f64) -> String {
    let digits = format_integer(n);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", digits.as_str()),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}

fn format_integer(n: f64) -> String {
    if !n.is_finite() {
        return "0".into();
    }
    format!("{}", n.round() as i64)
}

fn format_decimal(n: f64) -> String {
    if !n.is_finite() {
        return "0".into();
    }
    let s = format!("{n:.1}");
    match s.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => s,
    }
}
