use std::borrow::Cow;

use bson::Bson;
use serde_json::{Map, Value};

/// A field value read out of a record, borrowed where the record allows it.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(Cow<'a, str>),
    Bool(bool),
}

impl FieldValue<'_> {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric reading used by filter predicates: numbers as-is, text parsed
    /// leniently (`$1,000` reads as 1000), booleans never.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => parse_number(s),
            FieldValue::Bool(_) => None,
        }
    }

    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(s) => Cow::Borrowed(s.as_ref()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        }
    }
}

/// Anything the sort engine and filter predicates can read fields from.
pub trait Record {
    /// Value of `field`, or `None` when the field is missing or null.
    fn field(&self, field: &str) -> Option<FieldValue<'_>>;
}

impl Record for bson::Document {
    fn field(&self, field: &str) -> Option<FieldValue<'_>> {
        match self.get(field)? {
            Bson::Null | Bson::Undefined => None,
            Bson::Double(d) => Some(FieldValue::Number(*d)),
            Bson::Int32(i) => Some(FieldValue::Number(f64::from(*i))),
            Bson::Int64(i) => Some(FieldValue::Number(*i as f64)),
            Bson::Boolean(b) => Some(FieldValue::Bool(*b)),
            Bson::String(s) => Some(FieldValue::Text(Cow::Borrowed(s))),
            Bson::DateTime(dt) => Some(FieldValue::Number(dt.timestamp_millis() as f64)),
            other => Some(FieldValue::Text(Cow::Owned(other.to_string()))),
        }
    }
}

impl Record for Map<String, Value> {
    fn field(&self, field: &str) -> Option<FieldValue<'_>> {
        match self.get(field)? {
            Value::Null => None,
            Value::Bool(b) => Some(FieldValue::Bool(*b)),
            Value::Number(n) => n.as_f64().map(FieldValue::Number),
            Value::String(s) => Some(FieldValue::Text(Cow::Borrowed(s))),
            other => Some(FieldValue::Text(Cow::Owned(other.to_string()))),
        }
    }
}

impl Record for Value {
    fn field(&self, field: &str) -> Option<FieldValue<'_>> {
        self.as_object()?.field(field)
    }
}

/// Lenient number parsing for user-entered values: trims, drops a leading
/// `$`, thousands separators and a trailing `%`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let cleaned: String = trimmed.chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use serde_json::json;

    #[test]
    fn bson_numbers_widen_to_f64() {
        let d = doc! { "a": 3_i32, "b": 4_i64, "c": 2.5, "name": "Ada", "ok": true, "gone": Bson::Null };
        assert_eq!(d.field("a"), Some(FieldValue::Number(3.0)));
        assert_eq!(d.field("b"), Some(FieldValue::Number(4.0)));
        assert_eq!(d.field("c"), Some(FieldValue::Number(2.5)));
        assert_eq!(d.field("name"), Some(FieldValue::Text(Cow::Borrowed("Ada"))));
        assert_eq!(d.field("ok"), Some(FieldValue::Bool(true)));
        assert_eq!(d.field("gone"), None);
        assert_eq!(d.field("missing"), None);
    }

    #[test]
    fn json_objects_are_records() {
        let v = json!({ "totalGifts": 1200, "state": "TX" });
        assert_eq!(v.field("totalGifts").and_then(|f| f.as_number()), Some(1200.0));
        assert_eq!(v.field("state").unwrap().to_text(), "TX");
        assert_eq!(json!([1, 2]).field("0"), None);
    }

    #[test]
    fn lenient_number_parsing() {
        assert_eq!(parse_number("$1,000"), Some(1000.0));
        assert_eq!(parse_number(" 42 "), Some(42.0));
        assert_eq!(parse_number("12.5%"), Some(12.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("NaN"), None);
    }

    #[test]
    fn text_form_of_values() {
        assert_eq!(FieldValue::Number(12847.0).to_text(), "12847");
        assert_eq!(FieldValue::Number(2.5).to_text(), "2.5");
        assert_eq!(FieldValue::Bool(false).to_text(), "false");
    }
}
