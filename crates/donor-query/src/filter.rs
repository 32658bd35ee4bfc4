use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use serde::{Deserialize, Serialize};

use crate::error::FilterError;
use crate::field::field_label;
use crate::operator::Operator;
use crate::value::{FieldValue, Record, parse_number};

static NEXT_FILTER_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of a filter, unique within the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterId(String);

impl FilterId {
    /// Mint a fresh id. Monotonic across every filter set in the process.
    pub fn next() -> Self {
        let n = NEXT_FILTER_ID.fetch_add(1, AtomicOrdering::Relaxed);
        FilterId(format!("f-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FilterId {
    fn from(s: &str) -> Self {
        FilterId(s.to_string())
    }
}

impl From<String> for FilterId {
    fn from(s: String) -> Self {
        FilterId(s)
    }
}

impl fmt::Display for FilterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single `field operator value` predicate with its derived display label.
///
/// Filters are immutable: there are no setters, so the label computed at
/// construction always matches the field, operator and value. Deserializing
/// a filter recomputes the label and ignores any label in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "FilterSpec")]
pub struct Filter {
    id: FilterId,
    field: String,
    operator: Operator,
    value: String,
    label: String,
}

/// Wire shape accepted when deserializing a [`Filter`].
#[derive(Debug, Clone, Deserialize)]
struct FilterSpec {
    #[serde(default)]
    id: Option<FilterId>,
    field: String,
    operator: Operator,
    #[serde(default)]
    value: String,
}

impl From<FilterSpec> for Filter {
    fn from(spec: FilterSpec) -> Self {
        let id = spec.id.unwrap_or_else(FilterId::next);
        Filter::with_id(id, spec.field, spec.operator, spec.value)
    }
}

impl Filter {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self::with_id(FilterId::next(), field, operator, value)
    }

    pub fn with_id(
        id: FilterId,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let value = value.into();
        let label = format_label(&field, operator, &value);
        Self {
            id,
            field,
            operator,
            value,
            label,
        }
    }

    pub fn id(&self) -> &FilterId {
        &self.id
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Evaluate this filter against one record.
    ///
    /// A missing field fails every operator except `isEmpty` and `notIn`.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        match record.field(&self.field) {
            Some(actual) => self.test(&actual),
            None => matches!(self.operator, Operator::IsEmpty | Operator::NotIn),
        }
    }

    fn test(&self, actual: &FieldValue<'_>) -> bool {
        let needle = self.value.to_lowercase();
        match self.operator {
            Operator::Equals => value_equals(actual, &self.value),
            Operator::Contains => actual.to_text().to_lowercase().contains(&needle),
            Operator::StartsWith => actual.to_text().to_lowercase().starts_with(&needle),
            Operator::EndsWith => actual.to_text().to_lowercase().ends_with(&needle),
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte => {
                let (Some(lhs), Some(rhs)) = (actual.numeric(), parse_number(&self.value)) else {
                    return false;
                };
                let Some(ord) = lhs.partial_cmp(&rhs) else {
                    return false;
                };
                match self.operator {
                    Operator::Gt => ord == Ordering::Greater,
                    Operator::Gte => ord != Ordering::Less,
                    Operator::Lt => ord == Ordering::Less,
                    _ => ord != Ordering::Greater,
                }
            }
            Operator::Between => match (actual.numeric(), parse_range(&self.value)) {
                (Some(n), Some((lo, hi))) => lo <= n && n <= hi,
                _ => false,
            },
            Operator::In => list_items(&self.value).any(|item| value_equals(actual, item)),
            Operator::NotIn => !list_items(&self.value).any(|item| value_equals(actual, item)),
            Operator::IsEmpty => is_blank(Some(actual)),
            Operator::IsNotEmpty => !is_blank(Some(actual)),
        }
    }

    /// Check that the value has the shape the operator expects.
    ///
    /// Construction never calls this; it is an opt-in check for callers that
    /// want to reject a filter before running it.
    pub fn validate(&self) -> Result<(), FilterError> {
        let op = self.operator;
        if !op.takes_value() {
            return Ok(());
        }
        if self.value.trim().is_empty() {
            return Err(FilterError::MissingValue {
                field: self.field.clone(),
                operator: op,
            });
        }
        match op {
            Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
                if parse_number(&self.value).is_none() =>
            {
                Err(FilterError::NonNumericValue {
                    field: self.field.clone(),
                    operator: op,
                    value: self.value.clone(),
                })
            }
            Operator::Between if parse_range(&self.value).is_none() => {
                Err(FilterError::MalformedRange {
                    field: self.field.clone(),
                    value: self.value.clone(),
                })
            }
            Operator::In | Operator::NotIn if list_items(&self.value).next().is_none() => {
                Err(FilterError::EmptyList {
                    field: self.field.clone(),
                    operator: op,
                })
            }
            _ => Ok(()),
        }
    }
}

/// The fixed label rule: `"{fieldLabel} {operatorLabel} {value}"`.
///
/// The value is left off for `isEmpty` / `isNotEmpty`.
pub fn format_label(field: &str, operator: Operator, value: &str) -> String {
    if operator.takes_value() {
        format!("{} {} {}", field_label(field), operator.label(), value)
    } else {
        format!("{} {}", field_label(field), operator.label())
    }
}

fn is_blank(value: Option<&FieldValue<'_>>) -> bool {
    match value {
        None => true,
        Some(FieldValue::Text(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

fn value_equals(actual: &FieldValue<'_>, expected: &str) -> bool {
    match actual {
        FieldValue::Number(n) => parse_number(expected).is_some_and(|e| *n == e),
        FieldValue::Bool(b) => expected
            .trim()
            .eq_ignore_ascii_case(if *b { "true" } else { "false" }),
        FieldValue::Text(s) => s.trim().eq_ignore_ascii_case(expected.trim()),
    }
}

fn list_items(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

/// Parse `lo,hi`, `lo and hi` or `lo-hi` into an ordered inclusive range.
fn parse_range(raw: &str) -> Option<(f64, f64)> {
    let lower = raw.trim().to_lowercase();
    let (lo, hi) = if let Some(parts) = lower.split_once(',') {
        parts
    } else if let Some(parts) = lower.split_once(" and ") {
        parts
    } else {
        // Skip index 0 so a leading minus sign is not taken as the separator.
        let (idx, _) = lower.char_indices().skip(1).find(|(_, c)| *c == '-')?;
        (&lower[..idx], &lower[idx + 1..])
    };
    let (lo, hi) = (parse_number(lo)?, parse_number(hi)?);
    Some(if lo <= hi { (lo, hi) } else { (hi, lo) })
}

// ── Filter trees ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterNode {
    Condition(Filter),
    Group(FilterGroup),
}

/// A nested predicate tree. A flat filter set is always an `And` group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterGroup {
    pub logical: LogicalOp,
    pub children: Vec<FilterNode>,
}

impl FilterGroup {
    /// An empty `And` group matches everything; an empty `Or` group matches nothing.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        let mut results = self.children.iter().map(|child| match child {
            FilterNode::Condition(filter) => filter.matches(record),
            FilterNode::Group(group) => group.matches(record),
        });
        match self.logical {
            LogicalOp::And => results.all(|r| r),
            LogicalOp::Or => results.any(|r| r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;

    #[test]
    fn valueless_and_negated_operators_on_present_and_missing_fields() {
        let blank = doc! { "email": "  " };
        let filled = doc! { "email": "a@b.org", "state": "OH" };
        let missing = doc! {};

        let empty = Filter::new("email", Operator::IsEmpty, "");
        assert!(empty.matches(&blank));
        assert!(empty.matches(&missing));
        assert!(!empty.matches(&filled));

        let not_empty = Filter::new("email", Operator::IsNotEmpty, "");
        assert!(!not_empty.matches(&blank));
        assert!(!not_empty.matches(&missing));
        assert!(not_empty.matches(&filled));

        let not_in = Filter::new("state", Operator::NotIn, "TX, CA");
        assert!(not_in.matches(&filled));
        assert!(not_in.matches(&missing));
        assert!(!not_in.matches(&doc! { "state": "TX" }));
    }

    #[test]
    fn label_follows_fixed_rule() {
        let f = Filter::new("totalGifts", Operator::Gte, "1000");
        assert_eq!(f.label(), "Total Gifts >= 1000");

        let f = Filter::new("state", Operator::Equals, "TX");
        assert_eq!(f.label(), "State = TX");

        let f = Filter::new("email", Operator::IsEmpty, "");
        assert_eq!(f.label(), "Email is empty");

        let f = Filter::new("nickname", Operator::StartsWith, "Bo");
        assert_eq!(f.label(), "nickname starts with Bo");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = Filter::new("state", Operator::Equals, "TX");
        let b = Filter::new("state", Operator::Equals, "TX");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn deserializing_recomputes_label() {
        let json = r#"{"id":"x1","field":"party","operator":"equals","value":"Republican","label":"stale"}"#;
        let f: Filter = serde_json::from_str(json).unwrap();
        assert_eq!(f.id().as_str(), "x1");
        assert_eq!(f.label(), "Party = Republican");
    }

    #[test]
    fn deserializing_without_id_mints_one() {
        let json = r#"{"field":"email","operator":"isNotEmpty"}"#;
        let f: Filter = serde_json::from_str(json).unwrap();
        assert!(f.id().as_str().starts_with("f-"));
        assert_eq!(f.value(), "");
    }

    #[test]
    fn text_operators_ignore_case() {
        let d = doc! { "city": "San Antonio" };
        assert!(Filter::new("city", Operator::Equals, "san antonio").matches(&d));
        assert!(Filter::new("city", Operator::Contains, "ANTON").matches(&d));
        assert!(Filter::new("city", Operator::StartsWith, "san").matches(&d));
        assert!(Filter::new("city", Operator::EndsWith, "nio").matches(&d));
        assert!(!Filter::new("city", Operator::EndsWith, "san").matches(&d));
    }

    #[test]
    fn numeric_operators() {
        let d = doc! { "totalGifts": 1500.0 };
        assert!(Filter::new("totalGifts", Operator::Gte, "1000").matches(&d));
        assert!(Filter::new("totalGifts", Operator::Gte, "$1,500").matches(&d));
        assert!(!Filter::new("totalGifts", Operator::Gt, "1500").matches(&d));
        assert!(Filter::new("totalGifts", Operator::Lte, "1500").matches(&d));
        assert!(Filter::new("totalGifts", Operator::Lt, "2000").matches(&d));
        assert!(!Filter::new("totalGifts", Operator::Gt, "lots").matches(&d));
    }

    #[test]
    fn between_is_inclusive_and_accepts_several_spellings() {
        let d = doc! { "giftCount": 5_i32 };
        assert!(Filter::new("giftCount", Operator::Between, "1,5").matches(&d));
        assert!(Filter::new("giftCount", Operator::Between, "5 and 10").matches(&d));
        assert!(Filter::new("giftCount", Operator::Between, "10-1").matches(&d));
        assert!(!Filter::new("giftCount", Operator::Between, "6,9").matches(&d));
    }

    #[test]
    fn emptiness_and_lists() {
        let d = doc! { "email": "  ", "phone": "555-0100", "state": "CA" };
        assert!(Filter::new("email", Operator::IsEmpty, "").matches(&d));
        assert!(Filter::new("fax", Operator::IsEmpty, "").matches(&d));
        assert!(Filter::new("phone", Operator::IsNotEmpty, "").matches(&d));
        assert!(Filter::new("state", Operator::In, "tx, ca").matches(&d));
        assert!(!Filter::new("state", Operator::NotIn, "TX,CA").matches(&d));
        assert!(Filter::new("region", Operator::NotIn, "north").matches(&d));
        assert!(!Filter::new("region", Operator::In, "north").matches(&d));
    }

    #[test]
    fn booleans_compare_to_literal_true_false() {
        let d = doc! { "donorStatus": true };
        assert!(Filter::new("donorStatus", Operator::Equals, "true").matches(&d));
        assert!(!Filter::new("donorStatus", Operator::Equals, "false").matches(&d));
    }

    #[test]
    fn validate_reports_operator_value_mismatches() {
        assert!(Filter::new("totalGifts", Operator::Gte, "1000").validate().is_ok());
        assert!(Filter::new("email", Operator::IsEmpty, "").validate().is_ok());
        assert!(matches!(
            Filter::new("totalGifts", Operator::Gte, "many").validate(),
            Err(FilterError::NonNumericValue { .. })
        ));
        assert!(matches!(
            Filter::new("giftCount", Operator::Between, "5").validate(),
            Err(FilterError::MalformedRange { .. })
        ));
        assert!(matches!(
            Filter::new("state", Operator::In, " , ").validate(),
            Err(FilterError::EmptyList { .. })
        ));
        assert!(matches!(
            Filter::new("state", Operator::Equals, " ").validate(),
            Err(FilterError::MissingValue { .. })
        ));
    }

    #[test]
    fn or_groups_match_any_child() {
        let d = doc! { "party": "Independent" };
        let group = FilterGroup {
            logical: LogicalOp::Or,
            children: vec![
                FilterNode::Condition(Filter::new("party", Operator::Equals, "Republican")),
                FilterNode::Condition(Filter::new("party", Operator::Equals, "Independent")),
            ],
        };
        assert!(group.matches(&d));

        let empty_or = FilterGroup {
            logical: LogicalOp::Or,
            children: vec![],
        };
        assert!(!empty_or.matches(&d));
    }
}
