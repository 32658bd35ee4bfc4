use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::value::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Header-click transition.
    ///
    /// Clicking the active field flips its direction; clicking any other
    /// field (or the first click) starts a fresh descending sort. There is no
    /// transition back to "unsorted".
    pub fn toggle(current: Option<&SortConfig>, field: &str) -> SortConfig {
        match current {
            Some(active) if active.field == field => {
                SortConfig::new(field, active.direction.flipped())
            }
            _ => SortConfig::new(field, SortDirection::Desc),
        }
    }
}

/// Header sort state for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    current: Option<SortConfig>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SortConfig> {
        self.current.as_ref()
    }

    pub fn click(&mut self, field: &str) -> &SortConfig {
        let next = SortConfig::toggle(self.current.as_ref(), field);
        debug!(field, direction = ?next.direction, "sort toggled");
        self.current.insert(next)
    }

    pub fn apply<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        sort_records(records, self.current.as_ref())
    }
}

/// Order `records` by `config.field`, leaving the input untouched.
///
/// With no config the input order comes back unchanged. The sort is stable,
/// so records that compare equal keep their relative order.
pub fn sort_records<'a, R: Record>(records: &'a [R], config: Option<&SortConfig>) -> Vec<&'a R> {
    let mut sorted: Vec<&R> = records.iter().collect();
    if let Some(config) = config {
        sorted.sort_by(|a, b| {
            let ord = compare_values(
                a.field(&config.field).as_ref(),
                b.field(&config.field).as_ref(),
            );
            config.direction.apply(ord)
        });
    }
    sorted
}

/// Ascending comparison of two field values.
///
/// Values rank by kind first: missing, then numbers, then booleans, then
/// text. Numbers compare with `f64::total_cmp`; text compares
/// case-sensitively. This is a total order, so columns mixing numbers and
/// numeric strings still sort.
pub fn compare_values(a: Option<&FieldValue<'_>>, b: Option<&FieldValue<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => match (x, y) {
            (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
            (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
            (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
            _ => rank(x).cmp(&rank(y)),
        },
    }
}

fn rank(value: &FieldValue<'_>) -> u8 {
    match value {
        FieldValue::Number(_) => 0,
        FieldValue::Bool(_) => 1,
        FieldValue::Text(_) => 2,
    }
}
