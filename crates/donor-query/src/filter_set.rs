use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::filter::{Filter, FilterGroup, FilterId, FilterNode, LogicalOp};
use crate::operator::Operator;
use crate::value::Record;

/// The active filters of one search.
///
/// A filter set is always read as a conjunction: a record is in the result
/// only when every filter matches it. Anything needing OR semantics goes
/// through an explicit [`FilterGroup`] instead of this flat list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from builder-form input and append it.
    ///
    /// No operator/value compatibility check happens here; see
    /// [`Filter::validate`].
    pub fn add_filter(
        &mut self,
        field: impl Into<String>,
        operator: Operator,
        value: impl Into<String>,
    ) -> Filter {
        let filter = Filter::new(field, operator, value);
        debug!(id = %filter.id(), label = filter.label(), "filter added");
        self.filters.push(filter.clone());
        filter
    }

    /// Remove a filter by id. Absent ids are a no-op.
    pub fn remove_filter(&mut self, id: &FilterId) -> Option<Filter> {
        let pos = self.filters.iter().position(|f| f.id() == id)?;
        Some(self.filters.remove(pos))
    }

    pub fn clear_all(&mut self) {
        self.filters.clear();
    }

    /// Replace the whole set with a preset. Presets never merge with what was
    /// there before.
    pub fn apply_preset(&mut self, preset: Vec<Filter>) {
        self.filters.clear();
        self.extend(preset);
    }

    /// Append filters, skipping any whose id is already in the set.
    pub fn extend(&mut self, filters: impl IntoIterator<Item = Filter>) {
        for filter in filters {
            if self.contains(filter.id()) {
                debug!(id = %filter.id(), "skipping filter with duplicate id");
                continue;
            }
            self.filters.push(filter);
        }
    }

    pub fn contains(&self, id: &FilterId) -> bool {
        self.filters.iter().any(|f| f.id() == id)
    }

    pub fn get(&self, id: &FilterId) -> Option<&Filter> {
        self.filters.iter().find(|f| f.id() == id)
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn into_vec(self) -> Vec<Filter> {
        self.filters
    }

    /// `true` when every filter matches. An empty set matches everything.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }

    /// Keep the records that satisfy the whole set, in their original order.
    pub fn select<'a, R: Record>(&self, records: &'a [R]) -> Vec<&'a R> {
        records.iter().filter(|r| self.matches(*r)).collect()
    }

    /// The set as an explicit `And` tree.
    pub fn to_group(&self) -> FilterGroup {
        FilterGroup {
            logical: LogicalOp::And,
            children: self
                .filters
                .iter()
                .cloned()
                .map(FilterNode::Condition)
                .collect(),
        }
    }
}

impl From<Vec<Filter>> for FilterSet {
    fn from(filters: Vec<Filter>) -> Self {
        let mut set = FilterSet::new();
        set.extend(filters);
        set
    }
}

impl<'a> IntoIterator for &'a FilterSet {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
