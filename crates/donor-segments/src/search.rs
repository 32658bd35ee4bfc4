use donor_query::{Filter, FilterSet};
use serde::{Deserialize, Serialize};

/// Context label used when a trigger resolves to nothing specific.
pub const DEFAULT_CONTEXT: &str = "Search Results";

/// Which result table a search targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    #[default]
    People,
    Money,
    Events,
    Pledges,
}

/// The resolved search: what to look at, the filters to AND together, and
/// a label for the header.
///
/// `context` is fixed at trigger time; later edits to `filters` do not
/// rewrite it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(rename = "type")]
    pub entity: EntityType,
    pub filters: Vec<Filter>,
    pub context: String,
}

impl SearchConfig {
    pub fn fallback() -> Self {
        Self {
            entity: EntityType::People,
            filters: Vec::new(),
            context: DEFAULT_CONTEXT.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.entity == EntityType::People
            && self.filters.is_empty()
            && self.context == DEFAULT_CONTEXT
    }

    pub fn filter_set(&self) -> FilterSet {
        FilterSet::from(self.filters.clone())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::fallback()
    }
}
