use donor_query::{Filter, Operator, parse_number};
use serde::{Deserialize, Serialize};

use crate::context::TriggerContext;
use crate::error::SegmentError;
use crate::search::{EntityType, SearchConfig};
use crate::template::{self, Style};

/// One filter of a trigger rule. `value` may contain `{placeholders}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterTemplate {
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: String,
}

impl FilterTemplate {
    pub fn new(field: &str, operator: Operator, value: &str) -> Self {
        Self {
            field: field.to_string(),
            operator,
            value: value.to_string(),
        }
    }

    pub fn instantiate(&self, ctx: &TriggerContext) -> Filter {
        let value = template::render(&self.value, ctx, Style::Value);
        Filter::new(self.field.as_str(), self.operator, value)
    }
}

/// Immutable description of what a trigger resolves to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerRule {
    pub id: String,
    #[serde(rename = "type", default)]
    pub entity: EntityType,
    #[serde(default)]
    pub filters: Vec<FilterTemplate>,
    pub label: String,
}

impl TriggerRule {
    pub fn new(id: &str, entity: EntityType, label: &str) -> Self {
        Self {
            id: id.to_string(),
            entity,
            filters: Vec::new(),
            label: label.to_string(),
        }
    }

    pub fn filter(mut self, field: &str, operator: Operator, value: &str) -> Self {
        self.filters.push(FilterTemplate::new(field, operator, value));
        self
    }

    /// Build the search this rule describes. Every call mints fresh filter ids.
    pub fn apply(&self, ctx: &TriggerContext) -> SearchConfig {
        SearchConfig {
            entity: self.entity,
            filters: self.filters.iter().map(|t| t.instantiate(ctx)).collect(),
            context: template::render(&self.label, ctx, Style::Label),
        }
    }

    /// Structural checks run when a rule enters a registry.
    pub fn validate(&self) -> Result<(), SegmentError> {
        if self.id.trim().is_empty() || self.id.chars().any(char::is_whitespace) {
            return Err(SegmentError::invalid(&self.id, "id must be non-empty without spaces"));
        }
        if self.label.trim().is_empty() {
            return Err(SegmentError::invalid(&self.id, "label is blank"));
        }
        template::placeholders(&self.label)
            .map_err(|e| SegmentError::invalid(&self.id, format!("label: {e}")))?;

        for (i, f) in self.filters.iter().enumerate() {
            if f.field.trim().is_empty() {
                return Err(SegmentError::invalid(&self.id, format!("filter {i}: empty field")));
            }
            let keys = template::placeholders(&f.value)
                .map_err(|e| SegmentError::invalid(&self.id, format!("filter {i}: {e}")))?;
            // Only literal values can be checked up front; placeholders are
            // filled from the trigger context.
            if keys.is_empty()
                && matches!(
                    f.operator,
                    Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte
                )
                && parse_number(&f.value).is_none()
            {
                return Err(SegmentError::invalid(
                    &self.id,
                    format!("filter {i}: {} needs a numeric value", f.operator),
                ));
            }
        }
        Ok(())
    }
}
