use std::collections::BTreeMap;

use tracing::debug;

use crate::builtin::builtin_rules;
use crate::error::SegmentError;
use crate::rule::TriggerRule;

/// Trigger id → rule lookup table. Every rule in it has passed
/// [`TriggerRule::validate`].
#[derive(Debug, Clone, Default)]
pub struct TriggerRegistry {
    rules: BTreeMap<String, TriggerRule>,
}

impl TriggerRegistry {
    /// Build from a rule list, rejecting invalid rules and repeated ids.
    pub fn new(rules: Vec<TriggerRule>) -> Result<Self, SegmentError> {
        let mut map = BTreeMap::new();
        for rule in rules {
            rule.validate()?;
            if map.contains_key(&rule.id) {
                return Err(SegmentError::DuplicateRule(rule.id));
            }
            map.insert(rule.id.clone(), rule);
        }
        Ok(Self { rules: map })
    }

    /// The shipped dashboard triggers.
    pub fn builtin() -> Self {
        let rules: BTreeMap<String, TriggerRule> = builtin_rules()
            .into_iter()
            .map(|r| (r.id.clone(), r))
            .collect();
        let registry = Self { rules };
        debug_assert!(registry.validate().is_ok());
        registry
    }

    /// Parse a JSON array of rules.
    pub fn rules_from_json(json: &str) -> Result<Vec<TriggerRule>, SegmentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add rules on top of the current set. A rule with an existing id
    /// replaces it. Nothing is applied if any rule is invalid.
    pub fn merge(&mut self, rules: Vec<TriggerRule>) -> Result<usize, SegmentError> {
        for rule in &rules {
            rule.validate()?;
        }
        let count = rules.len();
        for rule in rules {
            debug!(id = %rule.id, replaced = self.rules.contains_key(&rule.id), "trigger rule merged");
            self.rules.insert(rule.id.clone(), rule);
        }
        Ok(count)
    }

    pub fn validate(&self) -> Result<(), SegmentError> {
        self.rules.values().try_for_each(TriggerRule::validate)
    }

    pub fn get(&self, id: &str) -> Option<&TriggerRule> {
        self.rules.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rules.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::EntityType;
    use donor_query::Operator;

    #[test]
    fn builtin_rules_all_validate() {
        let rules = builtin_rules();
        let count = rules.len();
        let registry = TriggerRegistry::new(rules).unwrap();
        assert_eq!(registry.len(), count);
        assert!(registry.contains("major-donors"));
        assert!(registry.contains("ai-segment"));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let rule = TriggerRule::new("dup", EntityType::People, "Dup");
        let err = TriggerRegistry::new(vec![rule.clone(), rule]).unwrap_err();
        assert!(matches!(err, SegmentError::DuplicateRule(id) if id == "dup"));
    }

    #[test]
    fn merge_replaces_by_id() {
        let mut registry = TriggerRegistry::builtin();
        let before = registry.len();
        let replacement = TriggerRule::new("major-donors", EntityType::People, "Big Givers ({count})")
            .filter("totalGifts", Operator::Gte, "5000");
        let added = TriggerRule::new("board-members", EntityType::People, "Board ({count})")
            .filter("category", Operator::Equals, "board");

        assert_eq!(registry.merge(vec![replacement, added]).unwrap(), 2);
        assert_eq!(registry.len(), before + 1);
        assert_eq!(registry.get("major-donors").unwrap().label, "Big Givers ({count})");
    }

    #[test]
    fn merge_is_all_or_nothing() {
        let mut registry = TriggerRegistry::builtin();
        let before = registry.len();
        let good = TriggerRule::new("fine", EntityType::People, "Fine");
        let bad = TriggerRule::new("broken", EntityType::People, "{oops");
        assert!(registry.merge(vec![good, bad]).is_err());
        assert_eq!(registry.len(), before);
        assert!(!registry.contains("fine"));
    }

    #[test]
    fn rules_parse_from_json_array() {
        let json = r#"[{ "id": "vip", "label": "VIP ({count})" }]"#;
        let rules = TriggerRegistry::rules_from_json(json).unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].entity, EntityType::People);

        assert!(matches!(
            TriggerRegistry::rules_from_json("{not json"),
            Err(SegmentError::Parse(_))
        ));
    }
}
