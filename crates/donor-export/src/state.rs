use std::fmt;

use donor_segments::SavedSegment;
use serde::{Deserialize, Serialize};

/// Position of an export wizard in its provider's step list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    SelectingTarget,
    Configuring,
    Confirming,
    Committed,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStep::SelectingTarget => "selecting-target",
            WizardStep::Configuring => "configuring",
            WizardStep::Confirming => "confirming",
            WizardStep::Committed => "committed",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == WizardStep::Committed
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often the provider list is refreshed from the segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cadence {
    #[default]
    OneTime,
    Sync,
}

impl Cadence {
    pub fn as_str(self) -> &'static str {
        match self {
            Cadence::OneTime => "one-time",
            Cadence::Sync => "sync",
        }
    }
}

/// Terminal choices of a call-queue assignment. Exactly one is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "branch", content = "name", rename_all = "kebab-case")]
pub enum CallQueueBranch {
    PersonalQueue,
    NamedList(String),
    NamedUser(String),
}

impl fmt::Display for CallQueueBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallQueueBranch::PersonalQueue => f.write_str("personal queue"),
            CallQueueBranch::NamedList(name) => write!(f, "call list {name:?}"),
            CallQueueBranch::NamedUser(user) => write!(f, "user {user}"),
        }
    }
}

/// The record set being exported: a saved segment or the current search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTarget {
    pub name: String,
    pub count: u64,
}

impl ExportTarget {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

impl From<&SavedSegment> for ExportTarget {
    fn from(segment: &SavedSegment) -> Self {
        ExportTarget::new(segment.name.clone(), segment.count)
    }
}

/// Everything the user has picked so far in one wizard run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selections {
    pub account: Option<String>,
    pub list_name: String,
    pub cadence: Cadence,
    pub fields: Vec<String>,
}

impl Selections {
    /// Add `field` if absent, remove it if present. Returns whether it is now selected.
    pub fn toggle_field(&mut self, field: &str) -> bool {
        match self.fields.iter().position(|f| f == field) {
            Some(pos) => {
                self.fields.remove(pos);
                false
            }
            None => {
                self.fields.push(field.to_string());
                true
            }
        }
    }
}

/// One read-only line of the confirmation screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

impl SummaryItem {
    pub(crate) fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}
