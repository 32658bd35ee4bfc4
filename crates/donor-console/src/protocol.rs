use donor_export::{Cadence, CallQueueBranch, Receipt, Selections, SummaryItem, WizardStep};
use donor_query::{FilterId, FilterSet, Operator, SortConfig};
use donor_segments::{SavedSegment, SearchConfig, TriggerContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub enum Request {
    // ── Search ──
    Trigger {
        trigger_id: String,
        #[serde(default)]
        context: TriggerContext,
    },
    Prompt {
        text: String,
    },
    AddFilter {
        field: String,
        operator: Operator,
        #[serde(default)]
        value: String,
    },
    RemoveFilter {
        id: FilterId,
    },
    ClearFilters,
    ApplyPreset {
        filters: FilterSet,
    },
    SortBy {
        field: String,
    },
    SortRecords {
        records: Vec<bson::Document>,
    },
    MatchRecords {
        records: Vec<bson::Document>,
    },
    SaveSegment {
        name: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        count: u64,
    },

    // ── Export wizard ──
    OpenExport {
        provider: String,
        segment: String,
    },
    /// Export the current, unsaved search result.
    OpenSearchExport {
        provider: String,
        name: String,
        count: u64,
    },
    SelectAccount {
        account: String,
    },
    SetListName {
        name: String,
    },
    SetCadence {
        cadence: Cadence,
    },
    ToggleField {
        field: String,
    },
    Advance,
    Back,
    Commit,
    ChooseQueueBranch {
        branch: CallQueueBranch,
    },
    Cancel,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum Response {
    Ok,
    Search(SearchConfig),
    Filters(FilterSet),
    Sort(SortConfig),
    Records(Vec<bson::Document>),
    Segment(SavedSegment),
    Wizard(WizardView),
    Receipt(Receipt),
    Error(String),
}

/// What the export dialog renders for the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardView {
    pub provider: String,
    pub step: WizardStep,
    pub selections: Selections,
    pub can_advance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<SummaryItem>>,
}
