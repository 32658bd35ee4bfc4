mod builtin;
mod context;
mod error;
mod free_text;
mod registry;
mod rule;
mod search;
mod segment;
pub mod template;
mod translator;

pub use builtin::{AI_SEGMENT, builtin_rules};
pub use context::{TriggerContext, UNKNOWN};
pub use error::SegmentError;
pub use free_text::translate_free_text;
pub use registry::TriggerRegistry;
pub use rule::{FilterTemplate, TriggerRule};
pub use search::{DEFAULT_CONTEXT, EntityType, SearchConfig};
pub use segment::{SavedSegment, SegmentEvent, SegmentHub};
pub use translator::TriggerTranslator;
