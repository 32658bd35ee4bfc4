use std::collections::BTreeMap;

use crossbeam::channel::Receiver;
use donor_query::Filter;
use tracing::{debug, info, warn};

use crate::builtin::AI_SEGMENT;
use crate::context::TriggerContext;
use crate::free_text;
use crate::registry::TriggerRegistry;
use crate::search::SearchConfig;
use crate::segment::{SavedSegment, SegmentEvent};

/// Resolves dashboard triggers and free-text prompts into searches.
#[derive(Debug, Clone)]
pub struct TriggerTranslator {
    registry: TriggerRegistry,
    segments: BTreeMap<String, SavedSegment>,
}

impl Default for TriggerTranslator {
    fn default() -> Self {
        Self::new(TriggerRegistry::builtin())
    }
}

impl TriggerTranslator {
    pub fn new(registry: TriggerRegistry) -> Self {
        Self {
            registry,
            segments: BTreeMap::new(),
        }
    }

    pub fn registry(&self) -> &TriggerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TriggerRegistry {
        &mut self.registry
    }

    // ── Saved segments ──────────────────────────────────────────

    pub fn register_segment(&mut self, segment: SavedSegment) {
        let key = segment.key();
        info!(key = %key, name = %segment.name, count = segment.count, "segment registered");
        self.segments.insert(key, segment);
    }

    pub fn remove_segment(&mut self, key: &str) -> Option<SavedSegment> {
        self.segments.remove(key)
    }

    pub fn segments(&self) -> impl Iterator<Item = &SavedSegment> {
        self.segments.values()
    }

    /// Find a segment by key, or by name ignoring case.
    pub fn segment(&self, id: &str) -> Option<&SavedSegment> {
        self.segments.get(id).or_else(|| {
            self.segments
                .values()
                .find(|s| s.name.eq_ignore_ascii_case(id.trim()))
        })
    }

    pub fn apply_segment_event(&mut self, event: SegmentEvent) {
        match event {
            SegmentEvent::Created(segment) => self.register_segment(segment),
            SegmentEvent::Deleted(key) => {
                self.remove_segment(&key);
            }
        }
    }

    /// Apply every pending event on `events` without blocking.
    pub fn drain_segment_events(&mut self, events: &Receiver<SegmentEvent>) -> usize {
        let mut applied = 0;
        for event in events.try_iter() {
            self.apply_segment_event(event);
            applied += 1;
        }
        applied
    }

    // ── Translation ─────────────────────────────────────────────

    /// Resolve a trigger. Never fails: unknown triggers and unknown saved
    /// segments resolve to [`SearchConfig::fallback`].
    pub fn translate(&self, trigger_id: &str, context: &TriggerContext) -> SearchConfig {
        let Some(rule) = self.registry.get(trigger_id) else {
            warn!(trigger_id, "unknown trigger, using default search");
            return SearchConfig::fallback();
        };

        let config = if trigger_id == AI_SEGMENT {
            let Some(ctx) = self.segment_context(context) else {
                warn!(segment_id = ?context.text("segmentId"), "unknown segment, using default search");
                return SearchConfig::fallback();
            };
            rule.apply(&ctx)
        } else {
            rule.apply(context)
        };

        debug!(
            trigger_id,
            entity = ?config.entity,
            filters = config.filters.len(),
            context = %config.context,
            "trigger translated"
        );
        config
    }

    /// Seed the trigger context from the saved segment named by `segmentId`.
    /// An explicit `count` in the incoming context wins over the stored one.
    fn segment_context(&self, context: &TriggerContext) -> Option<TriggerContext> {
        let id = context.text("segmentId")?;
        let segment = self.segment(&id)?;
        let mut ctx = context.clone();
        ctx.set("segmentName", segment.name.as_str());
        if !ctx.contains("count") {
            ctx.set("count", segment.count);
        }
        Some(ctx)
    }

    pub fn translate_free_text(&self, prompt: &str) -> Vec<Filter> {
        let filters = free_text::translate_free_text(prompt);
        debug!(matched = filters.len(), "free-text prompt translated");
        filters
    }
}
