use chrono::{DateTime, Utc};
use crossbeam::channel::{Receiver, Sender, unbounded};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// An ad hoc audience saved by the user. Persisted elsewhere; this crate only
/// consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSegment {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: u64,
    pub created_at: DateTime<Utc>,
}

impl SavedSegment {
    pub fn new(name: &str, description: &str, count: u64) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            description: description.to_string(),
            count,
            created_at: Utc::now(),
        }
    }

    /// Lookup key: the explicit id, or a slug of the name.
    pub fn key(&self) -> String {
        match &self.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => slugify(&self.name),
        }
    }
}

fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.ends_with('-') && !slug.is_empty() {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[derive(Debug, Clone, PartialEq)]
pub enum SegmentEvent {
    Created(SavedSegment),
    Deleted(String),
}

/// Segment notifications for the components of one session.
///
/// Each subscriber gets its own channel; a subscriber that drops its
/// receiver is pruned on the next publish.
#[derive(Debug, Default)]
pub struct SegmentHub {
    subscribers: Vec<Sender<SegmentEvent>>,
}

impl SegmentHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<SegmentEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver to every live subscriber; returns how many received it.
    pub fn publish(&mut self, event: SegmentEvent) -> usize {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        debug!(subscribers = self.subscribers.len(), ?event, "segment event published");
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
