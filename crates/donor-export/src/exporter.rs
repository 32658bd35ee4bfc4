use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use donor_segments::template::format_count;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ExportError;
use crate::state::{Cadence, CallQueueBranch, ExportTarget};

/// Where a committed export lands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Destination {
    #[serde(rename_all = "camelCase")]
    List {
        account: String,
        list_name: String,
        cadence: Cadence,
        fields: Vec<String>,
    },
    CallQueue { branch: CallQueueBranch },
}

/// Everything an [`Exporter`] needs to push one record set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub provider: String,
    pub target: ExportTarget,
    pub destination: Destination,
}

impl ExportRequest {
    /// Human-readable confirmation of what the request does.
    pub fn describe(&self) -> String {
        let count = format_count(self.target.count as f64);
        match &self.destination {
            Destination::List {
                list_name, cadence, ..
            } => match cadence {
                Cadence::OneTime => format!(
                    "{count} contacts exported to {} as \"{list_name}\".",
                    self.provider
                ),
                Cadence::Sync => format!(
                    "{count} contacts exported to {} as \"{list_name}\" and will stay in sync.",
                    self.provider
                ),
            },
            Destination::CallQueue { branch } => match branch {
                CallQueueBranch::PersonalQueue => {
                    format!("{count} contacts added to your call queue.")
                }
                CallQueueBranch::NamedList(list) => {
                    format!("{count} contacts added to call list \"{list}\".")
                }
                CallQueueBranch::NamedUser(user) => {
                    format!("{count} contacts assigned to {user}'s call queue.")
                }
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub provider: String,
    pub count: u64,
    pub message: String,
    pub committed_at: DateTime<Utc>,
}

/// Side effect run when a wizard commits.
///
/// Implementations own the call to the external system. The wizard only
/// decides when to call and what to send.
pub trait Exporter: Send + Sync {
    fn export(&self, request: &ExportRequest) -> Result<Receipt, ExportError>;
}

/// Stand-in exporter: waits `delay`, then reports success.
#[derive(Debug, Clone, Default)]
pub struct SimulatedExporter {
    delay: Duration,
}

impl SimulatedExporter {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Exporter for SimulatedExporter {
    fn export(&self, request: &ExportRequest) -> Result<Receipt, ExportError> {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        debug!(provider = %request.provider, count = request.target.count, "simulated export");
        Ok(Receipt {
            provider: request.provider.clone(),
            count: request.target.count,
            message: request.describe(),
            committed_at: Utc::now(),
        })
    }
}
