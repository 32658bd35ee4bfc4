mod error;
mod exporter;
mod provider;
mod state;
mod wizard;

pub use error::{ExportError, WizardError};
pub use exporter::{Destination, ExportRequest, Exporter, Receipt, SimulatedExporter};
pub use provider::{Account, Provider, ProviderKind, builtin_providers, find_provider};
pub use state::{Cadence, CallQueueBranch, ExportTarget, Selections, SummaryItem, WizardStep};
pub use wizard::ExportWizard;
