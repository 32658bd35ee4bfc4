use std::fmt;

use crate::state::WizardStep;

/// Failure reported by an [`Exporter`](crate::Exporter).
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    Rejected { provider: String, reason: String },
    Unavailable(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Rejected { provider, reason } => {
                write!(f, "{provider} rejected the export: {reason}")
            }
            ExportError::Unavailable(provider) => write!(f, "{provider} is unavailable"),
        }
    }
}

impl std::error::Error for ExportError {}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardError {
    /// The action is not legal from the current step.
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },
    /// Required input is missing or blank.
    IncompleteInput(&'static str),
    /// An account, field, list or user the provider does not offer.
    UnknownOption { kind: &'static str, value: String },
    /// The wizard was cancelled and must be reopened.
    Closed,
    Export(ExportError),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::InvalidTransition { from, action } => {
                write!(f, "cannot {action} from {from}")
            }
            WizardError::IncompleteInput(what) => write!(f, "missing {what}"),
            WizardError::UnknownOption { kind, value } => write!(f, "unknown {kind}: {value}"),
            WizardError::Closed => write!(f, "wizard is closed"),
            WizardError::Export(e) => write!(f, "export failed: {e}"),
        }
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WizardError::Export(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ExportError> for WizardError {
    fn from(e: ExportError) -> Self {
        WizardError::Export(e)
    }
}
