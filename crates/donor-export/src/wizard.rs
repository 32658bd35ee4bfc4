use chrono::NaiveDate;
use tracing::{debug, info};

use crate::error::WizardError;
use crate::exporter::{Destination, ExportRequest, Exporter, Receipt};
use crate::provider::{Provider, ProviderKind};
use crate::state::{Cadence, CallQueueBranch, ExportTarget, Selections, SummaryItem, WizardStep};

/// Step machine for pushing one record set to one provider.
///
/// The provider's step list decides the order: list providers walk
/// `selecting-target → configuring → confirming → committed`, call queues
/// jump from `selecting-target` straight to `committed`. Committing or
/// cancelling closes the wizard and drops every selection.
#[derive(Debug, Clone)]
pub struct ExportWizard {
    provider: Provider,
    target: ExportTarget,
    today: NaiveDate,
    step: WizardStep,
    selections: Selections,
    open: bool,
}

impl ExportWizard {
    /// Open a wizard for `target`. `today` dates the default list name.
    pub fn start(provider: Provider, target: ExportTarget, today: NaiveDate) -> Self {
        debug!(provider = %provider.id, target = %target.name, "export wizard opened");
        Self {
            provider,
            target,
            today,
            step: WizardStep::SelectingTarget,
            selections: Selections::default(),
            open: true,
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn target(&self) -> &ExportTarget {
        &self.target
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// `"{segment name} - {M/D/YYYY}"`.
    pub fn default_list_name(&self) -> String {
        format!("{} - {}", self.target.name, self.today.format("%-m/%-d/%Y"))
    }

    // ── Selecting target ────────────────────────────────────────

    pub fn select_account(&mut self, account_id: &str) -> Result<(), WizardError> {
        self.expect_step(WizardStep::SelectingTarget, "select an account")?;
        if self.provider.is_call_queue() {
            return Err(self.invalid("select an account"));
        }
        if self.provider.account(account_id).is_none() {
            return Err(WizardError::UnknownOption {
                kind: "account",
                value: account_id.to_string(),
            });
        }
        self.selections = Selections {
            account: Some(account_id.to_string()),
            list_name: self.default_list_name(),
            cadence: Cadence::OneTime,
            ..Selections::default()
        };
        self.step = self.next_step()?;
        Ok(())
    }

    /// Take one of the call-queue branches. The assignment is committed at
    /// once; there is nothing further to configure.
    pub fn choose_branch(
        &mut self,
        branch: CallQueueBranch,
        exporter: &dyn Exporter,
    ) -> Result<Receipt, WizardError> {
        self.expect_step(WizardStep::SelectingTarget, "choose a queue branch")?;
        let ProviderKind::CallQueue { lists, users } = &self.provider.kind else {
            return Err(self.invalid("choose a queue branch"));
        };
        let branch = match branch {
            CallQueueBranch::PersonalQueue => CallQueueBranch::PersonalQueue,
            CallQueueBranch::NamedList(name) => {
                CallQueueBranch::NamedList(canonical_name("list", &name, lists)?)
            }
            CallQueueBranch::NamedUser(name) => {
                CallQueueBranch::NamedUser(canonical_name("user", &name, users)?)
            }
        };
        self.commit_with(Destination::CallQueue { branch }, exporter)
    }

    // ── Configuring ─────────────────────────────────────────────

    pub fn set_list_name(&mut self, name: &str) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Configuring, "set the list name")?;
        self.selections.list_name = name.to_string();
        Ok(())
    }

    pub fn set_cadence(&mut self, cadence: Cadence) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Configuring, "set the cadence")?;
        self.selections.cadence = cadence;
        Ok(())
    }

    /// Toggle an extra field offered by the provider. Returns whether the
    /// field is selected afterwards.
    pub fn toggle_field(&mut self, field: &str) -> Result<bool, WizardError> {
        self.expect_step(WizardStep::Configuring, "toggle a field")?;
        if !self.provider.offers_field(field) {
            return Err(WizardError::UnknownOption {
                kind: "field",
                value: field.to_string(),
            });
        }
        Ok(self.selections.toggle_field(field))
    }

    /// Whether `advance` would succeed right now.
    pub fn can_advance(&self) -> bool {
        self.open
            && self.step == WizardStep::Configuring
            && !self.selections.list_name.trim().is_empty()
    }

    pub fn advance(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Configuring, "advance")?;
        if self.selections.list_name.trim().is_empty() {
            return Err(WizardError::IncompleteInput("list name"));
        }
        self.step = self.next_step()?;
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        self.ensure_open()?;
        let steps = self.provider.steps();
        let pos = steps.iter().position(|s| *s == self.step);
        match pos {
            Some(i) if i > 0 && !self.step.is_terminal() => {
                self.step = steps[i - 1];
                Ok(())
            }
            _ => Err(self.invalid("go back")),
        }
    }

    // ── Confirming ──────────────────────────────────────────────

    pub fn summary(&self) -> Result<Vec<SummaryItem>, WizardError> {
        self.expect_step(WizardStep::Confirming, "summarize")?;
        let s = &self.selections;
        let account = s
            .account
            .as_deref()
            .and_then(|id| self.provider.account(id))
            .map(|a| a.name.clone())
            .unwrap_or_default();
        let fields = if s.fields.is_empty() {
            "none".to_string()
        } else {
            s.fields.join(", ")
        };
        Ok(vec![
            SummaryItem::new("Provider", self.provider.name.clone()),
            SummaryItem::new("Account", account),
            SummaryItem::new("Segment", self.target.name.clone()),
            SummaryItem::new("Records", self.target.count.to_string()),
            SummaryItem::new("List name", s.list_name.trim()),
            SummaryItem::new("Cadence", s.cadence.as_str()),
            SummaryItem::new("Extra fields", fields),
        ])
    }

    pub fn commit(&mut self, exporter: &dyn Exporter) -> Result<Receipt, WizardError> {
        self.expect_step(WizardStep::Confirming, "commit")?;
        let s = &self.selections;
        let destination = Destination::List {
            account: s.account.clone().unwrap_or_default(),
            list_name: s.list_name.trim().to_string(),
            cadence: s.cadence,
            fields: s.fields.clone(),
        };
        self.commit_with(destination, exporter)
    }

    /// Close the wizard from any non-terminal step, dropping all selections.
    pub fn cancel(&mut self) -> Result<(), WizardError> {
        if self.step.is_terminal() {
            return Err(self.invalid("cancel"));
        }
        debug!(provider = %self.provider.id, step = %self.step, "export wizard cancelled");
        self.step = WizardStep::SelectingTarget;
        self.selections = Selections::default();
        self.open = false;
        Ok(())
    }

    // ── Internals ───────────────────────────────────────────────

    fn commit_with(
        &mut self,
        destination: Destination,
        exporter: &dyn Exporter,
    ) -> Result<Receipt, WizardError> {
        let request = ExportRequest {
            provider: self.provider.name.clone(),
            target: self.target.clone(),
            destination,
        };
        let receipt = exporter.export(&request)?;
        info!(
            provider = %self.provider.id,
            target = %self.target.name,
            count = self.target.count,
            "export committed"
        );
        self.step = WizardStep::Committed;
        self.selections = Selections::default();
        self.open = false;
        Ok(receipt)
    }

    fn next_step(&self) -> Result<WizardStep, WizardError> {
        let steps = self.provider.steps();
        steps
            .iter()
            .position(|s| *s == self.step)
            .and_then(|i| steps.get(i + 1))
            .copied()
            .ok_or_else(|| self.invalid("advance"))
    }

    fn expect_step(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        self.ensure_open()?;
        if self.step == step {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        if self.open || self.step.is_terminal() {
            Ok(())
        } else {
            Err(WizardError::Closed)
        }
    }

    fn invalid(&self, action: &'static str) -> WizardError {
        WizardError::InvalidTransition {
            from: self.step,
            action,
        }
    }
}

/// The provider's spelling of `name`, or the trimmed input when the
/// provider offers no fixed names.
fn canonical_name(kind: &'static str, name: &str, known: &[String]) -> Result<String, WizardError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WizardError::IncompleteInput(kind));
    }
    if known.is_empty() {
        return Ok(name.to_string());
    }
    known
        .iter()
        .find(|k| k.eq_ignore_ascii_case(name))
        .cloned()
        .ok_or_else(|| WizardError::UnknownOption {
            kind,
            value: name.to_string(),
        })
}
