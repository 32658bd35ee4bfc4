use serde::{Deserialize, Serialize};

use crate::state::WizardStep;

const LIST_STEPS: &[WizardStep] = &[
    WizardStep::SelectingTarget,
    WizardStep::Configuring,
    WizardStep::Confirming,
    WizardStep::Committed,
];

const QUEUE_STEPS: &[WizardStep] = &[WizardStep::SelectingTarget, WizardStep::Committed];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

impl Account {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProviderKind {
    /// List-management or email tool: pick an account, name the list, confirm.
    List {
        accounts: Vec<Account>,
        fields: Vec<String>,
    },
    /// Dialing tool. An empty `lists` or `users` accepts any name.
    CallQueue {
        lists: Vec<String>,
        users: Vec<String>,
    },
}

/// An external system that segments can be pushed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub kind: ProviderKind,
}

impl Provider {
    pub fn list(id: &str, name: &str, accounts: Vec<Account>, fields: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: ProviderKind::List {
                accounts,
                fields: fields.iter().map(|f| f.to_string()).collect(),
            },
        }
    }

    pub fn call_queue(id: &str, name: &str, lists: &[&str], users: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            kind: ProviderKind::CallQueue {
                lists: lists.iter().map(|l| l.to_string()).collect(),
                users: users.iter().map(|u| u.to_string()).collect(),
            },
        }
    }

    /// The steps a wizard for this provider walks through, in order.
    pub fn steps(&self) -> &'static [WizardStep] {
        match self.kind {
            ProviderKind::List { .. } => LIST_STEPS,
            ProviderKind::CallQueue { .. } => QUEUE_STEPS,
        }
    }

    pub fn is_call_queue(&self) -> bool {
        matches!(self.kind, ProviderKind::CallQueue { .. })
    }

    pub fn account(&self, id: &str) -> Option<&Account> {
        match &self.kind {
            ProviderKind::List { accounts, .. } => accounts.iter().find(|a| a.id == id),
            ProviderKind::CallQueue { .. } => None,
        }
    }

    pub fn offers_field(&self, field: &str) -> bool {
        match &self.kind {
            ProviderKind::List { fields, .. } => fields.iter().any(|f| f == field),
            ProviderKind::CallQueue { .. } => false,
        }
    }
}

/// Providers available out of the box.
pub fn builtin_providers() -> Vec<Provider> {
    vec![
        Provider::list(
            "mailchimp",
            "Mailchimp",
            vec![
                Account::new("campaign-hq", "Campaign HQ"),
                Account::new("events-team", "Events Team"),
            ],
            &["phone", "address", "totalGifts", "party", "tags"],
        ),
        Provider::list(
            "constant-contact",
            "Constant Contact",
            vec![Account::new("main", "Main Account")],
            &["phone", "address", "totalGifts"],
        ),
        Provider::call_queue(
            "call-time",
            "Call Time",
            &["Finance Calls", "Volunteer Recruitment", "Lapsed Follow-up"],
            &["Alex Rivera", "Sam Lee", "Jordan Park"],
        ),
    ]
}

pub fn find_provider(id: &str) -> Option<Provider> {
    builtin_providers().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_lists_differ_by_kind() {
        let mailchimp = find_provider("mailchimp").unwrap();
        assert_eq!(mailchimp.steps().len(), 4);
        let calls = find_provider("call-time").unwrap();
        assert_eq!(
            calls.steps(),
            &[WizardStep::SelectingTarget, WizardStep::Committed]
        );
        assert!(calls.is_call_queue());
    }

    #[test]
    fn lookups() {
        let p = find_provider("mailchimp").unwrap();
        assert_eq!(p.account("events-team").unwrap().name, "Events Team");
        assert!(p.account("nope").is_none());
        assert!(p.offers_field("party"));
        assert!(!p.offers_field("ssn"));
        assert!(find_provider("fax-machine").is_none());
    }

    #[test]
    fn providers_serialize_flat() {
        let p = find_provider("call-time").unwrap();
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["kind"], "call-queue");
        assert_eq!(v["lists"][0], "Finance Calls");
    }
}
