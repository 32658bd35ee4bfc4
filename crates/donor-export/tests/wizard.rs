use std::time::Duration;

use chrono::NaiveDate;
use donor_export::*;
use donor_segments::SavedSegment;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
}

fn exporter() -> SimulatedExporter {
    SimulatedExporter::new(Duration::ZERO)
}

fn mailchimp(target: ExportTarget) -> ExportWizard {
    ExportWizard::start(find_provider("mailchimp").unwrap(), target, today())
}

fn call_queue() -> ExportWizard {
    ExportWizard::start(
        find_provider("call-time").unwrap(),
        ExportTarget::new("Lapsed Donors", 8923),
        today(),
    )
}

// ── List providers ──────────────────────────────────────────────

#[test]
fn blank_list_names_block_advance() {
    let mut w = mailchimp(ExportTarget::new("Major Donors", 12847));
    w.select_account("campaign-hq").unwrap();

    for name in ["", " ", "\t\n  "] {
        w.set_list_name(name).unwrap();
        assert!(!w.can_advance());
        assert_eq!(w.advance(), Err(WizardError::IncompleteInput("list name")));
        assert_eq!(w.step(), WizardStep::Configuring);
    }

    w.set_list_name("x").unwrap();
    assert!(w.can_advance());
    w.advance().unwrap();
    assert_eq!(w.step(), WizardStep::Confirming);
}

#[test]
fn full_list_flow_from_saved_segment() {
    let segment = SavedSegment::new("Texas Nurses", "Nurses in TX", 1532);
    let mut w = mailchimp(ExportTarget::from(&segment));

    w.select_account("campaign-hq").unwrap();
    assert_eq!(w.selections().list_name, "Texas Nurses - 11/5/2024");
    w.toggle_field("party").unwrap();
    w.toggle_field("tags").unwrap();
    w.toggle_field("party").unwrap();
    w.advance().unwrap();

    let summary = w.summary().unwrap();
    let value = |label: &str| {
        summary
            .iter()
            .find(|item| item.label == label)
            .map(|item| item.value.clone())
            .unwrap()
    };
    assert_eq!(value("Account"), "Campaign HQ");
    assert_eq!(value("List name"), "Texas Nurses - 11/5/2024");
    assert_eq!(value("Cadence"), "one-time");
    assert_eq!(value("Extra fields"), "tags");

    let receipt = w.commit(&exporter()).unwrap();
    assert_eq!(
        receipt.message,
        "1,532 contacts exported to Mailchimp as \"Texas Nurses - 11/5/2024\"."
    );
    assert_eq!(w.step(), WizardStep::Committed);
    assert!(!w.is_open());
}

#[test]
fn configuring_actions_outside_configuring_are_rejected() {
    let mut w = mailchimp(ExportTarget::new("Major Donors", 1));
    assert_eq!(
        w.set_list_name("early"),
        Err(WizardError::InvalidTransition {
            from: WizardStep::SelectingTarget,
            action: "set the list name",
        })
    );
    assert!(w.summary().is_err());
    assert!(w.commit(&exporter()).is_err());
    assert!(!w.can_advance());
}

#[test]
fn unknown_fields_are_not_offered() {
    let mut w = mailchimp(ExportTarget::new("Major Donors", 1));
    w.select_account("events-team").unwrap();
    assert!(matches!(
        w.toggle_field("ssn"),
        Err(WizardError::UnknownOption { kind: "field", .. })
    ));
}

// ── Call queue ──────────────────────────────────────────────────

#[test]
fn every_queue_branch_commits_directly() {
    let branches = [
        CallQueueBranch::PersonalQueue,
        CallQueueBranch::NamedList("Finance Calls".into()),
        CallQueueBranch::NamedUser("Sam Lee".into()),
    ];
    for branch in branches {
        let mut w = call_queue();
        assert_eq!(w.step(), WizardStep::SelectingTarget);
        let receipt = w.choose_branch(branch, &exporter()).unwrap();
        assert_eq!(w.step(), WizardStep::Committed);
        assert!(!w.is_open());
        assert_eq!(receipt.count, 8923);
        assert!(receipt.message.starts_with("8,923 contacts"));
    }
}

#[test]
fn queue_has_no_configuring_step() {
    let mut w = call_queue();
    assert!(w.select_account("campaign-hq").is_err());
    assert!(w.advance().is_err());
    assert!(w.back().is_err());
    assert!(!w.provider().steps().contains(&WizardStep::Configuring));
}

#[test]
fn cancel_resets_without_exporting() {
    let mut w = call_queue();
    w.cancel().unwrap();
    assert!(!w.is_open());
    assert_eq!(
        w.choose_branch(CallQueueBranch::PersonalQueue, &exporter()),
        Err(WizardError::Closed)
    );
}
