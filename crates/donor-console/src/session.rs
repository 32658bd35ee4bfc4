use std::fmt::Display;

use bson::Document;
use chrono::Local;
use crossbeam::channel::Receiver;
use donor_export::{ExportTarget, ExportWizard, Exporter, Receipt, WizardError, find_provider};
use donor_query::{FilterSet, SortConfig, SortState};
use donor_segments::{SavedSegment, SegmentEvent, SegmentHub, TriggerTranslator};
use tracing::{debug, warn};

use crate::protocol::{Request, Response, WizardView};

const NO_EXPORT: &str = "no export in progress";

/// State of one interactive user: the active filters, the table sort, the
/// open export dialog and the segments saved so far.
pub struct Session {
    translator: TriggerTranslator,
    hub: SegmentHub,
    segment_events: Receiver<SegmentEvent>,
    filters: FilterSet,
    sort: SortState,
    wizard: Option<ExportWizard>,
    exporter: Box<dyn Exporter>,
}

impl Session {
    pub fn new(translator: TriggerTranslator, exporter: Box<dyn Exporter>) -> Self {
        let mut hub = SegmentHub::new();
        let segment_events = hub.subscribe();
        Self {
            translator,
            hub,
            segment_events,
            filters: FilterSet::new(),
            sort: SortState::new(),
            wizard: None,
            exporter,
        }
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortConfig> {
        self.sort.current()
    }

    pub fn translator(&self) -> &TriggerTranslator {
        &self.translator
    }

    pub fn wizard(&self) -> Option<&ExportWizard> {
        self.wizard.as_ref()
    }

    /// Extra listener for segment notifications, e.g. a sidebar.
    pub fn subscribe_segments(&mut self) -> Receiver<SegmentEvent> {
        self.hub.subscribe()
    }

    pub fn handle(&mut self, request: Request) -> Response {
        self.sync_segments();
        match request {
            Request::Trigger {
                trigger_id,
                context,
            } => {
                let config = self.translator.translate(&trigger_id, &context);
                self.filters.apply_preset(config.filters.clone());
                Response::Search(config)
            }
            Request::Prompt { text } => {
                let found = self.translator.translate_free_text(&text);
                self.filters.extend(found);
                Response::Filters(self.filters.clone())
            }
            Request::AddFilter {
                field,
                operator,
                value,
            } => {
                self.filters.add_filter(field, operator, value);
                Response::Filters(self.filters.clone())
            }
            Request::RemoveFilter { id } => {
                self.filters.remove_filter(&id);
                Response::Filters(self.filters.clone())
            }
            Request::ClearFilters => {
                self.filters.clear_all();
                Response::Filters(self.filters.clone())
            }
            Request::ApplyPreset { filters } => {
                self.filters.apply_preset(filters.into_vec());
                Response::Filters(self.filters.clone())
            }
            Request::SortBy { field } => Response::Sort(self.sort.click(&field).clone()),
            Request::SortRecords { records } => Response::Records(owned(self.sort.apply(&records))),
            Request::MatchRecords { records } => {
                let matched = owned(self.filters.select(&records));
                Response::Records(owned(self.sort.apply(&matched)))
            }
            Request::SaveSegment {
                name,
                description,
                count,
            } => self.save_segment(&name, &description, count),

            Request::OpenExport { provider, segment } => {
                match self.translator.segment(&segment) {
                    Some(found) => {
                        let target = ExportTarget::from(found);
                        self.open_export(&provider, target)
                    }
                    None => error(format!("unknown segment: {segment}")),
                }
            }
            Request::OpenSearchExport {
                provider,
                name,
                count,
            } => {
                if name.trim().is_empty() {
                    return error("search name is required");
                }
                self.open_export(&provider, ExportTarget::new(name.trim(), count))
            }
            Request::SelectAccount { account } => self.step(|w| w.select_account(&account)),
            Request::SetListName { name } => self.step(|w| w.set_list_name(&name)),
            Request::SetCadence { cadence } => self.step(|w| w.set_cadence(cadence)),
            Request::ToggleField { field } => self.step(|w| w.toggle_field(&field).map(|_| ())),
            Request::Advance => self.step(ExportWizard::advance),
            Request::Back => self.step(ExportWizard::back),
            Request::Commit => self.finish(|w, exporter| w.commit(exporter)),
            Request::ChooseQueueBranch { branch } => {
                self.finish(|w, exporter| w.choose_branch(branch, exporter))
            }
            Request::Cancel => match self.wizard.take() {
                Some(mut wizard) => match wizard.cancel() {
                    Ok(()) => Response::Ok,
                    Err(e) => error(e),
                },
                None => error(NO_EXPORT),
            },
        }
    }

    fn sync_segments(&mut self) {
        let applied = self.translator.drain_segment_events(&self.segment_events);
        if applied > 0 {
            debug!(applied, "segment events applied");
        }
    }

    fn save_segment(&mut self, name: &str, description: &str, count: u64) -> Response {
        if name.trim().is_empty() {
            return error("segment name is required");
        }
        let segment = SavedSegment::new(name.trim(), description, count);
        self.hub.publish(SegmentEvent::Created(segment.clone()));
        self.sync_segments();
        Response::Segment(segment)
    }

    fn open_export(&mut self, provider_id: &str, target: ExportTarget) -> Response {
        let Some(provider) = find_provider(provider_id) else {
            return error(format!("unknown provider: {provider_id}"));
        };
        if self.wizard.is_some() {
            debug!("replacing open export wizard");
        }
        let today = Local::now().date_naive();
        let wizard = ExportWizard::start(provider, target, today);
        let view = view(&wizard);
        self.wizard = Some(wizard);
        Response::Wizard(view)
    }

    fn step<F>(&mut self, f: F) -> Response
    where
        F: FnOnce(&mut ExportWizard) -> Result<(), WizardError>,
    {
        let Some(wizard) = self.wizard.as_mut() else {
            return error(NO_EXPORT);
        };
        match f(&mut *wizard) {
            Ok(()) => Response::Wizard(view(wizard)),
            Err(e) => error(e),
        }
    }

    fn finish<F>(&mut self, f: F) -> Response
    where
        F: FnOnce(&mut ExportWizard, &dyn Exporter) -> Result<Receipt, WizardError>,
    {
        let Some(wizard) = self.wizard.as_mut() else {
            return error(NO_EXPORT);
        };
        match f(&mut *wizard, self.exporter.as_ref()) {
            Ok(receipt) => {
                self.wizard = None;
                Response::Receipt(receipt)
            }
            Err(e) => error(e),
        }
    }
}

fn view(wizard: &ExportWizard) -> WizardView {
    WizardView {
        provider: wizard.provider().id.clone(),
        step: wizard.step(),
        selections: wizard.selections().clone(),
        can_advance: wizard.can_advance(),
        summary: wizard.summary().ok(),
    }
}

fn owned(records: Vec<&Document>) -> Vec<Document> {
    records.into_iter().cloned().collect()
}

fn error(e: impl Display) -> Response {
    let message = e.to_string();
    warn!(error = %message, "request failed");
    Response::Error(message)
}
