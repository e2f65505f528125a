use contracts::domain::a001_vehicle_reception::{
    FieldKey, FormError, FormPhase, ReceptionCreate, ReceptionDraft, ReceptionForm, VehicleDraft,
};
use contracts::shared::i18n::{t, Locale};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_vehicle_reception::gateway::SharedGateway;
use crate::shared::date_utils::today;

/// ViewModel of the new-reception page.
///
/// All state lives in one [`ReceptionForm`]; the view reads it through
/// derived closures and writes only through the commands below.
#[derive(Clone, Copy)]
pub struct ReceptionFormViewModel {
    pub form: RwSignal<ReceptionForm>,
    /// Field errors are shown once the user has asked for a review
    pub show_errors: RwSignal<bool>,
    /// Failure dialog of the last submission
    pub failure_open: RwSignal<bool>,
}

fn log_rejected(result: Result<(), FormError>) {
    if let Err(e) = result {
        log::warn!("Form command ignored: {}", e);
    }
}

impl ReceptionFormViewModel {
    pub fn new() -> Self {
        Self {
            form: RwSignal::new(ReceptionForm::new(today())),
            show_errors: RwSignal::new(false),
            failure_open: RwSignal::new(false),
        }
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn phase(&self) -> FormPhase {
        self.form.with(|f| f.phase())
    }

    pub fn field(&self, read: fn(&ReceptionDraft) -> &String) -> String {
        self.form.with(|f| read(f.draft()).clone())
    }

    pub fn vehicle_field(&self, index: usize, read: fn(&VehicleDraft) -> &String) -> String {
        self.form.with(|f| {
            f.draft()
                .vehicles
                .get(index)
                .map(|v| read(v).clone())
                .unwrap_or_default()
        })
    }

    pub fn vehicle_count(&self) -> usize {
        self.form.with(|f| f.draft().vehicles.len())
    }

    pub fn total_quantity(&self) -> f64 {
        self.form.with(|f| f.total_quantity())
    }

    /// Localized error of `key`, once errors are visible
    pub fn error(&self, key: FieldKey, locale: Locale) -> Option<&'static str> {
        if !self.show_errors.get() {
            return None;
        }
        self.form
            .with(|f| f.validate().message_key(key))
            .map(|k| t(locale, k))
    }

    /// Time ordering is checked while typing, before any review attempt
    pub fn time_order_error(&self, locale: Locale) -> Option<&'static str> {
        self.form
            .with(|f| f.time_order_error())
            .map(|k| t(locale, k))
    }

    pub fn pending(&self) -> Option<ReceptionCreate> {
        self.form.with(|f| f.pending_payload().cloned())
    }

    pub fn reception_number(&self) -> Option<String> {
        self.form
            .with(|f| f.created().map(|c| c.reception_number.clone()))
    }

    pub fn failure_message(&self) -> Option<String> {
        self.form.with(|f| f.last_error().map(|e| e.to_string()))
    }

    // ------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------

    pub fn edit(&self, f: impl FnOnce(&mut ReceptionDraft)) {
        self.form.update(|form| log_rejected(form.edit(f)));
    }

    pub fn edit_vehicle(&self, index: usize, f: impl FnOnce(&mut VehicleDraft)) {
        self.edit(|draft| {
            if let Some(vehicle) = draft.vehicles.get_mut(index) {
                f(vehicle);
            }
        });
    }

    pub fn set_custom_company(&self, text: String) {
        self.form
            .update(|form| log_rejected(form.set_custom_company(&text)));
    }

    pub fn set_custom_water_type(&self, text: String) {
        self.form
            .update(|form| log_rejected(form.set_custom_water_type(&text)));
    }

    pub fn add_vehicle(&self) {
        self.form.update(|form| log_rejected(form.add_vehicle()));
    }

    pub fn remove_vehicle(&self, index: usize) {
        self.form.update(|form| {
            log_rejected(form.remove_vehicle(index).map(|_| ()));
        });
    }

    /// Validate and open the confirmation summary
    pub fn review(&self) {
        self.show_errors.set(true);
        self.form.update(|form| match form.request_confirmation() {
            Ok(_) => {}
            Err(FormError::Validation(errors)) => {
                log::debug!("Reception draft has {} invalid field(s)", errors.len());
            }
            Err(e) => log::warn!("{}", e),
        });
    }

    pub fn back_to_edit(&self) {
        self.form.update(|form| log_rejected(form.back_to_edit()));
    }

    /// Send the confirmed payload; the form stays in `Submitting` until the
    /// gateway answers
    pub fn confirm(&self, gateway: SharedGateway) {
        let payload = match self.form.try_update(|form| form.confirm()) {
            Some(Ok(payload)) => payload,
            Some(Err(e)) => {
                log::warn!("{}", e);
                return;
            }
            None => return,
        };

        let form = self.form;
        let failure_open = self.failure_open;
        spawn_local(async move {
            let outcome = gateway.create_reception(&payload).await;
            form.update(|f| {
                if let Err(e) = f.finish(outcome) {
                    log::error!("{}", e);
                    failure_open.set(true);
                }
            });
        });
    }

    /// Empty form for the next reception
    pub fn start_over(&self) {
        self.show_errors.set(false);
        self.failure_open.set(false);
        self.form
            .update(|form| log_rejected(form.reset(today())));
    }
}

impl Default for ReceptionFormViewModel {
    fn default() -> Self {
        Self::new()
    }
}
