//! Reception form controller.
//!
//! Owns one draft and drives it through
//! `Editing -> Validating -> AwaitingConfirmation -> Submitting -> Submitted`.
//! Invalid drafts and failed submissions fall back to `Editing` with the
//! draft untouched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::draft::ReceptionDraft;
use super::gateway::{CreatedReception, GatewayError, ReceptionGateway};
use super::normalize::normalize;
use super::payload::ReceptionCreate;
use super::validation::{collect_errors, time_order_error, validate_draft, FieldErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormPhase {
    Editing,
    Validating,
    AwaitingConfirmation,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("cannot {action} while {phase:?}")]
    InvalidTransition {
        phase: FormPhase,
        action: &'static str,
    },
    #[error("form has {} invalid field(s)", .0.len())]
    Validation(FieldErrors),
    #[error("submission failed: {0}")]
    Submission(GatewayError),
}

#[derive(Debug, Clone)]
pub struct ReceptionForm {
    draft: ReceptionDraft,
    phase: FormPhase,
    errors: FieldErrors,
    pending: Option<ReceptionCreate>,
    created: Option<CreatedReception>,
    last_error: Option<GatewayError>,
}

impl ReceptionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self::from_draft(ReceptionDraft::new(today))
    }

    pub fn from_draft(draft: ReceptionDraft) -> Self {
        Self {
            draft,
            phase: FormPhase::Editing,
            errors: FieldErrors::new(),
            pending: None,
            created: None,
            last_error: None,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn draft(&self) -> &ReceptionDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Payload shown on the confirmation screen
    pub fn pending_payload(&self) -> Option<&ReceptionCreate> {
        self.pending.as_ref()
    }

    pub fn created(&self) -> Option<&CreatedReception> {
        self.created.as_ref()
    }

    /// Error of the last failed submission, kept until the next attempt
    pub fn last_error(&self) -> Option<&GatewayError> {
        self.last_error.as_ref()
    }

    // ============================================================================
    // Editing
    // ============================================================================

    fn ensure_editing(&self, action: &'static str) -> Result<(), FormError> {
        if self.phase == FormPhase::Editing {
            Ok(())
        } else {
            Err(FormError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    /// Mutate the draft; only allowed while editing
    pub fn edit(&mut self, f: impl FnOnce(&mut ReceptionDraft)) -> Result<(), FormError> {
        self.ensure_editing("edit")?;
        f(&mut self.draft);
        Ok(())
    }

    pub fn add_vehicle(&mut self) -> Result<(), FormError> {
        self.ensure_editing("add a vehicle")?;
        self.draft.add_vehicle();
        Ok(())
    }

    /// `Ok(false)` when the index is out of range or only one vehicle is left
    pub fn remove_vehicle(&mut self, index: usize) -> Result<bool, FormError> {
        self.ensure_editing("remove a vehicle")?;
        Ok(self.draft.remove_vehicle(index))
    }

    pub fn set_custom_company(&mut self, text: &str) -> Result<(), FormError> {
        self.edit(|d| d.custom_company = text.to_string())
    }

    pub fn set_custom_water_type(&mut self, text: &str) -> Result<(), FormError> {
        self.edit(|d| d.custom_water_type = text.to_string())
    }

    /// Start over with an empty draft
    pub fn reset(&mut self, today: NaiveDate) -> Result<(), FormError> {
        if self.phase == FormPhase::Submitting {
            return Err(FormError::InvalidTransition {
                phase: self.phase,
                action: "reset",
            });
        }
        *self = Self::new(today);
        Ok(())
    }

    // ============================================================================
    // Derived values
    // ============================================================================

    /// Current validation errors without changing the phase
    pub fn validate(&self) -> FieldErrors {
        collect_errors(&self.draft)
    }

    /// Time ordering rule alone, for re-checking while the times are edited
    pub fn time_order_error(&self) -> Option<&'static str> {
        time_order_error(&self.draft.arrival_time, &self.draft.departure_time)
    }

    pub fn total_quantity(&self) -> f64 {
        self.draft.total_quantity()
    }

    // ============================================================================
    // Submission flow
    // ============================================================================

    /// Validate and, on success, move to the confirmation screen
    pub fn request_confirmation(&mut self) -> Result<&ReceptionCreate, FormError> {
        self.ensure_editing("request confirmation")?;
        self.phase = FormPhase::Validating;

        match validate_draft(&self.draft) {
            Ok(validated) => {
                self.errors = FieldErrors::new();
                self.phase = FormPhase::AwaitingConfirmation;
                let payload: &ReceptionCreate = self.pending.insert(normalize(validated));
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.pending = None;
                self.phase = FormPhase::Editing;
                Err(FormError::Validation(errors))
            }
        }
    }

    /// Leave the confirmation screen without submitting
    pub fn back_to_edit(&mut self) -> Result<(), FormError> {
        match self.phase {
            FormPhase::AwaitingConfirmation | FormPhase::Editing => {
                self.pending = None;
                self.phase = FormPhase::Editing;
                Ok(())
            }
            phase => Err(FormError::InvalidTransition {
                phase,
                action: "go back to editing",
            }),
        }
    }

    /// Commit to submitting; returns the payload to hand to the gateway
    pub fn confirm(&mut self) -> Result<ReceptionCreate, FormError> {
        let invalid = FormError::InvalidTransition {
            phase: self.phase,
            action: "confirm",
        };
        if self.phase != FormPhase::AwaitingConfirmation {
            return Err(invalid);
        }
        let payload = self.pending.clone().ok_or(invalid)?;
        self.last_error = None;
        self.phase = FormPhase::Submitting;
        Ok(payload)
    }

    /// Record the gateway outcome of a submission started with [`Self::confirm`]
    pub fn finish(
        &mut self,
        outcome: Result<CreatedReception, GatewayError>,
    ) -> Result<&CreatedReception, FormError> {
        if self.phase != FormPhase::Submitting {
            return Err(FormError::InvalidTransition {
                phase: self.phase,
                action: "finish a submission",
            });
        }
        match outcome {
            Ok(created) => {
                self.pending = None;
                self.phase = FormPhase::Submitted;
                let created: &CreatedReception = self.created.insert(created);
                Ok(created)
            }
            Err(e) => {
                self.pending = None;
                self.last_error = Some(e.clone());
                self.phase = FormPhase::Editing;
                Err(FormError::Submission(e))
            }
        }
    }

    /// `confirm`, send through `gateway`, then `finish`
    pub async fn submit<G>(&mut self, gateway: &G) -> Result<CreatedReception, FormError>
    where
        G: ReceptionGateway + ?Sized,
    {
        let payload = self.confirm()?;
        let outcome = gateway.create_reception(&payload).await;
        self.finish(outcome).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_vehicle_reception::aggregate::ReceptionId;
    use crate::domain::a001_vehicle_reception::validation::FieldKey;
    use async_trait::async_trait;
    use std::cell::RefCell;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("date")
    }

    fn filled_form() -> ReceptionForm {
        let mut form = ReceptionForm::new(today());
        form.edit(|d| {
            d.company_name = "Other".into();
            d.water_type = "Sludge".into();
            let v = &mut d.vehicles[0];
            v.vehicle_number = "ABC 123".into();
            v.vehicle_type = "Tanker".into();
            v.driver_name = "Ahmed".into();
            v.car_brand = "Volvo".into();
            v.vehicle_quantity = "1".into();
        })
        .expect("editing");
        form.set_custom_company("Delta Rigs").expect("editing");
        form.add_vehicle().expect("editing");
        form.edit(|d| {
            let v = &mut d.vehicles[1];
            v.vehicle_number = "XYZ 9".into();
            v.vehicle_type = "Truck".into();
            v.driver_name = "Omar".into();
            v.car_brand = "MAN".into();
            v.vehicle_quantity = "2.5".into();
        })
        .expect("editing");
        form
    }

    struct MemoryGateway {
        fail_with: Option<GatewayError>,
        received: RefCell<Vec<ReceptionCreate>>,
    }

    impl MemoryGateway {
        fn ok() -> Self {
            Self {
                fail_with: None,
                received: RefCell::new(Vec::new()),
            }
        }

        fn failing(e: GatewayError) -> Self {
            Self {
                fail_with: Some(e),
                received: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl ReceptionGateway for MemoryGateway {
        async fn create_reception(
            &self,
            payload: &ReceptionCreate,
        ) -> Result<CreatedReception, GatewayError> {
            self.received.borrow_mut().push(payload.clone());
            match &self.fail_with {
                Some(e) => Err(e.clone()),
                None => Ok(CreatedReception {
                    id: ReceptionId::new_v4(),
                    reception_number: "RCP-20250301-0000ABCD".into(),
                }),
            }
        }
    }

    #[test]
    fn invalid_draft_returns_to_editing_with_errors() {
        let mut form = ReceptionForm::new(today());
        let err = form.request_confirmation().expect_err("empty draft");
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.errors().contains(FieldKey::Company));
        assert!(form.pending_payload().is_none());
    }

    #[test]
    fn valid_draft_waits_for_confirmation() {
        let mut form = filled_form();
        let payload = form.request_confirmation().expect("valid").clone();
        assert_eq!(form.phase(), FormPhase::AwaitingConfirmation);
        assert_eq!(payload.company_name, "Delta Rigs");
        assert_eq!(payload.total_quantity, 3.5);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn edits_are_rejected_outside_editing() {
        let mut form = filled_form();
        form.request_confirmation().expect("valid");
        assert!(matches!(
            form.add_vehicle(),
            Err(FormError::InvalidTransition { .. })
        ));
        assert!(form.edit(|d| d.notes = "x".into()).is_err());
        assert_eq!(form.draft().notes, "");
    }

    #[test]
    fn back_to_edit_clears_pending() {
        let mut form = filled_form();
        form.request_confirmation().expect("valid");
        form.back_to_edit().expect("allowed");
        assert_eq!(form.phase(), FormPhase::Editing);
        assert!(form.pending_payload().is_none());
        assert!(form.add_vehicle().is_ok());
    }

    #[test]
    fn confirm_requires_validation_first() {
        let mut form = filled_form();
        assert!(matches!(
            form.confirm(),
            Err(FormError::InvalidTransition {
                phase: FormPhase::Editing,
                ..
            })
        ));
    }

    #[test]
    fn finish_outside_submitting_is_rejected() {
        let mut form = filled_form();
        let outcome = Ok(CreatedReception {
            id: ReceptionId::new_v4(),
            reception_number: "RCP".into(),
        });
        assert!(form.finish(outcome).is_err());
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    #[test]
    fn remove_vehicle_keeps_minimum_of_one() {
        let mut form = ReceptionForm::new(today());
        assert_eq!(form.remove_vehicle(0), Ok(false));
        form.add_vehicle().expect("editing");
        assert_eq!(form.remove_vehicle(3), Ok(false));
        assert_eq!(form.remove_vehicle(1), Ok(true));
        assert_eq!(form.draft().vehicles.len(), 1);
    }

    #[test]
    fn live_time_order_and_total() {
        let mut form = filled_form();
        form.edit(|d| {
            d.arrival_time = "09:00".into();
            d.departure_time = "08:00".into();
        })
        .expect("editing");
        assert_eq!(form.time_order_error(), Some("form.timeOrder"));
        assert_eq!(form.total_quantity(), 3.5);
        form.edit(|d| d.departure_time = "10:00".into())
            .expect("editing");
        assert_eq!(form.time_order_error(), None);
    }

    #[tokio::test]
    async fn successful_submission() {
        let mut form = filled_form();
        form.request_confirmation().expect("valid");
        let gateway = MemoryGateway::ok();
        let created = form.submit(&gateway).await.expect("created");
        assert_eq!(created.reception_number, "RCP-20250301-0000ABCD");
        assert_eq!(form.phase(), FormPhase::Submitted);
        assert_eq!(form.created(), Some(&created));

        let sent = gateway.received.borrow();
        assert_eq!(sent.len(), 1);
        let orders: Vec<i32> = sent[0].vehicles.iter().map(|v| v.vehicle_order).collect();
        assert_eq!(orders, vec![1, 2]);
    }

    #[tokio::test]
    async fn failed_submission_preserves_draft() {
        let mut form = filled_form();
        let before = form.draft().clone();
        form.request_confirmation().expect("valid");
        let gateway = MemoryGateway::failing(GatewayError::Network("offline".into()));

        let err = form.submit(&gateway).await.expect_err("must fail");
        assert_eq!(
            err,
            FormError::Submission(GatewayError::Network("offline".into()))
        );
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.draft(), &before);
        assert!(form.last_error().is_some());

        // Retry without re-entering anything
        form.request_confirmation().expect("still valid");
        let created = form.submit(&MemoryGateway::ok()).await;
        assert!(created.is_ok());
        assert!(form.last_error().is_none());
    }

    #[tokio::test]
    async fn submit_without_confirmation_never_reaches_gateway() {
        let mut form = filled_form();
        let gateway = MemoryGateway::ok();
        assert!(form.submit(&gateway).await.is_err());
        assert!(gateway.received.borrow().is_empty());
    }

    #[test]
    fn reset_after_submission() {
        let mut form = filled_form();
        form.request_confirmation().expect("valid");
        form.confirm().expect("confirm");
        assert!(form.reset(today()).is_err());
        form.finish(Ok(CreatedReception {
            id: ReceptionId::new_v4(),
            reception_number: "RCP".into(),
        }))
        .expect("finished");
        form.reset(today()).expect("reset");
        assert_eq!(form.phase(), FormPhase::Editing);
        assert_eq!(form.draft().vehicles.len(), 1);
        assert!(form.created().is_none());
    }
}
