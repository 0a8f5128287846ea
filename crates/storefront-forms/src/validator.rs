//! Form validator: field checks, inline state, submission
//!
//! One validator is bound to one form for the page session. The host wires
//! DOM events to the handlers:
//!
//! - `blur` on a field → [`FormValidator::handle_blur`]
//! - `input` on a field → [`FormValidator::handle_input`]
//! - `submit` on the form (default prevented) → [`FormValidator::handle_submit`]

use crate::accessor::{FormAccessor, FormHost};
use crate::banner::{Banner, BannerId, BannerQueue, BannerSurface};
use crate::config::FormConfig;
use crate::runtime::Runtime;
use crate::state::{FieldId, FieldState};
use crate::submit::{BusySubmit, FormPayload, Submitter};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use storefront_validation::{check_field, FieldConstraints, Verdict};
use tracing::{debug, error, info};

/// Result of a submit attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The validator has no form
    Inert,
    /// A submission is already running; this attempt was ignored
    InFlight,
    /// At least one field is invalid; nothing was sent
    Invalid { first_error: Option<FieldId> },
    /// Sent, success banner shown, fields cleared
    Submitted { banner: BannerId },
    /// The submitter failed; error banner shown, fields untouched
    Failed { banner: BannerId },
}

struct TrackedField {
    constraints: FieldConstraints,
    state: RefCell<FieldState>,
}

struct Bound<A> {
    form: Rc<A>,
    fields: Vec<TrackedField>,
}

pub struct FormValidator<A, S, R> {
    bound: Option<Bound<A>>,
    detached: Cell<bool>,
    in_flight: Cell<bool>,
    submitter: S,
    banners: BannerQueue<R>,
    config: FormConfig,
}

impl<A, S, R> FormValidator<A, S, R>
where
    A: FormAccessor + BannerSurface + 'static,
    S: Submitter,
    R: Runtime,
{
    /// Locate `form_id` on `host` and bind to it; inert when it is missing
    pub fn attach<H>(host: &H, form_id: &str, submitter: S, runtime: R, config: FormConfig) -> Self
    where
        H: FormHost<Form = A>,
    {
        match host.form(form_id) {
            Some(form) => {
                let validator = Self::new(form, submitter, runtime, config);
                info!(form = form_id, fields = validator.field_count(), "form validator attached");
                validator
            }
            None => {
                debug!(form = form_id, "form not found; validator is inert");
                Self::inert(submitter, runtime, config)
            }
        }
    }

    /// Bind to an already located form
    ///
    /// Fields are discovered and their constraints built here, once; fields
    /// added to the form later are not tracked.
    pub fn new(form: A, submitter: S, runtime: R, config: FormConfig) -> Self {
        let fields = form
            .validated_fields()
            .iter()
            .map(|attrs| TrackedField {
                constraints: FieldConstraints::with_fallback_label(attrs, &config.default_field_name),
                state: RefCell::new(FieldState::Neutral),
            })
            .collect();

        Self {
            bound: Some(Bound {
                form: Rc::new(form),
                fields,
            }),
            detached: Cell::new(false),
            in_flight: Cell::new(false),
            submitter,
            banners: BannerQueue::new(runtime, config.banner_timing()),
            config,
        }
    }

    /// A validator with no form; every handler is a no-op
    pub fn inert(submitter: S, runtime: R, config: FormConfig) -> Self {
        Self {
            bound: None,
            detached: Cell::new(false),
            in_flight: Cell::new(false),
            submitter,
            banners: BannerQueue::new(runtime, config.banner_timing()),
            config,
        }
    }

    /// Stop reacting to events and cancel pending banner dismissals.
    ///
    /// For hosts that take the form off the page.
    pub fn detach(&self) {
        if self.detached.replace(true) {
            return;
        }
        self.banners.cancel_pending();
        debug!("form validator detached");
    }

    pub fn is_inert(&self) -> bool {
        self.bound().is_none()
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// The bound form, unless inert
    pub fn form(&self) -> Option<&Rc<A>> {
        self.bound().map(|bound| &bound.form)
    }

    pub fn field_count(&self) -> usize {
        self.bound().map_or(0, |bound| bound.fields.len())
    }

    /// Id of the first tracked field with this name
    pub fn field_id(&self, name: &str) -> Option<FieldId> {
        self.bound()?
            .fields
            .iter()
            .position(|field| field.constraints.name.as_deref() == Some(name))
            .map(FieldId::new)
    }

    pub fn constraints(&self, field: FieldId) -> Option<&FieldConstraints> {
        self.tracked(field).map(|(_, tracked)| &tracked.constraints)
    }

    pub fn state(&self, field: FieldId) -> Option<FieldState> {
        self.tracked(field).map(|(_, tracked)| tracked.state.borrow().clone())
    }

    /// Blur: validate and render
    pub fn handle_blur(&self, field: FieldId) -> bool {
        self.validate_field(field)
    }

    /// Input: drop a showing error right away, without re-validating
    pub fn handle_input(&self, field: FieldId) {
        let in_error = self
            .tracked(field)
            .is_some_and(|(_, tracked)| tracked.state.borrow().is_error());
        if in_error {
            self.clear_error(field);
        }
    }

    /// Validate one field and render the outcome.
    ///
    /// Returns `true` when the field is valid. Unknown fields and inert
    /// validators report `true` and render nothing.
    pub fn validate_field(&self, field: FieldId) -> bool {
        let Some((form, tracked)) = self.tracked(field) else {
            return true;
        };

        self.clear_error(field);

        let constraints = &tracked.constraints;
        let value = form.value(field);
        let confirm_value = constraints
            .confirm
            .as_deref()
            .and_then(|target| form.value_of(target));

        match check_field(constraints, &value, confirm_value.as_deref()) {
            Ok(Verdict::Valid) => {
                self.set_success(field);
                true
            }
            Ok(Verdict::EmptyOptional) => {
                // A blank optional field shows neither error nor success
                self.transition(field, FieldState::Neutral);
                true
            }
            Err(problem) => {
                debug!(field = %constraints.label, %problem, "field invalid");
                self.set_error(field, &problem.to_string())
            }
        }
    }

    /// Show `message` beneath the field; always returns `false`
    pub fn set_error(&self, field: FieldId, message: &str) -> bool {
        self.transition(field, FieldState::Error(message.to_string()));
        false
    }

    /// Remove the field's error, if any
    pub fn clear_error(&self, field: FieldId) {
        let Some((_, tracked)) = self.tracked(field) else {
            return;
        };
        if tracked.state.borrow().is_error() {
            self.transition(field, FieldState::Neutral);
        }
    }

    /// Clear any error and mark the field as valid
    pub fn set_success(&self, field: FieldId) {
        self.transition(field, FieldState::Success);
    }

    /// Submit: validate every field, then submit or point at the first error
    pub async fn handle_submit(&self) -> SubmitOutcome {
        let Some(bound) = self.bound() else {
            return SubmitOutcome::Inert;
        };

        if self.in_flight.get() {
            debug!("submission already in flight; ignoring submit");
            return SubmitOutcome::InFlight;
        }

        // Every field is validated so all problems show at once
        let mut all_valid = true;
        for index in 0..bound.fields.len() {
            all_valid &= self.validate_field(FieldId::new(index));
        }

        if !all_valid {
            let first_error = bound
                .fields
                .iter()
                .position(|field| field.state.borrow().is_error())
                .map(FieldId::new);
            if let Some(field) = first_error {
                bound.form.scroll_into_view(field);
            }
            debug!(?first_error, "form invalid; submission blocked");
            return SubmitOutcome::Invalid { first_error };
        }

        self.submit(bound).await
    }

    async fn submit(&self, bound: &Bound<A>) -> SubmitOutcome {
        let form = bound.form.as_ref();
        let _busy = BusySubmit::engage(form, &self.config.loading_label, &self.in_flight);
        let payload = FormPayload::from_entries(form.entries());

        match self.submitter.submit(&payload).await {
            Ok(()) => {
                let message = form
                    .attribute("data-success-message")
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| self.config.success_message.clone());
                let banner = self.banners.show(Rc::clone(&bound.form), Banner::success(message));
                form.reset();
                info!(fields = payload.len(), "form submitted");
                SubmitOutcome::Submitted { banner }
            }
            Err(e) => {
                error!("Form submission error: {}", e);
                let banner = self
                    .banners
                    .show(Rc::clone(&bound.form), Banner::error(self.config.error_message.clone()));
                SubmitOutcome::Failed { banner }
            }
        }
    }

    fn bound(&self) -> Option<&Bound<A>> {
        if self.detached.get() {
            return None;
        }
        self.bound.as_ref()
    }

    fn tracked(&self, field: FieldId) -> Option<(&A, &TrackedField)> {
        let bound = self.bound()?;
        let tracked = bound.fields.get(field.index())?;
        Some((bound.form.as_ref(), tracked))
    }

    fn transition(&self, field: FieldId, next: FieldState) {
        let Some((form, tracked)) = self.tracked(field) else {
            return;
        };
        form.render(field, &next);
        *tracked.state.borrow_mut() = next;
    }
}
