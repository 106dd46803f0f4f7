use crate::{
    api::{
        client::{CareerApi, endpoint_path},
        payload::build_payload,
    },
    career::{
        career_model::{CareerDraft, CareerStatus, PreScreenQuestion, QuestionCategory, SessionContext},
        ids::{IdSource, UuidSource},
    },
    draft::{
        draft_store::{DraftLoad, DraftStore},
        store::KeyValueStore,
    },
    error::WizardError,
    form::form_state::{FormField, FormState},
    questions::{interview::InterviewEditor, prescreen::PreScreenEditor},
    trace::{logger::TraceLogger, trace::WizardTrace},
    validate::{
        schema::{SALARY_RANGE_MESSAGE, ValidationSchema},
        step_validator::{StepCheck, StepValidator},
    },
    wizard::{
        timer::{Clock, Deadline, SystemClock},
        wizard_model::{
            Notification, NotificationKind, STEPS, Step, StepStatus, WizardEvent, WizardMode,
            WizardSettings,
        },
    },
};

/// Drives the multi-step career wizard: step position, draft autosave,
/// validation gates and the final submission.
///
/// The controller never blocks on time. The host calls [`tick`] from its
/// event loop; the autosave debounce and the post-submit redirect are
/// deadlines checked there against the injected [`Clock`].
///
/// [`tick`]: WizardController::tick
pub struct WizardController {
    mode: WizardMode,
    record_id: Option<String>,
    initial: CareerDraft,
    session: SessionContext,
    settings: WizardSettings,

    step: Step,
    is_submitting: bool,
    pending_confirmation: Option<CareerStatus>,

    form: FormState,
    validator: StepValidator,
    cv_editor: PreScreenEditor,
    ai_editor: InterviewEditor,

    drafts: DraftStore,
    api: Box<dyn CareerApi>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdSource>,
    tracer: TraceLogger,

    autosave: Deadline,
    redirect: Deadline,
    events: Vec<WizardEvent>,
    last_empty: Option<(Step, bool)>,
    mounted: bool,
    submitted: bool,
}

impl WizardController {
    /// `career` is the persisted record when editing, `None` when creating.
    pub fn new(
        mode: WizardMode,
        career: Option<CareerDraft>,
        session: SessionContext,
        store: Box<dyn KeyValueStore>,
        api: Box<dyn CareerApi>,
    ) -> Self {
        let initial = career.unwrap_or_default();
        let record_id = initial.id.clone();
        let settings = WizardSettings::default();

        WizardController {
            mode,
            drafts: DraftStore::new(store, record_id.as_deref()),
            record_id,
            form: FormState::new(initial.clone()),
            initial,
            session,
            validator: StepValidator::new(ValidationSchema::new(settings.min_ai_questions)),
            settings,
            step: Step::CareerDetails,
            is_submitting: false,
            pending_confirmation: None,
            cv_editor: PreScreenEditor::default(),
            ai_editor: InterviewEditor::default(),
            api,
            clock: Box::new(SystemClock::new()),
            ids: Box::new(UuidSource),
            tracer: TraceLogger::disabled(),
            autosave: Deadline::default(),
            redirect: Deadline::default(),
            events: Vec::new(),
            last_empty: None,
            mounted: false,
            submitted: false,
        }
    }

    pub fn with_settings(mut self, settings: WizardSettings) -> Self {
        self.validator = StepValidator::new(ValidationSchema::new(settings.min_ai_questions));
        self.settings = settings;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_ids(mut self, ids: Box<dyn IdSource>) -> Self {
        self.ids = ids;
        self
    }

    pub fn with_tracer(mut self, tracer: TraceLogger) -> Self {
        self.tracer = tracer;
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Hydrate from the stored draft, falling back to the record (or blank
    /// defaults) when there is none or it cannot be read.
    pub fn mount(&mut self) {
        let key = self.drafts.key().to_string();
        let (mut values, step) = match self.drafts.load() {
            Ok(DraftLoad::Restored(stored)) => {
                let (data, step) = stored.into_parts();
                let step = step.and_then(Step::from_index).unwrap_or(Step::CareerDetails);
                self.trace(WizardTrace::now(step, "draft_restored").with_key(&key));
                (data, step)
            }
            Ok(DraftLoad::Discarded { reason }) => {
                self.trace(
                    WizardTrace::now(Step::CareerDetails, "draft_discarded")
                        .with_key(&key)
                        .with_error(reason),
                );
                (self.initial.clone(), Step::CareerDetails)
            }
            Ok(DraftLoad::Missing) => (self.initial.clone(), Step::CareerDetails),
            Err(e) => {
                eprintln!("Warning: could not read draft '{}': {}", key, e);
                self.trace(
                    WizardTrace::now(Step::CareerDetails, "draft_unreadable")
                        .with_key(&key)
                        .with_error(&e),
                );
                (self.initial.clone(), Step::CareerDetails)
            }
        };

        if values.id.is_none() {
            values.id = self.record_id.clone();
        }
        values.ensure_ids(self.ids.as_ref());

        self.load_values(values);
        self.step = step;
        self.mounted = true;
        self.refresh_emptiness();
        self.trace(WizardTrace::now(self.step, "mounted").with_key(&key));
    }

    /// Disarm every timer. After this `tick` does nothing.
    pub fn unmount(&mut self) {
        self.autosave.cancel();
        self.redirect.cancel();
        self.mounted = false;
        self.trace(WizardTrace::now(self.step, "unmounted"));
    }

    /// Fire due timers.
    pub fn tick(&mut self) {
        if !self.mounted {
            return;
        }
        let now = self.clock.now_ms();

        if self.autosave.fire(now) {
            self.persist(self.step);
        }

        if self.redirect.fire(now) {
            let route = self.settings.listing_route.clone();
            self.trace(WizardTrace::now(self.step, "redirect").with_detail(&route));
            self.events.push(WizardEvent::Redirect { route });
        }
    }

    // =========================================================================
    // Field edits
    // =========================================================================

    pub fn update_form<F>(&mut self, f: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut CareerDraft),
    {
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        self.form.update(f);

        // Question lists replaced wholesale bypass the editors; resync them.
        if self.cv_editor.questions() != self.form.values().cv_questions.as_slice() {
            self.cv_editor = PreScreenEditor::new(self.form.values().cv_questions.clone());
        }
        if self.ai_editor.categories() != self.form.values().ai_questions.as_slice() {
            self.ai_editor = InterviewEditor::new(self.form.values().ai_questions.clone());
        }

        self.after_change();
        Ok(())
    }

    /// Run edits against the CV pre-screen editor, then push its list into
    /// the form. Edits applied before an error are still pushed.
    pub fn edit_cv_questions<F>(&mut self, f: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut PreScreenEditor, &dyn IdSource) -> Result<(), WizardError>,
    {
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        let result = f(&mut self.cv_editor, self.ids.as_ref());

        if self.cv_editor.questions() != self.form.values().cv_questions.as_slice() {
            let questions = self.cv_editor.questions().to_vec();
            self.form.update(|d| d.cv_questions = questions);
            self.after_change();
        }
        result
    }

    pub fn edit_ai_questions<F>(&mut self, f: F) -> Result<(), WizardError>
    where
        F: FnOnce(&mut InterviewEditor, &dyn IdSource) -> Result<(), WizardError>,
    {
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        let result = f(&mut self.ai_editor, self.ids.as_ref());

        if self.ai_editor.categories() != self.form.values().ai_questions.as_slice() {
            let categories = self.ai_editor.categories().to_vec();
            self.form.update(|d| d.ai_questions = categories);
            self.after_change();
        }
        result
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Validate the current step, persist and move forward.
    pub fn advance(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        if !self.validate_step(self.step) {
            return false;
        }

        let next = self.step.next().unwrap_or(self.step);
        self.persist(next);
        self.move_to(next);
        true
    }

    /// Step back without validating or persisting.
    pub fn retreat(&mut self) -> bool {
        if self.is_submitting {
            return false;
        }
        match self.step.prev() {
            Some(prev) => {
                self.move_to(prev);
                true
            }
            None => false,
        }
    }

    /// Go to `target` directly. Earlier steps are always reachable; moving
    /// forward validates every step being skipped.
    pub fn jump_to(&mut self, target: Step) -> bool {
        if self.is_submitting {
            return false;
        }
        if target > self.step {
            let check = self.validator.validate_range(&mut self.form, self.step, Some(target));
            if !self.handle_check(check, true) {
                return false;
            }
        }

        self.persist(target);
        self.move_to(target);
        true
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate one step. A salary range violation moves the wizard to the
    /// details step whichever step asked.
    pub fn validate_step(&mut self, step: Step) -> bool {
        let check = self.validator.validate_step(&mut self.form, step);
        self.handle_check(check, false)
    }

    /// Validate every step in order, stopping and positioning the wizard at
    /// the first step that fails.
    pub fn validate_all_steps(&mut self) -> bool {
        let check = self.validator.validate_all(&mut self.form);
        self.handle_check(check, true)
    }

    fn handle_check(&mut self, check: StepCheck, reposition: bool) -> bool {
        match check {
            StepCheck::Valid => true,
            StepCheck::SalaryRange => {
                self.move_to(Step::CareerDetails);
                self.notify(
                    NotificationKind::StepError(Step::CareerDetails),
                    SALARY_RANGE_MESSAGE.to_string(),
                );
                self.trace(WizardTrace::now(self.step, "validation_failed").with_detail("salary_range"));
                false
            }
            StepCheck::Invalid { step, fields } => {
                if reposition {
                    self.move_to(step);
                }
                let message = fields
                    .first()
                    .and_then(|f| self.form.error(*f))
                    .map(|m| format!("{}: {}", step.title(), m))
                    .unwrap_or_else(|| format!("Please complete {}", step.title()));
                let names: Vec<_> = fields.iter().map(FormField::name).collect();

                self.notify(NotificationKind::StepError(step), message);
                self.trace(
                    WizardTrace::now(step, "validation_failed").with_detail(names.join(",")),
                );
                false
            }
        }
    }

    // =========================================================================
    // Final save
    // =========================================================================

    /// Open the confirmation prompt. Publishing requires every step to be
    /// valid; saving unpublished skips validation entirely.
    pub fn request_final_save(&mut self, status: CareerStatus) -> bool {
        if self.is_submitting || self.submitted {
            return false;
        }
        if status == CareerStatus::Active && !self.validate_all_steps() {
            return false;
        }

        self.pending_confirmation = Some(status);
        self.events.push(WizardEvent::ConfirmationOpened(status));
        self.trace(WizardTrace::now(self.step, "confirmation_opened").with_detail(status.as_str()));
        true
    }

    pub fn cancel_confirmation(&mut self) {
        if self.pending_confirmation.take().is_some() {
            self.events.push(WizardEvent::ConfirmationClosed);
        }
    }

    /// Submit the career. On success the draft is cleared and a redirect is
    /// scheduled; on failure the wizard stays as it was for a retry. A wizard
    /// submits at most once.
    pub fn confirm_save(&mut self, status: CareerStatus) -> Result<(), WizardError> {
        if self.is_submitting {
            return Err(WizardError::Busy);
        }
        if self.submitted {
            return Err(WizardError::AlreadySubmitted);
        }
        if self.pending_confirmation.take().is_some() {
            self.events.push(WizardEvent::ConfirmationClosed);
        }

        self.is_submitting = true;
        let payload = build_payload(self.form.values(), status, &self.session);
        let result = self.api.submit(self.mode, &payload);
        self.is_submitting = false;

        match &result {
            Ok(()) => self.on_submitted(status),
            Err(e) => {
                let message = match self.mode {
                    WizardMode::Add => "Failed to add career",
                    WizardMode::Edit => "Failed to update career",
                };
                self.notify(NotificationKind::Failure, message.to_string());
                self.trace(
                    WizardTrace::now(self.step, "submit_failed")
                        .with_detail(endpoint_path(self.mode))
                        .with_error(e),
                );
            }
        }
        result
    }

    fn on_submitted(&mut self, status: CareerStatus) {
        self.submitted = true;
        self.autosave.cancel();

        let verb = match self.mode {
            WizardMode::Add => "Career added",
            WizardMode::Edit => "Career updated",
        };
        let message = match status {
            CareerStatus::Active => format!("{} and published", verb),
            CareerStatus::Inactive => verb.to_string(),
        };
        self.notify(NotificationKind::Success, message);
        self.events.push(WizardEvent::Submitted {
            status,
            mode: self.mode,
        });

        if let Err(e) = self.drafts.clear() {
            eprintln!("Warning: could not clear draft '{}': {}", self.drafts.key(), e);
        }

        let now = self.clock.now_ms();
        self.redirect.arm(now, self.settings.redirect_delay_ms);
        self.trace(
            WizardTrace::now(self.step, "submitted")
                .with_key(self.drafts.key())
                .with_detail(status.as_str()),
        );
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    pub fn pending_confirmation(&self) -> Option<CareerStatus> {
        self.pending_confirmation
    }

    pub fn values(&self) -> &CareerDraft {
        self.form.values()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn cv_questions(&self) -> &[PreScreenQuestion] {
        self.cv_editor.questions()
    }

    pub fn ai_categories(&self) -> &[QuestionCategory] {
        self.ai_editor.categories()
    }

    pub fn storage_key(&self) -> &str {
        self.drafts.key()
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_armed()
    }

    pub fn redirect_pending(&self) -> bool {
        self.redirect.is_armed()
    }

    pub fn is_step_empty(&self, step: Step) -> bool {
        self.validator.schema().is_step_empty(step, self.form.values())
    }

    pub fn can_advance(&self) -> bool {
        !self.is_submitting && self.step < Step::last() && !self.is_step_empty(self.step)
    }

    pub fn can_retreat(&self) -> bool {
        !self.is_submitting && self.step > Step::CareerDetails && !self.is_step_empty(self.step)
    }

    pub fn progress(&self) -> Vec<(Step, StepStatus)> {
        STEPS
            .iter()
            .map(|&s| {
                let status = if s < self.step {
                    StepStatus::Finished
                } else if s == self.step {
                    StepStatus::Active
                } else {
                    StepStatus::Pending
                };
                (s, status)
            })
            .collect()
    }

    pub fn events(&self) -> &[WizardEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn load_values(&mut self, values: CareerDraft) {
        self.cv_editor = PreScreenEditor::new(values.cv_questions.clone());
        self.ai_editor = InterviewEditor::new(values.ai_questions.clone());
        self.form.reset(values);
    }

    fn after_change(&mut self) {
        if self.form.take_dirty() && !self.submitted {
            let now = self.clock.now_ms();
            self.autosave.arm(now, self.settings.autosave_delay_ms);
        }
        self.refresh_emptiness();
    }

    /// Write the current values with `step`. A failed write is reported and
    /// otherwise ignored; the next save tries again.
    fn persist(&mut self, step: Step) {
        self.autosave.cancel();
        let key = self.drafts.key().to_string();

        match self.drafts.save(self.form.values(), step.index()) {
            Ok(()) => {
                self.events.push(WizardEvent::DraftSaved { key: key.clone(), step });
                self.trace(WizardTrace::now(step, "draft_saved").with_key(&key));
            }
            Err(e) => {
                self.notify(
                    NotificationKind::Failure,
                    "Failed to save draft locally".to_string(),
                );
                self.trace(WizardTrace::now(step, "draft_save_failed").with_key(&key).with_error(&e));
            }
        }
    }

    fn move_to(&mut self, target: Step) {
        if target != self.step {
            self.events.push(WizardEvent::StepChanged {
                from: self.step,
                to: target,
            });
            self.trace(
                WizardTrace::now(target, "step_changed")
                    .with_detail(format!("from {}", self.step.index())),
            );
            self.step = target;
        }
        self.refresh_emptiness();
    }

    fn refresh_emptiness(&mut self) {
        if !self.mounted {
            return;
        }
        let empty = self.is_step_empty(self.step);
        if self.last_empty != Some((self.step, empty)) {
            self.last_empty = Some((self.step, empty));
            self.events.push(WizardEvent::EmptinessChanged {
                step: self.step,
                empty,
            });
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        self.events.push(WizardEvent::Notify(Notification {
            kind,
            message,
            duration_ms: self.settings.toast_duration_ms,
        }));
    }

    fn trace(&self, event: WizardTrace) {
        self.tracer.log(&event);
    }
}
