use std::rc::Rc;

use career_wizard::{
    career::{
        career_model::{
            CareerDraft, EmploymentType, InterviewQuestion, SalaryInput, ScreeningSetting,
            SessionContext, UserIdentity, WorkSetup,
        },
        ids::SequentialIds,
    },
    wizard::{
        controller::WizardController,
        timer::ManualClock,
        wizard_model::{WizardEvent, WizardMode},
    },
};

use super::fakes::{CountingStore, RecordingApi};

pub struct Harness {
    pub wizard: WizardController,
    pub store: Rc<CountingStore>,
    pub api: Rc<RecordingApi>,
    pub clock: Rc<ManualClock>,
}

pub fn session() -> SessionContext {
    SessionContext {
        user: UserIdentity {
            image: "https://img.example/ana.png".into(),
            name: "Ana Reyes".into(),
            email: "ana@example.com".into(),
        },
        org_id: "org-7".into(),
    }
}

/// Mounted wizard over the given fakes with a manual clock at t=0.
pub fn harness_with(
    mode: WizardMode,
    career: Option<CareerDraft>,
    store: Rc<CountingStore>,
    api: Rc<RecordingApi>,
) -> Harness {
    let clock = Rc::new(ManualClock::new(0));
    let mut wizard = WizardController::new(
        mode,
        career,
        session(),
        Box::new(store.clone()),
        Box::new(api.clone()),
    )
    .with_clock(Box::new(clock.clone()))
    .with_ids(Box::new(SequentialIds::new("id")));
    wizard.mount();

    Harness {
        wizard,
        store,
        api,
        clock,
    }
}

pub fn new_harness() -> Harness {
    harness_with(WizardMode::Add, None, CountingStore::new(), RecordingApi::new())
}

/// Valid step 0 values only.
pub fn fill_details(draft: &mut CareerDraft) {
    draft.job_title = "Backend Engineer".into();
    draft.employment_type = Some(EmploymentType::FullTime);
    draft.work_setup = Some(WorkSetup::Hybrid);
    draft.description = "<p>Build services</p>".into();
    draft.minimum_salary = Some(SalaryInput::Amount(50_000.0));
    draft.maximum_salary = Some(SalaryInput::Amount(80_000.0));
}

/// A draft that passes every step.
pub fn complete_draft() -> CareerDraft {
    let mut draft = CareerDraft::default();
    fill_details(&mut draft);
    draft.cv_screening_setting = Some(ScreeningSetting::GoodFitAndAbove);
    draft.ai_screening_setting = Some(ScreeningSetting::OnlyStrongFit);
    for (i, category) in draft.ai_questions.iter_mut().enumerate() {
        category.id = format!("cat-{}", i);
        category
            .questions
            .push(InterviewQuestion::new(format!("q-{}", i), "Tell us about a project"));
    }
    draft
}

pub fn redirects(events: &[WizardEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|e| match e {
            WizardEvent::Redirect { route } => Some(route.clone()),
            _ => None,
        })
        .collect()
}
