use serde::{Deserialize, Serialize};

use crate::career::career_model::CareerStatus;
use crate::form::form_state::FormField;
use crate::validate::schema::DEFAULT_MIN_AI_QUESTIONS;

pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 5_000;
pub const DEFAULT_REDIRECT_DELAY_MS: u64 = 1_300;
pub const DEFAULT_TOAST_DURATION_MS: u64 = 1_300;
pub const DEFAULT_LISTING_ROUTE: &str = "/recruiter-dashboard/careers";

// ============================================================================
// Steps
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Step {
    CareerDetails,
    CvScreening,
    AiInterview,
    Review,
}

pub const STEPS: [Step; 4] = [
    Step::CareerDetails,
    Step::CvScreening,
    Step::AiInterview,
    Step::Review,
];

impl Step {
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Step> {
        STEPS.get(index).copied()
    }

    pub fn last() -> Step {
        STEPS[STEPS.len() - 1]
    }

    pub fn next(self) -> Option<Step> {
        Step::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).and_then(Step::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::CareerDetails => "Career Details & Team Access",
            Step::CvScreening => "CV Review & Pre-screening",
            Step::AiInterview => "AI Interview Setup",
            Step::Review => "Review Career",
        }
    }

    /// Fields this step owns and validates.
    pub fn fields(self) -> &'static [FormField] {
        match self {
            Step::CareerDetails => &[
                FormField::JobTitle,
                FormField::EmploymentType,
                FormField::WorkSetup,
                FormField::MinimumSalary,
                FormField::MaximumSalary,
                FormField::Description,
            ],
            Step::CvScreening => &[FormField::CvScreeningSetting, FormField::CvQuestions],
            Step::AiInterview => &[FormField::AiScreeningSetting, FormField::AiQuestions],
            Step::Review => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Finished,
    Active,
    Pending,
}

// ============================================================================
// Mode and settings
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardMode {
    Add,
    Edit,
}

/// Timing and policy knobs for one wizard instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardSettings {
    #[serde(default = "default_autosave_delay")]
    pub autosave_delay_ms: u64,

    #[serde(default = "default_redirect_delay")]
    pub redirect_delay_ms: u64,

    #[serde(default = "default_toast_duration")]
    pub toast_duration_ms: u64,

    #[serde(default = "default_listing_route")]
    pub listing_route: String,

    #[serde(default = "default_min_ai_questions")]
    pub min_ai_questions: usize,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY_MS,
            redirect_delay_ms: DEFAULT_REDIRECT_DELAY_MS,
            toast_duration_ms: DEFAULT_TOAST_DURATION_MS,
            listing_route: DEFAULT_LISTING_ROUTE.to_string(),
            min_ai_questions: DEFAULT_MIN_AI_QUESTIONS,
        }
    }
}

fn default_autosave_delay() -> u64 { DEFAULT_AUTOSAVE_DELAY_MS }
fn default_redirect_delay() -> u64 { DEFAULT_REDIRECT_DELAY_MS }
fn default_toast_duration() -> u64 { DEFAULT_TOAST_DURATION_MS }
fn default_listing_route() -> String { DEFAULT_LISTING_ROUTE.to_string() }
fn default_min_ai_questions() -> usize { DEFAULT_MIN_AI_QUESTIONS }

// ============================================================================
// Outbound events
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum NotificationKind {
    /// Validation failure scoped to a step
    StepError(Step),
    Success,
    Failure,
}

/// Fire-and-forget toast for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    StepChanged { from: Step, to: Step },
    /// The current step's emptiness flipped (drives Back/Next enablement)
    EmptinessChanged { step: Step, empty: bool },
    Notify(Notification),
    ConfirmationOpened(CareerStatus),
    ConfirmationClosed,
    DraftSaved { key: String, step: Step },
    Submitted { status: CareerStatus, mode: WizardMode },
    Redirect { route: String },
}
