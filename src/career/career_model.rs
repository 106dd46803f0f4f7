use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::career::ids::IdSource;
use crate::career::wire;

pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "CV Validation / Experience",
    "Technical",
    "Behavioral",
    "Analytical",
    "Others",
];

// ============================================================================
// Enumerated fields
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentType {
    #[serde(rename = "Full-Time")]
    FullTime,
    #[serde(rename = "Part-Time")]
    PartTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkSetup {
    #[serde(rename = "Fully Remote", alias = "Remote")]
    Remote,
    Onsite,
    Hybrid,
}

/// Auto-decision policy for endorsing candidates after a screening stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScreeningSetting {
    #[serde(rename = "Good Fit and above")]
    GoodFitAndAbove,
    #[serde(rename = "Only Strong Fit")]
    OnlyStrongFit,
    #[serde(rename = "No Automatic Promotion")]
    NoAutomaticPromotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareerStatus {
    Active,
    Inactive,
}

impl CareerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CareerStatus::Active => "active",
            CareerStatus::Inactive => "inactive",
        }
    }
}

// ============================================================================
// Salary input
// ============================================================================

/// Raw salary input. The form may hold a number or whatever text the
/// recruiter typed; only the numeric reading is ever submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SalaryInput {
    Amount(f64),
    Text(String),
}

impl SalaryInput {
    pub fn amount(&self) -> Option<f64> {
        let value = match self {
            SalaryInput::Amount(v) => *v,
            SalaryInput::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }

    pub fn is_blank(&self) -> bool {
        match self {
            SalaryInput::Amount(v) => *v == 0.0,
            SalaryInput::Text(s) => s.trim().is_empty(),
        }
    }
}

/// Numeric reading of an optional salary field; anything else is `None`.
pub fn salary_amount(input: Option<&SalaryInput>) -> Option<f64> {
    input.and_then(SalaryInput::amount)
}

// ============================================================================
// Pre-screening questions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Dropdown,
    Range,
}

impl QuestionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Dropdown => "dropdown",
            QuestionKind::Range => "range",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeOption {
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub min: Option<f64>,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub max: Option<f64>,
}

impl RangeOption {
    pub fn empty(id: String) -> Self {
        RangeOption { id, min: None, max: None }
    }
}

/// Options of a pre-screen question, tagged by question type.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionOptions {
    Dropdown(Vec<ChoiceOption>),
    /// A range question carries exactly one bounds entity.
    Range(RangeOption),
}

impl QuestionOptions {
    pub fn kind(&self) -> QuestionKind {
        match self {
            QuestionOptions::Dropdown(_) => QuestionKind::Dropdown,
            QuestionOptions::Range(_) => QuestionKind::Range,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreScreenQuestion {
    pub id: String,
    pub title: String,
    pub options: QuestionOptions,
}

impl PreScreenQuestion {
    pub fn kind(&self) -> QuestionKind {
        self.options.kind()
    }
}

#[derive(Serialize)]
struct QuestionOut<'a> {
    id: &'a str,
    title: &'a str,
    #[serde(rename = "type")]
    kind: QuestionKind,
    options: OptionsOut<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum OptionsOut<'a> {
    Choices(&'a [ChoiceOption]),
    Range([&'a RangeOption; 1]),
}

#[derive(Deserialize)]
struct QuestionIn {
    #[serde(default, deserialize_with = "wire::id")]
    id: String,
    #[serde(default, deserialize_with = "wire::text")]
    title: String,
    #[serde(rename = "type", default, deserialize_with = "wire::text")]
    kind: String,
    #[serde(default, deserialize_with = "wire::list")]
    options: Vec<Value>,
}

impl Serialize for PreScreenQuestion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let options = match &self.options {
            QuestionOptions::Dropdown(choices) => OptionsOut::Choices(choices),
            QuestionOptions::Range(range) => OptionsOut::Range([range]),
        };
        QuestionOut {
            id: &self.id,
            title: &self.title,
            kind: self.kind(),
            options,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PreScreenQuestion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = QuestionIn::deserialize(deserializer)?;
        let options = if raw.kind == "range" {
            let range = raw
                .options
                .into_iter()
                .find_map(|v| serde_json::from_value::<RangeOption>(v).ok())
                .unwrap_or_else(|| RangeOption::empty(String::new()));
            QuestionOptions::Range(range)
        } else {
            QuestionOptions::Dropdown(
                raw.options
                    .into_iter()
                    .filter_map(|v| serde_json::from_value::<ChoiceOption>(v).ok())
                    .collect(),
            )
        };
        Ok(PreScreenQuestion {
            id: raw.id,
            title: raw.title,
            options,
        })
    }
}

// ============================================================================
// AI interview questions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestion {
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub question: String,
    /// Fields the editor does not interpret but must carry through.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InterviewQuestion {
    pub fn new(id: String, question: &str) -> Self {
        InterviewQuestion {
            id,
            question: question.to_string(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCategory {
    #[serde(default, deserialize_with = "wire::id")]
    pub id: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub category: String,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub question_count_to_ask: Option<u32>,
    #[serde(default, deserialize_with = "wire::list")]
    pub questions: Vec<InterviewQuestion>,
}

/// The five seeded categories, ids left for `ensure_ids` to assign.
pub fn default_categories() -> Vec<QuestionCategory> {
    DEFAULT_CATEGORIES
        .iter()
        .map(|name| QuestionCategory {
            id: String::new(),
            category: name.to_string(),
            question_count_to_ask: None,
            questions: Vec::new(),
        })
        .collect()
}

fn categories<'de, D>(deserializer: D) -> Result<Vec<QuestionCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => default_categories(),
    })
}

// ============================================================================
// Career draft
// ============================================================================

/// The wizard's working record. Every field tolerates absence so partial
/// drafts hydrate onto blank defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerDraft {
    #[serde(
        rename = "_id",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::optional_id"
    )]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "wire::text")]
    pub job_title: String,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub employment_type: Option<EmploymentType>,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub work_setup: Option<WorkSetup>,
    #[serde(default, deserialize_with = "wire::text")]
    pub work_setup_remarks: String,

    #[serde(default, deserialize_with = "wire::text")]
    pub country: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub province: String,
    #[serde(default, deserialize_with = "wire::text")]
    pub city: String,

    #[serde(default, deserialize_with = "wire::text")]
    pub description: String,

    #[serde(default, deserialize_with = "wire::lenient")]
    pub minimum_salary: Option<SalaryInput>,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub maximum_salary: Option<SalaryInput>,
    #[serde(default = "wire::default_true", deserialize_with = "wire::flag_true")]
    pub salary_negotiable: bool,

    #[serde(default = "wire::default_true", deserialize_with = "wire::flag_true")]
    pub require_video: bool,

    #[serde(default, deserialize_with = "wire::lenient")]
    pub cv_screening_setting: Option<ScreeningSetting>,
    #[serde(default, deserialize_with = "wire::lenient")]
    pub ai_screening_setting: Option<ScreeningSetting>,

    #[serde(default, deserialize_with = "wire::list")]
    pub cv_questions: Vec<PreScreenQuestion>,
    #[serde(default = "default_categories", deserialize_with = "categories")]
    pub ai_questions: Vec<QuestionCategory>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "wire::lenient"
    )]
    pub status: Option<CareerStatus>,
}

impl Default for CareerDraft {
    fn default() -> Self {
        Self {
            id: None,
            job_title: String::new(),
            employment_type: None,
            work_setup: None,
            work_setup_remarks: String::new(),
            country: String::new(),
            province: String::new(),
            city: String::new(),
            description: String::new(),
            minimum_salary: None,
            maximum_salary: None,
            salary_negotiable: true,
            require_video: true,
            cv_screening_setting: None,
            ai_screening_setting: None,
            cv_questions: Vec::new(),
            ai_questions: default_categories(),
            status: None,
        }
    }
}

impl CareerDraft {
    /// Assign an id to every question, option and category that lacks one.
    /// Existing ids are never replaced; a duplicate id (two entities
    /// sharing one) gets a fresh id on its second occurrence.
    pub fn ensure_ids(&mut self, ids: &dyn IdSource) {
        let mut seen = HashSet::new();
        let mut claim = |id: &mut String| {
            if id.is_empty() || !seen.insert(id.clone()) {
                *id = ids.next_id();
                seen.insert(id.clone());
            }
        };

        for question in &mut self.cv_questions {
            claim(&mut question.id);
            match &mut question.options {
                QuestionOptions::Dropdown(choices) => {
                    for choice in choices {
                        claim(&mut choice.id);
                    }
                }
                QuestionOptions::Range(range) => claim(&mut range.id),
            }
        }

        for category in &mut self.ai_questions {
            claim(&mut category.id);
            for question in &mut category.questions {
                claim(&mut question.id);
            }
        }
    }

    pub fn ai_question_total(&self) -> usize {
        self.ai_questions.iter().map(|c| c.questions.len()).sum()
    }
}

// ============================================================================
// Identity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserIdentity {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Ambient session context, read only when a submission is built.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionContext {
    #[serde(default)]
    pub user: UserIdentity,
    #[serde(rename = "orgID", default)]
    pub org_id: String,
}
