use career_wizard::{
    career::career_model::{
        CareerDraft, QuestionKind, QuestionOptions, SalaryInput, WorkSetup, DEFAULT_CATEGORIES,
    },
    draft::{
        draft_store::{DraftLoad, DraftStore},
        envelope::{parse_stored, storage_key, StoredDraft, NEW_RECORD_KEY},
        store::{FileStore, KeyValueStore, MemoryStore},
    },
    error::WizardError,
};

use crate::common::fakes::CountingStore;

mod common;

// =========================================================================
// Storage keys
// =========================================================================

#[test]
fn storage_key_depends_on_record_id() {
    assert_eq!(storage_key(None), NEW_RECORD_KEY);
    assert_eq!(storage_key(Some("")), "career_draft", "Blank id is a new record");
    assert_eq!(storage_key(Some("abc123")), "career_abc123");
}

// =========================================================================
// Envelope parsing
// =========================================================================

#[test]
fn parse_envelope_with_partial_data() {
    let stored = parse_stored(r#"{"version":1,"data":{"jobTitle":"Engineer"},"step":2}"#).unwrap();

    assert_eq!(stored.step(), Some(2));
    let data = stored.data();
    assert_eq!(data.job_title, "Engineer");
    assert!(data.salary_negotiable, "Missing flags default to true");
    assert!(data.require_video);
    assert_eq!(data.ai_questions.len(), DEFAULT_CATEGORIES.len());
    assert!(data.cv_questions.is_empty());
}

#[test]
fn parse_legacy_flat_draft() {
    let stored = parse_stored(r#"{"jobTitle":"Designer","workSetup":"Remote"}"#).unwrap();

    match &stored {
        StoredDraft::Legacy(data) => {
            assert_eq!(data.job_title, "Designer");
            assert_eq!(data.work_setup, Some(WorkSetup::Remote), "Old label accepted");
        }
        other => panic!("Expected legacy draft, got {:?}", other),
    }
    assert_eq!(stored.step(), None);
}

#[test]
fn parse_tolerates_odd_field_values() {
    let raw = r#"{
        "version": 1,
        "step": 1,
        "data": {
            "jobTitle": 42,
            "employmentType": "",
            "minimumSalary": "abc",
            "maximumSalary": 90000,
            "salaryNegotiable": null,
            "cvQuestions": [
                {"id": 7, "title": "Notice?", "type": "dropdown", "options": [{"id": 1, "label": "Now"}]},
                "garbage",
                {"id": "r1", "title": "Salary?", "type": "range", "options": [{"id": "o1", "min": "x", "max": 5}]}
            ],
            "aiQuestions": null
        }
    }"#;
    let (data, step) = parse_stored(raw).unwrap().into_parts();

    assert_eq!(step, Some(1));
    assert_eq!(data.job_title, "", "Non-string text becomes empty");
    assert_eq!(data.employment_type, None);
    assert_eq!(data.minimum_salary, Some(SalaryInput::Text("abc".into())));
    assert_eq!(data.maximum_salary, Some(SalaryInput::Amount(90000.0)));
    assert!(data.salary_negotiable);
    assert_eq!(data.ai_questions.len(), 5, "Null categories fall back to defaults");

    assert_eq!(data.cv_questions.len(), 2, "Unreadable question dropped");
    assert_eq!(data.cv_questions[0].id, "7", "Numeric ids become strings");
    match &data.cv_questions[0].options {
        QuestionOptions::Dropdown(choices) => assert_eq!(choices[0].id, "1"),
        other => panic!("Expected dropdown, got {:?}", other),
    }
    assert_eq!(data.cv_questions[1].kind(), QuestionKind::Range);
    match &data.cv_questions[1].options {
        QuestionOptions::Range(range) => {
            assert_eq!(range.min, None);
            assert_eq!(range.max, Some(5.0));
        }
        other => panic!("Expected range, got {:?}", other),
    }
}

#[test]
fn parse_rejects_malformed_json_and_non_object_data() {
    assert!(matches!(
        parse_stored("{not json"),
        Err(WizardError::JsonParse { .. })
    ));
    assert!(parse_stored(r#"{"version":1,"data":"oops","step":0}"#).is_err());
    assert!(parse_stored(r#""just a string""#).is_err());
}

#[test]
fn question_wire_shape_keeps_type_and_options_list() {
    let raw = r#"{"cvQuestions":[{"id":"q1","title":"Expected pay","type":"range","options":[{"id":"o1","min":100,"max":200}]}]}"#;
    let draft: CareerDraft = serde_json::from_str(raw).unwrap();
    let json = serde_json::to_value(&draft.cv_questions[0]).unwrap();

    assert_eq!(json["type"], "range");
    assert_eq!(json["options"].as_array().unwrap().len(), 1);
    assert_eq!(json["options"][0]["min"], 100.0);
    assert_eq!(json["options"][0]["id"], "o1");
}

// =========================================================================
// DraftStore
// =========================================================================

#[test]
fn draft_store_saves_envelope_and_restores_it() {
    let store = CountingStore::new();
    let drafts = DraftStore::new(Box::new(store.clone()), None);

    let mut data = CareerDraft::default();
    data.job_title = "Engineer".into();
    drafts.save(&data, 2).unwrap();

    let raw: serde_json::Value = serde_json::from_str(&store.raw("career_draft").unwrap()).unwrap();
    assert_eq!(raw["version"], 1);
    assert_eq!(raw["step"], 2);
    assert_eq!(raw["data"]["jobTitle"], "Engineer");

    match drafts.load().unwrap() {
        DraftLoad::Restored(stored) => {
            assert_eq!(stored.step(), Some(2));
            assert_eq!(stored.data().job_title, "Engineer");
        }
        other => panic!("Expected restored draft, got {:?}", other),
    }
}

#[test]
fn draft_store_discards_and_removes_corrupt_entry() {
    let store = CountingStore::seeded("career_r9", "{{{{");
    let drafts = DraftStore::new(Box::new(store.clone()), Some("r9"));

    assert!(matches!(drafts.load().unwrap(), DraftLoad::Discarded { .. }));
    assert_eq!(store.raw("career_r9"), None, "Corrupt key removed");
    assert_eq!(drafts.load().unwrap(), DraftLoad::Missing);
}

#[test]
fn memory_store_quota_rejects_write_and_keeps_old_value() {
    let store = MemoryStore::with_quota(40);
    store.set("k", "small").unwrap();

    let err = store.set("k", &"x".repeat(100)).unwrap_err();
    assert!(matches!(err, WizardError::StorageWrite { .. }));
    assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
}

#[test]
fn file_store_round_trips_and_ignores_missing_files() {
    let dir = std::env::temp_dir().join(format!("career-wizard-test-{}", std::process::id()));
    let store = FileStore::new(&dir);

    assert_eq!(store.get("career_draft").unwrap(), None);
    store.set("career_draft", r#"{"version":1}"#).unwrap();
    assert_eq!(
        store.get("career_draft").unwrap().as_deref(),
        Some(r#"{"version":1}"#)
    );

    store.remove("career_draft").unwrap();
    store.remove("career_draft").unwrap();
    assert_eq!(store.get("career_draft").unwrap(), None);

    let _ = std::fs::remove_dir_all(&dir);
}
