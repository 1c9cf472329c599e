//! Conversions at the API boundary: working record → request payload, and
//! stored profile → working record.

use serde::Serialize;
use serde_json::Value;

use crate::models::shape::conform;
use crate::models::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProfileRecord,
    ProjectEntry, PublicationEntry, Section,
};
use crate::profile::dates::DateNormalizer;

/// Top-level fields edited as comma-separated text and sent as string arrays.
pub const COMMA_FIELDS: &[&str] = &["skills", "achievements", "preferredLocations"];

/// Body for the create and update endpoints.
///
/// Only `prepare_for_submission` builds one, so a payload can never be
/// normalized a second time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SubmissionPayload(Value);

impl SubmissionPayload {
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// `"a, b ,, c"` → `["a", "b", "c"]`.
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn comma_value(value: Option<&Value>) -> Value {
    let list = match value {
        Some(Value::String(text)) => split_comma_list(text),
        _ => Vec::new(),
    };
    Value::from(list)
}

/// Builds the request body from the working record.
///
/// Comma-display fields become trimmed, non-empty string arrays (top-level
/// fields and each project's `technologies`). An experience marked current is
/// sent without an end date, whatever the working record still holds.
pub fn prepare_for_submission(
    record: &ProfileRecord,
) -> Result<SubmissionPayload, serde_json::Error> {
    let mut value = serde_json::to_value(record)?;
    if let Some(object) = value.as_object_mut() {
        for key in COMMA_FIELDS {
            let list = comma_value(object.get(*key));
            object.insert((*key).to_string(), list);
        }

        if let Some(Value::Array(projects)) = object.get_mut(Section::Projects.key()) {
            for project in projects.iter_mut().filter_map(Value::as_object_mut) {
                let list = comma_value(project.get("technologies"));
                project.insert("technologies".into(), list);
            }
        }

        if let Some(Value::Array(jobs)) = object.get_mut(Section::Experience.key()) {
            for job in jobs.iter_mut().filter_map(Value::as_object_mut) {
                if job.get("isCurrent") == Some(&Value::Bool(true)) {
                    job.insert("endDate".into(), Value::String(String::new()));
                }
            }
        }
    }

    Ok(SubmissionPayload(value))
}

fn entry_template(section: Section) -> Result<Value, serde_json::Error> {
    match section {
        Section::Experience => serde_json::to_value(ExperienceEntry::default()),
        Section::Education => serde_json::to_value(EducationEntry::default()),
        Section::Projects => serde_json::to_value(ProjectEntry::default()),
        Section::Certifications => serde_json::to_value(CertificationEntry::default()),
        Section::Languages => serde_json::to_value(LanguageEntry::default()),
        Section::Publications => serde_json::to_value(PublicationEntry::default()),
    }
}

/// Builds a working record from a profile fetched for editing.
///
/// Missing collections become empty, array fields are joined back into
/// comma-display text, `null`s fall back to defaults and entry dates go
/// through `dates` so the date inputs can show them.
pub fn hydrate_stored(
    stored: &Value,
    dates: &dyn DateNormalizer,
) -> Result<ProfileRecord, serde_json::Error> {
    let template = serde_json::to_value(ProfileRecord::default())?;
    let mut shaped = conform(&template, stored);

    if let Some(object) = shaped.as_object_mut() {
        for section in Section::ALL {
            let entry_shape = entry_template(section)?;
            let entries: Vec<Value> = stored
                .get(section.key())
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .map(|item| normalize_dates(conform(&entry_shape, item), dates))
                        .collect()
                })
                .unwrap_or_default();
            object.insert(section.key().to_string(), Value::Array(entries));
        }
    }

    serde_json::from_value(shaped)
}

fn normalize_dates(mut entry: Value, dates: &dyn DateNormalizer) -> Value {
    if let Some(object) = entry.as_object_mut() {
        for (key, value) in object.iter_mut() {
            if !key.ends_with("Date") {
                continue;
            }
            if let Value::String(raw) = value {
                let normalized = dates.normalize(raw.as_str());
                *raw = normalized;
            }
        }
    }
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::dates::{CalendarDateNormalizer, MonthYearNormalizer};
    use serde_json::json;

    #[test]
    fn test_split_drops_empty_and_trims() {
        assert_eq!(split_comma_list("a, b ,, c"), vec!["a", "b", "c"]);
        assert!(split_comma_list("").is_empty());
        assert!(split_comma_list(" , ").is_empty());
    }

    #[test]
    fn test_prepare_converts_comma_fields() {
        let record = ProfileRecord {
            skills: "a, b ,, c".into(),
            preferred_locations: "Pune, Remote".into(),
            projects: vec![ProjectEntry {
                title: "cli".into(),
                technologies: "Rust,  Tokio,".into(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let payload = prepare_for_submission(&record).unwrap();
        let value = payload.as_value();
        assert_eq!(value["skills"], json!(["a", "b", "c"]));
        assert_eq!(value["achievements"], json!([]));
        assert_eq!(value["preferredLocations"], json!(["Pune", "Remote"]));
        assert_eq!(value["projects"][0]["technologies"], json!(["Rust", "Tokio"]));
        assert_eq!(value["projects"][0]["title"], "cli");
        assert_eq!(value["jobType"], "Remote");
    }

    #[test]
    fn test_join_then_split_round_trip() {
        let skills = vec!["Rust".to_string(), "Distributed systems".to_string()];
        let record = ProfileRecord {
            skills: skills.join(", "),
            ..Default::default()
        };
        let payload = prepare_for_submission(&record).unwrap();
        assert_eq!(payload.as_value()["skills"], json!(skills));
    }

    #[test]
    fn test_prepare_blanks_end_date_for_current_role() {
        let record = ProfileRecord {
            experience: vec![
                ExperienceEntry {
                    end_date: "2023-01-01".into(),
                    is_current: true,
                    ..Default::default()
                },
                ExperienceEntry {
                    end_date: "2020-05-01".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let payload = prepare_for_submission(&record).unwrap();
        assert_eq!(payload.as_value()["experience"][0]["endDate"], "");
        assert_eq!(payload.as_value()["experience"][1]["endDate"], "2020-05-01");
        // working record keeps the stale value
        assert_eq!(record.experience[0].end_date, "2023-01-01");
    }

    #[test]
    fn test_hydrate_defaults_and_joins() {
        let stored = json!({
            "_id": "665f",
            "userId": "u1",
            "firstName": "Jane",
            "skills": ["Rust", "Go"],
            "achievements": ["Shipped"],
            "preferredLocations": ["Pune"],
            "totalExperienceInYears": 7,
            "gender": null,
            "usAuthorized": true,
            "projects": [{ "title": "cli", "technologies": ["Rust", "Clap"], "_id": "x" }]
        });
        let record = hydrate_stored(&stored, &MonthYearNormalizer).unwrap();
        assert_eq!(record.first_name, "Jane");
        assert_eq!(record.skills, "Rust, Go");
        assert_eq!(record.achievements, "Shipped");
        assert_eq!(record.preferred_locations, "Pune");
        assert_eq!(record.total_experience_in_years, "7");
        assert_eq!(record.gender, "Prefer not to say");
        assert_eq!(record.us_authorized, Some(true));
        assert_eq!(record.projects[0].technologies, "Rust, Clap");
        assert!(record.experience.is_empty());
        assert!(record.languages.is_empty());
    }

    #[test]
    fn test_hydrate_normalizes_entry_dates() {
        let stored = json!({
            "experience": [{
                "company": "Acme",
                "startDate": "2021-03-15T00:00:00.000Z",
                "endDate": null,
                "isCurrent": true
            }],
            "certifications": [{ "name": "CKA", "issueDate": "2023-02-10" }]
        });
        let month = hydrate_stored(&stored, &MonthYearNormalizer).unwrap();
        assert_eq!(month.experience[0].start_date, "2021-03-01");
        assert_eq!(month.experience[0].end_date, "");
        assert!(month.experience[0].is_current);
        assert_eq!(month.experience[0].experience_type, "Job");
        assert_eq!(month.certifications[0].issue_date, "2023-02-01");

        let calendar = hydrate_stored(&stored, &CalendarDateNormalizer).unwrap();
        assert_eq!(calendar.experience[0].start_date, "2021-03-15");
        assert_eq!(calendar.certifications[0].issue_date, "2023-02-10");
    }

    #[test]
    fn test_hydrate_then_prepare_restores_arrays() {
        let stored = json!({ "skills": ["Rust", "Go"], "projects": [{ "technologies": ["Axum"] }] });
        let record = hydrate_stored(&stored, &MonthYearNormalizer).unwrap();
        let payload = prepare_for_submission(&record).unwrap();
        assert_eq!(payload.as_value()["skills"], json!(["Rust", "Go"]));
        assert_eq!(payload.as_value()["projects"][0]["technologies"], json!(["Axum"]));
    }
}
