use serde::{Deserialize, Serialize};

const UNDISCLOSED: &str = "Prefer not to say";

/// The wizard's working copy of one professional profile.
///
/// Comma-display fields (`skills`, `achievements`, `preferred_locations` and
/// each project's `technologies`) hold the human-editable text; they only
/// become string arrays in the submission payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileRecord {
    pub profile_name: String,
    pub resume_url: String,
    pub first_name: String,
    pub last_name: String,
    pub pronouns: String,

    pub gender: String,
    pub ethnicity: String,
    pub race: String,
    pub disability_status: String,
    pub veteran_status: String,

    pub email: String,
    pub phone_country_code: String,
    pub phone: String,

    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip_code: String,

    pub portfolio: String,
    pub linkedin: String,
    pub github: String,
    pub twitter: String,
    pub other_social_link: String,

    pub nationality: String,
    pub us_authorized: Option<bool>,
    pub sponsorship_required: Option<bool>,
    pub citizenship_status: String,

    pub job_type: String,
    pub preferred_locations: String,
    #[serde(rename = "currentCTC")]
    pub current_ctc: String,
    #[serde(rename = "expectedCTC")]
    pub expected_ctc: String,
    pub willing_to_relocate: bool,
    pub notice_period_available: bool,
    pub notice_period_duration_in_days: String,
    pub total_experience_in_years: String,
    pub skills: String,
    pub achievements: String,

    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub languages: Vec<LanguageEntry>,
    pub publications: Vec<PublicationEntry>,
}

impl Default for ProfileRecord {
    fn default() -> Self {
        Self {
            profile_name: String::new(),
            resume_url: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            pronouns: String::new(),
            gender: UNDISCLOSED.to_string(),
            ethnicity: String::new(),
            race: String::new(),
            disability_status: UNDISCLOSED.to_string(),
            veteran_status: UNDISCLOSED.to_string(),
            email: String::new(),
            phone_country_code: String::new(),
            phone: String::new(),
            street: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            zip_code: String::new(),
            portfolio: String::new(),
            linkedin: String::new(),
            github: String::new(),
            twitter: String::new(),
            other_social_link: String::new(),
            nationality: String::new(),
            us_authorized: None,
            sponsorship_required: None,
            citizenship_status: String::new(),
            job_type: "Remote".to_string(),
            preferred_locations: String::new(),
            current_ctc: String::new(),
            expected_ctc: String::new(),
            willing_to_relocate: false,
            notice_period_available: false,
            notice_period_duration_in_days: String::new(),
            total_experience_in_years: String::new(),
            skills: String::new(),
            achievements: String::new(),
            experience: Vec::new(),
            education: Vec::new(),
            projects: Vec::new(),
            certifications: Vec::new(),
            languages: Vec::new(),
            publications: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: String,
    pub role: String,
    pub experience_type: String,
    pub start_date: String,
    pub end_date: String,
    pub is_current: bool,
    pub description: String,
}

impl Default for ExperienceEntry {
    fn default() -> Self {
        Self {
            company: String::new(),
            role: String::new(),
            experience_type: "Job".to_string(),
            start_date: String::new(),
            end_date: String::new(),
            is_current: false,
            description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub grade: String,
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    /// Comma-display text, e.g. `"Rust, Tokio"`.
    pub technologies: String,
    pub github_link: String,
    pub live_demo_link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificationEntry {
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    pub expiry_date: String,
    pub credential_id: String,
    pub credential_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageEntry {
    pub language: String,
    pub proficiency: String,
}

impl Default for LanguageEntry {
    fn default() -> Self {
        Self {
            language: String::new(),
            proficiency: "Conversational".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicationEntry {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// One of the six repeatable sub-sections of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Experience,
    Education,
    Projects,
    Certifications,
    Languages,
    Publications,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
        Section::Publications,
    ];

    /// Wire name of the collection inside a profile object.
    pub fn key(&self) -> &'static str {
        match self {
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::Languages => "languages",
            Section::Publications => "publications",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_record_serializes_with_wire_names() {
        let value = serde_json::to_value(ProfileRecord::default()).unwrap();
        assert_eq!(value["jobType"], "Remote");
        assert_eq!(value["gender"], "Prefer not to say");
        assert_eq!(value["currentCTC"], "");
        assert_eq!(value["expectedCTC"], "");
        assert_eq!(value["usAuthorized"], serde_json::Value::Null);
        assert_eq!(value["experience"], json!([]));
    }

    #[test]
    fn test_entry_templates() {
        assert_eq!(ExperienceEntry::default().experience_type, "Job");
        assert!(!ExperienceEntry::default().is_current);
        assert_eq!(LanguageEntry::default().proficiency, "Conversational");
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let record: ProfileRecord =
            serde_json::from_value(json!({ "firstName": "Jane" })).unwrap();
        assert_eq!(record.first_name, "Jane");
        assert!(record.projects.is_empty());
        assert_eq!(record.job_type, "Remote");
    }

    #[test]
    fn test_section_keys_match_record_fields() {
        let value = serde_json::to_value(ProfileRecord::default()).unwrap();
        for section in Section::ALL {
            assert!(value[section.key()].is_array(), "{}", section.key());
        }
    }
}
