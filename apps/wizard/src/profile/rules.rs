// Synonym tables for translating parsed-resume output into wizard fields.
// The parser evolves independently, so each target lists every key it has been
// seen to use, in priority order. The first truthy source wins.

use crate::models::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Scalars rendered as text; arrays joined with the separator.
    Text(&'static str),
    /// Arrays only, joined with the separator. Anything else is ignored.
    List(&'static str),
    /// Text run through the configured `DateNormalizer`.
    Date,
    /// `true` when any source is truthy.
    Flag,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub target: &'static str,
    pub sources: &'static [&'static str],
    pub transform: Transform,
}

const fn rule(
    target: &'static str,
    sources: &'static [&'static str],
    transform: Transform,
) -> FieldRule {
    FieldRule {
        target,
        sources,
        transform,
    }
}

const TEXT: Transform = Transform::Text(", ");
const COMMA_LIST: Transform = Transform::List(", ");

/// Top-level scalar fields. `name` and `links` need custom handling and are not listed.
pub const PROFILE_RULES: &[FieldRule] = &[
    rule("email", &["email"], TEXT),
    rule("phone", &["phone"], TEXT),
    rule("street", &["address"], TEXT),
    rule("city", &["city"], TEXT),
    rule("state", &["state"], TEXT),
    rule("country", &["country"], TEXT),
    rule("zipCode", &["zip_code"], TEXT),
    rule("totalExperienceInYears", &["total_experience"], TEXT),
    rule("currentCTC", &["current_ctc"], TEXT),
    rule("expectedCTC", &["expected_ctc"], TEXT),
    rule("preferredLocations", &["preferred_locations"], COMMA_LIST),
    rule("skills", &["skills"], COMMA_LIST),
    rule("achievements", &["achievements"], COMMA_LIST),
];

pub const EDUCATION_RULES: &[FieldRule] = &[
    rule("school", &["institution", "school"], TEXT),
    rule("degree", &["degree", "qualification"], TEXT),
    rule("fieldOfStudy", &["field_of_study", "major"], TEXT),
    rule("grade", &["grade", "gpa"], TEXT),
    rule("startDate", &["start_date"], Transform::Date),
    rule("endDate", &["end_date", "graduation_date"], Transform::Date),
];

pub const EXPERIENCE_RULES: &[FieldRule] = &[
    rule("company", &["company", "employer"], TEXT),
    rule(
        "role",
        &["role", "position", "title", "job_title", "position_title"],
        TEXT,
    ),
    rule("experienceType", &["type"], TEXT),
    rule("startDate", &["start_date"], Transform::Date),
    rule("endDate", &["end_date"], Transform::Date),
    rule(
        "description",
        &[
            "description",
            "summary",
            "details",
            "responsibilities",
            "bullet_points",
        ],
        Transform::Text("\n"),
    ),
    rule("isCurrent", &["is_current", "current"], Transform::Flag),
];

pub const PROJECT_RULES: &[FieldRule] = &[
    rule("title", &["title", "name"], TEXT),
    rule("description", &["description", "summary"], TEXT),
    rule("technologies", &["technologies"], TEXT),
    rule("githubLink", &["github_url", "github"], TEXT),
    rule("liveDemoLink", &["demo_url", "live_url", "url"], TEXT),
];

pub const CERTIFICATION_RULES: &[FieldRule] = &[
    rule("name", &["name", "title"], TEXT),
    rule(
        "issuer",
        &["issuer", "organization", "issuing_organization"],
        TEXT,
    ),
    rule("issueDate", &["issue_date", "date_issued"], Transform::Date),
    rule(
        "expiryDate",
        &["expiry_date", "expiration_date"],
        Transform::Date,
    ),
    rule("credentialId", &["credential_id", "id"], TEXT),
    rule("credentialUrl", &["credential_url", "url"], TEXT),
];

pub const LANGUAGE_RULES: &[FieldRule] = &[
    rule("language", &["language", "name"], TEXT),
    rule("proficiency", &["proficiency", "level"], TEXT),
];

pub const PUBLICATION_RULES: &[FieldRule] = &[
    rule("title", &["title", "name"], TEXT),
    rule("link", &["link", "url"], TEXT),
    rule("description", &["description", "summary"], TEXT),
];

/// Per-entry rules for a section. Sections share their wire name with the parser's key.
pub fn rules_for(section: Section) -> &'static [FieldRule] {
    match section {
        Section::Experience => EXPERIENCE_RULES,
        Section::Education => EDUCATION_RULES,
        Section::Projects => PROJECT_RULES,
        Section::Certifications => CERTIFICATION_RULES,
        Section::Languages => LANGUAGE_RULES,
        Section::Publications => PUBLICATION_RULES,
    }
}
