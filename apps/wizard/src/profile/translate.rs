//! Translates the resume parser's output into wizard fields.
//!
//! The parser's schema is not ours and is not fixed: the same attribute may
//! arrive under several names. Scalar targets are filled only when a source is
//! present; every collection is always produced (empty when absent).

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::models::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProfileRecord,
    ProjectEntry, PublicationEntry, Section,
};
use crate::models::shape::{is_truthy, value_to_text};
use crate::profile::dates::DateNormalizer;
use crate::profile::rules::{rules_for, FieldRule, Transform, PROFILE_RULES};

/// Partial profile produced by translation: scalar overrides keyed by wire name
/// plus all six collections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub fields: Map<String, Value>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<CertificationEntry>,
    pub languages: Vec<LanguageEntry>,
    pub publications: Vec<PublicationEntry>,
}

impl ProfilePatch {
    /// Returns `record` with the patch merged in: listed scalars overwrite,
    /// every collection is replaced. `record` itself is left untouched.
    pub fn apply_to(self, record: &ProfileRecord) -> Result<ProfileRecord, serde_json::Error> {
        let mut value = serde_json::to_value(record)?;
        if let Value::Object(object) = &mut value {
            object.extend(self.fields);
        }
        let mut merged: ProfileRecord = serde_json::from_value(value)?;
        merged.experience = self.experience;
        merged.education = self.education;
        merged.projects = self.projects;
        merged.certifications = self.certifications;
        merged.languages = self.languages;
        merged.publications = self.publications;
        Ok(merged)
    }
}

#[derive(Clone)]
pub struct SchemaTranslator {
    dates: Arc<dyn DateNormalizer>,
}

impl SchemaTranslator {
    pub fn new(dates: Arc<dyn DateNormalizer>) -> Self {
        Self { dates }
    }

    pub fn translate(&self, external: &Value) -> ProfilePatch {
        let mut fields = Map::new();

        if let Some(name) = external.get("name").and_then(Value::as_str) {
            if !name.is_empty() {
                let mut parts = name.split(' ');
                let first = parts.next().unwrap_or_default();
                let rest = parts.collect::<Vec<_>>().join(" ");
                fields.insert("firstName".into(), Value::String(first.to_string()));
                fields.insert("lastName".into(), Value::String(rest));
            }
        }

        fields.extend(self.apply_rules(external, PROFILE_RULES));

        if let Some(links) = external.get("links").and_then(Value::as_array) {
            classify_links(links, &mut fields);
        }

        let patch = ProfilePatch {
            fields,
            experience: self.entries(external, Section::Experience),
            education: self.entries(external, Section::Education),
            projects: self.entries(external, Section::Projects),
            certifications: self.entries(external, Section::Certifications),
            languages: self.entries(external, Section::Languages),
            publications: self.entries(external, Section::Publications),
        };
        debug!(
            "Translated parsed resume: {} scalar fields, {} experience, {} education",
            patch.fields.len(),
            patch.experience.len(),
            patch.education.len()
        );
        patch
    }

    fn entries<T: DeserializeOwned + Default>(&self, external: &Value, section: Section) -> Vec<T> {
        let Some(items) = external.get(section.key()).and_then(Value::as_array) else {
            return Vec::new();
        };
        items
            .iter()
            .map(|item| {
                let object = self.apply_rules(item, rules_for(section));
                serde_json::from_value(Value::Object(object)).unwrap_or_else(|e| {
                    warn!("Dropping malformed {} entry: {e}", section.key());
                    T::default()
                })
            })
            .collect()
    }

    /// Evaluates each rule against `source`, emitting only the targets that resolved.
    fn apply_rules(&self, source: &Value, rules: &[FieldRule]) -> Map<String, Value> {
        let mut out = Map::new();
        for rule in rules {
            let found = rule
                .sources
                .iter()
                .filter_map(|key| source.get(*key))
                .find(|v| is_truthy(v));
            if let Some(value) = self.resolve(found, rule.transform) {
                out.insert(rule.target.to_string(), value);
            }
        }
        out
    }

    fn resolve(&self, found: Option<&Value>, transform: Transform) -> Option<Value> {
        match transform {
            Transform::Flag => Some(Value::Bool(found.is_some())),
            Transform::Text(sep) => found
                .and_then(|v| value_to_text(v, sep))
                .map(Value::String),
            Transform::List(sep) => found
                .filter(|v| v.is_array())
                .and_then(|v| value_to_text(v, sep))
                .map(Value::String),
            Transform::Date => found
                .and_then(|v| value_to_text(v, " "))
                .map(|raw| Value::String(self.dates.normalize(&raw))),
        }
    }
}

fn classify_links(links: &[Value], fields: &mut Map<String, Value>) {
    for link in links.iter().filter_map(Value::as_str) {
        let target = if link.contains("linkedin.com") {
            "linkedin"
        } else if link.contains("github.com") {
            "github"
        } else if link.contains("twitter.com") || link.contains("x.com") {
            "twitter"
        } else if !fields.contains_key("portfolio") {
            "portfolio"
        } else {
            continue;
        };
        fields.insert(target.to_string(), Value::String(link.to_string()));
    }
}
