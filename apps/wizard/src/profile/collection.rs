//! Pure editing operations over a profile's repeatable sections.
//!
//! Entries have no id; they are addressed by position and indices stay dense.
//! Every operation returns a new `Vec` and never mutates its input.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{
    CertificationEntry, EducationEntry, ExperienceEntry, LanguageEntry, ProjectEntry,
    PublicationEntry,
};

/// An entry type that can live in a record collection. `Default` is the
/// template a freshly added entry starts from.
pub trait CollectionEntry: Clone + Default + Serialize + DeserializeOwned {}

impl CollectionEntry for ExperienceEntry {}
impl CollectionEntry for EducationEntry {}
impl CollectionEntry for ProjectEntry {}
impl CollectionEntry for CertificationEntry {}
impl CollectionEntry for LanguageEntry {}
impl CollectionEntry for PublicationEntry {}

/// Appends a fresh copy of `template`.
pub fn add<T: Clone>(items: &[T], template: &T) -> Vec<T> {
    let mut next = items.to_vec();
    next.push(template.clone());
    next
}

/// Replaces one named field on the entry at `index`.
///
/// Indices come from rendering the current collection, so a bad index, an
/// unknown field or a value of the wrong type is a caller bug: it is logged
/// and the collection comes back unchanged.
pub fn update_field<T: CollectionEntry>(
    items: &[T],
    index: usize,
    field: &str,
    value: Value,
) -> Vec<T> {
    let mut next = items.to_vec();
    let Some(entry) = next.get_mut(index) else {
        warn!("update_field: index {index} out of range (len {})", items.len());
        return next;
    };

    let mut object = match serde_json::to_value(&*entry) {
        Ok(Value::Object(map)) => map,
        _ => return next,
    };
    match object.get(field) {
        Some(current) if same_kind(current, &value) => {}
        Some(_) => {
            warn!("update_field: value for '{field}' has the wrong type");
            return next;
        }
        None => {
            warn!("update_field: unknown field '{field}'");
            return next;
        }
    }
    object.insert(field.to_string(), value);

    match serde_json::from_value::<T>(Value::Object(object)) {
        Ok(updated) => *entry = updated,
        Err(e) => warn!("update_field: rejected value for '{field}': {e}"),
    }
    next
}

/// Drops the entry at `index`; later entries shift down by one.
pub fn remove<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

fn same_kind(current: &Value, value: &Value) -> bool {
    matches!(
        (current, value),
        (Value::String(_), Value::String(_)) | (Value::Bool(_), Value::Bool(_))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Vec<ExperienceEntry> {
        vec![
            ExperienceEntry {
                company: "Acme".into(),
                ..Default::default()
            },
            ExperienceEntry {
                company: "Globex".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn test_add_appends_template_copy() {
        let items = add(&sample(), &ExperienceEntry::default());
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], ExperienceEntry::default());
        assert_eq!(items[2].experience_type, "Job");
    }

    #[test]
    fn test_add_then_remove_last_is_identity() {
        let original = sample();
        let grown = add(&original, &ExperienceEntry::default());
        assert_eq!(remove(&grown, original.len()), original);

        let empty: Vec<LanguageEntry> = Vec::new();
        assert_eq!(remove(&add(&empty, &LanguageEntry::default()), 0), empty);
    }

    #[test]
    fn test_add_does_not_share_state_between_entries() {
        let template = ProjectEntry::default();
        let items = add(&add(&[], &template), &template);
        let items = update_field(&items, 0, "title", json!("CLI"));
        assert_eq!(items[0].title, "CLI");
        assert_eq!(items[1].title, "");
    }

    #[test]
    fn test_update_field_replaces_only_that_field() {
        let original = sample();
        let items = update_field(&original, 1, "role", json!("SRE"));
        assert_eq!(items[1].role, "SRE");
        assert_eq!(items[1].company, "Globex");
        assert_eq!(items[0], original[0]);
        // input untouched
        assert_eq!(original[1].role, "");
    }

    #[test]
    fn test_update_field_boolean() {
        let items = update_field(&sample(), 0, "isCurrent", json!(true));
        assert!(items[0].is_current);
    }

    #[test]
    fn test_update_field_does_not_clear_end_date_when_current() {
        let items = update_field(&sample(), 0, "endDate", json!("2024-01-01"));
        let items = update_field(&items, 0, "isCurrent", json!(true));
        assert_eq!(items[0].end_date, "2024-01-01");
    }

    #[test]
    fn test_update_field_out_of_range_is_noop() {
        let original = sample();
        assert_eq!(update_field(&original, 5, "role", json!("x")), original);
    }

    #[test]
    fn test_update_field_unknown_or_mistyped_is_noop() {
        let original = sample();
        assert_eq!(update_field(&original, 0, "salary", json!("x")), original);
        assert_eq!(update_field(&original, 0, "isCurrent", json!("yes")), original);
    }

    #[test]
    fn test_remove_shifts_down() {
        let mut items = add(&sample(), &ExperienceEntry::default());
        items = update_field(&items, 2, "company", json!("Initech"));
        let items = remove(&items, 0);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].company, "Globex");
        assert_eq!(items[1].company, "Initech");
    }

    #[test]
    fn test_remove_out_of_range_keeps_all() {
        assert_eq!(remove(&sample(), 9), sample());
    }
}
