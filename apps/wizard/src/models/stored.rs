use serde::{Deserialize, Serialize};

/// One row of the profile listing returned by `GET /profiles/getprofiles/{userId}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SummaryRow")]
pub struct ProfileSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub profile_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub updated_at: Option<String>,
}

/// Wire form of a listing row. Documents may carry `_id`, `id` or both.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRow {
    #[serde(rename = "_id", default)]
    object_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    profile_name: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl TryFrom<SummaryRow> for ProfileSummary {
    type Error = String;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        let id = pick_id(row.object_id, row.id).ok_or("profile row has no '_id' or 'id'")?;
        Ok(Self {
            id,
            profile_name: row.profile_name,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            updated_at: row.updated_at,
        })
    }
}

/// `_id` wins over `id`; empty values count as missing.
pub(crate) fn pick_id(object_id: Option<String>, id: Option<String>) -> Option<String> {
    object_id
        .filter(|v| !v.is_empty())
        .or_else(|| id.filter(|v| !v.is_empty()))
}

impl ProfileSummary {
    /// Label shown in listings: the profile (role) name, else the person's name.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.profile_name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if full.is_empty() {
            "Untitled profile".to_string()
        } else {
            full
        }
    }
}
