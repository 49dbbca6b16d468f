//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! Timestamps are `DateTime<Utc>` in memory and ISO-8601 strings with
//! millisecond precision on the wire (`2025-01-01T09:30:00.000Z`). Only todo
//! items carry timestamps; categories are plain labels.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel for "no category selected" in [`crate::TodoState::selected_category`].
pub const ALL_CATEGORIES: &str = "all";

/// Category that orphaned todos are reassigned to when their category is deleted.
pub const FALLBACK_CATEGORY: &str = "personal";

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub category: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

/// User input for a new todo. Timestamps are stamped by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub category: String,
}

/// Request payload for creating a todo: everything but the server-assigned id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub category: String,
    #[serde(with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso8601")]
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// Stamp a draft with a single creation instant.
    pub fn from_draft(draft: TodoDraft, now: DateTime<Utc>) -> Self {
        Self {
            title: draft.title,
            completed: draft.completed,
            category: draft.category,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso8601::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "iso8601::option")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// A user-defined grouping for todo items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
}

/// Request payload for updating a category.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Completion view selector applied to the todo collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter `{0}`, expected one of: all, completed, pending")]
pub struct ParseFilterError(pub String);

impl FromStr for Filter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "pending" => Ok(Filter::Pending),
            other => Err(ParseFilterError(other.to_string())),
        }
    }
}

/// Aggregate counts over the full, unfiltered todo collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

/// Serde adapter for ISO-8601 timestamps with millisecond precision.
pub(crate) mod iso8601 {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn format(value: &DateTime<Utc>) -> String {
        value.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(de::Error::custom)
    }

    pub mod option {
        use chrono::{DateTime, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.serialize_str(&super::format(dt)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            #[derive(Deserialize)]
            struct Wrapper(#[serde(deserialize_with = "super::deserialize")] DateTime<Utc>);

            Ok(Option::<Wrapper>::deserialize(deserializer)?.map(|Wrapper(dt)| dt))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn todo_item_uses_camel_case_and_iso_dates() {
        let todo = TodoItem {
            id: "1".to_string(),
            title: "Buy milk".to_string(),
            completed: false,
            category: "personal".to_string(),
            created_at: instant(),
            updated_at: instant(),
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["createdAt"], "2025-01-01T09:30:00.000Z");
        assert_eq!(json["updatedAt"], "2025-01-01T09:30:00.000Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn todo_item_accepts_offset_timestamps() {
        let raw = r#"{"id":"1","title":"t","completed":true,"category":"work",
            "createdAt":"2025-01-01T10:30:00+01:00","updatedAt":"2025-01-01T09:30:00Z"}"#;
        let todo: TodoItem = serde_json::from_str(raw).unwrap();
        assert_eq!(todo.created_at, instant());
        assert_eq!(todo.updated_at, instant());
    }

    #[test]
    fn todo_item_rejects_malformed_timestamp() {
        let raw = r#"{"id":"1","title":"t","completed":true,"category":"work",
            "createdAt":"yesterday","updatedAt":"2025-01-01T09:30:00Z"}"#;
        assert!(serde_json::from_str::<TodoItem>(raw).is_err());
    }

    #[test]
    fn new_todo_from_draft_stamps_both_timestamps() {
        let draft = TodoDraft {
            title: "Ship report".to_string(),
            completed: false,
            category: "work".to_string(),
        };
        let new = NewTodo::from_draft(draft, instant());
        assert_eq!(new.created_at, new.updated_at);
        let json = serde_json::to_value(&new).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["createdAt"], "2025-01-01T09:30:00.000Z");
    }

    #[test]
    fn todo_patch_omits_absent_fields() {
        let patch = TodoPatch {
            updated_at: Some(instant()),
            ..TodoPatch::completed(true)
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"completed": true, "updatedAt": "2025-01-01T09:30:00.000Z"})
        );
    }

    #[test]
    fn todo_patch_parses_partial_json() {
        let patch: TodoPatch =
            serde_json::from_str(r#"{"category":"personal","updatedAt":"2025-01-01T09:30:00.000Z"}"#)
                .unwrap();
        assert_eq!(patch.category.as_deref(), Some("personal"));
        assert_eq!(patch.updated_at, Some(instant()));
        assert!(patch.title.is_none());
        assert!(patch.created_at.is_none());
    }

    #[test]
    fn filter_parses_and_displays() {
        assert_eq!("pending".parse::<Filter>().unwrap(), Filter::Pending);
        assert_eq!(Filter::Completed.to_string(), "completed");
        assert_eq!(
            "done".parse::<Filter>().unwrap_err(),
            ParseFilterError("done".to_string())
        );
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn category_patch_all_fields_optional() {
        let patch: CategoryPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.name.is_none());
        assert_eq!(serde_json::to_string(&patch).unwrap(), "{}");
    }
}
