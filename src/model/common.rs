use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use uuid::Uuid;

pub type Id = Uuid;

pub fn generate_id() -> Id {
    Uuid::new_v4()
}

/// Creation timestamp, truncated to the microsecond precision of `TIMESTAMPTZ`
/// so a stored record reads back exactly as it was returned on create.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Parse an id taken from a request path or body. Only the lowercase hyphenated
/// form is accepted; anything else yields `None` so callers can treat it the
/// same as an id that does not resolve.
pub fn parse_id(raw: &str) -> Option<Id> {
    Uuid::parse_str(raw)
        .ok()
        .filter(|id| id.hyphenated().to_string() == raw)
}

/// A field-level constraint violated by a create or update payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0}")]
    MissingRequired(String),
    #[error("{field} must be at least {min} character(s) long")]
    TooShort { field: &'static str, min: usize },
    #[error("{field} is not a valid id: {value}")]
    InvalidReference { field: &'static str, value: String },
}

/// Text fields also take JSON numbers, stored in their JSON spelling.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextValue {
    Text(String),
    Number(serde_json::Number),
}

impl From<TextValue> for String {
    fn from(value: TextValue) -> Self {
        match value {
            TextValue::Text(text) => text,
            TextValue::Number(number) => number.to_string(),
        }
    }
}

/// `deserialize_with` for optional text fields; pair with `#[serde(default)]`.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<TextValue>::deserialize(deserializer)?.map(String::from))
}

/// Like [`text`] for update bodies: the outer `Option` records whether the
/// field was sent at all, the inner one whether it was `null`.
pub(crate) fn text_patch<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer).map(Some)
}

/// Sent-versus-null tracking for fields that only take strings.
pub(crate) fn string_patch<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Resolve a patched required field: absent keeps `existing`, `null` is
/// rejected as missing.
pub(crate) fn patch_required(
    field: &'static str,
    patch: Option<Option<String>>,
    existing: &str,
) -> Result<String, FieldError> {
    match patch {
        None => Ok(existing.to_string()),
        Some(Some(value)) => Ok(value),
        Some(None) => Err(FieldError::MissingRequired(format!("{} is required", field))),
    }
}

/// Resolve a patched optional field: absent keeps `existing`, `null` clears it.
pub(crate) fn patch_optional<T: Clone>(patch: Option<Option<T>>, existing: &Option<T>) -> Option<T> {
    match patch {
        None => existing.clone(),
        Some(value) => value,
    }
}

/// Required text fields reject empty strings, matching a `required` constraint
/// on a string column.
pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

pub(crate) fn check_min_length(
    field: &'static str,
    value: Option<&str>,
    min: usize,
) -> Result<(), FieldError> {
    match value {
        Some(v) if v.chars().count() < min => Err(FieldError::TooShort { field, min }),
        _ => Ok(()),
    }
}
