use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{
    check_min_length, is_blank, patch_optional, patch_required, FieldError,
};
use crate::model::{generate_id, now, Id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brewery {
    #[serde(rename = "_id")]
    pub id: Id,
    /// Unique across all breweries
    pub brewery: String,
    pub location: String,
    pub founded: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl Brewery {
    /// Re-run the field constraints against a fully populated record.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.brewery.is_empty() {
            return Err(FieldError::MissingRequired("brewery is required".to_string()));
        }
        if self.location.is_empty() {
            return Err(FieldError::MissingRequired("location is required".to_string()));
        }
        check_min_length("founded", self.founded.as_deref(), 1)
    }
}

/// Body of `POST /api/brewerys`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewBrewery {
    #[serde(default, deserialize_with = "crate::model::common::text")]
    pub brewery: Option<String>,
    #[serde(default, deserialize_with = "crate::model::common::text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "crate::model::common::text")]
    pub founded: Option<String>,
}

impl NewBrewery {
    pub fn into_brewery(self) -> Result<Brewery, FieldError> {
        if is_blank(self.brewery.as_deref()) || is_blank(self.location.as_deref()) {
            return Err(FieldError::MissingRequired(
                "brewery and location are required".to_string(),
            ));
        }

        let brewery = Brewery {
            id: generate_id(),
            brewery: self.brewery.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
            founded: self.founded,
            timestamp: now(),
        };
        brewery.validate()?;
        Ok(brewery)
    }
}

/// Body of `PUT /api/brewerys/:id`. Absent fields keep their stored value,
/// `null` clears the field (and fails validation for required ones).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BreweryUpdate {
    #[serde(
        default,
        deserialize_with = "crate::model::common::text_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub brewery: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::model::common::text_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::model::common::text_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub founded: Option<Option<String>>,
}

impl BreweryUpdate {
    pub fn apply_to(self, existing: &Brewery) -> Result<Brewery, FieldError> {
        let updated = Brewery {
            id: existing.id,
            brewery: patch_required("brewery", self.brewery, &existing.brewery)?,
            location: patch_required("location", self.location, &existing.location)?,
            founded: patch_optional(self.founded, &existing.founded),
            timestamp: existing.timestamp,
        };
        updated.validate()?;
        Ok(updated)
    }
}
