use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{is_blank, patch_optional, patch_required, FieldError};
use crate::model::{generate_id, now, parse_id, Id};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beer {
    #[serde(rename = "_id")]
    pub id: Id,
    pub name: String,
    pub style: String,
    pub abv: Option<String>,
    /// Id of the brewing `Brewery`. Never checked against stored breweries.
    pub brewery: Option<Id>,
    pub timestamp: DateTime<Utc>,
}

impl Beer {
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.name.is_empty() {
            return Err(FieldError::MissingRequired("name is required".to_string()));
        }
        if self.style.is_empty() {
            return Err(FieldError::MissingRequired("style is required".to_string()));
        }
        Ok(())
    }
}

fn parse_reference(raw: Option<String>) -> Result<Option<Id>, FieldError> {
    match raw {
        None => Ok(None),
        Some(value) => parse_id(&value)
            .map(Some)
            .ok_or(FieldError::InvalidReference {
                field: "brewery",
                value,
            }),
    }
}

/// Body of `POST /api/beers`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NewBeer {
    #[serde(default, deserialize_with = "crate::model::common::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "crate::model::common::text")]
    pub style: Option<String>,
    #[serde(default, deserialize_with = "crate::model::common::text")]
    pub abv: Option<String>,
    pub brewery: Option<String>,
}

impl NewBeer {
    pub fn into_beer(self) -> Result<Beer, FieldError> {
        if is_blank(self.name.as_deref()) || is_blank(self.style.as_deref()) {
            return Err(FieldError::MissingRequired(
                "name and style are required".to_string(),
            ));
        }

        let beer = Beer {
            id: generate_id(),
            name: self.name.unwrap_or_default(),
            style: self.style.unwrap_or_default(),
            abv: self.abv,
            brewery: parse_reference(self.brewery)?,
            timestamp: now(),
        };
        beer.validate()?;
        Ok(beer)
    }
}

/// Body of `PUT /api/beers/:id`. Absent fields keep their stored value,
/// `null` clears the field (and fails validation for required ones).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BeerUpdate {
    #[serde(
        default,
        deserialize_with = "crate::model::common::text_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::model::common::text_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub style: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::model::common::text_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub abv: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "crate::model::common::string_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub brewery: Option<Option<String>>,
}

impl BeerUpdate {
    pub fn apply_to(self, existing: &Beer) -> Result<Beer, FieldError> {
        let brewery = match self.brewery {
            None => existing.brewery,
            Some(reference) => parse_reference(reference)?,
        };

        let updated = Beer {
            id: existing.id,
            name: patch_required("name", self.name, &existing.name)?,
            style: patch_required("style", self.style, &existing.style)?,
            abv: patch_optional(self.abv, &existing.abv),
            brewery,
            timestamp: existing.timestamp,
        };
        updated.validate()?;
        Ok(updated)
    }
}
