/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 15/10/26
******************************************************************************/
use crate::constants::ALL_BREEDS_LABEL;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Photo of an animal at the resolutions served by the API
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Photo {
    /// Small thumbnail URL
    #[serde(default)]
    pub small: Option<String>,
    /// Medium size URL
    #[serde(default)]
    pub medium: Option<String>,
    /// Large size URL
    #[serde(default)]
    pub large: Option<String>,
    /// Full resolution URL
    #[serde(default)]
    pub full: Option<String>,
}

/// Breed information of an animal
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Breeds {
    /// Primary breed
    #[serde(default)]
    pub primary: Option<String>,
    /// Secondary breed, for mixes
    #[serde(default)]
    pub secondary: Option<String>,
    /// Whether the animal is a mixed breed
    #[serde(default)]
    pub mixed: bool,
    /// Whether the breed is unknown
    #[serde(default)]
    pub unknown: bool,
}

/// An adoptable animal as returned by the listing endpoints
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Animal {
    /// Identifier assigned by the API
    pub id: u64,
    /// Display name
    pub name: String,
    /// Gender as reported by the shelter
    #[serde(default)]
    pub gender: String,
    /// Age bracket (Baby, Young, Adult, Senior)
    #[serde(default)]
    pub age: String,
    /// Breed information
    #[serde(default)]
    pub breeds: Breeds,
    /// Coat length
    #[serde(default)]
    pub coat: Option<String>,
    /// Photos, in the order the shelter published them
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Free text description
    #[serde(default)]
    pub description: Option<String>,
    /// Public listing URL
    #[serde(default)]
    pub url: Option<String>,
}

impl Animal {
    /// Large version of the first photo, used for cards and the detail view
    #[must_use]
    pub fn cover_photo(&self) -> Option<&str> {
        self.photos.first().and_then(|photo| photo.large.as_deref())
    }

    /// Human readable breed, e.g. "Beagle / Pug"
    #[must_use]
    pub fn breed_label(&self) -> String {
        match (&self.breeds.primary, &self.breeds.secondary) {
            (Some(primary), Some(secondary)) => format!("{primary} / {secondary}"),
            (Some(primary), None) => primary.clone(),
            (None, Some(secondary)) => secondary.clone(),
            (None, None) => "Unknown".to_string(),
        }
    }
}

/// Payload of the listing endpoints
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AnimalList {
    /// Animals in server order
    #[serde(default)]
    pub animals: Vec<Animal>,
}

impl AnimalList {
    /// Number of animals in the page
    #[must_use]
    pub fn len(&self) -> usize {
        self.animals.len()
    }

    /// Whether the page is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animals.is_empty()
    }
}

/// Breed used as a tab label and as a query filter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BreedFilter {
    /// No filter, every breed
    All,
    /// Only animals of the named breed
    Breed(String),
}

impl BreedFilter {
    /// Label shown on the breed tab
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            BreedFilter::All => ALL_BREEDS_LABEL,
            BreedFilter::Breed(name) => name,
        }
    }

    /// Value of the `breed` query parameter, `None` for the sentinel
    #[must_use]
    pub fn query_value(&self) -> Option<&str> {
        match self {
            BreedFilter::All => None,
            BreedFilter::Breed(name) => Some(name),
        }
    }
}

impl From<&str> for BreedFilter {
    fn from(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case(ALL_BREEDS_LABEL) {
            BreedFilter::All
        } else {
            BreedFilter::Breed(name.to_string())
        }
    }
}

impl fmt::Display for BreedFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
