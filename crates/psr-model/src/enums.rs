use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Member gender as offered by the gender select.
///
/// Changing gender drives the derived title rule: Male selects Mr and Female
/// selects Ms, while Other leaves the current title in place.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }

    /// The title implied by this gender, if any.
    pub fn derived_title(&self) -> Option<Title> {
        match self {
            Gender::Male => Some(Title::Mr),
            Gender::Female => Some(Title::Ms),
            Gender::Other => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(ModelError::UnknownGender(other.to_string())),
        }
    }
}

/// Salutation offered by the title select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Title {
    #[default]
    Mr,
    Ms,
    Mrs,
}

impl Title {
    pub fn as_str(&self) -> &'static str {
        match self {
            Title::Mr => "Mr",
            Title::Ms => "Ms",
            Title::Mrs => "Mrs",
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Title {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Mr" => Ok(Title::Mr),
            "Ms" => Ok(Title::Ms),
            "Mrs" => Ok(Title::Mrs),
            other => Err(ModelError::UnknownTitle(other.to_string())),
        }
    }
}
