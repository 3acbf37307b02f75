use crate::config::EntityConfig;
use crate::error::InvalidArgument;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Nl,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }
}

impl FromStr for Language {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "nl" => Ok(Language::Nl),
            other => Err(InvalidArgument::UnsupportedLanguage(vec![other.to_string()])),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// What a frequency query counts: word-form tokens or term lemmas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Token,
    Type,
}

impl FromStr for ItemKind {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "token" => Ok(ItemKind::Token),
            "type" => Ok(ItemKind::Type),
            other => Err(InvalidArgument::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKind::Token => f.write_str("token"),
            ItemKind::Type => f.write_str("type"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Person,
    Place,
}

impl EntityKind {
    /// The substring an entity's type tag must contain to be of this kind.
    pub fn marker<'a>(&self, cfg: &'a EntityConfig) -> &'a str {
        match self {
            EntityKind::Person => &cfg.person_marker,
            EntityKind::Place => &cfg.place_marker,
        }
    }
}

impl FromStr for EntityKind {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "person" => Ok(EntityKind::Person),
            "place" => Ok(EntityKind::Place),
            other => Err(InvalidArgument::UnknownEntityType(other.to_string())),
        }
    }
}

/// Parses a rank argument as given on the command line.
pub fn parse_rank(s: &str) -> Result<usize, InvalidArgument> {
    s.trim()
        .parse::<usize>()
        .map_err(|_| InvalidArgument::InvalidRank(s.to_string()))
}
