// Knowledge-base record and tag types.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::AmuseError;

/// Category label a record can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Tech,
    Debug,
    Arch,
    Trivia,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Tag::Tech, Tag::Debug, Tag::Arch, Tag::Trivia];

    /// Label as it appears in the dataset's third column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Tech => "tech",
            Tag::Debug => "debug",
            Tag::Arch => "arch",
            Tag::Trivia => "trivia",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tag {
    type Err = AmuseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| {
                AmuseError::Other(format!(
                    "Invalid tag. Use one of: {}",
                    Tag::ALL.map(|t| t.as_str()).join(", ")
                ))
            })
    }
}

/// One dataset row: format, link and tag. Trailing columns are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub format: String,
    pub link: String,
    pub tags: String,
}

impl Record {
    /// Build a record from a parsed row, or `None` if it has fewer than three fields.
    pub fn from_row(row: &csv::StringRecord) -> Option<Self> {
        Some(Self {
            format: row.get(0)?.to_string(),
            link: row.get(1)?.to_string(),
            tags: row.get(2)?.to_string(),
        })
    }

    /// Three-line human-readable rendering.
    pub fn render(&self) -> String {
        format!(
            "Format: {}\nLink: {}\nTags: {}",
            self.format, self.link, self.tags
        )
    }
}
