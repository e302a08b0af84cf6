//! Database models

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One registrant's stored form record (`submissions` table)
///
/// The two counts are kept as JSON values because SQLite stores whatever the
/// client sent when it cannot be converted to an integer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: i64,
    pub chname: String,
    pub cpname: String,
    pub name: String,
    pub pnumber: String,
    pub nvcount: Value,
    pub vcount: Value,
}

/// Scalar fields of a submission as received, before insertion
///
/// Values are bound verbatim; `Value::Null` binds SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSubmission {
    #[serde(default)]
    pub chname: Value,
    #[serde(default)]
    pub cpname: Value,
    #[serde(default)]
    pub name: Value,
    #[serde(default)]
    pub pnumber: Value,
    #[serde(default)]
    pub nvcount: Value,
    #[serde(default)]
    pub vcount: Value,
}

/// A serialized tag list (`tag_submissions` table)
///
/// Not linked to any submission row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSubmission {
    pub id: i64,
    pub tags: String,
}

/// Tables owned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Submissions,
    TagSubmissions,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Submissions => "submissions",
            Table::TagSubmissions => "tag_submissions",
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
