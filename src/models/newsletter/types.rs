use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Group priority of an alphanumeric item without any ranked mandatee.
pub const MISSING_LETTER_PRIORITY: &str = "ZZZZZZZZ";

/// Group priority of a numeric item without any ranked mandatee.
/// Kept finite so it still compares and serializes as a plain number.
pub const MISSING_NUMERIC_GROUP_PRIORITY: f64 = 2_147_000.0;

/// How `mandateePriority` values are read and how group keys are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityScheme {
    /// Integer ranks; group key is `min + sum(rest / 100)`.
    Numeric,
    /// Ranks mapped onto `A..Z`; group key is the joined letters.
    #[default]
    Alphanumeric,
}

impl FromStr for PriorityScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numeric" => Ok(PriorityScheme::Numeric),
            "alphanumeric" => Ok(PriorityScheme::Alphanumeric),
            other => Err(format!("unknown priority scheme: {other}")),
        }
    }
}

/// A normalized mandatee rank. One run only ever holds one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum Priority {
    Rank(i64),
    Letter(char),
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Rank(n) => write!(f, "{n}"),
            Priority::Letter(c) => write!(f, "{c}"),
        }
    }
}

/// One row per (decision item x co-sponsoring mandatee), as the data source returns it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDecisionRecord {
    pub newsletter_id: String,
    pub title: Option<String>,
    pub proposal_text: Option<String>,
    pub rich_text: Option<String>,
    pub themes: Option<String>,
    pub item_position: Option<String>,
    pub mandatee_priority: Option<String>,
    pub mandatee_title: Option<String>,
    pub mandatee_nickname: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Mandatee {
    pub priority: Option<Priority>,
    pub title: Option<String>,
    pub nickname: Option<String>,
}

impl Mandatee {
    /// Nickname when present, otherwise the formal title.
    pub fn display_name(&self) -> Option<&str> {
        non_blank(self.nickname.as_deref()).or_else(|| non_blank(self.title.as_deref()))
    }

    /// Ranked mandatees first, ascending; unranked ones last.
    pub(crate) fn cmp_priority(&self, other: &Self) -> Ordering {
        match (&self.priority, &other.priority) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Ordering key of a grouped item. Numeric keys compare as numbers,
/// alphanumeric keys as plain strings.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GroupPriority {
    Numeric(f64),
    Alphanumeric(String),
}

impl Ord for GroupPriority {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupPriority::Numeric(a), GroupPriority::Numeric(b)) => a.total_cmp(b),
            (GroupPriority::Alphanumeric(a), GroupPriority::Alphanumeric(b)) => a.cmp(b),
            (GroupPriority::Numeric(_), GroupPriority::Alphanumeric(_)) => Ordering::Less,
            (GroupPriority::Alphanumeric(_), GroupPriority::Numeric(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for GroupPriority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupPriority {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupPriority {}

impl fmt::Display for GroupPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupPriority::Numeric(n) => write!(f, "{n}"),
            GroupPriority::Alphanumeric(s) => f.write_str(s),
        }
    }
}

/// One entry per distinct newsletter id, carrying its sorted mandatees and derived fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedNewsletterItem {
    pub newsletter_id: String,
    pub title: Option<String>,
    pub rich_text: Option<String>,
    pub themes: Option<String>,
    pub item_position: Option<i64>,
    pub mandatees: Vec<Mandatee>,
    pub group_name: String,
    pub group_priority: GroupPriority,
    pub proposal_text: String,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
