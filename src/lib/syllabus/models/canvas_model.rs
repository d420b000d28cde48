//! Module with the course models built from Canvas's REST API
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CourseInfo {
    #[serde(default)]
    pub name: String,
    #[serde(
        rename = "syllabus_body",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub syllabus_body_html: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Source of a raw record handed to normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    CalendarEvent,
    Assignment,
}

/// A schedule-able item, either a calendar event or an assignment.
/// An `end` is expected to come with a `start`, nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimedEntry {
    pub title: String,
    pub description: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentGroupWeight {
    pub name: String,
    pub weight_percent: f64,
}

/// Continuation of a paged collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageCursor {
    NextUrl(String),
    Page(u32),
}

/// One HTTP response as seen by the paged fetcher.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiPage {
    pub body: Value,
    /// Raw `Link` header, if the server sent one.
    pub link: Option<String>,
}

/// Course identifier found in a page location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseRef {
    Numeric(u64),
    /// Alternate SIS form, e.g. `sis_course_id:1234`.
    Sis(String),
}
