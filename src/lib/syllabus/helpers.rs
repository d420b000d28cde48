use std::{cmp::Ordering, error::Error, fs::File, io::Write, path::Path, sync::LazyLock};

use chrono::{DateTime, Utc};
use log::{debug, info};
use regex::Regex;
use serde_json::Value;

use crate::syllabus::{
    models::{
        canvas_model::{AssignmentGroupWeight, CourseRef, EntryKind, TimedEntry},
        SyllabusError,
    },
    page_getter::PageGetter,
};

static COURSE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"courses/(\d+)").unwrap());
static SIS_COURSE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"courses/(sis_course_id:\d+)").unwrap());

/// Finds the course identifier in a page URL or path.
/// Numeric identifiers win over the SIS form.
pub fn parse_course_ref(location: &str) -> Option<CourseRef> {
    if let Some(id) = COURSE_ID
        .captures(location)
        .and_then(|captures| captures[1].parse::<u64>().ok())
    {
        return Some(CourseRef::Numeric(id));
    }
    SIS_COURSE_ID
        .captures(location)
        .map(|captures| CourseRef::Sis(captures[1].to_owned()))
}

/// Turns a course reference into the numeric id the API paths need.
/// SIS identifiers cost one lookup request.
pub async fn resolve_course_id<PG: PageGetter>(
    getter: &PG,
    api_base: &str,
    course_ref: &CourseRef,
) -> Result<u64, Box<dyn Error>> {
    match course_ref {
        CourseRef::Numeric(id) => Ok(*id),
        CourseRef::Sis(sis_id) => {
            info!("Resolving SIS course identifier {}", sis_id);
            let page = getter
                .get_page(&format!("{api_base}/courses/{sis_id}"))
                .await?;
            let id = page
                .body
                .get("id")
                .and_then(Value::as_u64)
                .ok_or_else(|| SyllabusError::MissingCourseId(sis_id.clone()))?;
            info!("{} is course {}", sis_id, id);
            Ok(id)
        }
    }
}

/// Parses an ISO-8601 timestamp, absent and malformed values give `None`.
pub fn parse_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let raw = value?.as_str()?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Some(instant.with_timezone(&Utc)),
        Err(err) => {
            debug!("Ignoring malformed timestamp {:?}: {}", raw, err);
            None
        }
    }
}

fn text_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}

/// Maps a raw calendar event or assignment record into a `TimedEntry`.
pub fn normalize(record: &Value, kind: EntryKind, include_description: bool) -> TimedEntry {
    let description = if include_description {
        text_field(record, "description")
    } else {
        String::new()
    };

    match kind {
        EntryKind::CalendarEvent => TimedEntry {
            title: text_field(record, "title"),
            description,
            start: parse_timestamp(record.get("start_at")),
            end: parse_timestamp(record.get("end_at")),
        },
        EntryKind::Assignment => TimedEntry {
            title: text_field(record, "name"),
            description,
            start: parse_timestamp(record.get("due_at")),
            end: None,
        },
    }
}

pub fn normalize_all(
    records: &[Value],
    kind: EntryKind,
    include_description: bool,
) -> Vec<TimedEntry> {
    records
        .iter()
        .map(|record| normalize(record, kind, include_description))
        .collect()
}

/* undated entries go after every dated one */
fn compare_start(fst: &TimedEntry, snd: &TimedEntry) -> Ordering {
    match (fst.start, snd.start) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Merges calendar events and assignments into one chronological schedule.
/// The sort is stable, entries without a start keep their input order at the end.
pub fn assemble(
    calendar_entries: Vec<TimedEntry>,
    assignment_entries: Vec<TimedEntry>,
) -> Vec<TimedEntry> {
    let mut schedule = calendar_entries;
    schedule.extend(assignment_entries);
    schedule.sort_by(compare_start);
    schedule
}

pub fn group_weights(records: &[Value]) -> Vec<AssignmentGroupWeight> {
    records
        .iter()
        .map(|record| AssignmentGroupWeight {
            name: text_field(record, "name"),
            weight_percent: record
                .get("group_weight")
                .and_then(Value::as_f64)
                .unwrap_or_default(),
        })
        .collect()
}

pub fn log_schedule(schedule: &[TimedEntry]) -> () {
    for entry in schedule.iter() {
        debug!(
            "Scheduled {:?} from {:?} to {:?}",
            entry.title, entry.start, entry.end
        );
    }
}

/// Writes the document to `path`, `-` means stdout.
pub fn write_document(path: &Path, document: &str) -> Result<(), Box<dyn Error>> {
    if path == Path::new("-") {
        std::io::stdout().write_all(document.as_bytes())?;
        return Ok(());
    }
    info!(
        "Writing syllabus to {}",
        std::path::absolute(path)?.display()
    );
    let mut file = File::create(path)?;
    file.write_all(document.as_bytes())?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
