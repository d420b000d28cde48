//! HTML rendering of an assembled syllabus.
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use super::models::canvas_model::{AssignmentGroupWeight, CourseInfo, TimedEntry};

const STYLE: &str = "<style>
  table { border-spacing:0; }
  th { background-color: #EEE; }
  td { border: 1px solid; }
</style>";

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Timezone the dates and times are shown in.
    pub tz: Tz,
    /// Open the print dialog as soon as the document loads.
    pub auto_print: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            tz: Tz::UTC,
            auto_print: false,
        }
    }
}

/// Escapes text that goes into element content.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// e.g. `Wed, Jan 10, 2024`
pub fn format_date(instant: &DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%a, %b %-d, %Y").to_string()
}

/// e.g. `10:00 AM`
pub fn format_time(instant: &DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%I:%M %p").to_string()
}

pub fn date_string(entry: &TimedEntry, tz: Tz) -> String {
    entry
        .start
        .map(|start| format_date(&start, tz))
        .unwrap_or_default()
}

pub fn time_string(entry: &TimedEntry, tz: Tz) -> String {
    match (entry.start, entry.end) {
        (Some(start), Some(end)) => {
            format!("{} to {}", format_time(&start, tz), format_time(&end, tz))
        }
        (Some(start), None) => format_time(&start, tz),
        _ => String::new(),
    }
}

/// Builds the printable syllabus: course header, syllabus body, schedule table
/// and assignment weights table.
pub fn render_document(
    course: &CourseInfo,
    schedule: &[TimedEntry],
    weights: &[AssignmentGroupWeight],
    options: &RenderOptions,
) -> String {
    let body_open = if options.auto_print {
        "<body onload=\"window.print()\">"
    } else {
        "<body>"
    };

    let mut content = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n{}\n</head>\n{}\n",
        escape_html(&course.name),
        STYLE,
        body_open
    );
    content += &format!(
        "<h1>{}</h1>{}<h2>Course Schedule</h2>\n",
        escape_html(&course.name),
        course.syllabus_body_html
    );
    content += "<table><tr><th>Date</th><th>Details</th><th>Time</th></tr>\n";
    for entry in schedule {
        content += &format!(
            "<tr><td>{}</td><td><strong>{}</strong><br/>{}</td><td>{}</td></tr>\n",
            date_string(entry, options.tz),
            escape_html(&entry.title),
            entry.description,
            time_string(entry, options.tz)
        );
    }
    content += "</table>\n<h2>Assignment Weights</h2>\n";
    content += "<table><tr><th>Assignment Group</th><th>Weight</th></tr>\n";
    for group in weights {
        content += &format!(
            "<tr><td>{}</td><td>{} %</td></tr>\n",
            escape_html(&group.name),
            group.weight_percent
        );
    }
    content += "</table>\n</body>\n</html>\n";
    content
}
