use std::error::Error;

use futures::try_join;
use log::info;

use super::{
    helpers::{
        assemble, group_weights, log_schedule, normalize_all, parse_course_ref, resolve_course_id,
    },
    models::{
        canvas_model::{CourseInfo, EntryKind},
        Config, SyllabusError,
    },
    page_getter::PageGetter,
    pagination::fetch_all_pages,
    renderer::{render_document, RenderOptions},
};

/// What one export is asked to produce.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// URL or path of any page of the course.
    pub location: String,
    pub include_description: bool,
    pub auto_print: bool,
}

async fn fetch_course<PG: PageGetter>(
    getter: &PG,
    api_base: &str,
    course_id: u64,
) -> Result<CourseInfo, Box<dyn Error>> {
    let page = getter
        .get_page(&format!(
            "{api_base}/courses/{course_id}?include[]=syllabus_body"
        ))
        .await?;
    Ok(serde_json::from_value(page.body)?)
}

/// Fetches everything the syllabus needs and renders it to HTML.
///
/// The four collections are fetched concurrently, the first failure aborts
/// the whole export.
pub async fn run<PG: PageGetter>(
    getter: &PG,
    request: &ExportRequest,
    config: &Config,
) -> Result<String, Box<dyn Error>> {
    let course_ref = parse_course_ref(&request.location)
        .ok_or_else(|| SyllabusError::CourseNotFound(request.location.clone()))?;
    let tz = config.tz()?;
    let api_base = config.api_base();
    let course_id = resolve_course_id(getter, &api_base, &course_ref).await?;
    info!("Exporting syllabus of course {}", course_id);

    let strategy = config.pagination;
    let per_page = config.per_page;
    let calendar_url = format!(
        "{api_base}/calendar_events?context_codes[]=course_{course_id}&all_events=true"
    );
    let assignments_url = format!("{api_base}/courses/{course_id}/assignments");
    let groups_url = format!("{api_base}/courses/{course_id}/assignment_groups");

    let (course, calendar_records, assignment_records, group_records) = try_join!(
        fetch_course(getter, &api_base, course_id),
        fetch_all_pages(getter, &calendar_url, strategy, per_page),
        fetch_all_pages(getter, &assignments_url, strategy, per_page),
        fetch_all_pages(getter, &groups_url, strategy, per_page),
    )?;

    let calendar_entries = normalize_all(
        &calendar_records,
        EntryKind::CalendarEvent,
        request.include_description,
    );
    let assignment_entries = normalize_all(
        &assignment_records,
        EntryKind::Assignment,
        request.include_description,
    );
    let schedule = assemble(calendar_entries, assignment_entries);
    log_schedule(&schedule);
    let weights = group_weights(&group_records);
    info!(
        "Assembled {} schedule entries and {} assignment groups for {}",
        schedule.len(),
        weights.len(),
        course.name
    );

    let options = RenderOptions {
        tz,
        auto_print: request.auto_print,
    };
    Ok(render_document(&course, &schedule, &weights, &options))
}
