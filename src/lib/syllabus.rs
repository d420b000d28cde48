//! Syllabus export for Canvas courses: paged fetching, entry normalization,
//! schedule assembly and HTML rendering.
pub mod helpers;
pub mod models;
pub mod page_getter;
pub mod pagination;
pub mod renderer;
pub mod run_tool;
