use std::path::PathBuf;

use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;
use thiserror::Error;

pub mod canvas_model;

/// A model for describing ARGS of the tool.
/// Consists of:
/// 1. URL (or path) of any page of the course, e.g. `https://canvas.example.edu/courses/1234/modules`.
/// 2. Path to config.json with the Canvas instance settings.
/// 3. Path of the produced HTML document, `-` writes it to stdout.
/// 4. Whether descriptions should be included. Asked interactively when omitted.
/// 5. Whether the document should open the print dialog when loaded in a browser.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[arg(value_name = "COURSE_URL")]
    pub course_url: String,
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    pub config_json_path: PathBuf,
    #[arg(short, long, value_name = "FILE", default_value = "syllabus.html")]
    pub output: PathBuf,
    #[arg(long, value_name = "BOOL")]
    pub include_descriptions: Option<bool>,
    #[arg(long)]
    pub print: bool,
}

/// How a paged collection signals its continuation.
/// Fixed per Canvas deployment, never chosen per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// Follow the `rel="next"` entry of the `Link` response header.
    #[default]
    LinkHeader,
    /// Request `page=1, 2, ...` until a page comes back empty.
    PageCounter,
}

/// A model for describing configuration of the tool.
/// Consists of:
/// 1. Root URL of the Canvas instance, without the `/api/v1` suffix
/// 2. Optional API token, passed through as a bearer token
/// 3. Pagination strategy used by the instance
/// 4. Optional page size, also enables short-page termination for page counting
/// 5. IANA timezone used for the dates in the document
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub canvas_base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub pagination: PaginationStrategy,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

fn default_timezone() -> String {
    "UTC".to_owned()
}

impl Config {
    /// Root of the REST API, e.g. `https://canvas.example.edu/api/v1`.
    pub fn api_base(&self) -> String {
        format!("{}/api/v1", self.canvas_base_url.trim_end_matches('/'))
    }

    pub fn tz(&self) -> Result<Tz, SyllabusError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SyllabusError::UnknownTimezone(self.timezone.clone()))
    }
}

/// Failures that are not transport or decoding errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SyllabusError {
    /// Location did not contain a recognizable course identifier.
    #[error("no Canvas course identifier found in {0:?}. Try running this tool with a Canvas course page URL")]
    CourseNotFound(String),
    /// A paged endpoint answered with something other than a JSON array.
    #[error("expected a JSON array in the response from {0}")]
    NotAnArray(String),
    /// SIS lookup answered without a numeric `id`.
    #[error("Canvas returned no course id for {0}")]
    MissingCourseId(String),
    #[error("unknown timezone {0:?}")]
    UnknownTimezone(String),
}
