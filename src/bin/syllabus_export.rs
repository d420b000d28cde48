use syllabus_lib::syllabus::helpers::{parse_course_ref, write_document};
use syllabus_lib::syllabus::models;
use syllabus_lib::syllabus::page_getter::build_client;
use syllabus_lib::syllabus::run_tool::{run, ExportRequest};

use std::{error::Error, path::Path, process::ExitCode};

use clap::Parser;
use dialoguer::Confirm;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::{error, info};
use models::{Args, Config, SyllabusError};

async fn export(args: &Args) -> Result<(), Box<dyn Error>> {
    /* Nothing is asked or fetched for pages outside a course */
    parse_course_ref(&args.course_url)
        .ok_or_else(|| SyllabusError::CourseNotFound(args.course_url.clone()))?;

    let config: Config = Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::prefixed("SYLLABUS_"))
        .extract()?;
    info!(
        "Read config.json from {}",
        std::path::absolute(&args.config_json_path)?.display()
    );

    let include_description = match args.include_descriptions {
        Some(include) => include,
        None => Confirm::new()
            .with_prompt(
                "Do you want to include descriptions for assignments and calendar events?",
            )
            .default(true)
            .interact()?,
    };

    let http_client = build_client(&config)?;
    let request = ExportRequest {
        location: args.course_url.clone(),
        include_description,
        auto_print: args.print,
    };
    let document = run(&http_client, &request, &config).await?;
    write_document(&args.output, &document)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    /* Setup logging, keeping stdout free when the document goes there */
    let target = if args.output == Path::new("-") {
        env_logger::Target::Stderr
    } else {
        env_logger::Target::Stdout
    };
    env_logger::builder()
        .target(target)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match export(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Syllabus export failed: {}", err);
            ExitCode::FAILURE
        }
    }
}
