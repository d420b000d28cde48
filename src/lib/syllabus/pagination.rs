use std::{error::Error, sync::LazyLock};

use log::{debug, info};
use regex::Regex;
use reqwest::Url;
use serde_json::Value;

use super::{
    models::{canvas_model::PageCursor, PaginationStrategy, SyllabusError},
    page_getter::PageGetter,
};

/* one `<url>; rel="next"` entry among the comma-separated links, quotes optional */
static NEXT_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^<>\s]+)>[^,<>]*?;\s*rel="?next(?:"|[\s,;]|$)"#).unwrap()
});

/// Extracts the `rel="next"` URL from a `Link` header value.
pub fn parse_next_link(link_header: &str) -> Option<String> {
    NEXT_LINK
        .captures(link_header)
        .map(|captures| captures[1].to_owned())
}

/// Appends `key=value` to the query of `url`.
pub fn with_query_param(url: &str, key: &str, value: impl std::fmt::Display) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{key}={value}")
}

/* next links are normally absolute, but relative ones are resolved against the page they came from */
fn resolve_next(current: &str, next: &str) -> String {
    if Url::parse(next).is_ok() {
        return next.to_owned();
    }
    Url::parse(current)
        .and_then(|base| base.join(next))
        .map(String::from)
        .unwrap_or_else(|_| next.to_owned())
}

fn into_records(body: Value, url: &str) -> Result<Vec<Value>, SyllabusError> {
    match body {
        Value::Array(records) => Ok(records),
        _ => Err(SyllabusError::NotAnArray(url.to_owned())),
    }
}

/// Collects every record of a paged collection, in page order.
///
/// Pages are requested one after another, each continuation depends on the
/// previous response. Any failed page aborts the whole collection.
///
/// With `per_page` set, the first request carries `per_page=<n>` and the page
/// counting strategy stops on the first short page instead of requesting a
/// trailing empty one.
pub async fn fetch_all_pages<PG: PageGetter>(
    getter: &PG,
    base_url: &str,
    strategy: PaginationStrategy,
    per_page: Option<u32>,
) -> Result<Vec<Value>, Box<dyn Error>> {
    let base_url = match per_page {
        Some(size) => with_query_param(base_url, "per_page", size),
        None => base_url.to_owned(),
    };

    let mut records = Vec::new();
    let mut requests = 0;
    let mut cursor = Some(match strategy {
        PaginationStrategy::LinkHeader => PageCursor::NextUrl(base_url.clone()),
        PaginationStrategy::PageCounter => PageCursor::Page(1),
    });

    while let Some(current) = cursor.take() {
        requests += 1;
        match current {
            PageCursor::NextUrl(url) => {
                let page = getter.get_page(&url).await?;
                let page_records = into_records(page.body, &url)?;
                debug!("Page {} of {} has {} records", requests, base_url, page_records.len());
                records.extend(page_records);
                cursor = page
                    .link
                    .as_deref()
                    .and_then(parse_next_link)
                    .map(|next| PageCursor::NextUrl(resolve_next(&url, &next)));
            }
            PageCursor::Page(number) => {
                let url = with_query_param(&base_url, "page", number);
                let page = getter.get_page(&url).await?;
                let page_records = into_records(page.body, &url)?;
                let count = page_records.len();
                debug!("Page {} of {} has {} records", number, base_url, count);
                records.extend(page_records);
                let short_page = per_page.is_some_and(|size| count < size as usize);
                if count > 0 && !short_page {
                    cursor = Some(PageCursor::Page(number + 1));
                }
            }
        }
    }

    info!(
        "Collected {} records from {} in {} request(s)",
        records.len(),
        base_url,
        requests
    );
    Ok(records)
}
