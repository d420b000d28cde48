use std::error::Error;

use log::{debug, info};
use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Client,
};

use super::models::{canvas_model::ApiPage, Config};

/// A trait, necessary for every entity that will be used for fetching pages of the Canvas API.
#[allow(async_fn_in_trait)]
pub trait PageGetter {
    async fn get_page(&self, url: &str) -> Result<ApiPage, Box<dyn Error>>;
}

/// Allows to use Client for getting pages via requests to the Canvas instance.
impl PageGetter for Client {
    async fn get_page(&self, url: &str) -> Result<ApiPage, Box<dyn Error>> {
        info!("Getting {}", url);
        let response = self.get(url).send().await?.error_for_status()?;
        let link = response
            .headers()
            .get(header::LINK)
            .map(|value| value.to_str())
            .transpose()?
            .map(str::to_owned);
        debug!("Link header of {}: {:?}", url, link);
        let body = response.json().await?;
        Ok(ApiPage { body, link })
    }
}

/// Builds the HTTP client, attaching the configured token to every request.
pub fn build_client(config: &Config) -> Result<Client, Box<dyn Error>> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(token) = &config.access_token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, value);
    }
    let user_agent = format!("canvas-syllabus-export/{}", env!("CARGO_PKG_VERSION"));
    Ok(Client::builder()
        .user_agent(user_agent)
        .default_headers(headers)
        .build()?)
}
