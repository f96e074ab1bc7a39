//! Banners endpoint client
//!
//! Uses async reqwest for non-blocking HTTP requests.

use crate::config::Config;
use crate::error::{ReaderError, Result};
use crate::models::ImageDescriptor;
use reqwest::Client;

/// Remote image source: lists banner descriptors and downloads image bytes
#[derive(Debug, Clone)]
pub struct BannerSource {
    client: Client,
    endpoint: String,
}

impl BannerSource {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch the banner list.
    ///
    /// The body must be a non-empty JSON array of `{url, title}` objects. A body
    /// that is not a JSON array at all counts as an empty list.
    pub async fn fetch_descriptors(&self) -> Result<Vec<ImageDescriptor>> {
        log::info!("Fetching banner list from {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReaderError::HttpStatus(status));
        }

        let body = match serde_json::from_str::<serde_json::Value>(&response.text().await?) {
            Ok(body) if body.is_array() => body,
            Ok(body) => {
                log::warn!("Banner endpoint returned {}, not an array", json_kind(&body));
                return Err(ReaderError::NoImagesFound);
            }
            Err(e) => {
                log::warn!("Banner endpoint returned a non-JSON body: {}", e);
                return Err(ReaderError::NoImagesFound);
            }
        };
        let descriptors: Vec<ImageDescriptor> = serde_json::from_value(body)?;

        if descriptors.is_empty() {
            log::warn!("Banner endpoint returned an empty list");
            return Err(ReaderError::NoImagesFound);
        }

        log::debug!("Received {} banner descriptors", descriptors.len());
        Ok(descriptors)
    }

    /// Download image bytes from a URL
    pub async fn download(&self, url: &str) -> Result<Vec<u8>> {
        log::debug!("Downloading image: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(response.bytes().await?.to_vec())
        } else {
            Err(ReaderError::ImageFetchFailed {
                url: url.to_string(),
                status,
            })
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
