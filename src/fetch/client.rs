//! Async HTTP client for the region dump and the region tag lists
//!
//! Every request carries the operator's User-Agent. Failed requests are
//! reported, never retried.

use std::collections::HashSet;

use reqwest::Client;

use crate::core::config::LookoutConfig;
use crate::core::error::{LookoutError, Result};
use crate::ingest::parse_region_list;

pub const PASSWORD_TAG: &str = "password";
pub const FOUNDERLESS_TAG: &str = "founderless";

pub struct NsClient {
    client: Client,
    dump_url: String,
    api_url: String,
}

impl NsClient {
    pub fn new(user_agent: &str, dump_url: String, api_url: String) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            dump_url,
            api_url,
        })
    }

    pub fn from_config(config: &LookoutConfig) -> Result<Self> {
        Self::new(
            &config.user_agent_header(),
            config.dump_url.clone(),
            config.api_url.clone(),
        )
    }

    /// Download the gzipped region dump
    pub async fn fetch_dump(&self) -> Result<Vec<u8>> {
        let response = self.client.get(&self.dump_url).send().await?;
        if !response.status().is_success() {
            return Err(LookoutError::Http(format!(
                "dump download failed: {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        tracing::info!("Downloaded region dump ({} bytes)", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Names of every region carrying `tag`
    pub async fn fetch_tagged(&self, tag: &str) -> Result<HashSet<String>> {
        let url = self.tag_url(tag);
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LookoutError::Http(format!(
                "{} list request failed: {} {}",
                tag, status, error_text
            )));
        }

        let body = response.text().await?;
        let names = parse_region_list(&body)?;
        tracing::info!("Fetched {} regions tagged {}", names.len(), tag);
        Ok(names)
    }

    fn tag_url(&self, tag: &str) -> String {
        format!("{}?q=regionsbytag;tags={}", self.api_url, tag)
    }
}
