//! HTTP source for a domain calculator exposing per-case deadline endpoints.

use std::time::Duration;

use async_trait::async_trait;
use caseclock_core::{Category, DomainCandidate};
use reqwest::Url;
use tracing::info;

use crate::SourceError;
use crate::source::{CandidateSource, decode_list};

/// Pulls one domain's candidates from `{base}/api/cases/{case_id}/deadlines/{domain}`.
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
    category: Category,
    name: String,
}

impl HttpSource {
    /// Create a source for `category` against `base_url`, e.g. `http://localhost:4000`.
    ///
    /// `timeout` bounds each whole request; a timed-out request fails the source.
    pub fn new(base_url: &str, category: Category, timeout: Duration) -> Result<Self, SourceError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SourceError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SourceError::InvalidUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let name = format!("{}:{}", category.as_str(), base_url);
        Ok(Self {
            client,
            base_url,
            category,
            name,
        })
    }

    /// Endpoint for one case. Path segments are percent-encoded.
    pub fn url_for(&self, case_id: &str) -> Result<Url, SourceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SourceError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["api", "cases", case_id, "deadlines", self.category.as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl CandidateSource for HttpSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    async fn fetch(&self, case_id: &str) -> Result<Vec<DomainCandidate>, SourceError> {
        let url = self.url_for(case_id)?;

        info!(url = %url, "pulling deadline candidates");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let value: serde_json::Value = resp.json().await?;
        let candidates = decode_list(self.category, &self.name, value)?;
        info!(
            category = self.category.as_str(),
            count = candidates.len(),
            "pulled deadline candidates"
        );
        Ok(candidates)
    }
}
