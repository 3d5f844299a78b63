//! Candidates read from a JSON file on disk.

use std::path::PathBuf;

use async_trait::async_trait;
use caseclock_core::{Category, DomainCandidate};
use tracing::info;

use crate::SourceError;
use crate::source::{CandidateSource, decode_list};

/// A JSON array of one domain's candidates, as exported by its calculator.
pub struct JsonFileSource {
    category: Category,
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(category: Category, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("{}:{}", category.as_str(), path.display());
        Self {
            category,
            path,
            name,
        }
    }
}

#[async_trait]
impl CandidateSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> Category {
        self.category
    }

    /// Read the file. With a non-empty `case_id`, candidates belonging to
    /// other cases are dropped; domain-global ones (empty case id) are kept.
    async fn fetch(&self, case_id: &str) -> Result<Vec<DomainCandidate>, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        let mut candidates = decode_list(self.category, &self.name, value)?;

        if !case_id.is_empty() {
            candidates.retain(|c| c.case_id().is_empty() || c.case_id() == case_id);
        }

        info!(path = %self.path.display(), count = candidates.len(), "read deadline candidates");
        Ok(candidates)
    }
}
