//! Concurrent, fail-open collection of candidates from several sources.

use caseclock_core::{CandidateSet, Category};
use futures::future::join_all;
use tracing::{info, warn};

use crate::SourceError;
use crate::source::CandidateSource;

/// A source that could not be read during one gather.
#[derive(Debug)]
pub struct SourceFailure {
    pub name: String,
    pub category: Category,
    pub error: SourceError,
}

/// Candidates from every source that answered, plus the ones that did not.
#[derive(Debug, Default)]
pub struct Gathered {
    pub candidates: CandidateSet,
    pub failures: Vec<SourceFailure>,
}

impl Gathered {
    /// True when every source answered. An empty candidate set from complete
    /// sources means "no deadlines"; with failures it means "unknown".
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fetch from all `sources` concurrently for `case_id`.
///
/// A failed source contributes nothing and is recorded in
/// [`Gathered::failures`]; the others are unaffected. Within a domain,
/// candidates keep the order of `sources`, then each source's own order.
pub async fn gather(sources: &[Box<dyn CandidateSource>], case_id: &str) -> Gathered {
    let results = join_all(sources.iter().map(|s| s.fetch(case_id))).await;

    let mut gathered = Gathered::default();
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(candidates) => {
                info!(
                    source = source.name(),
                    count = candidates.len(),
                    "deadline source answered"
                );
                gathered.candidates.extend(candidates);
            }
            Err(error) => {
                warn!(
                    source = source.name(),
                    category = source.category().as_str(),
                    error = %error,
                    "deadline source failed, continuing without it"
                );
                gathered.failures.push(SourceFailure {
                    name: source.name().to_string(),
                    category: source.category(),
                    error,
                });
            }
        }
    }
    gathered
}
