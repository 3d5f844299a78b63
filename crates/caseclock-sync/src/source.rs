use async_trait::async_trait;
use caseclock_core::{Category, DomainCandidate};
use tracing::warn;

use crate::SourceError;

/// An upstream that produces deadline candidates for one domain.
///
/// Implementations own their own timeout policy. A returned error means the
/// whole source is unavailable; individual bad records are skipped instead.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Label for logs and failure reports.
    fn name(&self) -> &str;

    fn category(&self) -> Category;

    async fn fetch(&self, case_id: &str) -> Result<Vec<DomainCandidate>, SourceError>;
}

/// Decode a JSON array of `category` candidates one element at a time.
///
/// Elements that do not fit the domain shape are logged and dropped.
pub fn decode_list(
    category: Category,
    source: &str,
    value: serde_json::Value,
) -> Result<Vec<DomainCandidate>, SourceError> {
    let items = match value {
        serde_json::Value::Array(items) => items,
        other => return Err(SourceError::NotAnArray(json_kind(&other))),
    };

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        match DomainCandidate::from_json(category, item) {
            Ok(c) => out.push(c),
            Err(e) => warn!(
                source,
                category = category.as_str(),
                index,
                error = %e,
                "skipping undecodable deadline candidate"
            ),
        }
    }
    Ok(out)
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
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_good_records_and_drops_bad_ones() {
        let value = json!([
            { "id": "m-1", "caseId": "case-1", "title": "Call client", "dueDate": "2026-04-01" },
            { "id": "m-2", "caseId": "case-1" },
            { "id": "m-3", "caseId": "case-1", "title": "Chase expert", "dueDate": "2026-04-03" }
        ]);
        let out = decode_list(Category::Manual, "test", value).unwrap();
        let ids: Vec<_> = out.iter().map(|c| c.id()).collect();
        assert_eq!(ids, ["m-1", "m-3"]);
    }

    #[test]
    fn rejects_non_array_payloads() {
        let err = decode_list(Category::Court, "test", json!({ "deadlines": [] })).unwrap_err();
        assert!(matches!(err, SourceError::NotAnArray("an object")));
        assert_eq!(
            err.to_string(),
            "expected a JSON array of candidates, got an object"
        );
    }

    #[test]
    fn empty_array_is_fine() {
        assert!(decode_list(Category::Housing, "test", json!([])).unwrap().is_empty());
    }
}
