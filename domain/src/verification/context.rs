//! Externally supplied verification context

use crate::core::query::Query;
use serde::{Deserialize, Serialize};

/// Reference data the caller provides for cross-checking candidates.
///
/// The governor derives it from the query context (`reference_terms` array),
/// but any caller may build one directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationContext {
    /// Terms a correct answer must mention (case-insensitive)
    #[serde(default)]
    pub reference_terms: Vec<String>,
}

impl VerificationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reference_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reference_terms = terms.into_iter().map(Into::into).collect();
        self
    }

    /// Read `reference_terms` from the query's structured context.
    ///
    /// Non-string entries are ignored; a missing or malformed field yields an
    /// empty context.
    pub fn from_query(query: &Query) -> Self {
        let terms = query
            .context()
            .and_then(|ctx| ctx.get("reference_terms"))
            .and_then(|v| v.as_array())
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            reference_terms: terms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_query_reads_terms() {
        let query = Query::new("q")
            .unwrap()
            .with_context(json!({"reference_terms": ["ownership", 3, " ", "borrow"]}));
        let ctx = VerificationContext::from_query(&query);
        assert_eq!(ctx.reference_terms, vec!["ownership", "borrow"]);
    }

    #[test]
    fn test_from_query_without_context() {
        let query = Query::new("q").unwrap();
        assert_eq!(VerificationContext::from_query(&query), VerificationContext::default());

        let query = Query::new("q").unwrap().with_context(json!({"reference_terms": "x"}));
        assert!(VerificationContext::from_query(&query).reference_terms.is_empty());
    }
}
