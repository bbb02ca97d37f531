use serde::{Deserialize, Serialize};

/// One cited source, in the same order the chunk appeared in the prompt
/// context. `page` defaults to 1 when the source document had no page data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub document: String,
    pub page: i32,
    pub score: f32,
}

/// The answer to one question. Ephemeral: built per query, never persisted
/// or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub response: String,
    pub sources: Vec<SourceRef>,
    pub confidence: f32,
}

impl QueryResult {
    pub fn new(response: String, sources: Vec<SourceRef>, confidence: f32) -> Self {
        Self {
            response,
            sources,
            confidence,
        }
    }

    /// The designed non-error outcome for a query with no relevant context.
    pub fn no_relevant_information(fallback_response: String) -> Self {
        Self {
            response: fallback_response,
            sources: Vec::new(),
            confidence: 0.0,
        }
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_result_has_zero_confidence() {
        let result = QueryResult::no_relevant_information("nothing found".to_string());

        assert_eq!(result.confidence, 0.0);
        assert!(result.sources.is_empty());
        assert!(!result.has_sources());
    }
}
