//! Query classification and result sizing
//!
//! Queries are sorted into four coarse types by keyword. The type drives how
//! many results a retrieval returns when the caller leaves `top_k` at 0.
//!
//! Keywords are matched as whole words, case-insensitively, in a fixed
//! priority order: fact keywords first, then explanatory, then list. A query
//! such as "What is the capital of France?" is therefore a fact query even
//! though it also contains "what is".

use super::types::{DEFAULT_SIMILARITY_THRESHOLD, DEFAULT_TOP_K};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static FACT_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:what|who|when|where|which|how\s+many|how\s+much)\b")
        .expect("Failed to compile fact keyword regex")
});

static EXPLANATORY_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:how|why|explain|describe|tell\s+me\s+about|what\s+is|what\s+are)\b")
        .expect("Failed to compile explanatory keyword regex")
});

static LIST_KEYWORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:list|name|enumerate|all|examples?)\b")
        .expect("Failed to compile list keyword regex")
});

/// Coarse query type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    /// Short factual lookup
    Fact,
    /// Request for an explanation
    Explanatory,
    /// Request for a list of items
    List,
    /// Anything else
    General,
}

impl QueryType {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Explanatory => "explanatory",
            Self::List => "list",
            Self::General => "general",
        }
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a query by keyword
///
/// # Examples
///
/// ```
/// use chunkwise_core::retrieval::{classify_query, QueryType};
///
/// assert_eq!(classify_query("What is the capital of France?"), QueryType::Fact);
/// assert_eq!(classify_query("Why does ice float?"), QueryType::Explanatory);
/// assert_eq!(classify_query("List the planets in the solar system"), QueryType::List);
/// assert_eq!(classify_query("Summarize this document"), QueryType::General);
/// ```
pub fn classify_query(query: &str) -> QueryType {
    if FACT_KEYWORDS.is_match(query) {
        QueryType::Fact
    } else if EXPLANATORY_KEYWORDS.is_match(query) {
        QueryType::Explanatory
    } else if LIST_KEYWORDS.is_match(query) {
        QueryType::List
    } else {
        QueryType::General
    }
}

/// Result count for a query type
///
/// General queries use `default_top_k`, or 3 when that is 0.
pub fn dynamic_top_k(query_type: QueryType, default_top_k: usize) -> usize {
    match query_type {
        QueryType::Fact => 2,
        QueryType::Explanatory => 5,
        QueryType::List => 4,
        QueryType::General => {
            if default_top_k > 0 {
                default_top_k
            } else {
                DEFAULT_TOP_K
            }
        }
    }
}

/// Result count a retrieval should use
///
/// Returns `(top_k, dynamic)` where `dynamic` tells whether the count came
/// from the query type.
pub fn effective_top_k(
    query_type: QueryType,
    requested_top_k: usize,
    enable_dynamic_top_k: bool,
    default_top_k: usize,
) -> (usize, bool) {
    if enable_dynamic_top_k && requested_top_k == 0 {
        return (dynamic_top_k(query_type, default_top_k), true);
    }

    let top_k = if requested_top_k > 0 {
        requested_top_k
    } else if default_top_k > 0 {
        default_top_k
    } else {
        DEFAULT_TOP_K
    };
    (top_k, false)
}

/// Similarity threshold a retrieval should use
pub fn effective_threshold(requested: f32) -> f32 {
    if requested > 0.0 {
        requested
    } else {
        DEFAULT_SIMILARITY_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fact_takes_priority_over_explanatory() {
        assert_eq!(classify_query("What is the capital of France?"), QueryType::Fact);
        assert_eq!(classify_query("what are the rules"), QueryType::Fact);
    }

    #[test]
    fn test_fact_keywords() {
        assert_eq!(classify_query("Who wrote Hamlet"), QueryType::Fact);
        assert_eq!(classify_query("When did it start?"), QueryType::Fact);
        assert_eq!(classify_query("How many moons does Mars have"), QueryType::Fact);
        assert_eq!(classify_query("how  much does it cost"), QueryType::Fact);
    }

    #[test]
    fn test_explanatory_keywords() {
        assert_eq!(classify_query("Why does ice float?"), QueryType::Explanatory);
        assert_eq!(classify_query("How does TCP work"), QueryType::Explanatory);
        assert_eq!(classify_query("Explain ownership"), QueryType::Explanatory);
        assert_eq!(classify_query("Tell me about borrowing"), QueryType::Explanatory);
    }

    #[test]
    fn test_list_keywords() {
        assert_eq!(
            classify_query("List the planets in the solar system"),
            QueryType::List
        );
        assert_eq!(classify_query("Give examples of traits"), QueryType::List);
        assert_eq!(classify_query("Show an example"), QueryType::List);
        assert_eq!(classify_query("all supported formats"), QueryType::List);
    }

    #[test]
    fn test_general_queries() {
        assert_eq!(classify_query("Summarize this document"), QueryType::General);
        assert_eq!(classify_query(""), QueryType::General);
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert_eq!(classify_query("Somewhat unrelated"), QueryType::General);
        assert_eq!(classify_query("showcase the wherewithal"), QueryType::General);
        assert_eq!(classify_query("a username field"), QueryType::General);
        assert_eq!(classify_query("install the package"), QueryType::General);
    }

    #[test]
    fn test_dynamic_top_k_mapping() {
        assert_eq!(dynamic_top_k(QueryType::Fact, 3), 2);
        assert_eq!(dynamic_top_k(QueryType::Explanatory, 3), 5);
        assert_eq!(dynamic_top_k(QueryType::List, 3), 4);
        assert_eq!(dynamic_top_k(QueryType::General, 3), 3);
        assert_eq!(dynamic_top_k(QueryType::General, 7), 7);
        assert_eq!(dynamic_top_k(QueryType::General, 0), 3);
    }

    #[test]
    fn test_effective_top_k() {
        assert_eq!(effective_top_k(QueryType::Fact, 0, true, 3), (2, true));
        assert_eq!(effective_top_k(QueryType::Fact, 6, true, 3), (6, false));
        assert_eq!(effective_top_k(QueryType::Fact, 0, false, 3), (3, false));
        assert_eq!(effective_top_k(QueryType::List, 0, false, 0), (3, false));
    }

    #[test]
    fn test_effective_threshold() {
        assert_eq!(effective_threshold(0.5), 0.5);
        assert_eq!(effective_threshold(0.0), 0.35);
        assert_eq!(effective_threshold(-1.0), 0.35);
    }

    #[test]
    fn test_query_type_display() {
        assert_eq!(QueryType::Explanatory.to_string(), "explanatory");
        assert_eq!(
            serde_json::to_string(&QueryType::List).unwrap(),
            "\"list\""
        );
    }
}
