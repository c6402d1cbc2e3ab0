//! Search query parameters and tsquery construction

use serde::Deserialize;

use super::{SearchLimit, ValidationError};

/// Characters with meaning in tsquery syntax
const TSQUERY_OPERATORS: &[char] = &['&', '|', '!', '(', ')', ':', '*', '<', '>', '\'', '\\'];

/// Raw `?q=&limit=` parameters
///
/// `limit` stays a string so a malformed value falls back to the default
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    /// The search text, rejecting an absent or blank `q`.
    pub fn query(&self) -> Result<&str, ValidationError> {
        match self.q.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => Ok(q),
            _ => Err(ValidationError::MissingParameter { name: "q" }),
        }
    }

    pub fn limit(&self) -> SearchLimit {
        SearchLimit::parse(self.limit.as_deref())
    }
}

/// Join whitespace-delimited terms with `&` so every term must match.
///
/// Operator characters are stripped from each term first; returns `None`
/// when nothing searchable is left.
pub fn build_tsquery(input: &str) -> Option<String> {
    let terms: Vec<String> = input
        .split_whitespace()
        .map(|term| term.chars().filter(|c| !TSQUERY_OPERATORS.contains(c)).collect::<String>())
        .filter(|term| !term.is_empty())
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" & "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_terms_with_and() {
        assert_eq!(build_tsquery("ghoul priest").as_deref(), Some("ghoul & priest"));
        assert_eq!(build_tsquery("  the   midnight\tmasks ").as_deref(), Some("the & midnight & masks"));
        assert_eq!(build_tsquery("rat").as_deref(), Some("rat"));
    }

    #[test]
    fn strips_operator_characters() {
        assert_eq!(build_tsquery("rat:* | !cultist").as_deref(), Some("rat & cultist"));
        assert_eq!(build_tsquery("o'bannion").as_deref(), Some("obannion"));
        assert_eq!(build_tsquery("& | !"), None);
    }

    #[test]
    fn blank_query_is_missing() {
        let params = SearchParams { q: Some("   ".into()), limit: None };
        assert_eq!(params.query(), Err(ValidationError::MissingParameter { name: "q" }));

        let params = SearchParams::default();
        assert!(params.query().is_err());
    }

    #[test]
    fn query_is_trimmed() {
        let params = SearchParams { q: Some(" lita ".into()), limit: Some("5".into()) };
        assert_eq!(params.query(), Ok("lita"));
        assert_eq!(params.limit().get(), 5);
    }
}
