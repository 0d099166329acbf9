//! Splitting extraction text into key/value pairs

use regex::Regex;

use crate::config::SeparatorMode;
use crate::error::{ExportError, Result};

/// Separator between alternating keys and values
#[derive(Debug, Clone)]
pub enum Separator {
    Literal(String),
    Pattern(Regex),
}

impl Separator {
    /// Build a separator from its configured text
    pub fn new(text: &str, mode: SeparatorMode) -> Result<Self> {
        if text.is_empty() {
            return Err(ExportError::Config("separator must not be empty".into()));
        }
        match mode {
            SeparatorMode::Literal => Ok(Separator::Literal(text.to_string())),
            SeparatorMode::Regex => Regex::new(text)
                .map(Separator::Pattern)
                .map_err(|source| ExportError::InvalidSeparator {
                    pattern: text.to_string(),
                    source,
                }),
        }
    }

    /// Split text into tokens, dropping trailing empty tokens
    pub fn tokens<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens: Vec<&str> = match self {
            Separator::Literal(sep) => text.split(sep.as_str()).collect(),
            Separator::Pattern(re) => re.split(text).collect(),
        };
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }
        tokens
    }

    /// Split text into trimmed (key, value) pairs
    ///
    /// Tokens alternate key, value; an unpaired trailing token is skipped.
    /// Empty keys (e.g. from a leading separator) are kept. Repeated keys are
    /// kept in order so callers can apply last-write-wins.
    pub fn pairs<'a>(&self, text: &'a str) -> Vec<(&'a str, &'a str)> {
        self.tokens(text)
            .chunks_exact(2)
            .map(|pair| (pair[0].trim(), pair[1].trim()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regex(text: &str) -> Separator {
        Separator::new(text, SeparatorMode::Regex).unwrap()
    }

    #[test]
    fn test_pairs_basic() {
        let sep = regex("-");
        assert_eq!(sep.pairs("id-1-as-2"), vec![("id", "1"), ("as", "2")]);
    }

    #[test]
    fn test_trailing_unpaired_token_dropped() {
        let sep = regex("-");
        assert_eq!(sep.pairs("id-1-as"), vec![("id", "1")]);
    }

    #[test]
    fn test_trailing_empty_tokens_dropped() {
        let sep = regex("-");
        assert_eq!(sep.tokens("a-1--"), vec!["a", "1"]);
        assert_eq!(sep.tokens("-a-1"), vec!["", "a", "1"]);
        assert!(sep.tokens("").is_empty());
    }

    #[test]
    fn test_keys_and_values_trimmed() {
        let sep = regex(",");
        assert_eq!(sep.pairs(" id , 1 , as ,2"), vec![("id", "1"), ("as", "2")]);
    }

    #[test]
    fn test_empty_key_kept() {
        let sep = regex("-");
        // tokens: "", "x", "id", "1"
        assert_eq!(sep.pairs("-x-id-1"), vec![("", "x"), ("id", "1")]);
        assert_eq!(sep.pairs("  -x"), vec![("", "x")]);
    }

    #[test]
    fn test_regex_splits_hyphens_inside_values() {
        let sep = regex("-");
        assert_eq!(sep.pairs("temp--5-id-1"), vec![("temp", ""), ("5", "id")]);
    }

    #[test]
    fn test_literal_dot() {
        let sep = Separator::new(".", SeparatorMode::Literal).unwrap();
        assert_eq!(sep.pairs("a.1.b.2"), vec![("a", "1"), ("b", "2")]);

        // As a pattern, "." matches every character
        let sep = regex(".");
        assert!(sep.pairs("a.1.b.2").is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Separator::new("(", SeparatorMode::Regex).unwrap_err();
        assert!(matches!(err, ExportError::InvalidSeparator { .. }));
        assert!(Separator::new("", SeparatorMode::Literal).is_err());
    }
}
