//! Variable matching strategies.

use crate::analyzer::helpers::create_regex;
use crate::analyzer::types::MatchStrategy;
use crate::error::Result;
use regex::Regex;

/// Compiled patterns for every declared variable under one strategy.
#[derive(Debug, Clone)]
pub struct VariableMatcher {
    patterns: Vec<(String, Regex)>,
}

impl VariableMatcher {
    pub fn new(strategy: MatchStrategy, variables: &[String]) -> Result<Self> {
        let patterns = variables
            .iter()
            .map(|name| Ok((name.clone(), create_regex(&pattern_for(strategy, name))?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns })
    }

    /// Names referenced in `content`, in declaration order.
    pub fn used_in<'a>(&'a self, content: &str) -> Vec<&'a str> {
        self.patterns
            .iter()
            .filter(|(_, regex)| regex.is_match(content))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

fn pattern_for(strategy: MatchStrategy, name: &str) -> String {
    let escaped = regex::escape(name);
    match strategy {
        MatchStrategy::Loose => format!(r"\b{}\b", escaped),
        MatchStrategy::Strict => format!(r#"[=:]\s*"{}""#, escaped),
    }
}
