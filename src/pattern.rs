use crate::task::{Task, TaskError};

/// Patterns for searching tasks
#[derive(Eq, PartialEq, PartialOrd, Ord, Debug, Clone)]
pub enum Pattern {
    Keyword(String),
    Regex(String),
}
impl Pattern {
    pub fn check_errors(&self) -> Option<PatternErr> {
        self.matcher().err()
    }

    pub fn compile(&self) -> Result<Matcher, TaskError> {
        self.matcher()
            .map_err(|e| TaskError::InvalidPattern(e.to_string()))
    }

    fn matcher(&self) -> Result<Matcher, PatternErr> {
        use Pattern::*;
        match self {
            Keyword(kw) if kw.trim().is_empty() => Err(PatternErr::Empty),
            Keyword(kw) => Ok(Matcher::Keyword(kw.trim().to_lowercase())),
            Regex(rx) => regex::Regex::new(rx)
                .map(Matcher::Regex)
                .map_err(|e| PatternErr::InvalidRegex(e.to_string())),
        }
    }
}

/// Some patterns may have syntax errors.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum PatternErr {
    #[error("empty keyword")]
    Empty,
    #[error("{0}")]
    InvalidRegex(String),
}

/// A compiled [`Pattern`].
#[derive(Debug)]
pub enum Matcher {
    /// Lowercased; matched case-insensitively.
    Keyword(String),
    Regex(regex::Regex),
}
impl Matcher {
    pub fn is_match(&self, haystack: &str) -> bool {
        match self {
            Matcher::Keyword(kw) => haystack.to_lowercase().contains(kw.as_str()),
            Matcher::Regex(rx) => rx.is_match(haystack),
        }
    }
}

/// Trait for how anything could be matched against a pattern.
pub trait Matchable {
    fn matches(&self, matcher: &Matcher) -> bool;
}
impl Matchable for Task {
    fn matches(&self, matcher: &Matcher) -> bool {
        matcher.is_match(self.text())
    }
}
