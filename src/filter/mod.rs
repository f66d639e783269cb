//! Object key filtering.
//!
//! Patterns are unanchored regular expressions evaluated in order; a key
//! matches the list as soon as one pattern matches it.

mod error;

pub use error::FilterError;

use regex::Regex;
use tracing::{debug, error, info};

/// Whether `key` matches at least one of `patterns`.
///
/// Patterns are compiled on every call; an invalid pattern is logged and
/// counts as not matching.
pub fn matches<S: AsRef<str>>(key: &str, patterns: &[S]) -> bool {
    patterns.iter().enumerate().any(|(index, pattern)| {
        match compile(index, pattern.as_ref()) {
            Ok(regex) => regex.is_match(key),
            Err(e) => {
                error!(error = %e, "Error occurred while trying to match path to regexes list");
                false
            }
        }
    })
}

fn compile(index: usize, pattern: &str) -> Result<Regex, FilterError> {
    Regex::new(pattern).map_err(|source| FilterError::CompilationFailed {
        pattern: pattern.to_string(),
        index,
        source,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Only keys matching a pattern are processed.
    Include,
    /// Keys matching a pattern are skipped.
    Exclude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    Process,
    Skip,
}

/// Precompiled pattern list with its mode.
#[derive(Debug, Clone)]
pub struct PathFilter {
    mode: FilterMode,
    patterns: Vec<String>,
    compiled: Vec<Regex>,
}

impl PathFilter {
    /// Compile `patterns`. Invalid ones are logged once and never match.
    pub fn new<S: AsRef<str>>(mode: FilterMode, patterns: &[S]) -> Self {
        let mut compiled = Vec::with_capacity(patterns.len());
        for (index, pattern) in patterns.iter().enumerate() {
            match compile(index, pattern.as_ref()) {
                Ok(regex) => compiled.push(regex),
                Err(e) => error!(error = %e, "Ignoring invalid path regex"),
            }
        }

        Self {
            mode,
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            compiled,
        }
    }

    /// Build the filter for a run from the include and exclude lists.
    ///
    /// Returns `None` when neither list is set.
    pub fn from_lists<S: AsRef<str>>(
        include: &[S],
        exclude: &[S],
    ) -> Result<Option<Self>, FilterError> {
        match (include.is_empty(), exclude.is_empty()) {
            (false, false) => Err(FilterError::MutuallyExclusive {
                include: include.len(),
                exclude: exclude.len(),
            }),
            (false, true) => Ok(Some(Self::new(FilterMode::Include, include))),
            (true, false) => Ok(Some(Self::new(FilterMode::Exclude, exclude))),
            (true, true) => Ok(None),
        }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.compiled.iter().any(|regex| regex.is_match(key))
    }

    pub fn evaluate(&self, key: &str) -> FilterDecision {
        let matched = self.is_match(key);
        match (self.mode, matched) {
            (FilterMode::Include, false) => {
                info!(key, patterns = ?self.patterns, "Key does not match any of the include paths, skipping it");
                FilterDecision::Skip
            }
            (FilterMode::Exclude, true) => {
                info!(key, patterns = ?self.patterns, "Key matches one of the exclude paths, skipping it");
                FilterDecision::Skip
            }
            _ => {
                debug!(key, mode = ?self.mode, "Key passed path filter");
                FilterDecision::Process
            }
        }
    }
}
