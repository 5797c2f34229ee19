//! Trust check for declared (metadata) titles.
//!
//! Authoring tools often stamp a generic title into the PDF info dictionary
//! ("Microsoft Word - Document1", "Untitled", "Presentation1"). Such titles
//! are worse than no title at all, so they are rejected by prefix. The prefix
//! list is plain data ([`PlaceholderRule`]) supplied by the caller, normally
//! from the config file, with [`default_placeholders`] as the built-in set.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Titles with fewer characters than this (after trimming) are rejected.
pub const MIN_TITLE_CHARS: usize = 3;

/// A known placeholder title prefix and why it is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderRule {
    /// Lowercase prefix matched against the trimmed, lowercased title.
    pub prefix: String,
    /// Human-readable rejection reason (shown by `retitle inspect`).
    pub reason: String,
}

impl PlaceholderRule {
    pub fn new(prefix: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            reason: reason.into(),
        }
    }
}

/// Built-in placeholder prefixes.
pub fn default_placeholders() -> Vec<PlaceholderRule> {
    vec![
        PlaceholderRule::new("microsoft word -", "Word export default title"),
        PlaceholderRule::new("untitled", "generic untitled document"),
        PlaceholderRule::new("replace this title", "unfilled template title"),
        PlaceholderRule::new("presentation", "PowerPoint default title"),
    ]
}

/// Why a candidate title was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("no title present")]
    Missing,

    #[error("title too short ({chars} chars, need at least 3)")]
    TooShort { chars: usize },

    #[error("placeholder title starting with \"{prefix}\": {reason}")]
    Placeholder { prefix: String, reason: String },
}

/// Decides whether a candidate title is worth using.
#[derive(Debug, Clone)]
pub struct TitleValidator {
    placeholders: Vec<PlaceholderRule>,
}

impl TitleValidator {
    /// Create a validator with the given placeholder rules.
    ///
    /// Prefixes are lowercased here so configured rules match regardless of
    /// how they were written.
    pub fn new(placeholders: Vec<PlaceholderRule>) -> Self {
        let placeholders = placeholders
            .into_iter()
            .map(|rule| PlaceholderRule {
                prefix: rule.prefix.to_lowercase(),
                reason: rule.reason,
            })
            .collect();
        Self { placeholders }
    }

    pub fn placeholders(&self) -> &[PlaceholderRule] {
        &self.placeholders
    }

    /// Check a candidate, returning the first reason it fails.
    pub fn check(&self, candidate: Option<&str>) -> Result<(), Rejection> {
        let trimmed = candidate.map(str::trim).ok_or(Rejection::Missing)?;

        let chars = trimmed.chars().count();
        if chars < MIN_TITLE_CHARS {
            return Err(Rejection::TooShort { chars });
        }

        let lower = trimmed.to_lowercase();
        if let Some(rule) = self
            .placeholders
            .iter()
            .find(|rule| lower.starts_with(&rule.prefix))
        {
            return Err(Rejection::Placeholder {
                prefix: rule.prefix.clone(),
                reason: rule.reason.clone(),
            });
        }

        Ok(())
    }

    pub fn is_valid_title(&self, candidate: Option<&str>) -> bool {
        self.check(candidate).is_ok()
    }
}

impl Default for TitleValidator {
    fn default() -> Self {
        Self::new(default_placeholders())
    }
}

/// Validate with the built-in placeholder list.
pub fn is_valid_title(candidate: Option<&str>) -> bool {
    TitleValidator::default().is_valid_title(candidate)
}
