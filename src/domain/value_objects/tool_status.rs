//! Tool status value object
//!
//! Status queries never mutate state and answer with one of a small, closed
//! set of labels, optionally qualified by a short detail.

use std::fmt;

/// Closed set of status labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLabel {
    Configured,
    NotConfigured,
    /// Configured, but no longer matching the current settings
    Stale,
    Unknown,
}

impl StatusLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLabel::Configured => "configured",
            StatusLabel::NotConfigured => "not configured",
            StatusLabel::Stale => "stale",
            StatusLabel::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label plus optional qualifier, e.g. "configured (via env_vars)"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolStatus {
    pub label: StatusLabel,
    pub detail: Option<String>,
}

impl ToolStatus {
    pub fn new(label: StatusLabel) -> Self {
        Self {
            label,
            detail: None,
        }
    }

    pub fn configured() -> Self {
        Self::new(StatusLabel::Configured)
    }

    pub fn not_configured() -> Self {
        Self::new(StatusLabel::NotConfigured)
    }

    pub fn stale() -> Self {
        Self::new(StatusLabel::Stale)
    }

    pub fn unknown() -> Self {
        Self::new(StatusLabel::Unknown)
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Pick configured / stale / not configured from a block comparison
    pub fn from_block(current: Option<&str>, expected: &str) -> Self {
        match current {
            Some(body) if body == expected => Self::configured(),
            Some(_) => Self::stale(),
            None => Self::not_configured(),
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{} ({})", self.label, detail),
            None => write!(f, "{}", self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_detail() {
        let status = ToolStatus::configured().with_detail("via env_vars");
        assert_eq!(status.to_string(), "configured (via env_vars)");
        assert_eq!(ToolStatus::unknown().to_string(), "unknown");
    }

    #[test]
    fn from_block_classifies_body() {
        assert_eq!(ToolStatus::from_block(Some("a\n"), "a\n").label, StatusLabel::Configured);
        assert_eq!(ToolStatus::from_block(Some("b\n"), "a\n").label, StatusLabel::Stale);
        assert_eq!(ToolStatus::from_block(None, "a\n").label, StatusLabel::NotConfigured);
    }
}
