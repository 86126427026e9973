//! Enablement map - which adapters are turned on
//!
//! Tri-state per adapter name: explicitly enabled, explicitly disabled, or
//! absent. Absent means enabled.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Stored state of one adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    Enabled,
    Disabled,
    Absent,
}

impl Enablement {
    /// Effective on/off value (absent counts as on)
    pub fn is_enabled(self) -> bool {
        !matches!(self, Enablement::Disabled)
    }
}

/// Adapter name -> explicit on/off
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnablementMap(BTreeMap<String, bool>);

impl EnablementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// First-run map: every name explicitly set to its default
    pub fn with_defaults<'a, I>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        Self(
            defaults
                .into_iter()
                .map(|(name, on)| (name.to_string(), on))
                .collect(),
        )
    }

    pub fn state(&self, name: &str) -> Enablement {
        match self.0.get(name) {
            Some(true) => Enablement::Enabled,
            Some(false) => Enablement::Disabled,
            None => Enablement::Absent,
        }
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.state(name).is_enabled()
    }

    pub fn set(&mut self, name: impl Into<String>, enabled: bool) {
        self.0.insert(name.into(), enabled);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
