//! Adapter registry
//!
//! A fixed, ordered list of adapters built once per invocation. Order is
//! meaningful: trust anchors first, environment variables early, then the
//! tool-specific adapters.

use crate::domain::entities::EnablementMap;
use crate::domain::ports::ToolAdapter;
use crate::error::{EzproxyError, EzproxyResult};

pub struct AdapterRegistry {
    adapters: Vec<Box<dyn ToolAdapter>>,
}

impl AdapterRegistry {
    pub fn new(adapters: Vec<Box<dyn ToolAdapter>>) -> Self {
        Self { adapters }
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn ToolAdapter> {
        self.adapters.iter().map(|a| a.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adapters.iter().map(|a| a.name())
    }

    pub fn get(&self, name: &str) -> Option<&dyn ToolAdapter> {
        self.iter().find(|a| a.name() == name)
    }

    /// Like `get`, but an unknown name is an error
    pub fn require(&self, name: &str) -> EzproxyResult<&dyn ToolAdapter> {
        self.get(name).ok_or_else(|| EzproxyError::UnknownAdapter {
            name: name.to_string(),
        })
    }

    /// First-run enablement map: every adapter at its default
    pub fn default_enablement(&self) -> EnablementMap {
        EnablementMap::with_defaults(self.iter().map(|a| (a.name(), a.enabled_by_default())))
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}
