//! Settings document
//!
//! The single persisted record: proxy URLs, optional CA certificate and the
//! enablement map.

use serde::{Deserialize, Serialize};

use super::enablement::EnablementMap;
use crate::domain::value_objects::{Environment, ProxySettings};

/// `proxy:` section
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub http: String,
    #[serde(default)]
    pub https: String,
    #[serde(default)]
    pub no_proxy: String,
}

/// Whole settings document
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub proxy: ProxyConfig,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,

    #[serde(default)]
    pub tools: EnablementMap,
}

impl Settings {
    pub fn new(proxy: ProxyConfig, ca_cert: Option<String>, tools: EnablementMap) -> Self {
        Self {
            proxy,
            ca_cert: ca_cert.filter(|c| !c.trim().is_empty()),
            tools,
        }
    }

    /// Resolve into the immutable run input, expanding `~/` in the CA path
    pub fn proxy_settings(&self, env: &Environment) -> ProxySettings {
        ProxySettings {
            http: self.proxy.http.clone(),
            https: self.proxy.https.clone(),
            no_proxy: self.proxy.no_proxy.clone(),
            ca_cert: self
                .ca_cert
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(|c| env.expand_home(c)),
        }
    }
}
