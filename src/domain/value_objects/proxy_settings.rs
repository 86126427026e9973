//! Proxy settings value object
//!
//! The resolved input to one orchestration run. Built from the persisted
//! settings document and never mutated while adapters run.

use std::path::{Path, PathBuf};

/// Proxy URLs, no-proxy list and optional CA certificate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProxySettings {
    pub http: String,
    pub https: String,
    /// Comma-separated, in `NO_PROXY` syntax
    pub no_proxy: String,
    /// Absolute path (already `~`-expanded)
    pub ca_cert: Option<PathBuf>,
}

/// Host and port extracted from a proxy URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    pub host: String,
    pub port: u16,
}

impl ProxyEndpoint {
    /// Parse `scheme://[user@]host[:port][/path]`
    ///
    /// A missing port defaults to 443 for `https` and 80 otherwise.
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        let (scheme, rest) = match url.split_once("://") {
            Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
            None => ("http".to_string(), url),
        };
        let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host_port = authority.rsplit_once('@').map_or(authority, |(_, hp)| hp);

        let (host, port) = if let Some(stripped) = host_port.strip_prefix('[') {
            // IPv6 literal
            let (host, tail) = stripped.split_once(']')?;
            (host.to_string(), tail.strip_prefix(':'))
        } else {
            match host_port.rsplit_once(':') {
                Some((host, port)) => (host.to_string(), Some(port)),
                None => (host_port.to_string(), None),
            }
        };

        if host.is_empty() {
            return None;
        }

        let port = match port {
            Some(p) if !p.is_empty() => p.parse().ok()?,
            _ if scheme == "https" => 443,
            _ => 80,
        };

        Some(Self { host, port })
    }

    /// `host:port`, bracketing IPv6 literals
    pub fn authority(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl ProxySettings {
    pub fn new(http: impl Into<String>, https: impl Into<String>, no_proxy: impl Into<String>) -> Self {
        Self {
            http: http.into(),
            https: https.into(),
            no_proxy: no_proxy.into(),
            ca_cert: None,
        }
    }

    pub fn with_ca_cert(mut self, ca_cert: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(ca_cert.into());
        self
    }

    /// CA certificate path, if one is configured
    pub fn ca_cert_path(&self) -> Option<&Path> {
        self.ca_cert.as_deref()
    }

    /// Individual no-proxy entries, trimmed, empties dropped
    pub fn no_proxy_entries(&self) -> impl Iterator<Item = &str> {
        self.no_proxy
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
    }

    /// No-proxy list in JVM `nonProxyHosts` syntax (pipe-delimited).
    ///
    /// This translation is lossy: `.domain` becomes `*.domain`, and CIDR
    /// entries are dropped because the JVM cannot express them.
    pub fn java_non_proxy_hosts(&self) -> String {
        self.no_proxy_entries()
            .filter(|entry| !entry.contains('/'))
            .map(|entry| {
                if entry.starts_with('.') {
                    format!("*{entry}")
                } else {
                    entry.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("|")
    }
}
