//! Declarative marker-block adapters
//!
//! Most tools read a single line-oriented config file. Each one is a
//! `LineBlockAdapter` value: where the file lives, which commands mean the
//! tool is installed, and how the block body is rendered.

use std::path::PathBuf;

use crate::domain::ports::{AdapterContext, AdapterEffect, AdapterError, ToolAdapter};
use crate::domain::services::MarkerStyle;
use crate::domain::value_objects::{Environment, OsKind, ProxyEndpoint, ProxySettings, ToolStatus};

type PathFn = fn(&Environment) -> PathBuf;
type RenderFn = fn(&ProxySettings) -> Result<String, AdapterError>;
type NoteFn = fn(&Environment) -> Option<&'static str>;

pub struct LineBlockAdapter {
    name: &'static str,
    commands: &'static [&'static str],
    path: PathFn,
    render: RenderFn,
    note: Option<NoteFn>,
    enabled_by_default: bool,
}

impl LineBlockAdapter {
    pub const fn new(
        name: &'static str,
        commands: &'static [&'static str],
        path: PathFn,
        render: RenderFn,
    ) -> Self {
        Self {
            name,
            commands,
            path,
            render,
            note: None,
            enabled_by_default: true,
        }
    }

    const fn with_note(mut self, note: NoteFn) -> Self {
        self.note = Some(note);
        self
    }

    const fn disabled_by_default(mut self) -> Self {
        self.enabled_by_default = false;
        self
    }

    /// Target file for this environment
    pub fn path(&self, env: &Environment) -> PathBuf {
        (self.path)(env)
    }

    /// Block body for these settings
    pub fn render(&self, settings: &ProxySettings) -> Result<String, AdapterError> {
        (self.render)(settings)
    }
}

impl ToolAdapter for LineBlockAdapter {
    fn name(&self) -> &'static str {
        self.name
    }

    fn enabled_by_default(&self) -> bool {
        self.enabled_by_default
    }

    fn is_available(&self, env: &Environment) -> bool {
        env.has_any_command(self.commands)
    }

    fn apply(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<AdapterEffect, AdapterError> {
        let body = self.render(settings)?;
        ctx.patcher
            .upsert(&self.path(ctx.env), &body, MarkerStyle::HASH)?;
        if let Some(message) = self.note.and_then(|note| note(ctx.env)) {
            ctx.note(self.name, message);
        }
        Ok(AdapterEffect::Done)
    }

    fn remove(&self, ctx: &AdapterContext<'_>) -> Result<AdapterEffect, AdapterError> {
        ctx.patcher.remove(&self.path(ctx.env), MarkerStyle::HASH)?;
        Ok(AdapterEffect::Done)
    }

    fn status(
        &self,
        settings: &ProxySettings,
        ctx: &AdapterContext<'_>,
    ) -> Result<ToolStatus, AdapterError> {
        let expected = self.render(settings)?;
        let current = ctx
            .patcher
            .find_block_body(&self.path(ctx.env), MarkerStyle::HASH)?;
        Ok(ToolStatus::from_block(current.as_deref(), &expected))
    }
}

fn ca_line(settings: &ProxySettings, template: impl Fn(&str) -> String) -> String {
    settings
        .ca_cert_path()
        .map(|p| template(&p.display().to_string()))
        .unwrap_or_default()
}

pub const PIP: LineBlockAdapter = LineBlockAdapter::new(
    "pip",
    &["pip", "pip3"],
    |env| match env.os {
        OsKind::MacOs => env.home_path("Library/Application Support/pip/pip.conf"),
        _ => env.home_path(".config/pip/pip.conf"),
    },
    |s| {
        Ok(format!(
            "[global]\nproxy = {}\n{}",
            s.http,
            ca_line(s, |ca| format!("cert = {ca}\n"))
        ))
    },
);

pub const NPM: LineBlockAdapter = LineBlockAdapter::new(
    "npm",
    &["npm"],
    |env| env.home_path(".npmrc"),
    |s| {
        Ok(format!(
            "proxy={}\nhttps-proxy={}\n{}",
            s.http,
            s.https,
            ca_line(s, |ca| format!("cafile={ca}\n"))
        ))
    },
);

pub const PODMAN: LineBlockAdapter = LineBlockAdapter::new(
    "podman",
    &["podman"],
    |env| env.home_path(".config/containers/containers.conf"),
    |s| {
        Ok(format!(
            "[containers]\nenv = [\n  \"http_proxy={http}\",\n  \"https_proxy={https}\",\n  \"no_proxy={no}\",\n  \"HTTP_PROXY={http}\",\n  \"HTTPS_PROXY={https}\",\n  \"NO_PROXY={no}\",\n]\n",
            http = s.http,
            https = s.https,
            no = s.no_proxy
        ))
    },
);

pub const CURL: LineBlockAdapter = LineBlockAdapter::new(
    "curl",
    &["curl"],
    |env| env.home_path(".curlrc"),
    |s| {
        Ok(format!(
            "proxy = \"{}\"\n{}",
            s.http,
            ca_line(s, |ca| format!("cacert = \"{ca}\"\n"))
        ))
    },
);

pub const WGET: LineBlockAdapter = LineBlockAdapter::new(
    "wget",
    &["wget"],
    |env| env.home_path(".wgetrc"),
    |s| {
        Ok(format!(
            "http_proxy = {}\nhttps_proxy = {}\n{}",
            s.http,
            s.https,
            ca_line(s, |ca| format!("ca_certificate = {ca}\n"))
        ))
    },
);

pub const CARGO: LineBlockAdapter = LineBlockAdapter::new(
    "cargo",
    &["cargo"],
    |env| env.home_path(".cargo/config.toml"),
    |s| {
        Ok(format!(
            "[http]\nproxy = \"{}\"\n{}",
            s.http,
            ca_line(s, |ca| format!("cainfo = \"{ca}\"\n"))
        ))
    },
);

pub const CONDA: LineBlockAdapter = LineBlockAdapter::new(
    "conda",
    &["conda"],
    |env| env.home_path(".condarc"),
    |s| {
        Ok(format!(
            "proxy_servers:\n  http: {}\n  https: {}\n{}",
            s.http,
            s.https,
            ca_line(s, |ca| format!("ssl_verify: {ca}\n"))
        ))
    },
);

pub const GRADLE: LineBlockAdapter = LineBlockAdapter::new(
    "gradle",
    &["gradle"],
    |env| env.home_path(".gradle/gradle.properties"),
    |s| {
        let http = endpoint(&s.http)?;
        let https = endpoint(&s.https)?;
        let non_proxy = s.java_non_proxy_hosts();
        Ok(format!(
            "systemProp.http.proxyHost={}\nsystemProp.http.proxyPort={}\nsystemProp.http.nonProxyHosts={non_proxy}\nsystemProp.https.proxyHost={}\nsystemProp.https.proxyPort={}\nsystemProp.https.nonProxyHosts={non_proxy}\n",
            http.host, http.port, https.host, https.port
        ))
    },
);

pub const SSH: LineBlockAdapter = LineBlockAdapter::new(
    "ssh",
    &["ssh"],
    |env| env.home_path(".ssh/config"),
    |s| {
        let proxy = endpoint(&s.http)?;
        Ok(format!(
            "Host *\n    ProxyCommand nc -X connect -x {} %h %p\n",
            proxy.authority()
        ))
    },
)
.with_note(|env| {
    (env.os == OsKind::Linux).then_some(
        "SSH proxying needs OpenBSD netcat (netcat-openbsd); GNU netcat lacks -X/-x",
    )
})
.disabled_by_default();

fn endpoint(url: &str) -> Result<ProxyEndpoint, AdapterError> {
    ProxyEndpoint::parse(url).ok_or_else(|| AdapterError::InvalidProxyUrl {
        url: url.to_string(),
    })
}
