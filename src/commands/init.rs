//! Init command - write the settings document
//!
//! Values come from flags first; anything missing is prompted for on a
//! terminal. An existing document is only replaced with `--force`, and its
//! enablement map survives the rewrite.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use dialoguer::Input;
use is_terminal::IsTerminal;
use serde_json::json;

use crate::domain::entities::{EnablementMap, ProxyConfig, Settings};
use crate::domain::ports::SettingsRepository;
use crate::domain::value_objects::ProxyEndpoint;
use crate::presentation::Runtime;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::theme::EzproxyTheme;

const DEFAULT_NO_PROXY: &str = "localhost,127.0.0.1";

#[derive(Debug, Default)]
pub struct InitArgs {
    pub http: Option<String>,
    pub https: Option<String>,
    pub no_proxy: Option<String>,
    pub ca_cert: Option<PathBuf>,
    pub force: bool,
}

/// Source of values the user did not pass as flags
trait Answers {
    fn ask(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String>;
}

struct TerminalAnswers {
    unicode: bool,
}

impl Answers for TerminalAnswers {
    fn ask(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String> {
        let theme = EzproxyTheme::new(self.unicode);
        let mut input = Input::<String>::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }
}

/// Used without a TTY: defaults where they exist, otherwise an error
struct NoAnswers;

impl Answers for NoAnswers {
    fn ask(&self, prompt: &str, default: Option<&str>, allow_empty: bool) -> Result<String> {
        match default {
            Some(default) => Ok(default.to_string()),
            None if allow_empty => Ok(String::new()),
            None => bail!("{prompt} is required (pass it as a flag when not running in a terminal)"),
        }
    }
}

pub fn cmd_init(runtime: &Runtime, args: InitArgs) -> Result<()> {
    let repository = &runtime.repository;
    let previous = if repository.exists() {
        if !args.force {
            bail!(
                "settings already exist at {} (use --force to overwrite)",
                repository.path().display()
            );
        }
        // a broken document is being replaced, so its enablement is lost
        repository.load().ok().map(|(settings, _)| settings)
    } else {
        None
    };

    let interactive = !runtime.ui.json && std::io::stdin().is_terminal();
    let answers: Box<dyn Answers> = if interactive {
        Box::new(TerminalAnswers {
            unicode: runtime.ui.unicode,
        })
    } else {
        Box::new(NoAnswers)
    };

    let tools = previous
        .map(|settings| settings.tools)
        .unwrap_or_else(|| runtime.registry.default_enablement());
    let settings = collect(answers.as_ref(), args, tools)?;

    if let Some(ca_cert) = settings.ca_cert.as_deref() {
        let resolved = runtime.env.expand_home(ca_cert);
        if !resolved.is_file() {
            eprintln!(
                "{} CA certificate {} does not exist yet; system_ca will fail until it does",
                Icon::Warning.colored(runtime.ui.color, runtime.ui.unicode),
                resolved.display()
            );
        }
    }

    let path = repository.path().display().to_string();
    if runtime.exec.dry_run {
        let yaml = serde_yaml_ng::to_string(&settings).context("rendering settings")?;
        runtime.output.summary(
            || json!({"event": "init", "path": path, "written": false, "document": yaml}),
            || format!("Dry run: would write {path}:\n{yaml}"),
        );
        return Ok(());
    }

    repository
        .save(&settings)
        .with_context(|| format!("writing {path}"))?;

    let ui = &runtime.ui;
    runtime.output.summary(
        || json!({"event": "init", "path": path, "written": true}),
        || {
            format!(
                "{} Wrote {}\n  {} {} ezproxy apply\n",
                Icon::Success.colored(ui.color, ui.unicode),
                path,
                Icon::Arrow.colored(ui.color, ui.unicode),
                ColoredText::dim("Next:").render(ui.color)
            )
        },
    );
    Ok(())
}

fn collect(
    answers: &dyn Answers,
    args: InitArgs,
    tools: EnablementMap,
) -> Result<Settings> {
    let http = match args.http {
        Some(http) => http,
        None => answers.ask("HTTP proxy URL", None, false)?,
    };
    validate_proxy_url(&http)?;

    let https = match args.https {
        Some(https) => https,
        None => answers.ask("HTTPS proxy URL", Some(&http), false)?,
    };
    validate_proxy_url(&https)?;

    let no_proxy = match args.no_proxy {
        Some(no_proxy) => no_proxy,
        None => answers.ask("No-proxy hosts (comma-separated)", Some(DEFAULT_NO_PROXY), true)?,
    };

    let ca_cert = match args.ca_cert {
        Some(path) => Some(path.display().to_string()),
        None => Some(answers.ask("Corporate CA certificate path (empty for none)", None, true)?),
    };

    Ok(Settings::new(
        ProxyConfig {
            http: http.trim().to_string(),
            https: https.trim().to_string(),
            no_proxy: no_proxy.trim().to_string(),
        },
        ca_cert,
        tools,
    ))
}

fn validate_proxy_url(url: &str) -> Result<()> {
    let scheme_ok = url.trim().split_once("://").is_some_and(|(scheme, _)| {
        matches!(
            scheme.to_ascii_lowercase().as_str(),
            "http" | "https" | "socks5" | "socks5h"
        )
    });
    if !scheme_ok || ProxyEndpoint::parse(url).is_none() {
        bail!("invalid proxy URL '{url}' (expected http://host:port)");
    }
    Ok(())
}
