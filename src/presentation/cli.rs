//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--dry-run, --yes, --json, --color, --verbose) are accepted
//!   before or after the subcommand
//! - `EZPROXY_DRY_RUN` / `EZPROXY_YES` are merged in by `execution_context`

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::ExecutionContext;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// ezproxy - configure corporate proxy and CA trust across developer tools
#[derive(Parser, Debug)]
#[command(name = "ezproxy")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Run 'ezproxy init' first to write the settings document.")]
pub struct Cli {
    /// Show what would change without touching files or running commands
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Run privileged commands without asking
    #[arg(short = 'y', long, global = true)]
    pub yes: bool,

    /// Output NDJSON events instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output mode
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Run flags for this invocation, including environment overrides
    pub fn execution_context(&self) -> ExecutionContext {
        ExecutionContext::new()
            .with_dry_run(self.dry_run)
            .with_auto_confirm(self.yes)
            .with_env_overrides()
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write the settings document (prompts for anything not given)
    Init {
        /// HTTP proxy URL
        #[arg(long)]
        http: Option<String>,

        /// HTTPS proxy URL (defaults to the HTTP one)
        #[arg(long)]
        https: Option<String>,

        /// Comma-separated hosts/domains that bypass the proxy
        #[arg(long)]
        no_proxy: Option<String>,

        /// Corporate CA certificate (PEM)
        #[arg(long)]
        ca_cert: Option<PathBuf>,

        /// Overwrite an existing settings document
        #[arg(short, long)]
        force: bool,
    },

    /// Configure every enabled and installed tool
    Apply,

    /// Remove ezproxy configuration from every enabled and installed tool
    Remove,

    /// Show per-tool configuration status
    Status,

    /// Choose enabled tools interactively, then apply/remove the difference
    Manage,

    /// Enable one tool and configure it
    Enable {
        /// Tool name (see `ezproxy list`)
        name: String,
    },

    /// Disable one tool and remove its configuration
    Disable {
        /// Tool name (see `ezproxy list`)
        name: String,
    },

    /// List known tools with enablement and availability
    List,
}
