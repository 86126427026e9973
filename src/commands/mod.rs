//! Command handlers
//!
//! Each `cmd_*` function drives one subcommand against a prepared
//! `Runtime` and returns `anyhow::Result`; errors exit with status 1.

pub mod apply;
pub mod init;
pub mod list;
pub mod manage;
pub mod status;
pub mod toggle;

use anyhow::Result;

use crate::application::Operation;
use crate::presentation::{Commands, Runtime};

pub fn dispatch(command: Commands, runtime: &Runtime) -> Result<()> {
    match command {
        Commands::Init {
            http,
            https,
            no_proxy,
            ca_cert,
            force,
        } => init::cmd_init(
            runtime,
            init::InitArgs {
                http,
                https,
                no_proxy,
                ca_cert,
                force,
            },
        ),
        Commands::Apply => apply::cmd_run(runtime, Operation::Apply),
        Commands::Remove => apply::cmd_run(runtime, Operation::Remove),
        Commands::Status => status::cmd_status(runtime),
        Commands::Manage => manage::cmd_manage(runtime),
        Commands::Enable { name } => toggle::cmd_toggle(runtime, &name, true),
        Commands::Disable { name } => toggle::cmd_toggle(runtime, &name, false),
        Commands::List => list::cmd_list(runtime),
    }
}
