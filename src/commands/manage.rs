//! `manage` - pick the enabled set interactively

use anyhow::{bail, Result};
use dialoguer::MultiSelect;
use is_terminal::IsTerminal;

use super::toggle::print_toggle;
use crate::application::ToggleUseCase;
use crate::presentation::Runtime;
use crate::ui::theme::EzproxyTheme;

pub fn cmd_manage(runtime: &Runtime) -> Result<()> {
    let settings = runtime.load_settings()?;
    if runtime.ui.json || !std::io::stdin().is_terminal() {
        bail!("manage needs an interactive terminal; use `ezproxy enable <name>` / `ezproxy disable <name>`");
    }

    let names: Vec<&'static str> = runtime.registry.names().collect();
    let defaults: Vec<bool> = names.iter().map(|n| settings.tools.is_enabled(n)).collect();
    let items: Vec<String> = runtime
        .registry
        .iter()
        .map(|adapter| {
            if adapter.is_available(&runtime.env) {
                adapter.name().to_string()
            } else {
                format!("{} (not installed)", adapter.name())
            }
        })
        .collect();

    let theme = EzproxyTheme::new(runtime.ui.unicode);
    let selection = MultiSelect::with_theme(&theme)
        .with_prompt("Select tools to configure (space toggles, enter confirms)")
        .items(&items)
        .defaults(&defaults)
        .interact_opt()?;

    let Some(selection) = selection else {
        println!("Cancelled; nothing changed.");
        return Ok(());
    };

    let desired = names
        .iter()
        .enumerate()
        .map(|(idx, name)| (*name, selection.contains(&idx)));

    let orchestrator = runtime.orchestrator();
    let outcome = ToggleUseCase::new(&runtime.repository, &orchestrator).select(settings, desired)?;
    print_toggle(runtime, &outcome);
    Ok(())
}
