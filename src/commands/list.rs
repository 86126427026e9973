//! `list`

use anyhow::Result;

use crate::presentation::Runtime;
use crate::ui::json::inventory_json;
use crate::ui::views::report::render_inventory;

pub fn cmd_list(runtime: &Runtime) -> Result<()> {
    let settings = runtime.load_settings()?;
    let entries = runtime.orchestrator().inventory(&settings.tools);

    runtime
        .output
        .summary(|| inventory_json(&entries), || render_inventory(&entries, &runtime.ui));
    Ok(())
}
