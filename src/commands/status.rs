//! `status`

use anyhow::Result;

use crate::presentation::Runtime;
use crate::ui::json::status_json;
use crate::ui::views::report::render_status;

pub fn cmd_status(runtime: &Runtime) -> Result<()> {
    let settings = runtime.load_settings()?;
    let entries = runtime.orchestrator().status(&settings);

    runtime
        .output
        .summary(|| status_json(&entries), || render_status(&entries, &runtime.ui));
    Ok(())
}
