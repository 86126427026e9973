//! `apply` / `remove`

use anyhow::{Context, Result};

use crate::application::Operation;
use crate::presentation::Runtime;
use crate::ui::json::run_report_json;
use crate::ui::views::report::render_run_report;

pub fn cmd_run(runtime: &Runtime, operation: Operation) -> Result<()> {
    let settings = runtime
        .load_settings()
        .with_context(|| format!("cannot {}", operation.as_str()))?;

    let report = runtime.orchestrator().run(operation, &settings);

    runtime
        .output
        .summary(|| run_report_json(&report), || render_run_report(&report, &runtime.ui));
    Ok(())
}
