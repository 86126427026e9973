//! `enable <name>` / `disable <name>`

use anyhow::Result;
use serde_json::json;

use crate::application::{ToggleOutcome, ToggleUseCase};
use crate::presentation::Runtime;
use crate::ui::json::run_report_json;
use crate::ui::primitives::icon::Icon;
use crate::ui::views::report::render_run_report;

pub fn cmd_toggle(runtime: &Runtime, name: &str, enable: bool) -> Result<()> {
    let settings = runtime.load_settings()?;
    let orchestrator = runtime.orchestrator();
    let outcome = ToggleUseCase::new(&runtime.repository, &orchestrator).toggle(settings, name, enable)?;
    print_toggle(runtime, &outcome);
    Ok(())
}

/// Shared by `enable`, `disable` and `manage`
pub fn print_toggle(runtime: &Runtime, outcome: &ToggleOutcome) {
    let diff = &outcome.diff;
    let persisted = !runtime.exec.dry_run;

    runtime.output.summary(
        || {
            json!({
                "event": "toggle",
                "enabled": diff.newly_enabled,
                "disabled": diff.newly_disabled,
                "unchanged": diff.unchanged,
                "persisted": persisted,
            })
        },
        || {
            let ui = &runtime.ui;
            if diff.is_empty() {
                return format!(
                    "{} Nothing to change: {}\n",
                    Icon::Skipped.colored(ui.color, ui.unicode),
                    diff.unchanged.join(", ")
                );
            }
            let mut out = String::new();
            for (label, names) in [("Enabled", &diff.newly_enabled), ("Disabled", &diff.newly_disabled)] {
                if !names.is_empty() {
                    out.push_str(&format!(
                        "{} {}: {}\n",
                        Icon::Success.colored(ui.color, ui.unicode),
                        label,
                        names.join(", ")
                    ));
                }
            }
            if !persisted {
                out.push_str("Dry run: settings not saved.\n");
            }
            out
        },
    );

    for report in [&outcome.applied, &outcome.removed] {
        if !report.is_empty() {
            runtime
                .output
                .summary(|| run_report_json(report), || render_run_report(report, &runtime.ui));
        }
    }
}
