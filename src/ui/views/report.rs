//! Text rendering of orchestration results: run reports, status and list

use crate::application::{
    ApplyOutcome, InventoryEntry, Operation, RunReport, StatusEntry, StatusState,
};
use crate::domain::entities::Enablement;
use crate::domain::value_objects::StatusLabel;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(str::len).max().unwrap_or(0)
}

fn row(ui: &UiContext, icon: Icon, name: &str, width: usize, text: &str) -> String {
    format!(
        "{} {:<width$}  {}\n",
        icon.colored(ui.color, ui.unicode),
        name,
        text,
        width = width
    )
}

/// One line per adapter, then a count summary
pub fn render_run_report(report: &RunReport, ui: &UiContext) -> String {
    let width = name_width(report.reports.iter().map(|r| r.name));
    let mut out = String::new();

    for entry in &report.reports {
        let (icon, text) = match &entry.outcome {
            ApplyOutcome::Configured | ApplyOutcome::Removed => (
                Icon::Success,
                ColoredText::success(entry.outcome.label()).render(ui.color),
            ),
            ApplyOutcome::Failed(err) => (
                Icon::Error,
                ColoredText::error(format!("failed: {err}")).render(ui.color),
            ),
            skipped => (Icon::Skipped, ColoredText::dim(skipped.label()).render(ui.color)),
        };
        out.push_str(&row(ui, icon, entry.name, width, &text));
    }

    let done = match report.operation {
        Operation::Apply => "configured",
        Operation::Remove => "removed",
    };
    out.push_str(&format!(
        "{} {}, {} skipped, {} failed\n",
        report.succeeded(),
        done,
        report.skipped(),
        report.failures()
    ));
    if report.dry_run {
        out.push_str(&ColoredText::dim("Dry run: nothing was written or executed.").render(ui.color));
        out.push('\n');
    }
    out
}

pub fn render_status(entries: &[StatusEntry], ui: &UiContext) -> String {
    let width = name_width(entries.iter().map(|e| e.name));
    let mut out = String::new();

    for entry in entries {
        let (icon, text) = match &entry.state {
            StatusState::Disabled => (Icon::Skipped, ColoredText::dim("disabled")),
            StatusState::Unavailable => (Icon::Skipped, ColoredText::dim("not installed")),
            StatusState::Failed(err) => (Icon::Error, ColoredText::error(format!("error: {err}"))),
            StatusState::Reported(status) => {
                let text = status.to_string();
                match status.label {
                    StatusLabel::Configured => (Icon::Success, ColoredText::success(text)),
                    StatusLabel::Stale => (Icon::Warning, ColoredText::warning(text)),
                    StatusLabel::Unknown => (Icon::Warning, ColoredText::dim(text)),
                    StatusLabel::NotConfigured => (Icon::Pending, ColoredText::plain(text)),
                }
            }
        };
        out.push_str(&row(ui, icon, entry.name, width, &text.render(ui.color)));
    }
    out
}

fn enablement_label(enablement: Enablement) -> &'static str {
    match enablement {
        Enablement::Enabled => "enabled",
        Enablement::Absent => "enabled (default)",
        Enablement::Disabled => "disabled",
    }
}

pub fn render_inventory(entries: &[InventoryEntry], ui: &UiContext) -> String {
    let width = name_width(entries.iter().map(|e| e.name));
    let mut out = String::new();

    for entry in entries {
        let icon = if entry.enabled() { Icon::Success } else { Icon::Skipped };
        let installed = if entry.available {
            ColoredText::plain("installed")
        } else {
            ColoredText::dim("not installed")
        };
        let text = format!(
            "{:<17}  {}",
            enablement_label(entry.enablement),
            installed.render(ui.color)
        );
        out.push_str(&row(ui, icon, entry.name, width, &text));
    }
    out
}
