//! Console event sink
//!
//! Human-readable rendering of run events: dry-run previews as unified
//! diffs, privileged command listings, notes and best-effort failures.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{RunEvent, RunEventSink};
use crate::domain::services::{PatchAction, PatchPlan};
use crate::ui::components::diff::render_unified_diff_with_line_numbers;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

pub struct ConsoleEventSink {
    ui: UiContext,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(ui: UiContext, writer: W) -> Self {
        Self {
            ui,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.write_all(text.as_bytes());
            let _ = writer.flush();
        }
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.ui.color, self.ui.unicode)
    }

    fn render(&self, event: RunEvent) -> String {
        let color = self.ui.color;
        match event {
            RunEvent::AdapterStarted { name } if self.ui.verbose > 0 => {
                format!("{} {}\n", self.icon(Icon::Pending), ColoredText::info(name).render(color))
            }
            RunEvent::AdapterStarted { .. } => String::new(),

            RunEvent::FilePlanned { plan, simulated } => self.render_plan(&plan, simulated),

            RunEvent::CommandsSimulated {
                operation,
                commands,
            } => {
                let mut out = format!(
                    "  {} {} would run:\n",
                    ColoredText::dim("[dry-run]").render(color),
                    operation
                );
                push_commands(&mut out, &commands);
                out
            }

            RunEvent::CommandsPending {
                operation,
                commands,
                removal,
            } => {
                let mode = if removal { " (best effort)" } else { "" };
                let mut out = format!(
                    "  {} {} needs elevated privileges{}:\n",
                    self.icon(Icon::Warning),
                    operation,
                    mode
                );
                push_commands(&mut out, &commands);
                out
            }

            RunEvent::ConfirmationDeclined { operation } => format!(
                "  {} {}: declined; run the commands above manually\n",
                self.icon(Icon::Skipped),
                operation
            ),

            RunEvent::CommandFailed {
                operation,
                command,
                error,
            } => format!(
                "  {} {}: {} failed ({}); continuing\n",
                self.icon(Icon::Warning),
                operation,
                command,
                ColoredText::warning(error).render(color)
            ),

            RunEvent::Note { operation, message } => format!(
                "  {} {}: {}\n",
                self.icon(Icon::Arrow),
                operation,
                message
            ),
        }
    }

    fn render_plan(&self, plan: &PatchPlan, simulated: bool) -> String {
        let path = plan.path.display().to_string();
        if !plan.writes() {
            if self.ui.verbose > 0 {
                return format!(
                    "  {} {}\n",
                    self.icon(Icon::Skipped),
                    ColoredText::dim(format!("{path} ({})", plan.action.as_str())).render(self.ui.color)
                );
            }
            return String::new();
        }

        if !simulated {
            return format!("  {} {} {}\n", self.icon(Icon::Arrow), past_tense(plan.action), path);
        }

        let mut out = format!(
            "  {} would {} {}\n",
            ColoredText::dim("[dry-run]").render(self.ui.color),
            plan.action.as_str(),
            path
        );
        let before = plan.before.as_deref().unwrap_or("");
        let after = plan.after.as_deref().unwrap_or("");
        out.push_str(&render_unified_diff_with_line_numbers(
            &path,
            before,
            after,
            self.ui.color,
        ));
        out
    }
}

impl RunEventSink for ConsoleEventSink {
    fn on_event(&self, event: RunEvent) {
        let text = self.render(event);
        self.write(&text);
    }
}

fn push_commands(out: &mut String, commands: &[String]) {
    for command in commands {
        out.push_str("    $ ");
        out.push_str(command);
        out.push('\n');
    }
}

fn past_tense(action: PatchAction) -> &'static str {
    match action {
        PatchAction::Create => "created",
        PatchAction::Append => "appended to",
        PatchAction::Replace => "updated",
        PatchAction::Rewrite => "rewrote",
        PatchAction::Remove => "removed ezproxy block from",
        PatchAction::Unchanged | PatchAction::Noop => "left",
    }
}
