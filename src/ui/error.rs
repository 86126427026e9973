use crate::error::EzproxyError;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Follow-up hint for errors the user can fix directly
fn hint(err: &EzproxyError) -> Option<&'static str> {
    match err {
        EzproxyError::SettingsMissing { .. } => Some("Run `ezproxy init` to create it."),
        EzproxyError::InvalidSettings { .. } => {
            Some("Fix the YAML, or run `ezproxy init --force` to start over.")
        }
        EzproxyError::UnknownAdapter { .. } => Some("Run `ezproxy list` to see tool names."),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error, ui: &UiContext) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(ui.color, ui.unicode),
        ColoredText::error(format!("{err:#}")).render(ui.color)
    );

    if let Some(hint) = err.downcast_ref::<EzproxyError>().and_then(hint) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(ui.color, ui.unicode),
            ColoredText::dim(hint).render(ui.color)
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    if ui.json {
        let output = serde_json::json!({
            "event": "error",
            "message": format!("{err:#}"),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    eprint!("{}", format_error(err, ui));
}
