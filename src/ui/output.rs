use crate::domain::ports::SettingsWarning;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;

pub fn print_settings_warnings(warnings: &[SettingsWarning], ui: &UiContext) {
    if ui.json {
        return;
    }
    for w in warnings {
        eprintln!(
            "{} Unknown settings key '{}' in {}",
            Icon::Warning.colored(ui.color, ui.unicode),
            w.key,
            w.file.display()
        );
    }
}
