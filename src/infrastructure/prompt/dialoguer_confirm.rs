use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::domain::ports::Confirmer;
use crate::ui::theme::EzproxyTheme;

/// Asks on the terminal; without a TTY every answer is "no"
pub struct DialoguerConfirmer {
    unicode: bool,
}

impl DialoguerConfirmer {
    pub fn new(unicode: bool) -> Self {
        Self { unicode }
    }
}

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str) -> bool {
        if !std::io::stdin().is_terminal() {
            return false;
        }
        Confirm::with_theme(&EzproxyTheme::new(self.unicode))
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false)
    }
}
