//! Confirmer port - yes/no questions to the user

pub trait Confirmer {
    /// Ask a yes/no question. Errors (e.g. no TTY) count as "no".
    fn confirm(&self, prompt: &str) -> bool;
}

/// Confirmer that always gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
