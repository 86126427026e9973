//! Execution context - the two process-wide run flags
//!
//! Built once from CLI flags (or `EZPROXY_DRY_RUN` / `EZPROXY_YES`) and passed
//! by value into the orchestrator, patcher, gateway and every adapter call.

/// Flags that stay fixed for the whole invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecutionContext {
    /// Compute and render side effects without committing them
    pub dry_run: bool,
    /// Skip the privileged-command confirmation prompt
    pub auto_confirm: bool,
}

impl ExecutionContext {
    /// Create a context for a real, interactive run
    pub fn new() -> Self {
        Self::default()
    }

    /// Set dry run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set auto-confirm
    pub fn with_auto_confirm(mut self, auto_confirm: bool) -> Self {
        self.auto_confirm = auto_confirm;
        self
    }

    /// Merge in `EZPROXY_DRY_RUN` / `EZPROXY_YES` from the environment
    pub fn with_env_overrides(self) -> Self {
        self.with_env_overrides_from(|key| std::env::var(key).ok())
    }

    pub(crate) fn with_env_overrides_from(mut self, get_env: impl Fn(&str) -> Option<String>) -> Self {
        if get_env("EZPROXY_DRY_RUN").is_some_and(|v| is_truthy(&v)) {
            self.dry_run = true;
        }
        if get_env("EZPROXY_YES").is_some_and(|v| is_truthy(&v)) {
            self.auto_confirm = true;
        }
        self
    }
}

fn is_truthy(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "" | "0" | "false" | "no")
}
