//! Toggle use case
//!
//! Changes which adapters are enabled and then acts on the difference:
//! newly enabled adapters are applied, newly disabled ones removed. The new
//! enablement map is persisted before any adapter runs, so an interrupted
//! run keeps the user's selection.

use tracing::info;

use super::orchestrator::{ApplyOrchestrator, RunReport};
use crate::domain::entities::Settings;
use crate::domain::ports::{FileSystem, SettingsRepository};
use crate::domain::services::StateDiff;
use crate::error::EzproxyResult;

#[derive(Debug)]
pub struct ToggleOutcome {
    pub diff: StateDiff,
    /// Settings as persisted (or as they would be, in a dry run)
    pub settings: Settings,
    pub applied: RunReport,
    pub removed: RunReport,
}

pub struct ToggleUseCase<'a, FS>
where
    FS: FileSystem,
{
    repository: &'a dyn SettingsRepository,
    orchestrator: &'a ApplyOrchestrator<'a, FS>,
}

impl<'a, FS> ToggleUseCase<'a, FS>
where
    FS: FileSystem,
{
    pub fn new(
        repository: &'a dyn SettingsRepository,
        orchestrator: &'a ApplyOrchestrator<'a, FS>,
    ) -> Self {
        Self {
            repository,
            orchestrator,
        }
    }

    /// Flip one adapter; unknown names are rejected before anything changes
    pub fn toggle(&self, settings: Settings, name: &str, enable: bool) -> EzproxyResult<ToggleOutcome> {
        let adapter = self.orchestrator.registry().require(name)?;
        let diff = StateDiff::toggle(&settings.tools, adapter.name(), enable);
        self.execute(settings, diff)
    }

    /// Replace the whole selection (every registered name -> on/off)
    pub fn select<'n, I>(&self, settings: Settings, desired: I) -> EzproxyResult<ToggleOutcome>
    where
        I: IntoIterator<Item = (&'n str, bool)>,
    {
        let diff = StateDiff::compute(&settings.tools, desired);
        self.execute(settings, diff)
    }

    fn execute(&self, mut settings: Settings, diff: StateDiff) -> EzproxyResult<ToggleOutcome> {
        settings.tools = diff.next.clone();
        if self.orchestrator.execution().dry_run {
            info!("dry run: enablement not persisted");
        } else {
            self.repository.save(&settings)?;
        }

        let (applied, removed) =
            self.orchestrator
                .run_deltas(&settings, &diff.newly_enabled, &diff.newly_disabled);

        Ok(ToggleOutcome {
            diff,
            settings,
            applied,
            removed,
        })
    }
}
