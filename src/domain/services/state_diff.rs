//! Enablement diffing
//!
//! Compares the stored enablement map with a freshly desired selection and
//! classifies every name exactly once: unchanged, newly enabled or newly
//! disabled. The caller persists `next` before acting on the deltas.

use crate::domain::entities::EnablementMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateDiff {
    pub newly_enabled: Vec<String>,
    pub newly_disabled: Vec<String>,
    pub unchanged: Vec<String>,
    /// Map to persist: `current` with every desired name set explicitly
    pub next: EnablementMap,
}

impl StateDiff {
    /// Diff a full selection (name -> wanted on/off), preserving its order
    pub fn compute<'a, I>(current: &EnablementMap, desired: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut diff = StateDiff {
            newly_enabled: Vec::new(),
            newly_disabled: Vec::new(),
            unchanged: Vec::new(),
            next: current.clone(),
        };

        for (name, wanted) in desired {
            // a name listed twice keeps its first classification
            if !diff.classified(name) {
                let bucket = match (current.is_enabled(name), wanted) {
                    (false, true) => &mut diff.newly_enabled,
                    (true, false) => &mut diff.newly_disabled,
                    _ => &mut diff.unchanged,
                };
                bucket.push(name.to_string());
                diff.next.set(name, wanted);
            }
        }
        diff
    }

    /// Single-name flip: one entry moves to `enable`
    pub fn toggle(current: &EnablementMap, name: &str, enable: bool) -> Self {
        Self::compute(current, [(name, enable)])
    }

    /// True when nothing needs to run
    pub fn is_empty(&self) -> bool {
        self.newly_enabled.is_empty() && self.newly_disabled.is_empty()
    }

    fn classified(&self, name: &str) -> bool {
        [&self.newly_enabled, &self.newly_disabled, &self.unchanged]
            .iter()
            .any(|bucket| bucket.iter().any(|n| n == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Enablement;

    #[test]
    fn absent_and_explicit_states_classify() {
        let mut current = EnablementMap::new();
        current.set("B", false);

        let diff = StateDiff::compute(&current, [("A", true), ("B", true), ("C", false)]);

        assert_eq!(diff.newly_enabled, vec!["B"]);
        assert_eq!(diff.newly_disabled, vec!["C"]);
        assert_eq!(diff.unchanged, vec!["A"]);
        assert_eq!(diff.next.state("A"), Enablement::Enabled);
        assert_eq!(diff.next.state("C"), Enablement::Disabled);
    }

    #[test]
    fn toggle_on_already_enabled_is_empty() {
        let current = EnablementMap::with_defaults([("git", true)]);
        let diff = StateDiff::toggle(&current, "git", true);
        assert!(diff.is_empty());
        assert_eq!(diff.unchanged, vec!["git"]);
    }

    #[test]
    fn toggle_off_from_absent_disables() {
        let diff = StateDiff::toggle(&EnablementMap::new(), "npm", false);
        assert_eq!(diff.newly_disabled, vec!["npm"]);
        assert!(!diff.next.is_enabled("npm"));
    }

    #[test]
    fn unrelated_entries_survive() {
        let current = EnablementMap::with_defaults([("ssh", false), ("git", true)]);
        let diff = StateDiff::toggle(&current, "git", false);
        assert_eq!(diff.next.state("ssh"), Enablement::Disabled);
        assert_eq!(diff.next.state("git"), Enablement::Disabled);
    }

    #[test]
    fn duplicate_names_classify_once() {
        let diff = StateDiff::compute(&EnablementMap::new(), [("a", false), ("a", false)]);
        assert_eq!(diff.newly_disabled, vec!["a"]);
        assert!(diff.unchanged.is_empty());
    }
}
