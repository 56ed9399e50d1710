//! Per-object watch and dependency bookkeeping.
//!
//! Each object carries a `Meta` record: how many watchers are interested in
//! each key, and the dependency adjacency `changed key -> dependent keys`.
//! Both tables are counted so that redundant add/remove calls never
//! double-insert or underflow.

use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct Meta {
    watching: IndexMap<String, usize>,
    deps: IndexMap<String, IndexMap<String, usize>>,
}

impl Meta {
    /// True when at least one watcher is registered for `key`.
    pub fn peek_watching(&self, key: &str) -> bool {
        self.watch_count(key) > 0
    }

    pub fn watch_count(&self, key: &str) -> usize {
        self.watching.get(key).copied().unwrap_or(0)
    }

    /// True when an edge `target_key -> dependent_key` is registered.
    pub fn peek_deps(&self, target_key: &str, dependent_key: &str) -> bool {
        self.deps
            .get(target_key)
            .and_then(|dependents| dependents.get(dependent_key))
            .copied()
            .unwrap_or(0)
            > 0
    }

    /// Returns the new watcher count.
    pub(crate) fn add_watcher(&mut self, key: &str) -> usize {
        let count = self.watching.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Returns the new watcher count; saturates at zero.
    pub(crate) fn remove_watcher(&mut self, key: &str) -> usize {
        match self.watching.get_mut(key) {
            Some(count) if *count > 0 => {
                *count -= 1;
                *count
            }
            _ => 0,
        }
    }

    pub(crate) fn add_dep(&mut self, target_key: &str, dependent_key: &str) {
        let count = self
            .deps
            .entry(target_key.to_string())
            .or_default()
            .entry(dependent_key.to_string())
            .or_insert(0);
        *count += 1;
    }

    pub(crate) fn remove_dep(&mut self, target_key: &str, dependent_key: &str) {
        if let Some(dependents) = self.deps.get_mut(target_key) {
            if let Some(count) = dependents.get_mut(dependent_key) {
                *count = count.saturating_sub(1);
                if *count == 0 {
                    dependents.shift_remove(dependent_key);
                }
            }
            if dependents.is_empty() {
                self.deps.shift_remove(target_key);
            }
        }
    }

    /// Keys with a registered edge from `key`, in registration order.
    pub(crate) fn dependents_of(&self, key: &str) -> Vec<String> {
        self.deps
            .get(key)
            .map(|dependents| {
                dependents
                    .iter()
                    .filter(|(_, count)| **count > 0)
                    .map(|(dependent, _)| dependent.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}
