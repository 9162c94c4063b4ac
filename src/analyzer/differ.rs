//! Snapshot Differ
//!
//! Compares two snapshot collections by component identity and reports structural changes
//! as `ChangeEvent`s. Deletions and modifications are reported before additions.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::types::{ChangeEvent, ChangeType, ComponentKey, ComponentSnapshot, SnapshotField};

pub struct SnapshotDiffer;

impl SnapshotDiffer {
    /// Diff `before` against `after`.
    ///
    /// When a collection repeats an identity key, the first snapshot with that key is used.
    pub fn diff(before: &[ComponentSnapshot], after: &[ComponentSnapshot]) -> Vec<ChangeEvent> {
        let after_map = index_by_key(after);
        let mut seen_before: HashSet<ComponentKey> = HashSet::new();
        let mut events = Vec::new();

        for old in before {
            let key = old.key();
            if !seen_before.insert(key.clone()) {
                continue;
            }
            match after_map.get(&key) {
                None => events.push(ChangeEvent::component(old, ChangeType::ComponentDeleted)),
                Some(new) => diff_fields(old, new, &mut events),
            }
        }

        let mut seen_after: HashSet<ComponentKey> = HashSet::new();
        for new in after {
            let key = new.key();
            if !seen_before.contains(&key) && seen_after.insert(key) {
                events.push(ChangeEvent::component(new, ChangeType::ComponentAdded));
            }
        }

        debug!(
            "Diffed {} -> {} snapshots: {} events",
            before.len(),
            after.len(),
            events.len()
        );
        events
    }
}

fn index_by_key(snapshots: &[ComponentSnapshot]) -> HashMap<ComponentKey, &ComponentSnapshot> {
    let mut map = HashMap::with_capacity(snapshots.len());
    for snapshot in snapshots {
        map.entry(snapshot.key()).or_insert(snapshot);
    }
    map
}

fn diff_fields(old: &ComponentSnapshot, new: &ComponentSnapshot, events: &mut Vec<ChangeEvent>) {
    for field in SnapshotField::ALL {
        let before = old.field(field);
        let after = new.field(field);

        let removed: Vec<String> = before.difference(after).cloned().collect();
        let added: Vec<String> = after.difference(before).cloned().collect();

        if !removed.is_empty() {
            events.push(ChangeEvent {
                component: old.component_name.clone(),
                file_path: old.file_path.clone(),
                change_type: field.removed(),
                before: Some(removed),
                after: None,
            });
        }
        if !added.is_empty() {
            events.push(ChangeEvent {
                component: new.component_name.clone(),
                file_path: new.file_path.clone(),
                change_type: field.added(),
                before: None,
                after: Some(added),
            });
        }
    }
}

/// Per-type counts of a diff result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub counts: BTreeMap<ChangeType, usize>,
}

impl ChangeSummary {
    pub fn from_events(events: &[ChangeEvent]) -> Self {
        let mut counts = BTreeMap::new();
        for event in events {
            *counts.entry(event.change_type).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, change_type: ChangeType) -> usize {
        self.counts.get(&change_type).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Short form: `+added ~modified -deleted (total: n)`
    pub fn summary(&self) -> String {
        let added = self.count(ChangeType::ComponentAdded);
        let deleted = self.count(ChangeType::ComponentDeleted);
        let modified = self.total() - added - deleted;
        format!(
            "+{} ~{} -{} (total: {})",
            added,
            modified,
            deleted,
            self.total()
        )
    }
}
