//! Structural diff between two sets of resources.
//!
//! Resources are matched on `(kind, name)`. Every change carries a breaking
//! flag: a change is breaking when it can invalidate or orphan data already
//! stored under the old schema.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use graphdecl_foundation::{DiscoveredResource, PropertyDef, ResourceKind, Setting};
use serde::Serialize;

// =============================================================================
// Diff Types
// =============================================================================

/// What happened to a resource between two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAction {
    /// Present only in the new snapshot.
    Added,
    /// Present in both with differences.
    Modified,
    /// Present only in the old snapshot.
    Removed,
}

impl DiffAction {
    /// The opposite action when the snapshots are swapped.
    #[must_use]
    pub fn reversed(self) -> Self {
        match self {
            Self::Added => Self::Removed,
            Self::Modified => Self::Modified,
            Self::Removed => Self::Added,
        }
    }

    pub(crate) fn symbol(self) -> char {
        match self {
            Self::Added => '+',
            Self::Modified => '~',
            Self::Removed => '-',
        }
    }
}

impl fmt::Display for DiffAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        })
    }
}

/// One human-readable change descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Change {
    /// What changed.
    pub description: String,
    /// Whether existing data may be invalidated or orphaned.
    pub breaking: bool,
}

impl Change {
    /// Creates an informational change.
    #[must_use]
    pub fn info(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            breaking: false,
        }
    }

    /// Creates a breaking change.
    #[must_use]
    pub fn breaking(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            breaking: true,
        }
    }

    fn flagged(description: impl Into<String>, breaking: bool) -> Self {
        Self {
            description: description.into(),
            breaking,
        }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)?;
        if self.breaking {
            f.write_str(" [BREAKING]")?;
        }
        Ok(())
    }
}

/// Changes to a single resource.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiffEntry {
    /// Resource name.
    pub name: String,
    /// Resource kind.
    pub kind: ResourceKind,
    /// What happened to the resource.
    pub action: DiffAction,
    /// Change descriptors, sorted by display text.
    pub changes: Vec<Change>,
}

impl DiffEntry {
    /// Returns true if any change is breaking.
    #[must_use]
    pub fn is_breaking(&self) -> bool {
        self.changes.iter().any(|c| c.breaking)
    }

    fn sort_key(&self) -> (DiffAction, &str, ResourceKind) {
        (self.action, &self.name, self.kind)
    }
}

/// Per-action entry counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffCounts {
    /// Added resources.
    pub added: usize,
    /// Modified resources.
    pub modified: usize,
    /// Removed resources.
    pub removed: usize,
}

/// Differences between two snapshots.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiffResult {
    /// Entries sorted by action (added, modified, removed), then name, then kind.
    pub entries: Vec<DiffEntry>,
}

impl DiffResult {
    /// Returns true if the snapshots are equivalent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any change is breaking.
    #[must_use]
    pub fn has_breaking(&self) -> bool {
        self.entries.iter().any(DiffEntry::is_breaking)
    }

    /// Total number of breaking changes.
    #[must_use]
    pub fn breaking_count(&self) -> usize {
        self.entries
            .iter()
            .flat_map(|e| &e.changes)
            .filter(|c| c.breaking)
            .count()
    }

    /// Counts entries per action.
    #[must_use]
    pub fn counts(&self) -> DiffCounts {
        let mut counts = DiffCounts::default();
        for entry in &self.entries {
            match entry.action {
                DiffAction::Added => counts.added += 1,
                DiffAction::Modified => counts.modified += 1,
                DiffAction::Removed => counts.removed += 1,
            }
        }
        counts
    }

    /// Finds the entry for a resource.
    #[must_use]
    pub fn entry(&self, kind: ResourceKind, name: &str) -> Option<&DiffEntry> {
        self.entries
            .iter()
            .find(|e| e.kind == kind && e.name == name)
    }
}

// =============================================================================
// Diff Functions
// =============================================================================

type Key<'a> = (ResourceKind, &'a str);

fn keyed(resources: &[DiscoveredResource]) -> BTreeMap<Key<'_>, &DiscoveredResource> {
    let mut map = BTreeMap::new();
    for resource in resources {
        map.entry(resource.key()).or_insert(resource);
    }
    map
}

/// Computes the diff from `old` to `new`.
///
/// When a snapshot holds the same `(kind, name)` twice, the first occurrence
/// is compared.
#[must_use]
pub fn diff(old: &[DiscoveredResource], new: &[DiscoveredResource]) -> DiffResult {
    let old_map = keyed(old);
    let new_map = keyed(new);
    let mut entries = Vec::new();

    for (key, resource) in &new_map {
        if !old_map.contains_key(key) {
            entries.push(entry(resource, DiffAction::Added, added_changes(resource)));
        }
    }

    for (key, before) in &old_map {
        match new_map.get(key) {
            None => entries.push(entry(
                before,
                DiffAction::Removed,
                vec![Change::breaking(format!("{} removed", before.kind))],
            )),
            Some(after) => {
                let changes = diff_resource(before, after);
                if !changes.is_empty() {
                    entries.push(entry(before, DiffAction::Modified, changes));
                }
            }
        }
    }

    entries.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    DiffResult { entries }
}

fn entry(resource: &DiscoveredResource, action: DiffAction, mut changes: Vec<Change>) -> DiffEntry {
    changes.sort_by_cached_key(ToString::to_string);
    changes.dedup();
    DiffEntry {
        name: resource.name.clone(),
        kind: resource.kind,
        action,
        changes,
    }
}

/// A new resource is breaking when it requires data existing rows lack.
fn added_changes(resource: &DiscoveredResource) -> Vec<Change> {
    let required: Vec<&PropertyDef> = resource.properties.iter().filter(|p| p.required).collect();
    if required.is_empty() {
        return vec![Change::info(format!("{} added", resource.kind))];
    }
    required
        .into_iter()
        .map(|p| {
            Change::breaking(format!(
                "{} added with required property '{}'",
                resource.kind, p.name
            ))
        })
        .collect()
}

/// Compares two versions of the same resource.
#[must_use]
pub fn diff_resource(before: &DiscoveredResource, after: &DiscoveredResource) -> Vec<Change> {
    let mut changes = Vec::new();
    diff_properties(before, after, &mut changes);
    diff_constraints(before, after, &mut changes);
    diff_indexes(before, after, &mut changes);
    diff_endpoint("source", before.source.as_ref(), after.source.as_ref(), &mut changes);
    diff_endpoint("target", before.target.as_ref(), after.target.as_ref(), &mut changes);
    diff_settings(&before.settings, &after.settings, &mut changes);

    if before.description != after.description {
        changes.push(Change::info("description changed"));
    }
    if before.agent_context != after.agent_context {
        changes.push(Change::info("agent context changed"));
    }
    changes
}

fn diff_properties(before: &DiscoveredResource, after: &DiscoveredResource, out: &mut Vec<Change>) {
    for old in &before.properties {
        let Some(new) = after.property(&old.name) else {
            out.push(Change::breaking(format!("property '{}' removed", old.name)));
            continue;
        };
        let name = &old.name;
        if old.ty != new.ty {
            out.push(Change::breaking(format!(
                "property '{name}' type changed: {} -> {}",
                old.ty, new.ty
            )));
        }
        if old.required != new.required {
            out.push(if new.required {
                Change::breaking(format!("property '{name}' is now required"))
            } else {
                Change::info(format!("property '{name}' is no longer required"))
            });
        }
        if old.unique != new.unique {
            out.push(if new.unique {
                Change::info(format!("property '{name}' is now unique"))
            } else {
                Change::breaking(format!("property '{name}' is no longer unique"))
            });
        }
        if old.description != new.description {
            out.push(Change::info(format!("property '{name}' description changed")));
        }
    }

    for new in &after.properties {
        if before.property(&new.name).is_none() {
            let qualifier = if new.required { "required " } else { "" };
            out.push(Change::flagged(
                format!("{qualifier}property '{}' added", new.name),
                new.required,
            ));
        }
    }
}

fn diff_constraints(
    before: &DiscoveredResource,
    after: &DiscoveredResource,
    out: &mut Vec<Change>,
) {
    let old: BTreeMap<String, Option<&String>> = before
        .constraints
        .iter()
        .map(|c| (c.to_string(), c.name.as_ref()))
        .collect();
    let new: BTreeMap<String, Option<&String>> = after
        .constraints
        .iter()
        .map(|c| (c.to_string(), c.name.as_ref()))
        .collect();

    for (shape, name) in &old {
        match new.get(shape) {
            None => out.push(Change::breaking(format!("constraint {shape} removed"))),
            Some(new_name) if new_name != name => {
                out.push(Change::info(format!("constraint {shape} renamed")));
            }
            Some(_) => {}
        }
    }
    for shape in new.keys() {
        if !old.contains_key(shape) {
            out.push(Change::info(format!("constraint {shape} added")));
        }
    }
}

fn diff_indexes(before: &DiscoveredResource, after: &DiscoveredResource, out: &mut Vec<Change>) {
    let old: BTreeMap<String, _> = before.indexes.iter().map(|i| (i.to_string(), i)).collect();
    let new: BTreeMap<String, _> = after.indexes.iter().map(|i| (i.to_string(), i)).collect();

    for (shape, index) in &old {
        match new.get(shape) {
            None => out.push(Change::info(format!("index {shape} removed"))),
            Some(other) => {
                if other.options != index.options {
                    out.push(Change::info(format!("index {shape} options changed")));
                }
                if other.name != index.name {
                    out.push(Change::info(format!("index {shape} renamed")));
                }
            }
        }
    }
    for shape in new.keys() {
        if !old.contains_key(shape) {
            out.push(Change::info(format!("index {shape} added")));
        }
    }
}

fn diff_endpoint(
    which: &str,
    before: Option<&String>,
    after: Option<&String>,
    out: &mut Vec<Change>,
) {
    if before != after {
        let show = |label: Option<&String>| label.map_or("(none)", String::as_str).to_string();
        out.push(Change::breaking(format!(
            "{which} changed: {} -> {}",
            show(before),
            show(after)
        )));
    }
}

fn diff_settings(
    before: &BTreeMap<String, Setting>,
    after: &BTreeMap<String, Setting>,
    out: &mut Vec<Change>,
) {
    let keys: BTreeSet<&String> = before.keys().chain(after.keys()).collect();
    for key in keys {
        match (before.get(key), after.get(key)) {
            (Some(old), Some(new)) if old != new => {
                out.push(Change::info(format!("setting '{key}' changed: {old} -> {new}")));
            }
            (Some(_), None) => out.push(Change::info(format!("setting '{key}' removed"))),
            (None, Some(new)) => out.push(Change::info(format!("setting '{key}' added: {new}"))),
            _ => {}
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
