//! Cross-resource reference resolution.
//!
//! Runs once over every candidate of a scan so references across files
//! resolve the same way as references within one file.

use std::collections::{HashMap, HashSet};

use graphdecl_foundation::{DiscoveredResource, ResourceKind, Setting};
use tracing::warn;

use super::ScanWarning;
use super::analyzer::Candidate;

/// Deduplicates candidates and rewrites identifier references to domain names.
///
/// Returns the resources in scan order plus one warning per dropped
/// duplicate (when `warn_on_duplicates` is set).
pub(crate) fn finalize(
    candidates: Vec<Candidate>,
    warn_on_duplicates: bool,
) -> (Vec<DiscoveredResource>, Vec<ScanWarning>) {
    let mut warnings = Vec::new();
    let mut seen: HashSet<(ResourceKind, String)> = HashSet::new();
    let mut kept = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let key = (candidate.resource.kind, candidate.resource.name.clone());
        if seen.insert(key) {
            kept.push(candidate);
            continue;
        }
        let resource = &candidate.resource;
        if warn_on_duplicates {
            warn!(
                kind = %resource.kind,
                name = %resource.name,
                path = %resource.location.file.display(),
                "duplicate declaration ignored"
            );
            warnings.push(ScanWarning::new(
                &resource.location.file,
                format!(
                    "duplicate {} '{}' at line {} ignored; first declaration kept",
                    resource.kind, resource.name, resource.location.line
                ),
            ));
        }
    }

    // First declaration wins when two resources share an identifier.
    let mut names: HashMap<String, String> = HashMap::new();
    for candidate in &kept {
        let resource = &candidate.resource;
        names
            .entry(resource.identifier.clone())
            .or_insert_with(|| resource.name.clone());
    }

    let resources = kept
        .into_iter()
        .map(|candidate| resolve_candidate(candidate, &names))
        .collect();
    (resources, warnings)
}

fn resolve_candidate(candidate: Candidate, names: &HashMap<String, String>) -> DiscoveredResource {
    let Candidate {
        mut resource,
        source_is_ref,
        target_is_ref,
    } = candidate;

    let lookup = |name: &str| names.get(name).cloned().unwrap_or_else(|| name.to_string());

    let mut dependencies: Vec<String> = Vec::with_capacity(resource.dependencies.len());
    for dep in &resource.dependencies {
        if *dep == resource.identifier || *dep == resource.name {
            continue;
        }
        let resolved = lookup(dep);
        if resolved != resource.name && !dependencies.contains(&resolved) {
            dependencies.push(resolved);
        }
    }
    resource.dependencies = dependencies;

    if source_is_ref {
        resource.source = resource.source.as_deref().map(lookup);
    }
    if target_is_ref {
        resource.target = resource.target.as_deref().map(lookup);
    }

    for setting in resource.settings.values_mut() {
        resolve_setting(setting, names);
    }
    resource
}

/// Rewrites `Ref` values naming a declaring identifier, by their last path segment.
fn resolve_setting(setting: &mut Setting, names: &HashMap<String, String>) {
    match setting {
        Setting::Ref(path) => {
            let last = path.rsplit("::").next().unwrap_or(path.as_str());
            if let Some(name) = names.get(last) {
                *path = name.clone();
            }
        }
        Setting::List(items) => {
            for item in items {
                resolve_setting(item, names);
            }
        }
        Setting::Bool(_) | Setting::Int(_) | Setting::Float(_) | Setting::Text(_) => {}
    }
}
