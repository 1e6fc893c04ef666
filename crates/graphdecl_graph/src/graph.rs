//! The dependency graph over discovered resources.
//!
//! Edges point from a dependent to the resource it depends on. Dependency
//! names that match no discovered resource are dropped at construction, so
//! the heuristic over-approximation in the scanner never reaches the sort.

use std::collections::{BTreeSet, HashMap};

use graphdecl_foundation::{DiscoveredResource, Error, ResourceKind};
use thiserror::Error;
use tracing::debug;

/// A dependency cycle prevented a full ordering.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("dependency cycle detected among: {}", .remaining.join(", "))]
pub struct CycleError {
    /// Names of the resources left unsorted, in name order.
    pub remaining: Vec<String>,
}

impl From<CycleError> for Error {
    fn from(err: CycleError) -> Self {
        Error::cycle(err.remaining)
    }
}

/// Immutable dependency graph built from one scan.
#[derive(Clone, Debug)]
pub struct DependencyGraph<'a> {
    resources: Vec<&'a DiscoveredResource>,
    /// `dependencies[i]` holds the indices resource `i` depends on.
    dependencies: Vec<Vec<usize>>,
    /// `dependents[i]` holds the indices that depend on resource `i`.
    dependents: Vec<Vec<usize>>,
    by_name: HashMap<&'a str, Vec<usize>>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the graph. Nodes keep input order.
    #[must_use]
    pub fn build(resources: &'a [DiscoveredResource]) -> Self {
        let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, resource) in resources.iter().enumerate() {
            by_name.entry(resource.name.as_str()).or_default().push(idx);
        }

        let mut dependencies = vec![Vec::new(); resources.len()];
        let mut dependents = vec![Vec::new(); resources.len()];
        for (idx, resource) in resources.iter().enumerate() {
            for dep in &resource.dependencies {
                let Some(targets) = by_name.get(dep.as_str()) else {
                    debug!(resource = %resource.name, dependency = %dep, "dropping dangling dependency");
                    continue;
                };
                for &target in targets {
                    if target == idx || dependencies[idx].contains(&target) {
                        continue;
                    }
                    dependencies[idx].push(target);
                    dependents[target].push(idx);
                }
            }
        }

        Self {
            resources: resources.iter().collect(),
            dependencies,
            dependents,
            by_name,
        }
    }

    /// Returns the number of resources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if the graph has no resources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Returns the first resource with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a DiscoveredResource> {
        self.by_name
            .get(name)
            .and_then(|indices| indices.first())
            .map(|&idx| self.resources[idx])
    }

    /// Returns all resources in input order.
    #[must_use]
    pub fn resources(&self) -> &[&'a DiscoveredResource] {
        &self.resources
    }

    /// Returns every `(dependent, dependency)` edge by name.
    pub fn edges(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.dependencies.iter().enumerate().flat_map(move |(from, targets)| {
            let dependent: &'a DiscoveredResource = self.resources[from];
            targets.iter().map(move |&to| {
                let dependency: &'a DiscoveredResource = self.resources[to];
                (dependent.name.as_str(), dependency.name.as_str())
            })
        })
    }

    /// Returns the resources that directly depend on `name`, in input order.
    #[must_use]
    pub fn dependents_of(&self, name: &str) -> Vec<&'a DiscoveredResource> {
        let Some(indices) = self.by_name.get(name) else {
            return Vec::new();
        };
        let mut found: BTreeSet<usize> = BTreeSet::new();
        for &idx in indices {
            found.extend(self.dependents[idx].iter().copied());
        }
        found.into_iter().map(|idx| self.resources[idx]).collect()
    }

    /// Orders resources so every dependency precedes its dependents.
    ///
    /// Kahn's algorithm; among ready resources the lexicographically smallest
    /// name goes first, then kind, then input position.
    ///
    /// # Errors
    /// Returns [`CycleError`] naming the unsorted resources if a cycle exists.
    pub fn topological_sort(&self) -> Result<Vec<&'a DiscoveredResource>, CycleError> {
        let mut in_degree: Vec<usize> = self.dependencies.iter().map(Vec::len).collect();
        let mut ready: BTreeSet<(&str, ResourceKind, usize)> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(idx, _)| self.ready_key(idx))
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some((_, _, idx)) = ready.pop_first() {
            order.push(self.resources[idx]);
            for &dependent in &self.dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    ready.insert(self.ready_key(dependent));
                }
            }
        }

        if order.len() == self.len() {
            return Ok(order);
        }

        let mut remaining: Vec<String> = in_degree
            .iter()
            .enumerate()
            .filter(|&(_, &degree)| degree > 0)
            .map(|(idx, _)| self.resources[idx].name.clone())
            .collect();
        remaining.sort();
        remaining.dedup();
        Err(CycleError { remaining })
    }

    /// Returns true if the graph cannot be ordered.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        self.topological_sort().is_err()
    }

    /// Returns every resource name reachable from `name`, excluding `name`.
    ///
    /// Unknown names yield an empty set.
    #[must_use]
    pub fn transitive_dependencies(&self, name: &str) -> BTreeSet<String> {
        let Some(start) = self.by_name.get(name) else {
            return BTreeSet::new();
        };

        let mut visited = vec![false; self.len()];
        let mut stack: Vec<usize> = start.clone();
        for &idx in start {
            visited[idx] = true;
        }

        let mut out = BTreeSet::new();
        while let Some(idx) = stack.pop() {
            for &dep in &self.dependencies[idx] {
                if !visited[dep] {
                    visited[dep] = true;
                    out.insert(self.resources[dep].name.clone());
                    stack.push(dep);
                }
            }
        }
        out.remove(name);
        out
    }

    fn ready_key(&self, idx: usize) -> (&'a str, ResourceKind, usize) {
        let resource = self.resources[idx];
        (resource.name.as_str(), resource.kind, idx)
    }
}
