use std::collections::{BTreeMap, BTreeSet};

use crate::error::GeometryError;

/// Batch topological sort.
///
/// `deps` maps every item to the items that must come before it. Items that
/// only appear as dependencies are treated as having none. Each batch holds
/// the items whose dependencies have all been emitted, in ascending order.
pub fn topological_sort(
    deps: &BTreeMap<usize, BTreeSet<usize>>,
) -> Result<Vec<Vec<usize>>, GeometryError> {
    let mut remaining = deps.clone();
    for &dep in deps.values().flatten() {
        remaining.entry(dep).or_default();
    }

    let mut batches = Vec::new();
    while !remaining.is_empty() {
        let ready: Vec<usize> = remaining
            .iter()
            .filter(|(_, before)| before.is_empty())
            .map(|(&item, _)| item)
            .collect();
        if ready.is_empty() {
            return Err(GeometryError::CyclicDependency {
                remaining: remaining.keys().copied().collect(),
            });
        }
        for item in &ready {
            remaining.remove(item);
        }
        for before in remaining.values_mut() {
            for item in &ready {
                before.remove(item);
            }
        }
        batches.push(ready);
    }
    Ok(batches)
}
