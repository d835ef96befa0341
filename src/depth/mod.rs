//! Paint order for overlapping contours.
//!
//! 1. Transform every contour into the comparison frame
//! 2. Pairwise horizontal verdicts (box test, then bisection)
//! 3. Dependency graph from the decisive verdicts
//! 4. Batch topological sort

pub mod order;
pub mod toposort;

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use kurbo::Affine;
use rayon::prelude::*;

use crate::contour::Contour;
use crate::error::GeometryError;

pub use order::{horizontal_order_contour, horizontal_order_rect, horizontal_order_segment};
pub use toposort::topological_sort;

/// How many times overlapping segment halves are bisected again.
pub const MAX_SUBDIVISION_DEPTH: usize = 4;

/// Paint order of `contours` as a permutation of their indices.
///
/// In the frame given by `transform`, a contour lying left of another is
/// painted first. Pairs without a decisive verdict are unconstrained and keep
/// index order within a batch.
pub fn paint_order(contours: &[Contour], transform: Affine) -> Result<Vec<usize>, GeometryError> {
    paint_order_with_depth(contours, transform, MAX_SUBDIVISION_DEPTH)
}

pub fn paint_order_with_depth(
    contours: &[Contour],
    transform: Affine,
    max_level: usize,
) -> Result<Vec<usize>, GeometryError> {
    let n = contours.len();
    if n == 0 {
        return Ok(vec![]);
    }

    let transformed: Vec<Contour> = contours.iter().map(|c| c.transform(transform)).collect();

    // Each comparison only reads its own pair, so the pairs run in parallel;
    // collect keeps them in pair order.
    let pairs: Vec<(usize, usize)> = (0..n)
        .flat_map(|i| (i + 1..n).map(move |j| (i, j)))
        .collect();
    let verdicts: Vec<(usize, usize, Ordering)> = pairs
        .par_iter()
        .map(|&(i, j)| {
            let verdict = horizontal_order_contour(&transformed[i], &transformed[j], max_level);
            (i, j, verdict)
        })
        .collect();

    let mut deps: BTreeMap<usize, BTreeSet<usize>> = (0..n).map(|i| (i, BTreeSet::new())).collect();
    let mut constraints = 0;
    for (i, j, verdict) in verdicts {
        match verdict {
            Ordering::Less => {
                deps.entry(j).or_default().insert(i);
            }
            Ordering::Greater => {
                deps.entry(i).or_default().insert(j);
            }
            Ordering::Equal => continue,
        }
        constraints += 1;
    }

    let batches = topological_sort(&deps)?;
    log::debug!(
        "paint order: {} contours, {} pairs, {} constraints, {} batches",
        n,
        pairs.len(),
        constraints,
        batches.len()
    );
    let order: Vec<usize> = batches.into_iter().flatten().collect();
    debug_assert_eq!(order.len(), n);
    Ok(order)
}

/// `contours` reordered by [`paint_order`].
pub fn sort_contours(contours: Vec<Contour>, transform: Affine) -> Result<Vec<Contour>, GeometryError> {
    let order = paint_order(&contours, transform)?;
    let mut slots: Vec<Option<Contour>> = contours.into_iter().map(Some).collect();
    Ok(order.into_iter().filter_map(|i| slots[i].take()).collect())
}
