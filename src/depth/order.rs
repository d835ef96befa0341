//! Pairwise horizontal ordering of rectangles, segments and contours.
//!
//! A verdict of `Less` means the first operand lies entirely left of the
//! second where the two share vertical extent; `Equal` means no constraint.

use std::cmp::Ordering;

use kurbo::Rect;

use crate::contour::Contour;
use crate::geom::{rects_overlap, rects_overlap_vertically};
use crate::segment::Segment;

/// Decisive only when the rects share vertical extent and are horizontally
/// separated (touching counts as separated).
pub fn horizontal_order_rect(a: &Rect, b: &Rect) -> Ordering {
    if rects_overlap_vertically(a, b) {
        if a.x1 <= b.x0 {
            return Ordering::Less;
        } else if a.x0 >= b.x1 {
            return Ordering::Greater;
        }
    }
    Ordering::Equal
}

/// Order two segments, bisecting both while their control boxes overlap.
///
/// `max_level` bounds how many times the overlapping halves are bisected
/// again after the first split.
pub fn horizontal_order_segment(a: &Segment, b: &Segment, max_level: usize) -> Ordering {
    let bounds_a = a.bounding_box();
    let bounds_b = b.bounding_box();
    let verdict = horizontal_order_rect(&bounds_a, &bounds_b);
    if verdict.is_ne() || !rects_overlap(&bounds_a, &bounds_b) {
        return verdict;
    }

    let (a0, a1) = a.split_at_t(0.5);
    let (b0, b1) = b.split_at_t(0.5);
    let mut overlaps = Vec::new();
    for half_a in [a0, a1] {
        for half_b in [b0, b1] {
            let bounds_a = half_a.bounding_box();
            let bounds_b = half_b.bounding_box();
            let verdict = horizontal_order_rect(&bounds_a, &bounds_b);
            if verdict.is_ne() {
                return verdict;
            }
            if rects_overlap(&bounds_a, &bounds_b) {
                overlaps.push((half_a, half_b));
            }
        }
    }

    if max_level == 0 {
        return Ordering::Equal;
    }
    overlaps
        .iter()
        .map(|(half_a, half_b)| horizontal_order_segment(half_a, half_b, max_level - 1))
        .find(|verdict| verdict.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Order two contours by their boxes, falling back to the first decisive
/// segment pair when the boxes overlap. Empty contours impose no order.
pub fn horizontal_order_contour(a: &Contour, b: &Contour, max_level: usize) -> Ordering {
    let (bounds_a, bounds_b) = match (a.bounding_box(), b.bounding_box()) {
        (Some(bounds_a), Some(bounds_b)) => (bounds_a, bounds_b),
        _ => return Ordering::Equal,
    };
    let verdict = horizontal_order_rect(&bounds_a, &bounds_b);
    if verdict.is_ne() || !rects_overlap(&bounds_a, &bounds_b) {
        return verdict;
    }
    for seg_a in a.segments() {
        for seg_b in b.segments() {
            let verdict = horizontal_order_segment(seg_a, seg_b, max_level);
            if verdict.is_ne() {
                return verdict;
            }
        }
    }
    Ordering::Equal
}
