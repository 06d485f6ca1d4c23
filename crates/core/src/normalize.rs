//! Re-centering of a raw position cloud.
//!
//! Scanned coordinates usually contain a few points far away from the tree, so the pivot
//! is computed as a truncated mean rather than a plain average.

use alloc::vec::Vec;

use crate::Position;

/// Percentage of values dropped from each end of a sorted sample.
pub const TRIM_PERCENT: usize = 5;

/// Arithmetic mean of the values after dropping `percent` of the smallest and the largest
/// ones.
///
/// If nothing remains after trimming, the untrimmed values are averaged instead. Returns
/// zero for an empty input.
#[must_use]
pub fn truncated_mean(values: &[f64], percent: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    // Number of outliers on each side, rounded up.
    let outliers = (values.len() * percent + 99) / 100;

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let trimmed = if outliers * 2 < sorted.len() {
        &sorted[outliers..sorted.len() - outliers]
    } else {
        &sorted[..]
    };

    trimmed.iter().sum::<f64>() / trimmed.len() as f64
}

/// Returns the horizontal pivot of the positions, the `y` coordinate is always zero.
#[must_use]
pub fn center(positions: &[Position]) -> Position {
    let xs: Vec<f64> = positions.iter().map(|p| p.x).collect();
    let zs: Vec<f64> = positions.iter().map(|p| p.z).collect();
    Position {
        x: truncated_mean(&xs, TRIM_PERCENT),
        y: 0.0,
        z: truncated_mean(&zs, TRIM_PERCENT),
    }
}

/// Re-centers positions around their horizontal pivot.
///
/// The vertical axis is left as is, so the tree stays anchored to its mount point.
#[must_use]
pub fn normalize(positions: &[Position]) -> Vec<Position> {
    let center = center(positions);
    log::trace!("Re-centering {} positions around {:?}", positions.len(), center);

    positions
        .iter()
        .map(|p| Position {
            x: p.x - center.x,
            y: p.y,
            z: p.z - center.z,
        })
        .collect()
}
