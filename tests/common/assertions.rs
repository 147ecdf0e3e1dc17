//! Assertion helpers for tests.

use beadsmith::models::{ConversionResult, Grid};
use pretty_assertions::assert_eq;

/// Assert every grid row reads as the given color names (`""` for empty)
pub fn assert_grid_names(grid: &Grid, expected: &[&[&str]]) {
    let actual: Vec<Vec<String>> = (0..grid.height())
        .map(|y| {
            (0..grid.width())
                .map(|x| {
                    grid.color_at(x, y)
                        .map(|c| c.name.clone())
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    let expected: Vec<Vec<String>> = expected
        .iter()
        .map(|row| row.iter().map(|s| s.to_string()).collect())
        .collect();
    assert_eq!(actual, expected, "Grid contents differ");
}

/// Assert the stats of a result match a fresh count of its grid
pub fn assert_stats_consistent(result: &ConversionResult) {
    assert_eq!(
        result.color_stats(),
        &result.grid().color_counts(),
        "Stats out of sync with grid"
    );
    assert_eq!(
        result.color_stats().values().sum::<usize>(),
        result.total_beads(),
        "Stats do not sum to bead count"
    );
    assert_eq!(
        result.colors_used().len(),
        result.color_stats().len(),
        "colors_used length differs from stats"
    );
}

/// Assert bytes start with the PNG signature
pub fn assert_png_bytes(bytes: &[u8]) {
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}
