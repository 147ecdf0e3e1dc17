//! Nearest-color search over a bead palette.
//!
//! [`ColorMatcher`] caches the Lab value of every palette color once, so
//! per-pixel matching is a linear scan of precomputed distances.

use crate::color::{delta_e, lab_to_approx_rgb, weighted_rgb_distance, Lab, Rgb};
use crate::palette::{BeadColor, Palette, PaletteError};

/// Finds the palette color nearest to a target color.
///
/// Two metrics are supported:
///
/// - **Lab** (default): CIE76 Delta E between precomputed palette Labs and
///   the target converted to Lab.
/// - **Weighted RGB**: Euclidean RGB distance with 0.30/0.59/0.11 channel
///   weights.
///
/// Ties resolve to the color that appears first in the palette, so results
/// are deterministic for a given palette and input.
///
/// # Example
///
/// ```
/// use bead_quant::{BeadColor, ColorMatcher, Palette, Rgb};
///
/// let palette = Palette::new(vec![
///     BeadColor::new("WHITE", Rgb::WHITE, "test"),
///     BeadColor::new("BLACK", Rgb::BLACK, "test"),
/// ]).unwrap();
///
/// let matcher = ColorMatcher::new(&palette, true).unwrap();
/// assert_eq!(matcher.closest(Rgb::new(30, 30, 30)).name, "BLACK");
/// ```
#[derive(Debug, Clone)]
pub struct ColorMatcher {
    colors: Vec<BeadColor>,
    labs: Vec<Lab>,
    use_lab: bool,
}

impl ColorMatcher {
    /// Build a matcher over a snapshot of `palette`'s colors.
    pub fn new(palette: &Palette, use_lab: bool) -> Result<Self, PaletteError> {
        Self::from_colors(palette.colors().to_vec(), use_lab)
    }

    /// Build a matcher over an explicit color list.
    ///
    /// Fails with [`PaletteError::EmptyPalette`] if `colors` is empty.
    pub fn from_colors(colors: Vec<BeadColor>, use_lab: bool) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        let labs = colors.iter().map(|c| Lab::from(c.rgb)).collect();
        Ok(Self {
            colors,
            labs,
            use_lab,
        })
    }

    /// Replace the palette and recompute the cached Lab values.
    ///
    /// On error the matcher keeps its previous palette.
    pub fn update_palette(&mut self, palette: &Palette) -> Result<(), PaletteError> {
        *self = Self::from_colors(palette.colors().to_vec(), self.use_lab)?;
        tracing::debug!(colors = self.colors.len(), "Matcher palette updated");
        Ok(())
    }

    #[inline]
    pub fn uses_lab(&self) -> bool {
        self.use_lab
    }

    /// The palette colors this matcher searches, in palette order.
    #[inline]
    pub fn colors(&self) -> &[BeadColor] {
        &self.colors
    }

    /// Index into [`colors()`](Self::colors) of the nearest color.
    pub fn closest_index(&self, target: Rgb) -> usize {
        if self.use_lab {
            self.closest_lab_index(Lab::from(target))
        } else {
            argmin(
                self.colors
                    .iter()
                    .map(|c| weighted_rgb_distance(target, c.rgb)),
            )
        }
    }

    /// The nearest palette color to `target`.
    pub fn closest(&self, target: Rgb) -> &BeadColor {
        &self.colors[self.closest_index(target)]
    }

    /// The nearest palette color to a color already expressed in Lab.
    ///
    /// In weighted-RGB mode the Lab value is first converted back with
    /// [`lab_to_approx_rgb`], which is lossy.
    pub fn closest_from_lab(&self, target: Lab) -> &BeadColor {
        let idx = if self.use_lab {
            self.closest_lab_index(target)
        } else {
            self.closest_index(lab_to_approx_rgb(target))
        };
        &self.colors[idx]
    }

    /// Match every color in `targets`; identical to calling
    /// [`closest()`](Self::closest) once per element.
    pub fn batch_closest(&self, targets: &[Rgb]) -> Vec<&BeadColor> {
        targets.iter().map(|&t| self.closest(t)).collect()
    }

    /// The `k` nearest colors, nearest first.
    ///
    /// `k` is clamped to the palette size. Equal distances keep palette order.
    pub fn top_k(&self, target: Rgb, k: usize) -> Vec<(&BeadColor, f64)> {
        let target_lab = Lab::from(target);
        let mut ranked: Vec<(&BeadColor, f64)> = self
            .colors
            .iter()
            .zip(&self.labs)
            .map(|(color, lab)| {
                let distance = if self.use_lab {
                    delta_e(target_lab, *lab)
                } else {
                    weighted_rgb_distance(target, color.rgb)
                };
                (color, distance)
            })
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(k.min(self.colors.len()));
        ranked
    }

    fn closest_lab_index(&self, target: Lab) -> usize {
        argmin(self.labs.iter().map(|lab| delta_e(target, *lab)))
    }
}

/// Position of the first minimum. Strict `<` keeps the earliest on ties.
fn argmin(distances: impl Iterator<Item = f64>) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (idx, distance) in distances.enumerate() {
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::PresetPalette;

    fn test_palette() -> Palette {
        Palette::new(vec![
            BeadColor::new("WHITE", Rgb::new(255, 255, 255), "test"),
            BeadColor::new("BLACK", Rgb::new(0, 0, 0), "test"),
            BeadColor::new("RED", Rgb::new(255, 0, 0), "test"),
            BeadColor::new("GREEN", Rgb::new(0, 255, 0), "test"),
            BeadColor::new("BLUE", Rgb::new(0, 0, 255), "other"),
        ])
        .unwrap()
    }

    #[test]
    fn test_members_match_themselves() {
        for use_lab in [true, false] {
            let matcher = ColorMatcher::new(&test_palette(), use_lab).unwrap();
            for color in test_palette().colors() {
                assert_eq!(
                    matcher.closest(color.rgb).name,
                    color.name,
                    "use_lab={use_lab}"
                );
            }
        }
    }

    #[test]
    fn test_preset_members_match_themselves() {
        let palette = Palette::preset(PresetPalette::Mard).unwrap();
        let matcher = ColorMatcher::new(&palette, true).unwrap();
        for color in palette.colors() {
            assert_eq!(matcher.closest(color.rgb).rgb, color.rgb, "{}", color.name);
        }
    }

    #[test]
    fn test_near_colors() {
        let matcher = ColorMatcher::new(&test_palette(), true).unwrap();
        assert_eq!(matcher.closest(Rgb::new(250, 10, 5)).name, "RED");
        assert_eq!(matcher.closest(Rgb::new(20, 20, 20)).name, "BLACK");
        assert_eq!(matcher.closest(Rgb::new(240, 240, 250)).name, "WHITE");
    }

    #[test]
    fn test_ties_prefer_first_color() {
        let matcher = ColorMatcher::from_colors(
            vec![
                BeadColor::new("FIRST", Rgb::new(10, 10, 10), "test"),
                BeadColor::new("SECOND", Rgb::new(10, 10, 10), "test"),
            ],
            true,
        )
        .unwrap();
        assert_eq!(matcher.closest(Rgb::new(10, 10, 10)).name, "FIRST");
    }

    #[test]
    fn test_deterministic() {
        let matcher = ColorMatcher::new(&test_palette(), true).unwrap();
        let target = Rgb::new(120, 60, 200);
        let first = matcher.closest(target).clone();
        for _ in 0..10 {
            assert_eq!(matcher.closest(target), &first);
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let matcher = ColorMatcher::new(&test_palette(), true).unwrap();
        let targets: Vec<Rgb> = (0..=255u8)
            .step_by(15)
            .map(|v| Rgb::new(v, 255 - v, v / 2))
            .collect();

        let batch = matcher.batch_closest(&targets);
        assert_eq!(batch.len(), targets.len());
        for (target, matched) in targets.iter().zip(batch) {
            assert_eq!(matched, matcher.closest(*target));
        }
    }

    #[test]
    fn test_top_k_sorted_and_clamped() {
        let matcher = ColorMatcher::new(&test_palette(), true).unwrap();
        let top = matcher.top_k(Rgb::new(250, 20, 20), 3);
        assert_eq!(top.len(), 3);
        assert_eq!(top[0].0.name, "RED");
        assert!(top.windows(2).all(|w| w[0].1 <= w[1].1));

        assert_eq!(matcher.top_k(Rgb::BLACK, 99).len(), 5);
        assert!(matcher.top_k(Rgb::BLACK, 0).is_empty());
    }

    #[test]
    fn test_empty_colors_rejected() {
        assert_eq!(
            ColorMatcher::from_colors(Vec::new(), true).unwrap_err(),
            PaletteError::EmptyPalette
        );
    }

    #[test]
    fn test_update_palette_recomputes() {
        let mut matcher = ColorMatcher::new(&test_palette(), true).unwrap();
        assert_ne!(matcher.closest(Rgb::new(250, 250, 10)).name, "YELLOW");

        let yellow = Palette::new(vec![
            BeadColor::new("YELLOW", Rgb::new(255, 255, 0), "test"),
            BeadColor::new("BLACK", Rgb::new(0, 0, 0), "test"),
        ])
        .unwrap();
        matcher.update_palette(&yellow).unwrap();

        assert_eq!(matcher.colors().len(), 2);
        assert!(matcher.uses_lab());
        assert_eq!(matcher.closest(Rgb::new(250, 250, 10)).name, "YELLOW");
    }

    #[test]
    fn test_closest_from_lab_both_modes() {
        let target = Lab::from(Rgb::new(0, 0, 250));
        let lab = ColorMatcher::new(&test_palette(), true).unwrap();
        assert_eq!(lab.closest_from_lab(target).name, "BLUE");

        let rgb = ColorMatcher::new(&test_palette(), false).unwrap();
        assert!(!rgb.uses_lab());
        assert_eq!(rgb.closest_from_lab(target).name, "BLUE");
    }
}
