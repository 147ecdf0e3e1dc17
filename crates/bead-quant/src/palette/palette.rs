//! Ordered, name-keyed registry of bead colors.

use serde::{Deserialize, Serialize};

use super::bead_color::BeadColor;
use super::error::PaletteError;
use super::presets::PresetPalette;

/// Where a palette came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteKind {
    Mard,
    Coco,
    Custom,
}

impl From<PresetPalette> for PaletteKind {
    fn from(preset: PresetPalette) -> Self {
        match preset {
            PresetPalette::Mard => PaletteKind::Mard,
            PresetPalette::Coco => PaletteKind::Coco,
        }
    }
}

/// Palette selection as written in configuration: either a preset id or an
/// inline list of colors.
///
/// ```yaml
/// palette: mard
/// # or
/// palette:
///   - { name: RED, hex: "#FF0000", rgb: { r: 255, g: 0, b: 0 }, brand: test }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSource {
    Preset(String),
    Custom(Vec<BeadColor>),
}

impl Default for PaletteSource {
    fn default() -> Self {
        PaletteSource::Preset(PresetPalette::Coco.id().to_string())
    }
}

/// Plain serializable view of a palette for storage layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteSnapshot {
    pub palette_type: PaletteKind,
    pub colors: Vec<BeadColor>,
    pub color_count: usize,
}

/// An ordered collection of uniquely named bead colors.
///
/// # Invariants
///
/// - Never empty: construction from an empty list fails with
///   [`PaletteError::EmptyPalette`], and [`remove()`](Self::remove) refuses
///   to drop the last color.
/// - Names are unique. Adding a color whose name already exists replaces
///   the existing entry in place, keeping its position.
///
/// Lookups are linear scans; bead palettes hold tens to low hundreds of
/// colors. `Clone` is a deep copy: colors own their strings, so a cloned
/// palette shares nothing with the original.
///
/// # Example
///
/// ```
/// use bead_quant::{BeadColor, Palette, Rgb};
///
/// let mut palette = Palette::new(vec![
///     BeadColor::new("WHITE", Rgb::WHITE, "test"),
///     BeadColor::new("BLACK", Rgb::BLACK, "test"),
/// ]).unwrap();
///
/// palette.add(BeadColor::new("WHITE", Rgb::new(250, 250, 250), "test"));
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.colors()[0].rgb, Rgb::new(250, 250, 250));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    kind: PaletteKind,
    colors: Vec<BeadColor>,
}

impl Palette {
    /// Create a custom palette from a list of colors.
    ///
    /// Repeated names follow the [`add()`](Self::add) rule: the later entry
    /// replaces the earlier one at the earlier position.
    pub fn new(colors: Vec<BeadColor>) -> Result<Self, PaletteError> {
        Self::with_kind(PaletteKind::Custom, colors)
    }

    /// Load a built-in palette.
    pub fn preset(preset: PresetPalette) -> Result<Self, PaletteError> {
        Self::with_kind(preset.into(), preset.colors()?)
    }

    /// Load a built-in palette by its identifier (`"mard"`, `"coco"`).
    pub fn from_preset_id(id: &str) -> Result<Self, PaletteError> {
        Self::preset(id.parse()?)
    }

    /// Resolve a configuration-level palette selection.
    pub fn from_source(source: &PaletteSource) -> Result<Self, PaletteError> {
        match source {
            PaletteSource::Preset(id) => Self::from_preset_id(id),
            PaletteSource::Custom(colors) => Self::new(colors.clone()),
        }
    }

    /// Rebuild a palette from a stored snapshot. The result is always
    /// [`PaletteKind::Custom`].
    pub fn from_snapshot(snapshot: PaletteSnapshot) -> Result<Self, PaletteError> {
        Self::new(snapshot.colors)
    }

    fn with_kind(kind: PaletteKind, colors: Vec<BeadColor>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        let mut palette = Self {
            kind,
            colors: Vec::with_capacity(colors.len()),
        };
        for color in colors {
            palette.add(color);
        }
        Ok(palette)
    }

    #[inline]
    pub fn kind(&self) -> PaletteKind {
        self.kind
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[BeadColor] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false` for a constructed palette.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<&BeadColor> {
        self.colors.get(idx)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&BeadColor> {
        self.colors.iter().find(|c| c.name == name)
    }

    /// Find a color by hex code. Case-insensitive; the leading `#` is optional.
    pub fn find_by_hex(&self, hex: &str) -> Option<&BeadColor> {
        let wanted = normalize_hex(hex);
        self.colors
            .iter()
            .find(|c| normalize_hex(&c.hex).eq_ignore_ascii_case(wanted))
    }

    /// Insert a color, replacing any existing color with the same name in place.
    pub fn add(&mut self, color: BeadColor) {
        match self.colors.iter().position(|c| c.name == color.name) {
            Some(idx) => self.colors[idx] = color,
            None => self.colors.push(color),
        }
    }

    /// Remove a color by name.
    ///
    /// Returns `false` if no such color exists, or if it is the last color
    /// left (palettes are never empty).
    pub fn remove(&mut self, name: &str) -> bool {
        match self.colors.iter().position(|c| c.name == name) {
            Some(_) if self.colors.len() == 1 => {
                tracing::debug!(name, "Refusing to remove the last palette color");
                false
            }
            Some(idx) => {
                self.colors.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn filter_by_brand(&self, brand: &str) -> Vec<&BeadColor> {
        self.colors.iter().filter(|c| c.brand == brand).collect()
    }

    /// Distinct brands in first-seen order.
    pub fn brands(&self) -> Vec<&str> {
        let mut brands: Vec<&str> = Vec::new();
        for color in &self.colors {
            if !brands.contains(&color.brand.as_str()) {
                brands.push(&color.brand);
            }
        }
        brands
    }

    /// Union of two palettes by name. Neither operand is modified.
    ///
    /// Colors of `self` come first; on a name collision `self`'s color wins.
    /// The result is a [`PaletteKind::Custom`] palette.
    pub fn merge(&self, other: &Palette) -> Result<Palette, PaletteError> {
        let mut merged: Vec<BeadColor> = Vec::with_capacity(self.len() + other.len());
        for color in self.colors.iter().chain(other.colors.iter()) {
            if !merged.iter().any(|c| c.name == color.name) {
                merged.push(color.clone());
            }
        }
        Palette::new(merged)
    }

    pub fn to_snapshot(&self) -> PaletteSnapshot {
        PaletteSnapshot {
            palette_type: self.kind,
            colors: self.colors.clone(),
            color_count: self.colors.len(),
        }
    }
}

fn normalize_hex(hex: &str) -> &str {
    let hex = hex.trim();
    hex.strip_prefix('#').unwrap_or(hex)
}
