//! Built-in bead palettes.
//!
//! Preset data lives in `palettes/*.yaml` and is embedded at compile time.
//! Lookup is a pure factory keyed by [`PresetPalette`]; nothing is cached
//! in global state.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::bead_color::BeadColor;
use super::error::PaletteError;

const MARD_YAML: &str = include_str!("../../palettes/mard.yaml");
const COCO_YAML: &str = include_str!("../../palettes/coco.yaml");

/// Identifier of a built-in palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetPalette {
    Mard,
    Coco,
}

#[derive(Debug, Deserialize)]
struct PresetFile {
    brand: String,
    colors: Vec<PresetEntry>,
}

#[derive(Debug, Deserialize)]
struct PresetEntry {
    name: String,
    hex: String,
}

impl PresetPalette {
    /// All presets, in display order.
    pub const ALL: [PresetPalette; 2] = [PresetPalette::Mard, PresetPalette::Coco];

    /// The identifier accepted by [`FromStr`] and configuration files.
    pub fn id(self) -> &'static str {
        match self {
            PresetPalette::Mard => "mard",
            PresetPalette::Coco => "coco",
        }
    }

    fn source(self) -> &'static str {
        match self {
            PresetPalette::Mard => MARD_YAML,
            PresetPalette::Coco => COCO_YAML,
        }
    }

    /// Parse the embedded preset data into bead colors.
    pub fn colors(self) -> Result<Vec<BeadColor>, PaletteError> {
        let malformed = |reason: String| PaletteError::MalformedPreset {
            preset: self.id(),
            reason,
        };

        let file: PresetFile =
            serde_yaml::from_str(self.source()).map_err(|e| malformed(e.to_string()))?;

        file.colors
            .into_iter()
            .map(|entry| {
                BeadColor::from_hex(entry.name, &entry.hex, file.brand.as_str())
                    .map_err(|e| malformed(e.to_string()))
            })
            .collect()
    }
}

impl fmt::Display for PresetPalette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PresetPalette {
    type Err = PaletteError;

    /// Parse a preset identifier (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mard" => Ok(PresetPalette::Mard),
            "coco" => Ok(PresetPalette::Coco),
            _ => Err(PaletteError::UnknownPalette(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_presets_parse() {
        for preset in PresetPalette::ALL {
            let colors = preset.colors().unwrap();
            assert!(!colors.is_empty(), "{preset} should not be empty");

            let names: HashSet<_> = colors.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names.len(), colors.len(), "{preset} has duplicate names");
        }
    }

    #[test]
    fn test_presets_carry_brand() {
        let mard = PresetPalette::Mard.colors().unwrap();
        assert!(mard.iter().all(|c| c.brand == "MARD"));
        let coco = PresetPalette::Coco.colors().unwrap();
        assert!(coco.iter().all(|c| c.brand == "COCO"));
    }

    #[test]
    fn test_presets_contain_black_and_white() {
        for preset in PresetPalette::ALL {
            let colors = preset.colors().unwrap();
            assert!(colors.iter().any(|c| c.hex == "#FFFFFF"), "{preset} lacks white");
            assert!(colors.iter().any(|c| c.hex == "#000000"), "{preset} lacks black");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("mard".parse::<PresetPalette>().unwrap(), PresetPalette::Mard);
        assert_eq!(" COCO ".parse::<PresetPalette>().unwrap(), PresetPalette::Coco);
        assert_eq!(
            "perler".parse::<PresetPalette>(),
            Err(PaletteError::UnknownPalette("perler".to_string()))
        );
    }
}
