use std::path::Path;

use bead_quant::{ConvertOptions, PaletteSource, ParseColorError, Rgb};
use serde::{Deserialize, Serialize};

/// Application configuration loaded from a YAML file
///
/// ```yaml
/// conversion:
///   width: 48
///   height: 48
///   palette: mard
///   dither: true
/// editor:
///   history_limit: 50
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub conversion: ConversionConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub preview: PreviewConfig,
}

/// How images are resized and matched
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Target grid width in beads
    #[serde(default = "default_grid_size")]
    pub width: u32,

    /// Target grid height in beads
    #[serde(default = "default_grid_size")]
    pub height: u32,

    /// Preset id or inline color list
    #[serde(default)]
    pub palette: PaletteSource,

    /// Fit inside width x height instead of stretching
    #[serde(default = "default_true")]
    pub maintain_aspect_ratio: bool,

    /// Hex color that transparent pixels are blended onto
    #[serde(default = "default_background")]
    pub background_color: String,

    #[serde(default)]
    pub dither: bool,

    #[serde(default = "default_factor")]
    pub brightness: f64,

    #[serde(default = "default_factor")]
    pub contrast: f64,

    /// Match in Lab space; `false` uses weighted RGB distance
    #[serde(default = "default_true")]
    pub use_lab: bool,
}

fn default_grid_size() -> u32 {
    32
}

fn default_true() -> bool {
    true
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_factor() -> f64 {
    1.0
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            width: default_grid_size(),
            height: default_grid_size(),
            palette: PaletteSource::default(),
            maintain_aspect_ratio: true,
            background_color: default_background(),
            dither: false,
            brightness: default_factor(),
            contrast: default_factor(),
            use_lab: true,
        }
    }
}

impl ConversionConfig {
    /// Converter options; fails if `background_color` is not a hex color.
    pub fn convert_options(&self) -> Result<ConvertOptions, ParseColorError> {
        let background: Rgb = self.background_color.parse()?;
        Ok(ConvertOptions::new()
            .dither(self.dither)
            .brightness(self.brightness)
            .contrast(self.contrast)
            .background(background)
            .use_lab(self.use_lab))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Maximum undo entries kept per history stack
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_history_limit() -> usize {
    100
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Edge length of one bead in preview pixels
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,
}

fn default_pixel_size() -> u32 {
    10
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            pixel_size: default_pixel_size(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from a file, falling back to defaults on failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        width = config.conversion.width,
                        height = config.conversion.height,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }
}
