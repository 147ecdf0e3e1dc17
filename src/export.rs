//! Pattern, CSV and JSON export of a conversion result

use std::collections::BTreeMap;
use std::fmt::Write as _;

use bead_quant::{BeadColor, Palette, PaletteSnapshot};
use serde::Serialize;

use crate::error::ExportError;
use crate::models::{AppConfig, ConversionResult};

/// Header row of [`export_csv`]
pub const CSV_HEADER: &str = "Color Name,Hex,RGB,Brand,Count,Percentage";

/// Printable bead pattern: a row-major matrix of color names plus legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternExport {
    /// `pattern[y][x]` is the color name at that cell, `""` when empty
    pub pattern: Vec<Vec<String>>,
    pub legend: BTreeMap<String, BeadColor>,
    pub statistics: PatternStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternStatistics {
    pub total_beads: usize,
    pub unique_colors: usize,
    pub color_usage: BTreeMap<String, usize>,
}

/// Per-color share of a pattern
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorUsage {
    pub color: BeadColor,
    pub count: usize,
    /// Share of all beads, 0-100
    pub percentage: f64,
}

/// Bead shopping list, most used color first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeadUsageEstimate {
    pub total_beads: usize,
    pub color_breakdown: Vec<ColorUsage>,
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    metadata: JsonMetadata<'a>,
    result: &'a ConversionResult,
    pattern: PatternExport,
}

#[derive(Debug, Serialize)]
struct JsonMetadata<'a> {
    timestamp: chrono::DateTime<chrono::Utc>,
    config: &'a AppConfig,
    palette: PaletteSnapshot,
}

pub fn export_pattern(result: &ConversionResult) -> PatternExport {
    let width = result.width() as usize;
    let height = result.height() as usize;
    let mut pattern = vec![vec![String::new(); width]; height];
    let mut legend = BTreeMap::new();

    for cell in result.grid().cells() {
        pattern[cell.y as usize][cell.x as usize] = cell.color.name.clone();
        legend
            .entry(cell.color.name.clone())
            .or_insert_with(|| cell.color.clone());
    }

    PatternExport {
        pattern,
        legend,
        statistics: PatternStatistics {
            total_beads: result.total_beads(),
            unique_colors: result.color_stats().len(),
            color_usage: result.color_stats().clone(),
        },
    }
}

/// Color statistics as CSV, one row per used color in first-seen order.
pub fn export_csv(result: &ConversionResult) -> String {
    let total = result.total_beads();
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for color in result.colors_used() {
        let count = result.color_stats().get(&color.name).copied().unwrap_or(0);
        let _ = writeln!(
            csv,
            "{},{},\"{},{},{}\",{},{},{:.2}%",
            color.name,
            color.hex,
            color.rgb.r,
            color.rgb.g,
            color.rgb.b,
            color.brand,
            count,
            percentage(count, total)
        );
    }

    csv
}

/// Pretty-printed JSON with metadata, the full result and its pattern.
pub fn export_json(
    result: &ConversionResult,
    config: &AppConfig,
    palette: &Palette,
) -> Result<String, ExportError> {
    let export = JsonExport {
        metadata: JsonMetadata {
            timestamp: chrono::Utc::now(),
            config,
            palette: palette.to_snapshot(),
        },
        result,
        pattern: export_pattern(result),
    };
    let json = serde_json::to_string_pretty(&export)?;
    tracing::debug!(bytes = json.len(), "Exported JSON");
    Ok(json)
}

/// Per-color counts sorted by count, descending; ties keep first-seen order.
pub fn estimate_bead_usage(result: &ConversionResult) -> BeadUsageEstimate {
    let total_beads = result.total_beads();
    let mut color_breakdown: Vec<ColorUsage> = result
        .colors_used()
        .iter()
        .map(|color| {
            let count = result.color_stats().get(&color.name).copied().unwrap_or(0);
            ColorUsage {
                color: color.clone(),
                count,
                percentage: percentage(count, total_beads),
            }
        })
        .collect();
    color_breakdown.sort_by(|a, b| b.count.cmp(&a.count));

    BeadUsageEstimate {
        total_beads,
        color_breakdown,
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BeadCell, Grid};
    use bead_quant::Rgb;
    use pretty_assertions::assert_eq;

    fn color(name: &str, rgb: Rgb) -> BeadColor {
        BeadColor::new(name, rgb, "test")
    }

    /// 3x2: RED RED BLUE / RED _ _
    fn sample() -> ConversionResult {
        let red = color("RED", Rgb::new(255, 0, 0));
        let blue = color("BLUE", Rgb::new(0, 0, 255));
        let cells = vec![
            BeadCell::new(0, 0, red.clone()),
            BeadCell::new(1, 0, red.clone()),
            BeadCell::new(2, 0, blue.clone()),
            BeadCell::new(0, 1, red.clone()),
        ];
        let grid = Grid::from_cells(3, 2, cells).unwrap();
        let palette = Palette::new(vec![red, blue]).unwrap();
        ConversionResult::new(grid, palette.to_snapshot())
    }

    #[test]
    fn test_export_pattern() {
        let export = export_pattern(&sample());
        assert_eq!(
            export.pattern,
            vec![
                vec!["RED".to_string(), "RED".to_string(), "BLUE".to_string()],
                vec!["RED".to_string(), String::new(), String::new()],
            ]
        );
        assert_eq!(export.legend.len(), 2);
        assert_eq!(export.legend["BLUE"].hex, "#0000FF");
        assert_eq!(export.statistics.total_beads, 4);
        assert_eq!(export.statistics.unique_colors, 2);
        assert_eq!(export.statistics.color_usage["RED"], 3);
    }

    #[test]
    fn test_export_csv() {
        let csv = export_csv(&sample());
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Color Name,Hex,RGB,Brand,Count,Percentage",
                "RED,#FF0000,\"255,0,0\",test,3,75.00%",
                "BLUE,#0000FF,\"0,0,255\",test,1,25.00%",
            ]
        );
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_export_csv_empty_grid() {
        let palette = Palette::new(vec![color("RED", Rgb::new(255, 0, 0))]).unwrap();
        let result = ConversionResult::new(Grid::new(2, 2), palette.to_snapshot());
        assert_eq!(export_csv(&result), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_export_json_structure() {
        let result = sample();
        let palette = Palette::new(result.colors_used().to_vec()).unwrap();
        let json = export_json(&result, &AppConfig::default(), &palette).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["metadata"]["timestamp"].is_string());
        assert_eq!(value["metadata"]["config"]["conversion"]["width"], 32);
        assert_eq!(value["metadata"]["palette"]["color_count"], 2);
        assert_eq!(value["result"]["color_stats"]["RED"], 3);
        assert_eq!(value["pattern"]["pattern"][0][2], "BLUE");
    }

    #[test]
    fn test_estimate_bead_usage_sorted() {
        let estimate = estimate_bead_usage(&sample());
        assert_eq!(estimate.total_beads, 4);
        let names: Vec<&str> = estimate
            .color_breakdown
            .iter()
            .map(|u| u.color.name.as_str())
            .collect();
        assert_eq!(names, vec!["RED", "BLUE"]);
        assert!((estimate.color_breakdown[0].percentage - 75.0).abs() < 1e-9);
    }
}
