//! Test fixtures and constants.

use bead_quant::{BeadColor, Palette, PixelBuffer, Rgb, Rgba};

/// Colors of the five-color test palette
pub mod colors {
    use bead_quant::Rgb;

    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);
    pub const BLUE: Rgb = Rgb::new(0, 0, 255);
}

/// WHITE, BLACK, RED, GREEN (brand "test") and BLUE (brand "other")
pub fn test_palette() -> Palette {
    Palette::new(vec![
        BeadColor::new("WHITE", colors::WHITE, "test"),
        BeadColor::new("BLACK", colors::BLACK, "test"),
        BeadColor::new("RED", colors::RED, "test"),
        BeadColor::new("GREEN", colors::GREEN, "test"),
        BeadColor::new("BLUE", colors::BLUE, "other"),
    ])
    .expect("test palette is non-empty")
}

/// A named color from [`test_palette`]
pub fn bead(name: &str) -> BeadColor {
    test_palette()
        .find_by_name(name)
        .cloned()
        .unwrap_or_else(|| panic!("no test color named {name}"))
}

/// A custom bead color outside the test palette
pub fn custom(r: u8, g: u8, b: u8) -> BeadColor {
    BeadColor::from_rgb(Rgb::new(r, g, b))
}

/// Solid `width x height` image
pub fn solid(width: u32, height: u32, rgba: Rgba) -> PixelBuffer {
    PixelBuffer::filled(width, height, rgba).expect("valid dimensions")
}

/// Image from rows of opaque colors
pub fn from_rows(rows: &[&[Rgb]]) -> PixelBuffer {
    let height = rows.len() as u32;
    let width = rows.first().map_or(0, |row| row.len()) as u32;
    let data = rows
        .iter()
        .flat_map(|row| row.iter())
        .flat_map(|c| [c.r, c.g, c.b, 255])
        .collect();
    PixelBuffer::new(data, width, height).expect("rectangular rows")
}
