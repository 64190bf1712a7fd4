//! Test fixtures and constants.

use std::path::{Path, PathBuf};

use paint_quantize::Rgb;
use redrawer::models::{AppConfig, RunSettings};
use redrawer::rendering::png_io;

/// Base palette colors used by the fixtures
pub mod colors {
    use paint_quantize::Rgb;

    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(237, 28, 36);
    pub const GREEN: Rgb = Rgb::new(34, 177, 76);
    pub const INDIGO: Rgb = Rgb::new(63, 72, 204);

    /// Far from every base color under the default metric
    pub const TEAL_ACCENT: Rgb = Rgb::new(0, 90, 90);
}

/// Write `pixels` (row-major) as an RGB PNG under `dir`.
pub fn write_png(dir: &Path, name: &str, width: usize, height: usize, pixels: &[Rgb]) -> PathBuf {
    assert_eq!(pixels.len(), width * height, "fixture pixel count");
    let rgb: Vec<u8> = pixels.iter().flat_map(|p| p.to_bytes()).collect();
    let path = dir.join(name);
    png_io::write_rgb_png(&path, width as u32, height as u32, &rgb).unwrap();
    path
}

/// Default settings with the store redirected into `dir`.
pub fn settings_in(dir: &Path) -> RunSettings {
    let mut settings = AppConfig::default().resolve().unwrap();
    settings.store_path = dir.join("temp").join("instructions.json");
    settings
}

/// The canonical 2x2 image: [[red, red], [indigo, green]].
pub fn two_by_two() -> Vec<Rgb> {
    vec![colors::RED, colors::RED, colors::INDIGO, colors::GREEN]
}

/// A 12x6 image: white background, a black stripe, a teal block.
pub fn banner() -> (usize, usize, Vec<Rgb>) {
    let (width, height) = (12, 6);
    let mut pixels = vec![colors::WHITE; width * height];
    for x in 0..width {
        pixels[2 * width + x] = colors::BLACK;
    }
    for y in 3..5 {
        for x in 4..8 {
            pixels[y * width + x] = colors::TEAL_ACCENT;
        }
    }
    (width, height, pixels)
}
