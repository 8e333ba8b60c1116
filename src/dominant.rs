use std::collections::HashMap;

use image::{DynamicImage, GenericImageView};

use crate::background::detect_background;
use crate::color::{distance, Color};
use crate::config::AnalysisConfig;
use crate::error::{IconError, Result};

/// Occurrence counts per color, iterable in first-seen order so that score
/// ties resolve the same way on every run.
#[derive(Debug, Default)]
struct ColorCounts {
    index: HashMap<Color, usize>,
    entries: Vec<(Color, u32)>,
}

impl ColorCounts {
    fn add(&mut self, color: Color) {
        match self.index.get(&color) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(color, self.entries.len());
                self.entries.push((color, 1));
            }
        }
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn iter(&self) -> impl Iterator<Item = (Color, u32)> + '_ {
        self.entries.iter().copied()
    }
}

/// Find the most dominant *and* vibrant foreground color of `image`,
/// using the default thresholds.
pub fn estimate_dominant_color(image: &DynamicImage) -> Result<Color> {
    estimate_dominant_color_with(image, &AnalysisConfig::default())
}

/// Find the most dominant and vibrant foreground color of `image`.
///
/// Steps performed:
/// 1. Detect the background from the corners of the full-size image.
/// 2. Shrink a working copy so neither side exceeds `thumbnail_max`.
/// 3. Count every pixel that is opaque enough and not background-like.
/// 4. Drop candidates that are too dark, too light or too grey (HSL).
/// 5. Score the rest as `count * saturation²` and keep the best.
///
/// Plain frequency would pick large flat areas next to the background;
/// weighting by saturation² favors the colorful subject even when it covers
/// fewer pixels.
pub fn estimate_dominant_color_with(image: &DynamicImage, config: &AnalysisConfig) -> Result<Color> {
    log::info!("Analyzing image for dominant color...");

    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        log::error!("Cannot analyze an empty {w}x{h} image.");
        return Err(IconError::NoColorCandidates);
    }

    let background = detect_background(image);
    log::info!("Detected background color: {background}");

    let working = thumbnail(image, config.thumbnail_max);
    let counts = count_foreground_colors(&working, background, config);
    if counts.is_empty() {
        log::error!("Could not find any dominant color candidates.");
        return Err(IconError::NoColorCandidates);
    }
    log::debug!("{} distinct candidate colors", counts.entries.len());

    let mut best: Option<Color> = None;
    let mut best_score = f64::NEG_INFINITY;

    for (color, count) in counts.iter() {
        let hsl = color.to_hsl();
        if !config.is_vibrant(hsl.lightness, hsl.saturation) {
            continue;
        }

        let score = count as f64 * hsl.saturation * hsl.saturation;
        if score > best_score {
            best_score = score;
            best = Some(color);
        }
    }

    match best {
        Some(color) => {
            log::info!("Dominant color found: {color} ({})", color.to_hex());
            Ok(color)
        }
        None => {
            log::error!("Could not find any vibrant color candidates.");
            Err(IconError::NoVibrantCandidates)
        }
    }
}

/// Downscale so neither side exceeds `max_side`, keeping the aspect ratio.
/// Never upscales.
fn thumbnail(image: &DynamicImage, max_side: u32) -> DynamicImage {
    let (w, h) = image.dimensions();
    if w <= max_side && h <= max_side {
        return image.clone();
    }
    image.thumbnail(max_side, max_side)
}

fn count_foreground_colors(image: &DynamicImage, background: Color, config: &AnalysisConfig) -> ColorCounts {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    let mut counts = ColorCounts::default();

    // Column-major scan; the order only matters for breaking score ties.
    for x in 0..w {
        for y in 0..h {
            let px = rgba.get_pixel(x, y);
            if px[3] < config.alpha_threshold {
                continue;
            }
            let color = Color::from(*px);
            if distance(color, background) < config.background_distance {
                continue;
            }
            counts.add(color);
        }
    }

    counts
}
