use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::color::{distance_squared, Color};

/// Inclusive pixel bounds of the set cells of a [`Mask`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }
}

/// Which pixels of a scanned image matched the subject color.
#[derive(Clone, Debug)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.bits[y as usize * self.width as usize + x as usize]
    }

    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Smallest rectangle enclosing every set cell, `None` when nothing is set.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for y in 0..self.height {
            let start = y as usize * self.width as usize;
            let row = &self.bits[start..start + self.width as usize];
            let Some(first) = row.iter().position(|&b| b) else {
                continue;
            };
            // a row with a first set cell also has a last one
            let last = row.iter().rposition(|&b| b).unwrap_or(first);
            let (first, last) = (first as u32, last as u32);

            bbox = Some(match bbox {
                None => BoundingBox { min_x: first, min_y: y, max_x: last, max_y: y },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(first),
                    min_y: b.min_y,
                    max_x: b.max_x.max(last),
                    max_y: y,
                },
            });
        }
        bbox
    }
}

/// Mark every pixel whose RGB distance to `subject` is at most `tolerance`.
/// Tolerance 0 means exact match; alpha is ignored.
pub fn subject_mask(image: &RgbaImage, subject: Color, tolerance: u32) -> Mask {
    let limit = (tolerance as u64) * (tolerance as u64);
    let bits = image
        .pixels()
        .map(|px| (distance_squared(Color::from(*px), subject) as u64) <= limit)
        .collect();
    Mask {
        width: image.width(),
        height: image.height(),
        bits,
    }
}

/// Crop `image` to the bounding box of the pixels matching `subject`.
///
/// The result is always RGBA (opaque sources get alpha 255). When nothing
/// matches, `image` is handed back untouched; callers that want to warn
/// about it compare dimensions.
pub fn crop_to_subject(image: DynamicImage, subject: Color, tolerance: u32) -> DynamicImage {
    log::info!("Scanning for subject color similar to {subject} with tolerance {tolerance}.");

    let rgba = image.to_rgba8();
    let mask = subject_mask(&rgba, subject, tolerance);

    match mask.bounding_box() {
        Some(bbox) => {
            log::info!(
                "Subject found ({} pixels). Cropping to bounding box: ({}, {}, {}, {})",
                mask.count(),
                bbox.min_x,
                bbox.min_y,
                bbox.max_x + 1,
                bbox.max_y + 1
            );
            let cropped = image::imageops::crop_imm(&rgba, bbox.min_x, bbox.min_y, bbox.width(), bbox.height());
            DynamicImage::ImageRgba8(cropped.to_image())
        }
        None => {
            log::warn!("Could not find any pixels matching the subject color. No crop applied.");
            image
        }
    }
}

/// Whether a crop actually changed anything.
pub fn was_cropped(before: &DynamicImage, after: &DynamicImage) -> bool {
    before.dimensions() != after.dimensions()
}
