use image::{DynamicImage, GenericImageView};

use crate::color::Color;

/// Guess the background color from the four corners by majority vote.
///
/// Corners are read top-left, top-right, bottom-left, bottom-right; on a tie
/// the earliest corner wins. Coinciding corners (1×1, 1×n images) still count
/// as separate votes. The image must not be empty.
pub fn detect_background(image: &DynamicImage) -> Color {
    let (w, h) = image.dimensions();
    let (right, bottom) = (w.saturating_sub(1), h.saturating_sub(1));
    let corners: [Color; 4] = [(0, 0), (right, 0), (0, bottom), (right, bottom)]
        .map(|(x, y)| Color::from(image.get_pixel(x, y)));

    let mut best = corners[0];
    let mut best_votes = 0;
    for candidate in corners {
        let votes = corners.iter().filter(|&&c| c == candidate).count();
        if votes > best_votes {
            best = candidate;
            best_votes = votes;
        }
    }

    log::debug!("Detected background color: {best}");
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn corners(tl: [u8; 4], tr: [u8; 4], bl: [u8; 4], br: [u8; 4]) -> DynamicImage {
        let mut img = RgbaImage::from_pixel(4, 3, Rgba([9, 9, 9, 255]));
        img.put_pixel(0, 0, Rgba(tl));
        img.put_pixel(3, 0, Rgba(tr));
        img.put_pixel(0, 2, Rgba(bl));
        img.put_pixel(3, 2, Rgba(br));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn uniform_image_any_size() {
        for (w, h) in [(1, 1), (1, 7), (7, 1), (64, 33)] {
            let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, Rgba([12, 200, 7, 255])));
            assert_eq!(detect_background(&img), Color::new(12, 200, 7));
        }
    }

    #[test]
    fn majority_wins() {
        let img = corners([1, 1, 1, 255], [2, 2, 2, 255], [2, 2, 2, 255], [3, 3, 3, 255]);
        assert_eq!(detect_background(&img), Color::new(2, 2, 2));
    }

    #[test]
    fn tie_keeps_first_corner() {
        let img = corners([5, 0, 0, 255], [0, 5, 0, 255], [0, 5, 0, 255], [5, 0, 0, 255]);
        assert_eq!(detect_background(&img), Color::new(5, 0, 0));

        let img = corners([1, 1, 1, 255], [2, 2, 2, 255], [3, 3, 3, 255], [4, 4, 4, 255]);
        assert_eq!(detect_background(&img), Color::new(1, 1, 1));
    }

    #[test]
    fn alpha_does_not_split_votes() {
        let img = corners([7, 7, 7, 0], [7, 7, 7, 255], [1, 2, 3, 255], [4, 5, 6, 255]);
        assert_eq!(detect_background(&img), Color::new(7, 7, 7));
    }

    #[test]
    fn opaque_rgb_source() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(3, 3, image::Rgb([255, 255, 255])));
        assert_eq!(detect_background(&img), Color::WHITE);
    }
}
