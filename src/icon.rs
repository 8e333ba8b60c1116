use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::FilterType;
use image::{DynamicImage, ExtendedColorType, GenericImageView};

use crate::error::{IconError, Result};

/// Every representation written into an icon, smallest first.
pub const ICON_TARGET_SIZES: [(u32, u32); 7] = [
    (16, 16),
    (24, 24),
    (32, 32),
    (48, 48),
    (64, 64),
    (128, 128),
    (256, 256),
];

/// Largest side an icon directory entry can describe.
const MAX_ICON_SIDE: u32 = 256;

/// Resample `image` once per target size and write the frames, in the given
/// order, as an ICO container to `writer`.
///
/// Frames are RGBA8 Lanczos3 resamples, stored PNG-compressed, so
/// transparency survives.
pub fn encode_icon<W: Write>(image: &DynamicImage, sizes: &[(u32, u32)], writer: W) -> Result<()> {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return Err(IconError::Encoding(format!("cannot encode an empty {w}x{h} image")));
    }
    if sizes.is_empty() {
        return Err(IconError::Encoding("no target sizes requested".to_string()));
    }

    let mut frames = Vec::with_capacity(sizes.len());
    for &(tw, th) in sizes {
        validate_size(tw, th)?;
        let resized = image.resize_exact(tw, th, FilterType::Lanczos3).to_rgba8();
        let frame = IcoFrame::as_png(resized.as_raw(), tw, th, ExtendedColorType::Rgba8)
            .map_err(|e| IconError::Encoding(format!("{tw}x{th} frame: {e}")))?;
        frames.push(frame);
    }

    IcoEncoder::new(writer)
        .encode_images(&frames)
        .map_err(|e| IconError::Encoding(e.to_string()))?;

    log::debug!("Encoded icon with {} frames from {w}x{h} source", frames.len());
    Ok(())
}

/// Same as [`encode_icon`] but returns the container bytes.
pub fn encode_icon_to_vec(image: &DynamicImage, sizes: &[(u32, u32)]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_icon(image, sizes, &mut buf)?;
    Ok(buf)
}

/// Encode into a file at `path`, creating or truncating it.
pub fn save_icon(image: &DynamicImage, sizes: &[(u32, u32)], path: &Path) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| IconError::Encoding(format!("cannot create {}: {e}", path.display())))?;
    let mut writer = BufWriter::new(file);
    encode_icon(image, sizes, &mut writer)?;
    writer
        .flush()
        .map_err(|e| IconError::Encoding(format!("cannot write {}: {e}", path.display())))
}

fn validate_size(w: u32, h: u32) -> Result<()> {
    if w == 0 || h == 0 {
        return Err(IconError::Encoding(format!("degenerate target size {w}x{h}")));
    }
    if w > MAX_ICON_SIDE || h > MAX_ICON_SIDE {
        return Err(IconError::Encoding(format!(
            "target size {w}x{h} exceeds {MAX_ICON_SIDE}x{MAX_ICON_SIDE}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    /// (width, height) of every directory entry; 0 in the header means 256.
    fn directory(bytes: &[u8]) -> Vec<(u32, u32)> {
        assert_eq!(&bytes[0..4], &[0, 0, 1, 0]);
        let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
        (0..count)
            .map(|i| {
                let entry = &bytes[6 + i * 16..6 + (i + 1) * 16];
                let side = |b: u8| if b == 0 { 256 } else { b as u32 };
                (side(entry[0]), side(entry[1]))
            })
            .collect()
    }

    fn sample() -> DynamicImage {
        let mut img = RgbaImage::from_pixel(50, 30, Rgba([0, 0, 0, 0]));
        for y in 5..25 {
            for x in 10..40 {
                img.put_pixel(x, y, Rgba([220, 30, 30, 255]));
            }
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn writes_all_default_sizes_in_order() {
        let bytes = encode_icon_to_vec(&sample(), &ICON_TARGET_SIZES).unwrap();
        assert_eq!(directory(&bytes), ICON_TARGET_SIZES.to_vec());
    }

    #[test]
    fn respects_requested_order() {
        let sizes = [(48, 48), (16, 16), (32, 32)];
        let bytes = encode_icon_to_vec(&sample(), &sizes).unwrap();
        assert_eq!(directory(&bytes), sizes.to_vec());
    }

    #[test]
    fn largest_frame_keeps_transparency() {
        let bytes = encode_icon_to_vec(&sample(), &ICON_TARGET_SIZES).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Ico).unwrap();
        assert_eq!(decoded.dimensions(), (256, 256));
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.get_pixel(0, 0)[3], 0);
        assert_eq!(decoded.get_pixel(128, 128)[3], 255);
    }

    #[test]
    fn every_frame_is_square_rgba_png() {
        // wide transparent margin so no resampling kernel reaches the corners
        let mut img = RgbaImage::from_pixel(64, 64, Rgba([0, 0, 0, 0]));
        for y in 16..48 {
            for x in 16..48 {
                img.put_pixel(x, y, Rgba([30, 90, 200, 255]));
            }
        }
        let bytes = encode_icon_to_vec(&DynamicImage::ImageRgba8(img), &ICON_TARGET_SIZES).unwrap();
        let count = u16::from_le_bytes([bytes[4], bytes[5]]) as usize;
        assert_eq!(count, ICON_TARGET_SIZES.len());

        for (i, &(w, h)) in ICON_TARGET_SIZES.iter().enumerate() {
            let entry = &bytes[6 + i * 16..6 + (i + 1) * 16];
            let len = u32::from_le_bytes(entry[8..12].try_into().unwrap()) as usize;
            let offset = u32::from_le_bytes(entry[12..16].try_into().unwrap()) as usize;
            let frame = image::load_from_memory_with_format(&bytes[offset..offset + len], image::ImageFormat::Png)
                .unwrap();

            assert_eq!(frame.dimensions(), (w, h));
            assert_eq!(frame.color(), image::ColorType::Rgba8);
            assert_eq!(frame.get_pixel(0, 0)[3], 0, "{w}x{h} corner should stay transparent");
            assert_eq!(frame.get_pixel(w / 2, h / 2)[3], 255, "{w}x{h} center should stay opaque");
        }
    }

    #[test]
    fn rejects_degenerate_sizes() {
        let err = encode_icon_to_vec(&sample(), &[(16, 16), (0, 0)]).unwrap_err();
        assert!(matches!(err, IconError::Encoding(_)));
        let err = encode_icon_to_vec(&sample(), &[(512, 512)]).unwrap_err();
        assert!(matches!(err, IconError::Encoding(_)));
        let err = encode_icon_to_vec(&sample(), &[]).unwrap_err();
        assert!(matches!(err, IconError::Encoding(_)));
    }

    #[test]
    fn rejects_empty_image() {
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        assert!(matches!(
            encode_icon_to_vec(&empty, &ICON_TARGET_SIZES),
            Err(IconError::Encoding(_))
        ));
    }

    #[test]
    fn tiny_source_upsamples() {
        let one = DynamicImage::ImageRgba8(RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255])));
        let bytes = encode_icon_to_vec(&one, &ICON_TARGET_SIZES).unwrap();
        assert_eq!(directory(&bytes).len(), 7);
    }
}
