use image::GenericImageView;
use js_sys::{Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::{crop_to_subject, encode_icon_to_vec, estimate_dominant_color, Color, ICON_TARGET_SIZES};

fn decode(input: &[u8]) -> Result<image::DynamicImage, JsValue> {
    image::load_from_memory(input).map_err(|e| JsValue::from_str(&format!("Unable to decode image: {e}")))
}

/// Guess the subject color of an encoded image. Returns `#rrggbb`.
#[wasm_bindgen]
pub fn detect_subject_color(input: Vec<u8>) -> Result<String, JsValue> {
    let img = decode(&input)?;
    let color = estimate_dominant_color(&img).map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(color.to_hex())
}

/// Crop an encoded image to `subject_hex` within `tolerance` and re-encode it
/// as an `.ico`.
///
/// Returns `{ icon: Uint8Array, width, height, cropped }` where `width` and
/// `height` are the cropped dimensions before resampling.
#[wasm_bindgen]
pub fn png_to_ico(input: Vec<u8>, subject_hex: String, tolerance: u32) -> Result<Object, JsValue> {
    let subject = Color::from_hex(&subject_hex).map_err(|e| JsValue::from_str(&e.to_string()))?;

    // ----------------------
    // 1. Decode and crop
    // ----------------------
    let img = decode(&input)?;
    let original = img.dimensions();
    let cropped = crop_to_subject(img, subject, tolerance);
    let (width, height) = cropped.dimensions();

    // ----------------------
    // 2. Encode the container
    // ----------------------
    let encoded = encode_icon_to_vec(&cropped, &ICON_TARGET_SIZES)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("icon"), &Uint8Array::from(encoded.as_slice()))?;
    Reflect::set(&result, &JsValue::from_str("width"), &JsValue::from(width))?;
    Reflect::set(&result, &JsValue::from_str("height"), &JsValue::from(height))?;
    Reflect::set(
        &result,
        &JsValue::from_str("cropped"),
        &JsValue::from_bool((width, height) != original),
    )?;

    Ok(result)
}
