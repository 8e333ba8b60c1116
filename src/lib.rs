//! Crop an image to its subject color and turn it into a multi-resolution
//! `.ico`.
//!
//! The pipeline has two halves:
//! - color discovery: [`detect_background`] + [`estimate_dominant_color`]
//! - conversion: [`crop_to_subject`] followed by [`encode_icon`]
//!
//! Everything here is synchronous and works on in-memory buffers. The
//! library only logs through the `log` facade; installing a logger is up to
//! the caller.

pub mod background;
pub mod color;
pub mod config;
pub mod convert;
pub mod crop;
pub mod dominant;
pub mod error;
pub mod icon;
mod wasm;

pub use background::detect_background;
pub use color::{distance, Color};
pub use config::{AnalysisConfig, DEFAULT_SUBJECT_HEX, DEFAULT_TOLERANCE};
pub use convert::{ConversionReport, DetectedColors, IconConverter};
pub use crop::{crop_to_subject, subject_mask, was_cropped, BoundingBox, Mask};
pub use dominant::{estimate_dominant_color, estimate_dominant_color_with};
pub use error::{IconError, Result};
pub use icon::{encode_icon, encode_icon_to_vec, save_icon, ICON_TARGET_SIZES};
pub use wasm::{detect_subject_color, png_to_ico};
