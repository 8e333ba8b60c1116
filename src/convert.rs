//! File-level conversion: load a source image, crop it to its subject and
//! write a multi-resolution `.ico` next to it (or wherever asked).

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

use crate::background::detect_background;
use crate::color::Color;
use crate::crop::crop_to_subject;
use crate::dominant::estimate_dominant_color_with;
use crate::config::AnalysisConfig;
use crate::error::{IconError, Result};
use crate::icon::{save_icon, ICON_TARGET_SIZES};

/// Outcome of a successful [`IconConverter::convert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub original: (u32, u32),
    pub cropped: (u32, u32),
}

impl ConversionReport {
    pub fn was_cropped(&self) -> bool {
        self.original != self.cropped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedColors {
    pub subject: Color,
    pub background: Color,
}

#[derive(Debug, Clone)]
pub struct IconConverter {
    input: PathBuf,
    config: AnalysisConfig,
}

impl IconConverter {
    pub fn new(input: impl Into<PathBuf>) -> Result<Self> {
        let input = input.into();
        if !input.is_file() {
            return Err(IconError::SourceNotFound(input));
        }
        Ok(Self {
            input,
            config: AnalysisConfig::default(),
        })
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn input(&self) -> &Path {
        &self.input
    }

    /// `<input stem>.ico` beside the input.
    pub fn default_output(&self) -> PathBuf {
        self.input.with_extension("ico")
    }

    pub fn load(&self) -> Result<DynamicImage> {
        image::open(&self.input)
            .map_err(|e| IconError::SourceDecode(format!("{}: {e}", self.input.display())))
    }

    pub fn find_dominant_color(&self) -> Result<Color> {
        let img = self.load()?;
        estimate_dominant_color_with(&img, &self.config)
    }

    /// Subject and background colors from a single decode of the source.
    pub fn detect_colors(&self) -> Result<DetectedColors> {
        let img = self.load()?;
        let subject = estimate_dominant_color_with(&img, &self.config)?;
        Ok(DetectedColors {
            subject,
            background: detect_background(&img),
        })
    }

    /// Crop to `subject` within `tolerance`, then write the icon to `output`
    /// (or [`Self::default_output`]).
    pub fn convert(&self, output: Option<&Path>, subject: Color, tolerance: u32) -> Result<ConversionReport> {
        let img = self.load()?;
        let original = img.dimensions();
        log::info!(
            "Source image loaded: {}x{}, Mode: {:?}",
            original.0,
            original.1,
            img.color()
        );

        let cropped = crop_to_subject(img, subject, tolerance);
        let cropped_size = cropped.dimensions();
        if cropped_size != original {
            log::info!(
                "Successfully cropped image from {}x{} to {}x{}.",
                original.0,
                original.1,
                cropped_size.0,
                cropped_size.1
            );
        } else {
            log::warn!("Image was not cropped. Check your subject color and try a higher tolerance.");
        }

        let output = output.map(Path::to_path_buf).unwrap_or_else(|| self.default_output());
        save_icon(&cropped, &ICON_TARGET_SIZES, &output)?;
        log::info!("Icon created successfully at: {}", output.display());

        Ok(ConversionReport {
            output,
            original,
            cropped: cropped_size,
        })
    }
}
