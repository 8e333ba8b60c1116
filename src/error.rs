use std::path::PathBuf;

/// Everything the icon pipeline can fail with.
///
/// A crop that matches no pixel is not an error: the image comes back
/// unchanged and callers compare dimensions if they care.
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    #[error("source image not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("unable to decode source image: {0}")]
    SourceDecode(String),

    /// Every pixel was transparent or too close to the background.
    #[error("no dominant color candidates (everything looks like background)")]
    NoColorCandidates,

    /// Candidates existed but all were too dark, too light or too grey.
    #[error("no vibrant color candidates (try picking the color manually)")]
    NoVibrantCandidates,

    #[error("icon encoding failed: {0}")]
    Encoding(String),

    #[error("invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T> = std::result::Result<T, IconError>;
