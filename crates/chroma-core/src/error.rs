//! Boundary error taxonomy. The pixel pipeline itself is total; only
//! configuration, blending of mismatched rasters and encoding can fail.

pub type PaintResult<T> = Result<T, PaintError>;

#[derive(thiserror::Error, Debug)]
pub enum PaintError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("dimension mismatch: {left_width}x{left_height} vs {right_width}x{right_height}")]
    DimensionMismatch {
        left_width: u32,
        left_height: u32,
        right_width: u32,
        right_height: u32,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PaintError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }
}

impl From<image::ImageError> for PaintError {
    fn from(err: image::ImageError) -> Self {
        Self::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(PaintError::configuration("x").to_string().contains("configuration error:"));
        assert!(PaintError::encoding("x").to_string().contains("encoding error:"));
    }

    #[test]
    fn mismatch_names_both_sizes() {
        let err = PaintError::DimensionMismatch {
            left_width: 4,
            left_height: 3,
            right_width: 2,
            right_height: 1,
        };
        assert_eq!(err.to_string(), "dimension mismatch: 4x3 vs 2x1");
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = PaintError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
