use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum LayoutMode {
    /// Saddle-stitch imposition: pages reordered so the folded, stitched
    /// sheet stack reads in sequence
    #[default]
    Booklet,
    /// Plain side-by-side pairs in natural reading order
    TwoUp,
}

/// A paired (resolution, JPEG quality) setting selected by the single
/// compact-output toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityProfile {
    pub dpi: u32,
    pub jpeg_quality: u8,
}

impl QualityProfile {
    pub const NORMAL: Self = Self {
        dpi: 220,
        jpeg_quality: 92,
    };

    pub const COMPACT: Self = Self {
        dpi: 180,
        jpeg_quality: 85,
    };
}

/// Job configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct GenerateOptions {
    pub layout_mode: LayoutMode,
    /// Prepend one synthetic blank to simulate a cover offset.
    /// Only affects two-up/preview planning; ignored for booklets.
    pub cover_preview: bool,
    pub grayscale: bool,
    /// Switch to the compact quality profile (lower DPI, stronger JPEG
    /// compression).
    pub compress: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            layout_mode: LayoutMode::Booklet,
            cover_preview: true,
            grayscale: false,
            compress: false,
        }
    }
}

impl GenerateOptions {
    /// Quality profile for this pass; both halves of every spread share it.
    pub fn quality_profile(&self) -> QualityProfile {
        if self.compress {
            QualityProfile::COMPACT
        } else {
            QualityProfile::NORMAL
        }
    }

    /// Load options from a JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| BookletError::Config(format!("failed to parse options: {e}")))
    }

    /// Save options to a JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BookletError::Config(format!("failed to serialize options: {e}")))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_interactive_ui() {
        let options = GenerateOptions::default();
        assert_eq!(options.layout_mode, LayoutMode::Booklet);
        assert!(options.cover_preview);
        assert!(!options.grayscale);
        assert!(!options.compress);
    }

    #[test]
    fn compress_toggle_selects_the_compact_profile() {
        let normal = GenerateOptions::default().quality_profile();
        assert_eq!(normal.dpi, 220);
        assert_eq!(normal.jpeg_quality, 92);

        let compact = GenerateOptions {
            compress: true,
            ..GenerateOptions::default()
        }
        .quality_profile();
        assert_eq!(compact.dpi, 180);
        assert_eq!(compact.jpeg_quality, 85);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn layout_mode_uses_snake_case_wire_names() {
        assert_eq!(
            serde_json::to_string(&LayoutMode::TwoUp).unwrap(),
            "\"two_up\""
        );
        assert_eq!(
            serde_json::from_str::<LayoutMode>("\"booklet\"").unwrap(),
            LayoutMode::Booklet
        );
    }
}
