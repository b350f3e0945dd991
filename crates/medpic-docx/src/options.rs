use std::collections::HashMap;

use medpic_layout::{FitStrategy, GridShape, Size};

use crate::types::*;

/// Named crop presets with fixed target sizes, selectable per image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CropPreset {
    Small,
    Medium,
    Large,
    Banner,
}

impl CropPreset {
    /// Target width and height in inches
    pub fn dimensions_in(self) -> (f32, f32) {
        match self {
            CropPreset::Small => (2.0, 1.5),
            CropPreset::Medium => (3.0, 2.5),
            CropPreset::Large => (4.0, 3.0),
            CropPreset::Banner => (6.0, 2.0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CropPreset::Small => "small",
            CropPreset::Medium => "medium",
            CropPreset::Large => "large",
            CropPreset::Banner => "banner",
        }
    }

    pub const ALL: [CropPreset; 4] = [
        CropPreset::Small,
        CropPreset::Medium,
        CropPreset::Large,
        CropPreset::Banner,
    ];
}

/// Per-generation configuration: every knob the document variants used
/// to hard-code, gathered into one explicit value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenerationOptions {
    /// Grid shape per page (rows x columns, row-major fill)
    pub shape: GridShape,
    pub orientation: Orientation,
    pub fit_strategy: FitStrategy,

    /// Default picture target, used for images without a crop preset
    pub image_width_in: f32,
    pub image_height_in: f32,

    pub paper_size: PaperSize,
    pub margins: PageMargins,

    /// Per-image overrides, keyed by upload filename
    pub crop_presets: HashMap<String, CropPreset>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            shape: GridShape { rows: 2, cols: 2 },
            orientation: Orientation::Portrait,
            fit_strategy: FitStrategy::CropToAspect,
            image_width_in: 3.0,
            image_height_in: 2.5,
            paper_size: PaperSize::Letter,
            margins: PageMargins::default(),
            crop_presets: HashMap::new(),
        }
    }
}

impl GenerationOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| DocError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| DocError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.shape.validate()?;

        if self.image_width_in <= 0.0 || self.image_height_in <= 0.0 {
            return Err(DocError::Config(
                "Image target dimensions must be positive".to_string(),
            ));
        }

        let (paper_w, paper_h) = self.paper_size.dimensions_in();
        if paper_w <= 0.0 || paper_h <= 0.0 {
            return Err(DocError::Config("Paper size must be positive".to_string()));
        }

        let m = &self.margins;
        if m.top_in < 0.0 || m.bottom_in < 0.0 || m.left_in < 0.0 || m.right_in < 0.0 {
            return Err(DocError::Config("Margins must not be negative".to_string()));
        }
        if m.horizontal_in() >= paper_w || m.top_in + m.bottom_in >= paper_h {
            return Err(DocError::Config(
                "Margins leave no printable area".to_string(),
            ));
        }

        Ok(())
    }

    /// Target size in inches for the named upload: its crop preset if one
    /// was selected, otherwise the request-level default.
    pub fn target_in(&self, filename: &str) -> (f32, f32) {
        self.crop_presets
            .get(filename)
            .map(|preset| preset.dimensions_in())
            .unwrap_or((self.image_width_in, self.image_height_in))
    }

    /// Target size in pixels at the working raster resolution.
    pub fn target_px(&self, filename: &str) -> Size {
        let (w_in, h_in) = self.target_in(filename);
        Size::new(
            (w_in * PIXELS_PER_INCH as f32).round().max(1.0) as u32,
            (h_in * PIXELS_PER_INCH as f32).round().max(1.0) as u32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = GenerationOptions::default();
        options.validate().unwrap();
        assert_eq!(options.shape, GridShape { rows: 2, cols: 2 });
        assert_eq!(options.fit_strategy, FitStrategy::CropToAspect);
    }

    #[test]
    fn preset_overrides_default_target() {
        let mut options = GenerationOptions::default();
        options
            .crop_presets
            .insert("site.jpg".to_string(), CropPreset::Banner);

        assert_eq!(options.target_in("site.jpg"), (6.0, 2.0));
        assert_eq!(options.target_in("other.jpg"), (3.0, 2.5));
        assert_eq!(options.target_px("site.jpg"), Size::new(576, 192));
        assert_eq!(options.target_px("other.jpg"), Size::new(288, 240));
    }

    #[test]
    fn zero_image_target_is_rejected() {
        let options = GenerationOptions {
            image_width_in: 0.0,
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(DocError::Config(_))));
    }

    #[test]
    fn oversized_margins_are_rejected() {
        let options = GenerationOptions {
            margins: PageMargins::uniform(5.0),
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(DocError::Config(_))));
    }

    #[test]
    fn invalid_shape_is_rejected() {
        let options = GenerationOptions {
            shape: GridShape { rows: 0, cols: 3 },
            ..Default::default()
        };
        assert!(matches!(options.validate(), Err(DocError::Layout(_))));
    }
}
