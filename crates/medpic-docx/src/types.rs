use medpic_layout::LayoutError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("missing required field: {0}")]
    MissingRequiredField(&'static str),
    #[error("failed to decode image '{file}': {source}")]
    ImageDecode {
        file: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode image: {0}")]
    ImageEncode(#[from] image::ImageError),
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("DOCX error: {0}")]
    Docx(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, DocError>;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Portrait: height > width
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperSize {
    Letter,
    Legal,
    A4,
    Custom { width_in: f32, height_in: f32 },
}

impl PaperSize {
    /// Base dimensions in inches (always portrait: width < height for
    /// standard sizes)
    pub fn dimensions_in(self) -> (f32, f32) {
        match self {
            PaperSize::Letter => (8.5, 11.0),
            PaperSize::Legal => (8.5, 14.0),
            PaperSize::A4 => (8.27, 11.69),
            PaperSize::Custom {
                width_in,
                height_in,
            } => (width_in, height_in),
        }
    }

    /// Dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f32, f32) {
        let (w, h) = self.dimensions_in();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

impl Default for PaperSize {
    fn default() -> Self {
        PaperSize::Letter
    }
}

/// Unit for user-supplied lengths (margins, image width overrides)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LengthUnit {
    #[default]
    Inches,
    Centimeters,
}

impl LengthUnit {
    pub fn name(&self) -> &'static str {
        match self {
            LengthUnit::Inches => "in",
            LengthUnit::Centimeters => "cm",
        }
    }

    pub fn to_inches(&self, value: f32) -> f32 {
        match self {
            LengthUnit::Inches => value,
            LengthUnit::Centimeters => value / 2.54,
        }
    }
}

/// Page margins in inches, applied once per document section
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMargins {
    pub top_in: f32,
    pub bottom_in: f32,
    pub left_in: f32,
    pub right_in: f32,
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

impl PageMargins {
    /// Create uniform margins on all sides
    pub fn uniform(margin_in: f32) -> Self {
        Self {
            top_in: margin_in,
            bottom_in: margin_in,
            left_in: margin_in,
            right_in: margin_in,
        }
    }

    pub fn horizontal_in(&self) -> f32 {
        self.left_in + self.right_in
    }
}

/// Raster resolution for computed pixel targets
pub const PIXELS_PER_INCH: u32 = 96;

/// English Metric Units per inch, the extent unit of embedded pictures
pub const EMU_PER_INCH: u32 = 914_400;

/// Twentieths of a point per inch, the unit of page and table geometry
pub const TWIPS_PER_INCH: u32 = 1_440;

pub(crate) fn in_to_twips(inches: f32) -> u32 {
    (inches * TWIPS_PER_INCH as f32).round() as u32
}

pub(crate) fn px_to_emu(px: u32) -> u32 {
    px * (EMU_PER_INCH / PIXELS_PER_INCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paper_dimensions_with_orientation() {
        let (w, h) = PaperSize::Letter.dimensions_with_orientation(Orientation::Portrait);
        assert_eq!((w, h), (8.5, 11.0));

        let (w, h) = PaperSize::Letter.dimensions_with_orientation(Orientation::Landscape);
        assert_eq!((w, h), (11.0, 8.5));
    }

    #[test]
    fn unit_conversions() {
        assert_eq!(LengthUnit::Inches.to_inches(2.0), 2.0);
        assert!((LengthUnit::Centimeters.to_inches(2.54) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn geometry_units() {
        assert_eq!(in_to_twips(1.0), 1_440);
        assert_eq!(in_to_twips(8.5), 12_240);
        assert_eq!(px_to_emu(96), 914_400);
    }

    #[test]
    fn uniform_margins() {
        let m = PageMargins::uniform(0.5);
        assert_eq!(m.top_in, 0.5);
        assert_eq!(m.right_in, 0.5);
        assert_eq!(m.horizontal_in(), 1.0);
    }
}
