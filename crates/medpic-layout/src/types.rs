use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("invalid grid shape {rows}x{cols}: rows and columns must be at least 1")]
    InvalidShape { rows: u32, cols: u32 },
    #[error("unrecognized grid shape label '{0}', expected ROWSxCOLS like 2x3")]
    UnrecognizedShape(String),
    #[error("at least one image is required")]
    EmptyImageSet,
}

pub type Result<T> = std::result::Result<T, LayoutError>;

/// Page grid shape: rows by columns, filled row-major in input order.
///
/// Rows always come first. UI labels such as "2 x 3" mean 2 rows of 3
/// columns regardless of how the label is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridShape {
    pub rows: u32,
    pub cols: u32,
}

impl GridShape {
    pub fn new(rows: u32, cols: u32) -> Result<Self> {
        let shape = Self { rows, cols };
        shape.validate()?;
        Ok(shape)
    }

    pub fn validate(self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(LayoutError::InvalidShape {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    /// Number of image slots on a single page.
    pub fn capacity(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Parse a layout label like "2x3", "2X3" or "2×3".
    pub fn parse(label: &str) -> Result<Self> {
        let (rows, cols) = label
            .split_once(['x', 'X', '×'])
            .ok_or_else(|| LayoutError::UnrecognizedShape(label.to_string()))?;
        let rows = rows
            .trim()
            .parse()
            .map_err(|_| LayoutError::UnrecognizedShape(label.to_string()))?;
        let cols = cols
            .trim()
            .parse()
            .map_err(|_| LayoutError::UnrecognizedShape(label.to_string()))?;
        Self::new(rows, cols)
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridShape {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Pixel dimensions of an image or target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Pixel region within a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One cell of one page. `image` is the flat index into the request's
/// image list, or `None` for a trailing blank cell on the final page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlot {
    pub row: u32,
    pub col: u32,
    pub image: Option<usize>,
}

/// A single page of the plan: exactly `rows * cols` slots in row-major
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    pub index: usize,
    pub slots: Vec<PageSlot>,
}

impl PageLayout {
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.image.is_some()).count()
    }

    pub fn blank_count(&self) -> usize {
        self.slots.len() - self.filled_count()
    }
}

/// A slot assignment as consumed by the document renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotAssignment {
    pub page: usize,
    pub row: u32,
    pub col: u32,
    pub image: usize,
}

/// Full pagination output: computed once per generation request,
/// consumed by the renderer, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub shape: GridShape,
    pub image_count: usize,
    pub pages: Vec<PageLayout>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Image index assigned to the given slot, if the slot is within the
    /// plan and filled.
    pub fn image_index(&self, page: usize, row: u32, col: u32) -> Option<usize> {
        if row >= self.shape.rows || col >= self.shape.cols {
            return None;
        }
        let slot = (row * self.shape.cols + col) as usize;
        self.pages.get(page)?.slots.get(slot)?.image
    }

    /// All filled slots in render order.
    pub fn filled(&self) -> impl Iterator<Item = SlotAssignment> + '_ {
        self.pages.iter().flat_map(|page| {
            page.slots.iter().filter_map(|slot| {
                slot.image.map(|image| SlotAssignment {
                    page: page.index,
                    row: slot.row,
                    col: slot.col,
                    image,
                })
            })
        })
    }

    pub fn blank_slot_count(&self) -> usize {
        self.pages.iter().map(PageLayout::blank_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_ascii_and_unicode_separators() {
        assert_eq!(GridShape::parse("2x3").unwrap(), GridShape { rows: 2, cols: 3 });
        assert_eq!(GridShape::parse("2X3").unwrap(), GridShape { rows: 2, cols: 3 });
        assert_eq!(GridShape::parse("3 × 2").unwrap(), GridShape { rows: 3, cols: 2 });
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(
            GridShape::parse("wide"),
            Err(LayoutError::UnrecognizedShape(_))
        ));
        assert!(matches!(
            GridShape::parse("2xboth"),
            Err(LayoutError::UnrecognizedShape(_))
        ));
    }

    #[test]
    fn parse_rejects_zero_dimension() {
        assert_eq!(
            GridShape::parse("0x3"),
            Err(LayoutError::InvalidShape { rows: 0, cols: 3 })
        );
    }

    #[test]
    fn display_round_trips() {
        let shape = GridShape::new(3, 2).unwrap();
        assert_eq!(shape.to_string().parse::<GridShape>().unwrap(), shape);
    }

    #[test]
    fn capacity() {
        assert_eq!(GridShape::new(3, 3).unwrap().capacity(), 9);
        assert_eq!(GridShape::new(1, 2).unwrap().capacity(), 2);
    }
}
