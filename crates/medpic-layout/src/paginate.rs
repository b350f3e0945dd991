//! Grid pagination
//!
//! Partitions an ordered image sequence into pages of `rows * cols`
//! slots, in input order, with no reordering and no omission. Trailing
//! slots on the final page stay blank so the grid renders at full size.

use crate::types::{GridShape, LayoutError, LayoutPlan, PageLayout, PageSlot, Result};

/// Compute the layout plan for `image_count` images on a `shape` grid.
///
/// Produces `ceil(image_count / capacity)` pages; zero images is a
/// degenerate success with an empty plan. Page `p`, slot `(r, c)`
/// receives the image at flat index `p * capacity + r * cols + c` when
/// that index exists.
pub fn paginate(image_count: usize, shape: GridShape) -> Result<LayoutPlan> {
    shape.validate()?;

    let capacity = shape.capacity();
    let page_count = image_count.div_ceil(capacity);

    let mut pages = Vec::with_capacity(page_count);
    for index in 0..page_count {
        let mut slots = Vec::with_capacity(capacity);
        for row in 0..shape.rows {
            for col in 0..shape.cols {
                let flat = index * capacity + (row * shape.cols + col) as usize;
                slots.push(PageSlot {
                    row,
                    col,
                    image: (flat < image_count).then_some(flat),
                });
            }
        }
        pages.push(PageLayout { index, slots });
    }

    Ok(LayoutPlan {
        shape,
        image_count,
        pages,
    })
}

/// Like [`paginate`], but for callers whose policy requires at least one
/// image: an empty input is rejected instead of yielding an empty plan.
pub fn paginate_non_empty(image_count: usize, shape: GridShape) -> Result<LayoutPlan> {
    if image_count == 0 {
        return Err(LayoutError::EmptyImageSet);
    }
    paginate(image_count, shape)
}
