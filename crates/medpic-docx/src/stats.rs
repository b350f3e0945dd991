use medpic_layout::{GridShape, paginate};

use crate::types::Result;

/// Summary of what a generation request will produce, computable
/// without decoding a single pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentStatistics {
    /// Number of uploaded images
    pub image_count: usize,
    /// Number of output pages
    pub page_count: usize,
    /// Image slots per page
    pub slots_per_page: usize,
    /// Slots that receive an image
    pub filled_slots: usize,
    /// Trailing blank cells on the final page
    pub blank_slots: usize,
}

/// Calculate statistics for a generation request
pub fn calculate_statistics(image_count: usize, shape: GridShape) -> Result<DocumentStatistics> {
    let plan = paginate(image_count, shape)?;

    Ok(DocumentStatistics {
        image_count,
        page_count: plan.page_count(),
        slots_per_page: shape.capacity(),
        filled_slots: plan.filled().count(),
        blank_slots: plan.blank_slot_count(),
    })
}
