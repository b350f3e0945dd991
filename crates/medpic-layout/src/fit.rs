//! Image fit planning
//!
//! Maps a source image's dimensions plus a target rectangle to a
//! transform plan: an optional symmetric crop, a resize, and an optional
//! padding canvas. Pure geometry over dimensions; pixel work happens in
//! the consumer.

use crate::types::{Rect, Size};

/// How to fit a source image into a target rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitStrategy {
    /// Crop the longer axis symmetrically to the target aspect ratio,
    /// then scale to exactly the target. No distortion, no letterboxing,
    /// maximal retained content.
    #[default]
    CropToAspect,
    /// Shrink (never enlarge) to fit inside the target, then center on an
    /// opaque white canvas of exactly the target size. No cropping,
    /// possible letterboxing.
    PadToSize,
    /// Scale so the width equals the target width; height is derived.
    ScaleWidth,
    /// Scale so the height equals the target height; width is derived.
    ScaleHeight,
}

/// The transform a fit strategy decided on, applied in order: crop the
/// source to `source_crop` (if any), resize the region to `resize_to`,
/// then place the result at `offset` on a `canvas` (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPlan {
    pub source_crop: Option<Rect>,
    pub resize_to: Size,
    pub canvas: Option<Size>,
    pub offset: (u32, u32),
}

impl FitPlan {
    /// True when applying the plan to an image of `source` dimensions
    /// changes nothing.
    pub fn is_noop(&self, source: Size) -> bool {
        self.source_crop.is_none()
            && self.resize_to == source
            && self.canvas.is_none_or(|canvas| canvas == source)
    }

    /// Dimensions of the finished image.
    pub fn output_size(&self) -> Size {
        self.canvas.unwrap_or(self.resize_to)
    }
}

/// Compute the fit plan for a source of the given dimensions.
///
/// Total on positive-dimension inputs; zero-dimension sources are
/// rejected by the image decoder upstream. A source already matching the
/// target comes back as a no-op plan.
pub fn compute_fit(source: Size, target: Size, strategy: FitStrategy) -> FitPlan {
    match strategy {
        FitStrategy::CropToAspect => crop_to_aspect(source, target),
        FitStrategy::PadToSize => pad_to_size(source, target),
        FitStrategy::ScaleWidth => FitPlan {
            source_crop: None,
            resize_to: Size::new(target.width, derive_height(source, target.width)),
            canvas: None,
            offset: (0, 0),
        },
        FitStrategy::ScaleHeight => FitPlan {
            source_crop: None,
            resize_to: Size::new(derive_width(source, target.height), target.height),
            canvas: None,
            offset: (0, 0),
        },
    }
}

fn crop_to_aspect(source: Size, target: Size) -> FitPlan {
    // Cross-multiplied aspect comparison keeps the arithmetic exact.
    let lhs = source.width as u64 * target.height as u64;
    let rhs = source.height as u64 * target.width as u64;

    let source_crop = if lhs == rhs {
        None
    } else if lhs > rhs {
        // Source is wider than the target aspect: trim width symmetrically.
        let new_w = ((source.height as u64 * target.width as u64 / target.height as u64) as u32)
            .clamp(1, source.width);
        let x = (source.width - new_w) / 2;
        Some(Rect::new(x, 0, new_w, source.height))
    } else {
        // Source is taller: trim height symmetrically.
        let new_h = ((source.width as u64 * target.height as u64 / target.width as u64) as u32)
            .clamp(1, source.height);
        let y = (source.height - new_h) / 2;
        Some(Rect::new(0, y, source.width, new_h))
    };

    FitPlan {
        source_crop,
        resize_to: target,
        canvas: None,
        offset: (0, 0),
    }
}

fn pad_to_size(source: Size, target: Size) -> FitPlan {
    let inner = if source.width <= target.width && source.height <= target.height {
        // Already fits: keep the original size, letterbox around it.
        source
    } else if source.width as u64 * target.height as u64
        >= source.height as u64 * target.width as u64
    {
        // Width-limited shrink.
        let h = ((source.height as u64 * target.width as u64 / source.width as u64) as u32)
            .clamp(1, target.height);
        Size::new(target.width, h)
    } else {
        // Height-limited shrink.
        let w = ((source.width as u64 * target.height as u64 / source.height as u64) as u32)
            .clamp(1, target.width);
        Size::new(w, target.height)
    };

    FitPlan {
        source_crop: None,
        resize_to: inner,
        canvas: Some(target),
        offset: (
            (target.width - inner.width) / 2,
            (target.height - inner.height) / 2,
        ),
    }
}

fn derive_height(source: Size, target_width: u32) -> u32 {
    ((source.height as u64 * target_width as u64 / source.width as u64) as u32).max(1)
}

fn derive_width(source: Size, target_height: u32) -> u32 {
    ((source.width as u64 * target_height as u64 / source.height as u64) as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_wider_source_trims_width_symmetrically() {
        // 1200x800 into 300x400: keep a 600x800 region offset 300 from
        // each side, then scale down.
        let plan = compute_fit(Size::new(1200, 800), Size::new(300, 400), FitStrategy::CropToAspect);
        assert_eq!(plan.source_crop, Some(Rect::new(300, 0, 600, 800)));
        assert_eq!(plan.resize_to, Size::new(300, 400));
        assert_eq!(plan.canvas, None);
    }

    #[test]
    fn crop_taller_source_trims_height_symmetrically() {
        let plan = compute_fit(Size::new(800, 1200), Size::new(400, 300), FitStrategy::CropToAspect);
        assert_eq!(plan.source_crop, Some(Rect::new(0, 300, 800, 600)));
        assert_eq!(plan.resize_to, Size::new(400, 300));
    }

    #[test]
    fn crop_matching_aspect_skips_the_crop() {
        let plan = compute_fit(Size::new(1600, 1200), Size::new(400, 300), FitStrategy::CropToAspect);
        assert_eq!(plan.source_crop, None);
        assert_eq!(plan.resize_to, Size::new(400, 300));
    }

    #[test]
    fn crop_retained_region_matches_target_aspect() {
        let targets = [Size::new(300, 400), Size::new(400, 300), Size::new(250, 250)];
        let sources = [Size::new(1200, 800), Size::new(801, 1199), Size::new(333, 777)];
        for target in targets {
            for source in sources {
                let plan = compute_fit(source, target, FitStrategy::CropToAspect);
                let region = plan.source_crop.map_or(source, |r| Size::new(r.width, r.height));
                // Within one pixel of the exact target aspect.
                let ideal = region.height as f64 * target.width as f64 / target.height as f64;
                assert!(
                    (region.width as f64 - ideal).abs() <= 1.0,
                    "{source:?} -> {target:?} kept {region:?}"
                );
            }
        }
    }

    #[test]
    fn pad_shrinks_and_centers() {
        let plan = compute_fit(Size::new(1200, 800), Size::new(300, 400), FitStrategy::PadToSize);
        assert_eq!(plan.source_crop, None);
        assert_eq!(plan.resize_to, Size::new(300, 200));
        assert_eq!(plan.canvas, Some(Size::new(300, 400)));
        assert_eq!(plan.offset, (0, 100));
        assert_eq!(plan.output_size(), Size::new(300, 400));
    }

    #[test]
    fn pad_never_upscales() {
        let plan = compute_fit(Size::new(100, 50), Size::new(300, 400), FitStrategy::PadToSize);
        assert_eq!(plan.resize_to, Size::new(100, 50));
        assert_eq!(plan.offset, (100, 175));
        assert_eq!(plan.output_size(), Size::new(300, 400));
    }

    #[test]
    fn pad_inner_region_preserves_source_aspect() {
        let plan = compute_fit(Size::new(997, 601), Size::new(300, 300), FitStrategy::PadToSize);
        let inner = plan.resize_to;
        let ideal = inner.width as f64 * 601.0 / 997.0;
        assert!((inner.height as f64 - ideal).abs() <= 1.0);
    }

    #[test]
    fn scale_width_derives_height() {
        let plan = compute_fit(Size::new(1200, 800), Size::new(300, 9999), FitStrategy::ScaleWidth);
        assert_eq!(plan.resize_to, Size::new(300, 200));
        assert_eq!(plan.canvas, None);
    }

    #[test]
    fn scale_height_derives_width() {
        let plan = compute_fit(Size::new(1200, 800), Size::new(9999, 400), FitStrategy::ScaleHeight);
        assert_eq!(plan.resize_to, Size::new(600, 400));
    }

    #[test]
    fn every_strategy_is_idempotent_at_the_target() {
        let target = Size::new(300, 400);
        for strategy in [
            FitStrategy::CropToAspect,
            FitStrategy::PadToSize,
            FitStrategy::ScaleWidth,
            FitStrategy::ScaleHeight,
        ] {
            let plan = compute_fit(target, target, strategy);
            assert!(plan.is_noop(target), "{strategy:?} changed a matching source");
            assert_eq!(plan.output_size(), target);
        }
    }
}
