//! Raster image pipeline
//!
//! Decodes uploads, executes fit plans against real pixels, and
//! re-encodes the result for embedding. Decode failures name the
//! offending file and abort the whole request.

use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use log::debug;
use medpic_layout::{FitPlan, Size, compute_fit};

use crate::options::GenerationOptions;
use crate::request::{GenerationRequest, UploadedImage};
use crate::types::{DocError, Result};

/// A decoded, fitted, re-encoded image ready to embed.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub filename: String,
    pub width_px: u32,
    pub height_px: u32,
    pub png: Vec<u8>,
}

/// Decode an upload into pixels.
pub fn decode_image(upload: &UploadedImage) -> Result<DynamicImage> {
    image::load_from_memory(&upload.bytes).map_err(|source| DocError::ImageDecode {
        file: upload.filename.clone(),
        source,
    })
}

/// Execute a fit plan: crop, resize, then letterbox onto a white canvas
/// when the plan calls for one.
pub fn apply_fit(img: &DynamicImage, plan: &FitPlan) -> DynamicImage {
    let source = Size::new(img.width(), img.height());
    if plan.is_noop(source) {
        return img.clone();
    }

    let mut out = match plan.source_crop {
        Some(region) => img.crop_imm(region.x, region.y, region.width, region.height),
        None => img.clone(),
    };

    if Size::new(out.width(), out.height()) != plan.resize_to {
        out = out.resize_exact(
            plan.resize_to.width,
            plan.resize_to.height,
            FilterType::Lanczos3,
        );
    }

    if let Some(canvas_size) = plan.canvas {
        if canvas_size != plan.resize_to {
            let mut canvas = RgbaImage::from_pixel(
                canvas_size.width,
                canvas_size.height,
                Rgba([255, 255, 255, 255]),
            );
            image::imageops::overlay(
                &mut canvas,
                &out.to_rgba8(),
                plan.offset.0 as i64,
                plan.offset.1 as i64,
            );
            out = DynamicImage::ImageRgba8(canvas);
        }
    }

    out
}

/// Re-encode a transformed image as PNG for embedding.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, ImageFormat::Png)?;
    Ok(cursor.into_inner())
}

/// Decode and fit every upload in request order.
pub(crate) fn prepare_images(
    request: &GenerationRequest,
    options: &GenerationOptions,
) -> Result<Vec<PreparedImage>> {
    let mut prepared = Vec::with_capacity(request.images.len());
    for upload in &request.images {
        let decoded = decode_image(upload)?;
        let source = Size::new(decoded.width(), decoded.height());
        let target = options.target_px(&upload.filename);
        let plan = compute_fit(source, target, options.fit_strategy);
        let fitted = apply_fit(&decoded, &plan);
        debug!(
            "fitted '{}' {}x{} -> {}x{}",
            upload.filename,
            source.width,
            source.height,
            fitted.width(),
            fitted.height()
        );
        prepared.push(PreparedImage {
            filename: upload.filename.clone(),
            width_px: fitted.width(),
            height_px: fitted.height(),
            png: encode_png(&fitted)?,
        });
    }
    Ok(prepared)
}

/// Load a single upload from disk; the filename is taken from the path.
pub async fn load_image(path: impl AsRef<Path>) -> Result<UploadedImage> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(UploadedImage { filename, bytes })
}

/// Load multiple uploads, preserving argument order.
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<UploadedImage>> {
    let mut uploads = Vec::new();
    for path in paths {
        uploads.push(load_image(path).await?);
    }
    Ok(uploads)
}
