//! Document rendering
//!
//! Drives the WordprocessingML library to turn a layout plan into the
//! output artifact: a repeated header line, one image grid per page, a
//! hard page break between pages, and section-level orientation and
//! margins. The plan decides what goes where; this module only
//! sequences document elements.

use std::io::Cursor;
use std::path::Path;

use chrono::Local;
use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, PageOrientationType, Paragraph, Pic, Run, Table,
    TableCell, TableLayoutType, TableRow, VAlignType, WidthType,
};
use log::info;
use medpic_layout::{LayoutPlan, PageLayout, paginate};

use crate::images::{PreparedImage, prepare_images};
use crate::options::GenerationOptions;
use crate::request::GenerationRequest;
use crate::types::{DocError, Orientation, Result, in_to_twips, px_to_emu};

/// MIME type of the produced artifact
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The finished document: bytes plus the download filename. Exposed to
/// the caller with [`DOCX_MIME`] as the content type.
#[derive(Debug, Clone)]
pub struct DocumentArtifact {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl DocumentArtifact {
    pub fn content_type(&self) -> &'static str {
        DOCX_MIME
    }
}

/// Generate the document for one request.
pub async fn generate(
    request: GenerationRequest,
    options: GenerationOptions,
) -> Result<DocumentArtifact> {
    tokio::task::spawn_blocking(move || generate_sync(&request, &options)).await?
}

/// Synchronous generation pipeline: validate, paginate, fit, render.
pub fn generate_sync(
    request: &GenerationRequest,
    options: &GenerationOptions,
) -> Result<DocumentArtifact> {
    request.validate()?;
    options.validate()?;

    let plan = paginate(request.images.len(), options.shape)?;
    info!(
        "laying out {} images as {} page(s) of {}",
        plan.image_count,
        plan.page_count(),
        options.shape
    );

    let prepared = prepare_images(request, options)?;
    let date_line = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    let docx = build_docx(request, options, &plan, &prepared, &date_line);
    let bytes = pack_docx(docx)?;
    info!("packed document ({} bytes)", bytes.len());

    Ok(DocumentArtifact {
        filename: derive_filename(&request.title, &request.contractor, request.sequence),
        bytes,
    })
}

/// Write the artifact to disk under the given path.
pub async fn save_artifact(artifact: &DocumentArtifact, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, &artifact.bytes).await?;
    Ok(())
}

/// Download filename: title and contractor with whitespace runs collapsed
/// to underscores, plus a sequence suffix for repeat generations.
pub fn derive_filename(title: &str, contractor: &str, sequence: usize) -> String {
    let title = normalize_part(title);
    let contractor = normalize_part(contractor);
    if sequence > 0 {
        format!("MED_PICTURES_{title}_by_{contractor}_{sequence}.docx")
    } else {
        format!("MED_PICTURES_{title}_by_{contractor}.docx")
    }
}

fn normalize_part(part: &str) -> String {
    part.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Assemble the document body.
///
/// `prepared` must be indexed by the plan's flat image indices; the
/// generation pipeline guarantees both come from the same request.
fn build_docx(
    request: &GenerationRequest,
    options: &GenerationOptions,
    plan: &LayoutPlan,
    prepared: &[PreparedImage],
    date_line: &str,
) -> Docx {
    let (page_w_in, page_h_in) = options
        .paper_size
        .dimensions_with_orientation(options.orientation);

    let margins = &options.margins;
    let mut docx = Docx::new()
        .page_size(in_to_twips(page_w_in), in_to_twips(page_h_in))
        .page_margin(
            PageMargin::new()
                .top(in_to_twips(margins.top_in) as i32)
                .bottom(in_to_twips(margins.bottom_in) as i32)
                .left(in_to_twips(margins.left_in) as i32)
                .right(in_to_twips(margins.right_in) as i32),
        );
    if options.orientation == Orientation::Landscape {
        docx = docx.page_orient(PageOrientationType::Landscape);
    }

    let printable_w_in = page_w_in - margins.horizontal_in();
    let column_dxa = in_to_twips(printable_w_in / options.shape.cols as f32) as usize;

    for page in &plan.pages {
        if page.index > 0 {
            docx = docx.add_paragraph(page_break_paragraph());
        }
        docx = docx.add_paragraph(header_paragraph(&request.title, &request.contractor));
        if page.index == 0 {
            docx = docx.add_paragraph(
                Paragraph::new().add_run(Run::new().add_text(format!("Date: {date_line}"))),
            );
        }
        docx = docx.add_table(page_table(page, options, prepared, column_dxa));
    }

    docx
}

/// Header line repeated on every page: red bold label run, then the
/// title/contractor run in the default style.
fn header_paragraph(title: &str, contractor: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(
            Run::new()
                .add_text("MED PICTURES: ")
                .bold()
                .size(32)
                .color("FF0000"),
        )
        .add_run(Run::new().add_text(format!("{title} by {contractor}")))
}

fn page_break_paragraph() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

/// One page's image grid. Blank slots keep their cell so the grid stays
/// at full size on the final page.
fn page_table(
    page: &PageLayout,
    options: &GenerationOptions,
    prepared: &[PreparedImage],
    column_dxa: usize,
) -> Table {
    let cols = options.shape.cols as usize;

    let mut rows = Vec::with_capacity(options.shape.rows as usize);
    for row_slots in page.slots.chunks(cols) {
        let mut cells = Vec::with_capacity(cols);
        for slot in row_slots {
            let paragraph = match slot.image {
                Some(index) => {
                    let img = &prepared[index];
                    let pic = Pic::new(&img.png)
                        .size(px_to_emu(img.width_px), px_to_emu(img.height_px));
                    Paragraph::new()
                        .align(AlignmentType::Center)
                        .add_run(Run::new().add_image(pic))
                }
                None => Paragraph::new(),
            };
            cells.push(
                TableCell::new()
                    .width(column_dxa, WidthType::Dxa)
                    .vertical_align(VAlignType::Center)
                    .add_paragraph(paragraph),
            );
        }
        rows.push(TableRow::new(cells));
    }

    Table::new(rows)
        .set_grid(vec![column_dxa; cols])
        .layout(TableLayoutType::Fixed)
}

fn pack_docx(docx: Docx) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| DocError::Docx(e.to_string()))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::DocumentChild;
    use image::{DynamicImage, Rgba, RgbaImage};
    use medpic_layout::GridShape;

    fn prepared_images(count: usize) -> Vec<PreparedImage> {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        let png = crate::images::encode_png(&img).unwrap();
        (0..count)
            .map(|i| PreparedImage {
                filename: format!("img{i}.png"),
                width_px: 4,
                height_px: 4,
                png: png.clone(),
            })
            .collect()
    }

    fn body_counts(docx: &Docx) -> (usize, usize) {
        let children = &docx.document.children;
        let tables = children
            .iter()
            .filter(|c| matches!(c, DocumentChild::Table(_)))
            .count();
        (children.len(), tables)
    }

    #[test]
    fn filename_normalizes_whitespace() {
        assert_eq!(
            derive_filename("Lobby  Refit", "Acme Builders", 0),
            "MED_PICTURES_Lobby_Refit_by_Acme_Builders.docx"
        );
    }

    #[test]
    fn filename_carries_sequence_suffix() {
        assert_eq!(
            derive_filename("Refit", "Acme", 2),
            "MED_PICTURES_Refit_by_Acme_2.docx"
        );
    }

    #[test]
    fn two_page_document_has_one_break() {
        let mut request = GenerationRequest::new("Refit", "Acme");
        request.sequence = 0;
        let options = GenerationOptions::default();
        let plan = paginate(5, GridShape { rows: 2, cols: 2 }).unwrap();
        let prepared = prepared_images(5);

        let docx = build_docx(&request, &options, &plan, &prepared, "2026-08-08 12:00:00");

        // Page 1: header, date, table. Break. Page 2: header, table.
        let (children, tables) = body_counts(&docx);
        assert_eq!(children, 6);
        assert_eq!(tables, 2);
    }

    #[test]
    fn single_page_document_has_no_break() {
        let request = GenerationRequest::new("Refit", "Acme");
        let options = GenerationOptions {
            shape: GridShape { rows: 3, cols: 3 },
            ..Default::default()
        };
        let plan = paginate(9, options.shape).unwrap();
        let prepared = prepared_images(9);

        let docx = build_docx(&request, &options, &plan, &prepared, "2026-08-08 12:00:00");

        // Header, date, table only.
        let (children, tables) = body_counts(&docx);
        assert_eq!(children, 3);
        assert_eq!(tables, 1);
    }

    #[test]
    fn empty_plan_renders_an_empty_body() {
        let request = GenerationRequest::new("Refit", "Acme");
        let options = GenerationOptions::default();
        let plan = paginate(0, options.shape).unwrap();

        let docx = build_docx(&request, &options, &plan, &[], "2026-08-08 12:00:00");

        let (children, _) = body_counts(&docx);
        assert_eq!(children, 0);
    }
}
