use crate::error::{ReportError, Result};
use cableway_common::export::document::{Align, Document, DrawOp, FontSpec, Page};
use cableway_common::layout::{pt_to_mm, text_width_mm, A4_HEIGHT_MM, A4_WIDTH_MM, CELL_PADDING_MM};
use chrono::{NaiveDate, NaiveTime};
use image::DynamicImage;
use printpdf::lopdf;
use printpdf::{
    BuiltinFont, Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Line, Mm,
    OffsetDateTime, PdfDocument, PdfLayerReference, Point, Px, Rgb,
};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::io::BufWriter;
use std::path::Path;
use tracing::{debug, warn};

const LAYER_NAME: &str = "Layer 1";
const BORDER_THICKNESS_PT: f32 = 0.57; // 0.2mm
const IMAGE_DPI: f32 = 300.0;

/// PDF bytes plus what happened to the attached photos
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub placed_images: usize,
    pub skipped_images: usize,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn pick(&self, font: &FontSpec) -> &IndirectFontRef {
        if font.is_bold() {
            &self.bold
        } else {
            &self.regular
        }
    }
}

/// Draw every page of `document` with printpdf.
///
/// Photos that cannot be opened or decoded are left out; the rest of the
/// report is still produced. Metadata dates and the file ID come from the
/// report date, so the same document always renders to the same bytes.
pub fn render_pdf(document: &Document) -> Result<RenderedPdf> {
    let id = document_id(&document.title, document.date);
    let stamp = pdf_timestamp(document.date)?;

    let (doc, first_page, first_layer) =
        PdfDocument::new(&document.title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
    let doc = doc
        .with_document_id(id.clone())
        .with_creation_date(stamp)
        .with_mod_date(stamp)
        .with_metadata_date(stamp);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::PdfGeneration(format!("font error: {}", e)))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::PdfGeneration(format!("font error: {}", e)))?,
    };

    let mut placed_images = 0;
    let mut skipped_images = 0;

    for (page_index, page) in document.pages.iter().enumerate() {
        let layer = if page_index == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_ref, layer_ref) = doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_ref).get_layer(layer_ref)
        };

        let (placed, skipped) = draw_page(&layer, &fonts, page);
        placed_images += placed;
        skipped_images += skipped;
        debug!(page = page_index + 1, section = ?page.section, ops = page.ops.len(), "page drawn");
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| ReportError::PdfGeneration(format!("save error: {}", e)))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::PdfGeneration(format!("buffer error: {}", e)))?;
    let bytes = stabilize(&bytes, &id)?;

    Ok(RenderedPdf {
        bytes,
        page_count: document.page_count(),
        placed_images,
        skipped_images,
    })
}

/// 32 hex characters derived from the title and report date
fn document_id(title: &str, date: NaiveDate) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(b"\n");
    hasher.update(date.format("%Y-%m-%d").to_string().as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..32].to_string()
}

/// Midnight UTC of the report date
fn pdf_timestamp(date: NaiveDate) -> Result<OffsetDateTime> {
    let seconds = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(seconds)
        .map_err(|e| ReportError::PdfGeneration(format!("date error: {}", e)))
}

/// Rewrite the parts of printpdf's output that change from run to run: the
/// trailer ID pair (a fresh random instance ID on every save) and the order
/// of each page's image XObjects (kept in a hash map).
fn stabilize(bytes: &[u8], id: &str) -> Result<Vec<u8>> {
    let stabilize_err = |e: lopdf::Error| ReportError::PdfGeneration(format!("stabilize error: {}", e));

    let mut pdf = lopdf::Document::load_mem(bytes).map_err(stabilize_err)?;
    order_page_xobjects(&mut pdf).map_err(stabilize_err)?;

    let id = lopdf::Object::String(id.as_bytes().to_vec(), lopdf::StringFormat::Literal);
    pdf.trailer.set("ID", lopdf::Object::Array(vec![id.clone(), id]));

    let mut stable = Vec::with_capacity(bytes.len());
    pdf.save_to(&mut stable)
        .map_err(|e| ReportError::PdfGeneration(format!("save error: {}", e)))?;
    Ok(stable)
}

/// Give each page's XObjects ascending object numbers in name order
/// (X0, X1, ...) and list them in that order.
fn order_page_xobjects(pdf: &mut lopdf::Document) -> std::result::Result<(), lopdf::Error> {
    let page_ids: Vec<lopdf::ObjectId> = pdf.get_pages().into_values().collect();

    for page_id in page_ids {
        let resources_id = match pdf.get_dictionary(page_id)?.get(b"Resources") {
            Ok(lopdf::Object::Reference(id)) => *id,
            _ => continue,
        };
        let mut entries: Vec<(Vec<u8>, lopdf::ObjectId)> = match pdf.get_dictionary(resources_id)?.get(b"XObject") {
            Ok(lopdf::Object::Dictionary(xobjects)) => xobjects
                .iter()
                .filter_map(|(name, obj)| obj.as_reference().ok().map(|id| (name.clone(), id)))
                .collect(),
            _ => continue,
        };
        if entries.len() < 2 {
            continue;
        }

        // "X10" sorts after "X9"
        entries.sort_by(|(a, _), (b, _)| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
        let mut ids: Vec<lopdf::ObjectId> = entries.iter().map(|(_, id)| *id).collect();
        ids.sort();

        let mut streams = Vec::with_capacity(entries.len());
        for (_, old_id) in &entries {
            let stream = pdf
                .objects
                .remove(old_id)
                .ok_or(lopdf::Error::ObjectNotFound)?;
            streams.push(stream);
        }

        let mut ordered = lopdf::Dictionary::new();
        for (((name, _), new_id), stream) in entries.into_iter().zip(ids).zip(streams) {
            pdf.objects.insert(new_id, stream);
            ordered.set(name, lopdf::Object::Reference(new_id));
        }
        pdf.get_dictionary_mut(resources_id)?
            .set("XObject", lopdf::Object::Dictionary(ordered));
    }

    Ok(())
}

/// Returns (placed, skipped) photo counts
fn draw_page(layer: &PdfLayerReference, fonts: &Fonts, page: &Page) -> (usize, usize) {
    let photos: Vec<(usize, &Path)> = page
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Image { index, path, .. } => Some((*index, path.as_path())),
            DrawOp::Cell { .. } => None,
        })
        .collect();

    // decode one page at a time so at most one page of photos is held in memory
    let decoded: Vec<Option<DynamicImage>> = photos
        .par_iter()
        .map(|(index, path)| match image::open(path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!(index, path = %path.display(), error = %e, "image skipped");
                None
            }
        })
        .collect();
    let mut decoded = decoded.into_iter();

    let mut placed = 0;
    let mut skipped = 0;

    for op in &page.ops {
        match op {
            DrawOp::Cell { x, y, width, height, text, font, align, border } => {
                if *border {
                    draw_border(layer, *x, *y, *width, *height);
                }
                draw_text(layer, fonts, *x, *y, *width, *height, text, font, *align);
            }
            DrawOp::Image { x, y, width, height, .. } => match decoded.next().flatten() {
                Some(img) => {
                    place_image(layer, &img, *x, *y, *width, *height);
                    placed += 1;
                }
                None => skipped += 1,
            },
        }
    }

    (placed, skipped)
}

/// PDF y axis points up; layout y is measured from the top edge.
fn flip_y(y_mm: f32) -> f32 {
    A4_HEIGHT_MM - y_mm
}

fn draw_border(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let top = flip_y(y);
    let bottom = flip_y(y + height);
    let line = Line {
        points: vec![
            (Point::new(Mm(x), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(top)), false),
            (Point::new(Mm(x + width), Mm(bottom)), false),
            (Point::new(Mm(x), Mm(bottom)), false),
        ],
        is_closed: true,
    };
    layer.set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
    layer.set_outline_thickness(BORDER_THICKNESS_PT);
    layer.add_line(line);
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    layer: &PdfLayerReference,
    fonts: &Fonts,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    text: &str,
    font: &FontSpec,
    align: Align,
) {
    if text.is_empty() {
        return;
    }
    let text_x = match align {
        Align::Left => x + CELL_PADDING_MM,
        Align::Center => x + (width - text_width_mm(text, font.size_pt, font.is_bold())) / 2.0,
    };
    // baseline: cell middle plus 0.3 of the font size
    let baseline = y + height / 2.0 + 0.3 * pt_to_mm(font.size_pt);
    layer.use_text(text, font.size_pt, Mm(text_x), Mm(flip_y(baseline)), fonts.pick(font));
}

/// Stretch the photo into the box, like the grid cells it sits in
fn place_image(layer: &PdfLayerReference, img: &DynamicImage, x: f32, y: f32, width: f32, height: f32) {
    let rgb = img.to_rgb8();
    let (width_px, height_px) = rgb.dimensions();
    if width_px == 0 || height_px == 0 {
        return;
    }

    let native_width_mm = width_px as f32 / IMAGE_DPI * 25.4;
    let native_height_mm = height_px as f32 / IMAGE_DPI * 25.4;

    let xobject = Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    });

    xobject.add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x)),
            translate_y: Some(Mm(flip_y(y + height))),
            scale_x: Some(width / native_width_mm),
            scale_y: Some(height / native_height_mm),
            dpi: Some(IMAGE_DPI),
            ..Default::default()
        },
    );
}
