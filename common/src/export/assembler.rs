//! Report assembly
//!
//! Turns a form snapshot and the attached images into a [`Document`]. Page
//! order is fixed: title page with the General Information table, Cable
//! Information table, photo pages (only when images are attached), summary.

use chrono::NaiveDate;
use tracing::debug;

use super::document::{Align, Document, DrawOp, FontSpec, Page, Section};
use crate::fields::{self, Placement};
use crate::form::FormSnapshot;
use crate::images::ImageList;
use crate::layout::*;

pub const DEFAULT_TITLE: &str = "Cableway Inspection Report";

/// Knobs that do not change the page sequence
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub grid: PhotoGrid,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            grid: PhotoGrid::default(),
        }
    }
}

/// Long-form date printed on the summary page, e.g. "March 14, 2024"
pub fn review_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// Assemble with the default title and photo grid
pub fn assemble(snapshot: &FormSnapshot, images: &ImageList, date: NaiveDate) -> Document {
    assemble_with(snapshot, images, date, &ReportOptions::default())
}

pub fn assemble_with(
    snapshot: &FormSnapshot,
    images: &ImageList,
    date: NaiveDate,
    options: &ReportOptions,
) -> Document {
    let mut composer = Composer::default();

    title_page(&mut composer, snapshot, &options.title);
    field_table(&mut composer, snapshot, "General Information:", Placement::GeneralTable);

    composer.new_page(Section::CableInformation);
    field_table(&mut composer, snapshot, "Cable Information:", Placement::CableTable);

    if !images.is_empty() {
        photo_pages(&mut composer, images, &options.grid);
    }

    summary_page(&mut composer, snapshot, date);

    let document = Document {
        title: options.title.clone(),
        date,
        pages: composer.pages,
    };
    debug!(
        pages = document.page_count(),
        images = images.len(),
        "report assembled"
    );
    document
}

fn title_page(composer: &mut Composer, snapshot: &FormSnapshot, title: &str) {
    composer.new_page(Section::Title);
    composer.line(TITLE_HEIGHT_MM, title, FontSpec::bold(TITLE_FONT_PT), Align::Center);
    composer.ln(5.0);

    let font = FontSpec::regular(TITLE_LINE_FONT_PT);
    let lines = [
        format!("Station Name: {}", snapshot.station_name()),
        format!("Station Number: {}", snapshot.station_number()),
        format!("Inspection Date: {}", snapshot.date_inspected()),
    ];
    for line in &lines {
        composer.line(TITLE_LINE_HEIGHT_MM, line, font, Align::Center);
    }
    composer.ln(5.0);
}

/// Two-column bordered table of every field placed in `placement`
fn field_table(composer: &mut Composer, snapshot: &FormSnapshot, heading: &str, placement: Placement) {
    composer.line(HEADING_HEIGHT_MM, heading, FontSpec::bold(HEADING_FONT_PT), Align::Center);

    for field in fields::placed_in(placement) {
        composer.ensure_space(TABLE_ROW_HEIGHT_MM);
        composer.cell(
            MARGIN_MM,
            TABLE_COL_WIDTH_MM,
            TABLE_ROW_HEIGHT_MM,
            &format!("{}:", field.name),
            FontSpec::bold(TABLE_FONT_PT),
            Align::Left,
            true,
        );
        composer.cell(
            MARGIN_MM + TABLE_COL_WIDTH_MM,
            TABLE_COL_WIDTH_MM,
            TABLE_ROW_HEIGHT_MM,
            snapshot.get(field.name),
            FontSpec::regular(TABLE_FONT_PT),
            Align::Left,
            true,
        );
        composer.ln(TABLE_ROW_HEIGHT_MM);
    }
}

fn photo_pages(composer: &mut Composer, images: &ImageList, grid: &PhotoGrid) {
    let mut current_page = None;

    for (index, path) in images.iter().enumerate() {
        let slot = grid.slot(index);

        if current_page != Some(slot.page) {
            composer.new_page(Section::Photos);
            if current_page.is_none() {
                composer.line(HEADING_HEIGHT_MM, "Station Images", FontSpec::bold(HEADING_FONT_PT), Align::Center);
            }
            current_page = Some(slot.page);
        }

        composer.push(DrawOp::Image {
            index,
            path: path.clone(),
            x: slot.x_mm,
            y: slot.y_mm,
            width: grid.photo_width_mm,
            height: grid.photo_height_mm,
        });
    }
}

fn summary_page(composer: &mut Composer, snapshot: &FormSnapshot, date: NaiveDate) {
    composer.new_page(Section::Summary);
    let label_font = FontSpec::bold(TABLE_FONT_PT);
    let value_font = FontSpec::regular(TABLE_FONT_PT);
    let wrap_width = USABLE_WIDTH_MM - CELL_PADDING_MM * 2.0;

    for field in fields::placed_in(Placement::Summary) {
        composer.ensure_space(SUMMARY_LABEL_HEIGHT_MM);
        composer.cell(
            MARGIN_MM,
            SUMMARY_LABEL_WIDTH_MM,
            SUMMARY_LABEL_HEIGHT_MM,
            &format!("{}:", field.name),
            label_font,
            Align::Left,
            false,
        );
        composer.ln(SUMMARY_LABEL_HEIGHT_MM);

        for line in wrap_text(snapshot.get(field.name), wrap_width, value_font.size_pt, false) {
            composer.ensure_space(SUMMARY_LINE_HEIGHT_MM);
            composer.line(SUMMARY_LINE_HEIGHT_MM, &line, value_font, Align::Left);
        }
        composer.ln(SUMMARY_GAP_MM);
    }

    composer.ensure_space(SUMMARY_LABEL_HEIGHT_MM);
    composer.cell(
        MARGIN_MM,
        SUMMARY_LABEL_WIDTH_MM,
        SUMMARY_LABEL_HEIGHT_MM,
        &format!("Review Date: {}", review_date(date)),
        label_font,
        Align::Left,
        false,
    );
    composer.ln(SUMMARY_LABEL_HEIGHT_MM);
}

/// Page cursor with automatic page breaks at the bottom margin
#[derive(Default)]
struct Composer {
    pages: Vec<Page>,
    y: f32,
}

impl Composer {
    fn new_page(&mut self, section: Section) {
        self.pages.push(Page::new(section));
        self.y = MARGIN_MM;
    }

    /// Continue on a new page of the same section if `height` does not fit
    fn ensure_space(&mut self, height: f32) {
        if self.y + height > PAGE_BREAK_Y_MM {
            let section = self.pages.last().map(|p| p.section).unwrap_or(Section::Title);
            self.new_page(section);
        }
    }

    fn push(&mut self, op: DrawOp) {
        if self.pages.is_empty() {
            self.new_page(Section::Title);
        }
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn cell(&mut self, x: f32, width: f32, height: f32, text: &str, font: FontSpec, align: Align, border: bool) {
        let y = self.y;
        self.push(DrawOp::Cell {
            x,
            y,
            width,
            height,
            text: text.to_string(),
            font,
            align,
            border,
        });
    }

    /// Full-width cell, then move to the next line
    fn line(&mut self, height: f32, text: &str, font: FontSpec, align: Align) {
        self.cell(MARGIN_MM, USABLE_WIDTH_MM, height, text, font, align, false);
        self.ln(height);
    }

    fn ln(&mut self, height: f32) {
        self.y += height;
    }
}
