//! Report document model
//!
//! The assembler produces pages of draw operations; a renderer turns them
//! into PDF. Keeping this step data-only makes the layout testable without
//! a PDF backend.

use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub weight: FontWeight,
    pub size_pt: f32,
}

impl FontSpec {
    pub const fn regular(size_pt: f32) -> Self {
        Self { weight: FontWeight::Regular, size_pt }
    }

    pub const fn bold(size_pt: f32) -> Self {
        Self { weight: FontWeight::Bold, size_pt }
    }

    pub fn is_bold(&self) -> bool {
        self.weight == FontWeight::Bold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One draw call. Coordinates are mm from the top-left page corner.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Cell {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        text: String,
        font: FontSpec,
        align: Align,
        border: bool,
    },
    Image {
        /// Position in the attached image list
        index: usize,
        path: PathBuf,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

impl DrawOp {
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Cell { text, .. } => Some(text),
            DrawOp::Image { .. } => None,
        }
    }
}

/// Which part of the report a page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Title block and the General Information table
    Title,
    CableInformation,
    Photos,
    Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub section: Section,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(section: Section) -> Self {
        Self { section, ops: Vec::new() }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(DrawOp::text)
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|text| text == needle)
    }

    pub fn image_count(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Image { .. })).count()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    /// Report date; also stamped into the PDF metadata
    pub date: NaiveDate,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages_in(&self, section: Section) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(move |page| page.section == section)
    }

    /// First page holding a cell whose text equals `needle`
    pub fn page_with_text(&self, needle: &str) -> Option<&Page> {
        self.pages.iter().find(|page| page.contains_text(needle))
    }

    /// Every image op in page order
    pub fn images(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages
            .iter()
            .flat_map(|page| page.ops.iter())
            .filter(|op| matches!(op, DrawOp::Image { .. }))
    }
}
