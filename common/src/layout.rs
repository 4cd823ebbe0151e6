//! Layout settings
//!
//! All positions are millimetres measured from the top-left corner of the
//! page. The renderer flips to PDF coordinates.

// ============================================
// Page (mm)
// ============================================

/// A4 size (mm)
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// Margin on all sides (mm)
pub const MARGIN_MM: f32 = 20.0;

/// Printable width (mm)
pub const USABLE_WIDTH_MM: f32 = A4_WIDTH_MM - MARGIN_MM * 2.0; // 170mm

/// Lowest y a row may reach before a page break (mm)
pub const PAGE_BREAK_Y_MM: f32 = A4_HEIGHT_MM - MARGIN_MM; // 277mm

// ============================================
// Text and tables
// ============================================

pub const TITLE_FONT_PT: f32 = 16.0;
pub const HEADING_FONT_PT: f32 = 14.0;
pub const TABLE_FONT_PT: f32 = 12.0;
pub const TITLE_LINE_FONT_PT: f32 = 10.0;

pub const TITLE_HEIGHT_MM: f32 = 10.0;
pub const TITLE_LINE_HEIGHT_MM: f32 = 8.0;
pub const HEADING_HEIGHT_MM: f32 = 10.0;

/// Table cell size (mm)
pub const TABLE_COL_WIDTH_MM: f32 = 80.0;
pub const TABLE_ROW_HEIGHT_MM: f32 = 10.0;

/// Summary page
pub const SUMMARY_LABEL_WIDTH_MM: f32 = 60.0;
pub const SUMMARY_LABEL_HEIGHT_MM: f32 = 10.0;
pub const SUMMARY_LINE_HEIGHT_MM: f32 = 8.0;
pub const SUMMARY_GAP_MM: f32 = 2.0;

/// Average Helvetica advance as a fraction of the font size
const REGULAR_ADVANCE: f32 = 0.5;
const BOLD_ADVANCE: f32 = 0.55;

/// Horizontal padding inside a cell (mm)
pub const CELL_PADDING_MM: f32 = 1.0;

// ============================================
// Conversion
// ============================================

/// mm → pt (1mm = 72/25.4 pt ≈ 2.835pt)
pub const MM_TO_PT: f32 = 72.0 / 25.4;

#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

/// Estimated width of a Helvetica string (mm)
pub fn text_width_mm(text: &str, size_pt: f32, bold: bool) -> f32 {
    let advance = if bold { BOLD_ADVANCE } else { REGULAR_ADVANCE };
    pt_to_mm(text.chars().count() as f32 * size_pt * advance)
}

/// Greedy word wrap to `width_mm`. Always returns at least one line; words
/// longer than the width are broken by character.
pub fn wrap_text(text: &str, width_mm: f32, size_pt: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if text_width_mm(&candidate, size_pt, bold) <= width_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            // word wider than the line: split by character
            for ch in word.chars() {
                current.push(ch);
                if text_width_mm(&current, size_pt, bold) > width_mm && current.chars().count() > 1 {
                    current.pop();
                    lines.push(std::mem::take(&mut current));
                    current.push(ch);
                }
            }
        }
        lines.push(current);
    }

    lines
}

// ============================================
// Photo grid
// ============================================

/// Photo box (mm)
pub const PHOTO_WIDTH_MM: f32 = 50.0;
pub const PHOTO_HEIGHT_MM: f32 = 40.0;

/// Cell pitch (mm)
pub const PHOTO_X_SPACING_MM: f32 = 60.0;
pub const PHOTO_Y_SPACING_MM: f32 = 50.0;

/// Grid origin (mm)
pub const PHOTO_X_START_MM: f32 = 20.0;
pub const PHOTO_Y_START_MM: f32 = 40.0;

pub const PHOTO_COLUMNS: usize = 3;
pub const PHOTO_ROWS_PER_PAGE: usize = 2;

/// Where one photo lands
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoSlot {
    /// Photo page, counted from the first photo page
    pub page: usize,
    pub column: usize,
    pub row: usize,
    pub x_mm: f32,
    pub y_mm: f32,
}

#[derive(Debug, Clone)]
pub struct PhotoGrid {
    pub columns: usize,
    pub rows_per_page: usize,
    pub x_start_mm: f32,
    pub y_start_mm: f32,
    pub x_spacing_mm: f32,
    pub y_spacing_mm: f32,
    pub photo_width_mm: f32,
    pub photo_height_mm: f32,
}

impl Default for PhotoGrid {
    fn default() -> Self {
        Self {
            columns: PHOTO_COLUMNS,
            rows_per_page: PHOTO_ROWS_PER_PAGE,
            x_start_mm: PHOTO_X_START_MM,
            y_start_mm: PHOTO_Y_START_MM,
            x_spacing_mm: PHOTO_X_SPACING_MM,
            y_spacing_mm: PHOTO_Y_SPACING_MM,
            photo_width_mm: PHOTO_WIDTH_MM,
            photo_height_mm: PHOTO_HEIGHT_MM,
        }
    }
}

impl PhotoGrid {
    /// Rows placed on one page: `rows_per_page`, cut short where the next
    /// row would cross the bottom margin. Always at least one.
    pub fn rows_on_page(&self) -> usize {
        let mut rows = 1;
        while rows < self.rows_per_page && !self.overflows(self.y_start_mm + rows as f32 * self.y_spacing_mm) {
            rows += 1;
        }
        rows
    }

    pub fn per_page(&self) -> usize {
        self.columns * self.rows_on_page()
    }

    /// Slot of photo `index`. The column never depends on the page.
    pub fn slot(&self, index: usize) -> PhotoSlot {
        let column = index % self.columns;
        let row = (index % self.per_page()) / self.columns;
        PhotoSlot {
            page: index / self.per_page(),
            column,
            row,
            x_mm: self.x_start_mm + column as f32 * self.x_spacing_mm,
            y_mm: self.y_start_mm + row as f32 * self.y_spacing_mm,
        }
    }

    /// Number of photo pages for `count` photos
    pub fn page_count(&self, count: usize) -> usize {
        count.div_ceil(self.per_page())
    }

    /// True when a photo placed at `y_mm` would cross the bottom margin
    pub fn overflows(&self, y_mm: f32) -> bool {
        y_mm + self.photo_height_mm > PAGE_BREAK_Y_MM
    }
}
