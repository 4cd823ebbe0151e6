pub mod filename;
pub mod pdf;

use crate::error::{ReportError, Result};
use cableway_common::export::assembler::{assemble_with, ReportOptions};
use cableway_common::{FormSnapshot, ImageList};
use chrono::NaiveDate;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

pub use filename::report_file_name;
pub use pdf::{render_pdf, RenderedPdf};

/// Outcome of a successful generation
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub path: PathBuf,
    pub file_name: String,
    pub page_count: usize,
    pub placed_images: usize,
    pub skipped_images: usize,
}

/// Generate with the default title and photo grid
pub fn generate_report(
    snapshot: &FormSnapshot,
    images: &ImageList,
    date: NaiveDate,
    output_dir: &Path,
) -> Result<GeneratedReport> {
    generate_report_with(snapshot, images, date, output_dir, &ReportOptions::default())
}

/// Validate the file name, assemble, render and write the report in one go.
/// Nothing is left at the final path unless the whole document was written.
pub fn generate_report_with(
    snapshot: &FormSnapshot,
    images: &ImageList,
    date: NaiveDate,
    output_dir: &Path,
    options: &ReportOptions,
) -> Result<GeneratedReport> {
    let file_name = report_file_name(snapshot, date)?;
    let path = output_dir.join(&file_name);

    let document = assemble_with(snapshot, images, date, options);
    let rendered = render_pdf(&document)?;

    write_atomically(&path, &rendered.bytes)?;
    info!(
        path = %path.display(),
        pages = rendered.page_count,
        placed = rendered.placed_images,
        skipped = rendered.skipped_images,
        "report written"
    );

    Ok(GeneratedReport {
        path,
        file_name,
        page_count: rendered.page_count,
        placed_images: rendered.placed_images,
        skipped_images: rendered.skipped_images,
    })
}

/// Write to a temp file next to `path`, then move it into place
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let write_err = |source: std::io::Error| ReportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_err)?;
    temp.write_all(bytes).map_err(write_err)?;
    temp.as_file().sync_all().map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_atomically_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"old").unwrap();

        write_atomically(&path, b"new").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_atomically_missing_dir() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("report.pdf");
        let result = write_atomically(&path, b"data");
        assert!(matches!(result, Err(ReportError::OutputWrite { .. })));
        assert!(!path.exists());
    }
}
