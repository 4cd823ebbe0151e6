use crate::error::{ReportError, Result};
use cableway_common::images::is_supported_image;
use cableway_common::ImageList;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Image files directly inside `folder`, sorted by file name
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(ReportError::FolderNotFound(folder.display().to_string()));
    }

    let mut images: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1) // direct children only
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| is_supported_image(path))
        .collect();

    images.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(images)
}

/// Build the image list: explicit paths first, then the folder scan.
/// Explicit paths must exist; unsupported extensions are dropped.
pub fn collect_images(paths: &[PathBuf], folder: Option<&Path>) -> Result<ImageList> {
    let mut images = ImageList::new();

    for path in paths {
        if !path.exists() {
            return Err(ReportError::FileNotFound(path.display().to_string()));
        }
        if !images.push(path.clone()) {
            tracing::warn!(path = %path.display(), "not a png/jpg/jpeg file, ignored");
        }
    }

    if let Some(folder) = folder {
        images.extend(scan_folder(folder)?);
    }

    Ok(images)
}
