//! Attached photographs
//!
//! Append-only list of image paths. Only `.png`, `.jpg` and `.jpeg` files are
//! accepted (case-insensitive); duplicates are kept in the order given.

use std::path::{Path, PathBuf};

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Check if a path has a supported image extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageList {
    paths: Vec<PathBuf>,
}

impl ImageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one path. Returns false when the extension is rejected.
    pub fn push(&mut self, path: impl Into<PathBuf>) -> bool {
        let path = path.into();
        if !is_supported_image(&path) {
            return false;
        }
        self.paths.push(path);
        true
    }

    /// Append several paths, returning how many were accepted.
    pub fn extend<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut accepted = 0;
        for path in paths {
            if self.push(path) {
                accepted += 1;
            }
        }
        accepted
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathBuf> {
        self.paths.iter()
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.paths
    }
}

impl<'a> IntoIterator for &'a ImageList {
    type Item = &'a PathBuf;
    type IntoIter = std::slice::Iter<'a, PathBuf>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
