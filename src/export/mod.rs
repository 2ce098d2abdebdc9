// src/export/mod.rs

pub mod archive;
pub mod pdf;
pub mod raster;
pub mod report;

pub use archive::Archive;

use crate::ui::messages::success;
use std::path::Path;

/// Shared completion banner for exports.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} ready: {}", path.display()));
}
