//! The downloadable archive: payload JSON + formatted PDF in one zip.

use crate::core::submit::Payload;
use crate::errors::{AppError, AppResult};
use crate::export::report::render_pdf;
use crate::ui::messages::{info, warning};
use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A fully built archive, still in memory.
#[derive(Debug, Clone)]
pub struct Archive {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

fn zip_err(e: zip::result::ZipError) -> AppError {
    AppError::Export(format!("zip: {e}"))
}

fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated)
}

/// Build the archive for `payload`. Nothing touches the disk, so a failure
/// here never leaves a partial file behind.
pub fn build(payload: &Payload) -> AppResult<Archive> {
    let stem = payload.report_stem();
    let json = serde_json::to_string_pretty(payload)?;
    let pdf = render_pdf(payload)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file(format!("{stem}.json"), deflated())
        .map_err(zip_err)?;
    zip.write_all(json.as_bytes())?;

    zip.start_file(format!("{stem}.pdf"), deflated())
        .map_err(zip_err)?;
    zip.write_all(&pdf)?;

    let bytes = zip.finish().map_err(zip_err)?.into_inner();

    Ok(Archive {
        file_name: format!("{stem}.zip"),
        bytes,
    })
}

fn confirm_overwrite(path: &Path) -> AppResult<bool> {
    warning(format!("The file '{}' already exists.", path.display()));
    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;

    let yes = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
    if yes {
        info("Existing archive will be overwritten.");
    }
    Ok(yes)
}

/// Path `archive` will take inside `dir`, creating `dir` if needed. An
/// existing file is only replaced with `force` or the user's consent.
pub fn target(archive: &Archive, dir: &Path, force: bool) -> AppResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&archive.file_name);
    if path.exists() && !force && !confirm_overwrite(&path)? {
        return Err(AppError::Export(format!(
            "existing file not overwritten: {}",
            path.display()
        )));
    }
    Ok(path)
}

pub fn save(archive: &Archive, path: &Path) -> AppResult<()> {
    fs::write(path, &archive.bytes)?;
    Ok(())
}

/// Write `archive` into `dir`, asking before overwriting unless `force`.
pub fn write(archive: &Archive, dir: &Path, force: bool) -> AppResult<PathBuf> {
    let path = target(archive, dir, force)?;
    save(archive, &path)?;
    Ok(path)
}
