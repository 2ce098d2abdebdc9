#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use scireport::models::form::{FormDefaults, FormSession, ScalarField};
use scireport::models::schema::TableKind;
use std::env;
use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

pub fn scireport() -> Command {
    cargo_bin_cmd!("scireport")
}

/// Fresh, empty directory inside the system temp dir.
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("scireport_{name}"));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).unwrap();
    path
}

/// `temp_dir` as a string, ready for `--storage`.
pub fn temp_storage(name: &str) -> String {
    temp_dir(name).to_string_lossy().to_string()
}

/// A 4x3 red PNG.
pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbImage::from_pixel(4, 3, image::Rgb([200, 30, 30]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// A session that passes validation: name, period, highlight, one project
/// and one publication.
pub fn filled_session() -> FormSession {
    let mut s = FormSession::new(FormDefaults::default());
    s.set_scalar(ScalarField::ScientistName, "Dr. Asha Rao").unwrap();
    s.set_scalar(ScalarField::Month, "March").unwrap();
    s.set_scalar(ScalarField::Year, "2025").unwrap();
    s.set_scalar(ScalarField::HIndexGoogle, "12").unwrap();
    s.set_scalar(
        ScalarField::Highlight,
        "Drought tolerant lines were screened under rainout shelters.",
    )
    .unwrap();

    let projects = s.table_mut(TableKind::Projects);
    projects.set_field(1, 1, "Root architecture").unwrap();
    projects.set_field(1, 2, "DST").unwrap();
    projects.set_field(1, 3, "2025-03-01").unwrap();
    projects.set_field(1, 4, "2025-03-10").unwrap();
    projects.set_field(1, 6, "1200000").unwrap();

    let pubs = s.table_mut(TableKind::Publications);
    pubs.set_field(1, 1, "Rao, A. (2025). Deeper roots. Plant Journal.")
        .unwrap();
    pubs.set_field(1, 2, "2.5").unwrap();

    s
}
