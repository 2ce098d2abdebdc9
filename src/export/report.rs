//! Layout of the formatted report document.

use crate::core::submit::Payload;
use crate::errors::AppResult;
use crate::export::pdf::PdfManager;
use crate::export::raster::{MAX_FIGURE_H, MAX_FIGURE_W, fit, rasterize};
use crate::models::schema::TableKind;
use crate::models::table::RowSnapshot;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 14.0;
const FACT_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 11.0;
const LINE_H: f32 = 18.0;

/// Labeled facts printed under the title.
fn facts(p: &Payload) -> [(&'static str, &str); 8] {
    [
        ("Scientist", p.scientist_name.as_str()),
        ("Institute", p.institute_name_short.as_str()),
        ("Month", p.month.as_str()),
        ("Year", p.year.as_str()),
        ("Google Scholar H-index", p.h_ind_google.as_str()),
        ("ResearchGate H-index", p.h_ind_res_gate.as_str()),
        ("Google Scholar Citations", p.num_cit_google.as_str()),
        ("ResearchGate Citations", p.num_cit_res_gate.as_str()),
    ]
}

/// One line per row: the non-empty values joined with `"; "`.
pub fn row_summary(row: &RowSnapshot) -> String {
    row.values().collect::<Vec<_>>().join("; ")
}

fn section(doc: &mut PdfManager, title: &str, rows: &[RowSnapshot]) {
    if rows.is_empty() {
        return;
    }
    let x = doc.margin();

    doc.ensure_space(0.0);
    doc.text(x, HEADING_SIZE, true, title);
    doc.advance(25.0);

    for (i, row) in rows.iter().enumerate() {
        doc.ensure_space(10.0);
        doc.text(x, BODY_SIZE, false, &format!("{}.", i + 1));
        doc.wrapped(x + 20.0, 500.0, BODY_SIZE, LINE_H, &row_summary(row));
        doc.advance(5.0);
    }
    doc.advance(20.0);
}

/// Render the payload as a paginated A4 document.
pub fn render_pdf(p: &Payload) -> AppResult<Vec<u8>> {
    let mut doc = PdfManager::new();
    let x = doc.margin();

    doc.text(
        x,
        TITLE_SIZE,
        true,
        &format!("Monthly Report of {} ({}, {})", p.scientist_name, p.month, p.year),
    );
    doc.advance(30.0);

    for (label, value) in facts(p) {
        doc.text(x, FACT_SIZE, false, &format!("{label}: {value}"));
        doc.advance(LINE_H);
    }
    doc.advance(20.0);

    for kind in TableKind::ALL {
        section(&mut doc, kind.title(), p.table(kind));
    }

    doc.ensure_space(0.0);
    doc.text(x, HEADING_SIZE, true, "Significant Research Findings");
    doc.advance(25.0);
    doc.wrapped(x, 520.0, BODY_SIZE, LINE_H, &p.res_highlight);
    doc.advance(20.0);

    if !p.images.is_empty() {
        doc.ensure_space(30.0);
        doc.text(x, HEADING_SIZE, true, "Figures Uploaded");
        doc.advance(30.0);

        for (i, img) in p.images.iter().enumerate() {
            let raster = rasterize(&img.data)?;
            let (w, h) = fit(raster.width, raster.height, MAX_FIGURE_W, MAX_FIGURE_H);

            if doc.cursor() + h + 60.0 > doc.page_height() {
                doc.new_page();
            }
            doc.image(&raster, x, w, h);
            doc.advance(10.0);

            let caption = if img.caption.trim().is_empty() {
                &img.name
            } else {
                &img.caption
            };
            doc.text(x, BODY_SIZE, false, &format!("Figure {}: {caption}", i + 1));
            doc.advance(30.0);
        }
    }

    Ok(doc.finish())
}
