use scireport::errors::AppError;
use scireport::export::raster::sniff_mime;
use scireport::models::figure::{DEFAULT_MIME_TYPE, FigureRegistry};
use scireport::models::form::{FormDefaults, FormSession, ScalarField};

mod common;
use common::tiny_png;

fn session_with_highlight(text: &str) -> FormSession {
    let mut s = FormSession::new(FormDefaults::default());
    s.set_scalar(ScalarField::Highlight, text).unwrap();
    s
}

/// Append `text` to the highlight, then attach a figure at the end.
fn add_after(s: &mut FormSession, text: &str, caption: &str) -> String {
    let mut narrative = s.fields.res_highlight.clone();
    narrative.push_str(text);
    s.set_scalar(ScalarField::Highlight, &narrative).unwrap();
    s.insert_figure(tiny_png(), "image/png", "plot.png", caption, None)
        .unwrap()
}

#[test]
fn add_requires_image_and_caption() {
    let mut reg = FigureRegistry::new();

    let err = reg.add(Vec::new(), "image/png", "a.png", "Roots").unwrap_err();
    assert_eq!(err.to_string(), "Please select an image.");

    let err = reg.add(tiny_png(), "image/png", "a.png", "   ").unwrap_err();
    assert_eq!(err.to_string(), "Please enter a caption.");

    assert!(reg.is_empty());
    assert_eq!(reg.counter(), 0);
}

#[test]
fn add_returns_sequential_tokens() {
    let mut reg = FigureRegistry::new();
    assert_eq!(reg.add(tiny_png(), "", "a.png", "One").unwrap(), "[FIG-1]");
    assert_eq!(reg.add(tiny_png(), "image/png", "b.png", "Two").unwrap(), "[FIG-2]");

    assert_eq!(reg.figures()[0].mime_type, DEFAULT_MIME_TYPE);
    assert_eq!(reg.figures()[1].local_index, 2);
    assert_ne!(reg.figures()[0].id, reg.figures()[1].id);
}

#[test]
fn token_goes_to_the_cursor() {
    let mut s = session_with_highlight("Roots grew deeper.");
    s.insert_figure(tiny_png(), "image/png", "r.png", "Roots", Some(5))
        .unwrap();
    assert_eq!(s.fields.res_highlight, "Roots [FIG-1] grew deeper.");
}

#[test]
fn token_goes_to_the_end_without_cursor() {
    let mut s = session_with_highlight("Yield rose");
    s.insert_figure(tiny_png(), "image/png", "y.png", "Yield", None)
        .unwrap();
    s.insert_figure(tiny_png(), "image/png", "z.png", "More", Some(500))
        .unwrap();
    assert_eq!(s.fields.res_highlight, "Yield rose [FIG-1] [FIG-2]");
}

#[test]
fn deleting_a_middle_figure_renumbers_tokens() {
    let mut s = session_with_highlight("");
    add_after(&mut s, "A", "first");
    add_after(&mut s, " B", "second");
    add_after(&mut s, " C", "third");
    assert_eq!(s.fields.res_highlight, "A [FIG-1] B [FIG-2] C [FIG-3]");

    let removed = s.delete_figure("2").unwrap();
    assert_eq!(removed.caption, "second");

    let figs = s.figures().figures();
    let idx: Vec<usize> = figs.iter().map(|f| f.local_index).collect();
    let captions: Vec<&str> = figs.iter().map(|f| f.caption.as_str()).collect();
    assert_eq!(idx, vec![1, 2]);
    assert_eq!(captions, vec!["first", "third"]);
    assert_eq!(s.fields.res_highlight, "A [FIG-1] B C [FIG-2]");
    assert!(s.figures().placeholder_check(&s.fields.res_highlight).is_consistent());
}

#[test]
fn remap_does_not_collide_with_lower_tokens() {
    let mut s = session_with_highlight("");
    add_after(&mut s, "x", "one");
    add_after(&mut s, " y", "two");
    // put FIG-2 ahead of FIG-1
    s.set_scalar(ScalarField::Highlight, "x [FIG-2] y [FIG-1]").unwrap();

    s.delete_figure("[FIG-1]").unwrap();
    assert_eq!(s.fields.res_highlight, "x [FIG-1] y");
    assert_eq!(s.figures().figures()[0].caption, "two");
}

#[test]
fn unknown_tokens_are_left_alone() {
    let mut s = session_with_highlight("");
    add_after(&mut s, "See", "one");
    add_after(&mut s, " and", "two");
    s.set_scalar(ScalarField::Highlight, "See [FIG-1] and [FIG-2] or [FIG-9]")
        .unwrap();

    s.delete_figure("FIG-1").unwrap();
    assert_eq!(s.fields.res_highlight, "See and [FIG-1] or [FIG-9]");

    let check = s.figures().placeholder_check(&s.fields.res_highlight);
    assert_eq!(check.unknown, vec![9]);
    assert!(check.missing.is_empty());
}

#[test]
fn find_by_id_index_or_token() {
    let mut s = session_with_highlight("");
    add_after(&mut s, "a", "one");
    add_after(&mut s, " b", "two");
    let id = s.figures().figures()[1].id.clone();

    for key in [id.as_str(), "2", "FIG-2", "[FIG-2]"] {
        assert_eq!(s.figures().find(key).unwrap().caption, "two", "key {key}");
    }
    assert!(s.figures().find("7").is_none());
}

#[test]
fn deleting_unknown_figure_fails() {
    let mut s = session_with_highlight("text");
    assert!(matches!(
        s.delete_figure("3"),
        Err(AppError::FigureNotFound(_))
    ));
}

#[test]
fn placeholder_check_reports_missing_and_repeated() {
    let mut s = session_with_highlight("");
    add_after(&mut s, "a", "one");
    add_after(&mut s, " b", "two");
    s.set_scalar(ScalarField::Highlight, "[FIG-1] then [FIG-1]").unwrap();

    let check = s.figures().placeholder_check(&s.fields.res_highlight);
    assert_eq!(check.missing, vec![2]);
    assert_eq!(check.duplicated, vec![1]);
    assert!(!check.is_consistent());
}

#[test]
fn only_decodable_formats_are_sniffed() {
    assert_eq!(sniff_mime(&tiny_png()), Some("image/png"));
    assert_eq!(sniff_mime(b"II*\0\x08\0\0\0"), None);
    assert_eq!(sniff_mime(b"plain text"), None);
}
