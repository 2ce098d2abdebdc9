use crate::cli::commands::{Workspace, ask_confirmation};
use crate::cli::parser::{Commands, FigureAction};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::raster::{rasterize, sniff_mime};
use crate::models::figure::{FigureRegistry, placeholder};
use crate::ui::messages::{info, success, warning};
use crate::utils::table::Table;

use std::fs;
use std::path::Path;

fn read_image(path: &str) -> AppResult<(Vec<u8>, &'static str, String)> {
    let data = fs::read(path)
        .map_err(|e| AppError::Validation(format!("Cannot read image {path}: {e}")))?;
    let unsupported = || AppError::Validation(format!("{path} is not a supported image file."));
    let mime = sniff_mime(&data).ok_or_else(unsupported)?;
    // Every figure is drawn into the PDF, so it has to decode.
    rasterize(&data).map_err(|_| unsupported())?;
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string());
    Ok((data, mime, name))
}

pub(crate) fn print_figures(figures: &FigureRegistry) {
    if figures.is_empty() {
        info("No figures attached.");
        return;
    }

    let mut table = Table::with_headers(&["Token", "File", "Type", "Size", "Caption"], 40);
    for f in figures.figures() {
        table.add_row(vec![
            placeholder(f.local_index),
            f.file_name.clone(),
            f.mime_type.clone(),
            format!("{} KB", f.data.len().div_ceil(1024)),
            f.caption.clone(),
        ]);
    }
    table.autosize(40);
    print!("{}", table.render());
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Figure { action } = cmd else {
        return Ok(());
    };

    let mut ws = Workspace::open(cfg)?;

    match action {
        FigureAction::Add { file, caption, at } => {
            let (data, mime, name) = read_image(file)?;
            let token = ws
                .session
                .insert_figure(data, mime, &name, caption, *at)?;
            ws.save()?;
            success(format!("{name} attached as {token}"));
        }

        FigureAction::Del { key, yes } => {
            let Some(figure) = ws.session.figures().find(key) else {
                return Err(AppError::FigureNotFound(key.clone()));
            };

            let prompt = format!(
                "Delete {} ({})? Later figures are renumbered.",
                placeholder(figure.local_index),
                figure.file_name
            );
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            let removed = ws.session.delete_figure(key)?;
            ws.save()?;
            success(format!(
                "{} removed; {} figure(s) left.",
                removed.file_name,
                ws.session.figures().len()
            ));
        }

        FigureAction::List => print_figures(ws.session.figures()),
    }

    let check = ws
        .session
        .figures()
        .placeholder_check(&ws.session.fields.res_highlight);
    if !check.is_consistent() {
        warning(format!(
            "Highlight tokens out of sync: missing {:?}, unknown {:?}, repeated {:?}",
            check.missing, check.unknown, check.duplicated
        ));
    }

    Ok(())
}
