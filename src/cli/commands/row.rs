use crate::cli::commands::{Workspace, ask_confirmation};
use crate::cli::parser::{Commands, RowAction};
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::schema::{OTHER, TableKind};
use crate::models::table::TableModel;
use crate::ui::messages::{info, success, warning};

/// Row that `row add` writes into: the trailing empty row if there is one,
/// otherwise a new row.
fn target_row(table: &mut TableModel) -> usize {
    match table.rows().last() {
        Some(last) if !last.has_content() => last.index,
        _ => table.append(),
    }
}

/// Write `values` into the editable columns of row `index`, left to right.
fn fill_row(table: &mut TableModel, index: usize, values: &[String]) -> AppResult<()> {
    let kind = table.kind();
    let editable = kind
        .schema()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_derived())
        .map(|(i, c)| (i + 1, c));

    for ((col, column), value) in editable.zip(values) {
        if value.is_empty() {
            continue;
        }
        match column.options() {
            Some(options) if column.allows_other() && !options.contains(&value.as_str()) => {
                table.set_field(index, col, OTHER)?;
                table.set_detail(index, col, value)?;
            }
            _ => table.set_field(index, col, value)?,
        }
    }
    Ok(())
}

fn editable_columns(kind: TableKind) -> usize {
    kind.schema().iter().filter(|c| !c.is_derived()).count()
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Row { action } = cmd else {
        return Ok(());
    };

    let mut ws = Workspace::open(cfg)?;

    match action {
        RowAction::Add { table, values } => {
            if values.len() > editable_columns(*table) {
                warning(format!(
                    "{} takes {} values; the extra ones are ignored.",
                    table,
                    editable_columns(*table)
                ));
            }

            let model = ws.session.table_mut(*table);
            let index = if values.is_empty() {
                model.append()
            } else {
                target_row(model)
            };
            fill_row(model, index, values)?;
            ws.save()?;

            if values.is_empty() {
                info("Empty rows are not kept in the draft until a value is set.");
            }
            success(format!("{} row {index} saved.", table.title()));
        }

        RowAction::Set {
            table,
            row,
            col,
            value,
            detail,
        } => {
            let model = ws.session.table_mut(*table);
            model.set_field(*row, *col, value)?;
            if let Some(text) = detail {
                model.set_detail(*row, *col, text)?;
            }
            ws.save()?;

            let model = ws.session.table(*table);
            let shown = model.row(*row)?.value(*col);
            success(format!(
                "{} row {row}, column {col} set to '{shown}'",
                table.title()
            ));
            if !model.missing_details().is_empty() {
                warning(format!("{OTHER} selected: add the value with --detail."));
            }
        }

        RowAction::Del { table, row, yes } => {
            ws.session.table(*table).row(*row)?;

            let prompt = format!("Delete row {row} of {}?", table.title());
            if !*yes && !ask_confirmation(&prompt) {
                info("Operation cancelled.");
                return Ok(());
            }

            ws.session.table_mut(*table).delete(*row)?;
            ws.session.ensure_rows();
            ws.save()?;
            success(format!("Row {row} of {} has been deleted.", table.title()));
        }
    }

    Ok(())
}
