use crate::cli::commands::Workspace;
use crate::cli::commands::figure::print_figures;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::form::{FormSession, ScalarField};
use crate::models::schema::TableKind;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;

const CELL_WIDTH: usize = 28;

const SCALARS: [ScalarField; 9] = [
    ScalarField::SmdName,
    ScalarField::Institute,
    ScalarField::ScientistName,
    ScalarField::Month,
    ScalarField::Year,
    ScalarField::HIndexGoogle,
    ScalarField::HIndexResearchgate,
    ScalarField::CitationsGoogle,
    ScalarField::CitationsResearchgate,
];

fn print_table(session: &FormSession, kind: TableKind) {
    let model = session.table(kind);
    let mut headers = vec!["#"];
    headers.extend(kind.schema().iter().map(|c| c.label));

    let mut table = Table::with_headers(&headers, CELL_WIDTH);
    for row in model.rows() {
        let mut cells = vec![row.index.to_string()];
        cells.extend(row.cells.iter().map(|c| {
            if c.disabled {
                "-".to_string()
            } else {
                c.persisted().to_string()
            }
        }));
        table.add_row(cells);
    }
    table.autosize(CELL_WIDTH);

    println!("{} ({})", kind.title(), kind);
    print!("{}", table.render());
    println!();
}

pub fn handle(_cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let ws = Workspace::open(cfg)?;
    let session = &ws.session;

    if !ws.restored {
        info("No draft found: showing a new form.");
    }

    header("Report");
    let width = SCALARS.iter().map(|f| f.label().len()).max().unwrap_or(0);
    for field in SCALARS {
        println!("{:<width$} : {}", field.label(), session.scalar(field));
    }
    println!();

    header("Activities");
    for kind in TableKind::ALL {
        print_table(session, kind);
    }

    header(format!("Research highlight ({} words)", session.word_count()));
    println!("{}\n", session.fields.res_highlight);

    header("Figures");
    print_figures(session.figures());

    Ok(())
}
