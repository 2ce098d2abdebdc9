use crate::cli::commands::Workspace;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::form::ScalarField;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::{selectable_years, today};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Set { field, value } = cmd {
        let mut ws = Workspace::open(cfg)?;
        ws.session.set_scalar(*field, value)?;
        ws.save()?;

        let stored = ws.session.scalar(*field);
        success(format!("{} set to '{}'", field.label(), stored));

        match field {
            ScalarField::Highlight => {
                info(format!("Word count: {}", ws.session.word_count()));
            }
            ScalarField::Year => {
                let years = selectable_years(today());
                if let Ok(y) = stored.parse::<i32>()
                    && !years.contains(&y)
                {
                    warning(format!(
                        "{y} is outside the usual reporting years ({}-{}).",
                        years[years.len() - 1],
                        years[0]
                    ));
                }
            }
            _ => {}
        }
    }
    Ok(())
}
