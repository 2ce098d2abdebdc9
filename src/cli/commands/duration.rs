use crate::cli::parser::Commands;
use crate::core::duration::{DurationMode, describe_cells};
use crate::errors::AppResult;

pub fn handle(cmd: &Commands) -> AppResult<()> {
    if let Commands::Duration { start, end, full } = cmd {
        let mode = if *full {
            DurationMode::Full
        } else {
            DurationMode::Short
        };
        println!("{}", describe_cells(start, end, mode));
    }
    Ok(())
}
