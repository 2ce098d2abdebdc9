use crate::cli::commands::{Workspace, ask_confirmation};
use crate::cli::parser::{Commands, DraftAction};
use crate::config::Config;
use crate::core::draft::DRAFT_KEY;
use crate::errors::AppResult;
use crate::models::schema::TableKind;
use crate::storage::Storage;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Draft { action } = cmd else {
        return Ok(());
    };

    let mut ws = Workspace::open(cfg)?;

    match action {
        DraftAction::Show => {
            let Some(snapshot) = ws.drafts.load()? else {
                info("No draft saved.");
                return Ok(());
            };

            let path = ws.drafts.storage().path_for(DRAFT_KEY);
            println!("🗂️  Draft      : {}", path.display());
            if let Some(at) = snapshot.saved_at {
                println!("🕒 Saved at   : {}", at.to_rfc3339());
            }
            println!("👤 Scientist  : {}", snapshot.fields.scientist_name);
            println!(
                "📅 Period     : {} {}",
                snapshot.fields.month, snapshot.fields.year
            );
            for kind in TableKind::ALL {
                println!("   {:<14} {} row(s)", kind.key(), snapshot.tables.get(kind).len());
            }
            println!("🖼️  Figures    : {}", snapshot.figures.len());
        }

        DraftAction::Clear { yes } => {
            if ws.drafts.storage().get_item(DRAFT_KEY)?.is_none() {
                info("No draft saved.");
                return Ok(());
            }

            let confirmed =
                *yes || ask_confirmation("Clear the saved draft? This action is irreversible.");
            if ws.drafts.clear(&mut ws.session, confirmed)? {
                success("Draft cleared.");
            } else {
                info("Operation cancelled.");
            }
        }
    }

    Ok(())
}
