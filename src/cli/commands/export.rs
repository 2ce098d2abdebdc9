use crate::cli::commands::Workspace;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::{Payload, validate};
use crate::errors::AppResult;
use crate::export::{archive, notify_export_success};
use crate::utils::path::expand_tilde;
use chrono::Utc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export { out, force } = cmd {
        let ws = Workspace::open(cfg)?;
        validate(&ws.session, &cfg.policy())?;

        let payload = Payload::build(&ws.session, Utc::now());
        let built = archive::build(&payload)?;

        let dir = out
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.output_path());
        let path = archive::write(&built, &dir, *force)?;

        ws.log.note(
            "export",
            &payload.report_stem(),
            &format!("Archive written to {}", path.display()),
        );
        notify_export_success("Report archive", &path);
    }
    Ok(())
}
