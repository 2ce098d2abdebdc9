use crate::cli::commands::Workspace;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::submit::SubmissionPipeline;
use crate::errors::AppResult;
use crate::export::notify_export_success;
use crate::transport::HttpTransport;
use crate::ui::messages::{info, success, warning};
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        out,
        endpoint,
        force,
    } = cmd
    {
        let mut ws = Workspace::open(cfg)?;

        let check = ws
            .session
            .figures()
            .placeholder_check(&ws.session.fields.res_highlight);
        if !check.missing.is_empty() {
            warning(format!(
                "Figures {:?} are not referenced in the research highlight.",
                check.missing
            ));
        }

        let endpoint = endpoint.as_deref().unwrap_or(&cfg.endpoint);
        let transport = HttpTransport::new(endpoint, cfg.submit_timeout_secs)?;
        info(format!("Submitting to {}…", transport.endpoint()));

        let dir = out
            .as_deref()
            .map(expand_tilde)
            .unwrap_or_else(|| cfg.output_path());
        let pipeline = SubmissionPipeline::new(&ws.drafts, &transport, cfg.policy())
            .with_output(dir, *force)
            .with_log(ws.log.clone());
        let receipt = pipeline.submit(&mut ws.session)?;

        success("Report submitted successfully!");
        if !receipt.draft_cleared {
            warning("The report was delivered but the draft could not be removed.");
        }
        if let Some(path) = &receipt.path {
            notify_export_success("Report archive", path);
        }
    }
    Ok(())
}
