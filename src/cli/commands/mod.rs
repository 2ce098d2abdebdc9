pub mod config;
pub mod draft;
pub mod duration;
pub mod export;
pub mod figure;
pub mod init;
pub mod log;
pub mod row;
pub mod set;
pub mod show;
pub mod submit;

use crate::config::Config;
use crate::core::draft::DraftStore;
use crate::errors::AppResult;
use crate::models::form::FormSession;
use crate::storage::FileStorage;
use crate::storage::log::ActivityLog;
use crate::ui::messages::warning;

use std::io::{self, Write};

/// One form session: the draft restored at start, saved back on request.
pub(crate) struct Workspace {
    pub drafts: DraftStore<FileStorage>,
    pub log: ActivityLog,
    pub session: FormSession,
    pub restored: bool,
}

impl Workspace {
    pub fn open(cfg: &Config) -> AppResult<Self> {
        let dir = cfg.storage_path();
        let log = ActivityLog::in_dir(&dir);
        let storage = FileStorage::new(&dir).with_quota(cfg.storage_quota_bytes);
        let drafts = DraftStore::new(storage).with_log(log.clone());

        let mut session = FormSession::new(cfg.form_defaults());
        let restored = drafts.restore(&mut session)?;

        Ok(Self {
            drafts,
            log,
            session,
            restored,
        })
    }

    pub fn save(&self) -> AppResult<()> {
        self.drafts.save(&self.session)?;
        Ok(())
    }
}

/// Ask a yes/no confirmation from the user
pub(crate) fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}
