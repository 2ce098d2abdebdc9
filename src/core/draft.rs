//! Draft save / restore / clear.

use crate::errors::AppResult;
use crate::models::figure::Figure;
use crate::models::form::{FormSession, ReportFields};
use crate::models::schema::TableKind;
use crate::models::table::RowSnapshot;
use crate::storage::Storage;
use crate::storage::log::ActivityLog;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key of the one draft kept per user.
pub const DRAFT_KEY: &str = "scientist_draft_v1";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablesSnapshot {
    #[serde(default)]
    pub projects: Vec<RowSnapshot>,
    #[serde(default)]
    pub programs: Vec<RowSnapshot>,
    #[serde(default)]
    pub ipr: Vec<RowSnapshot>,
    #[serde(default)]
    pub tech_com: Vec<RowSnapshot>,
    #[serde(default)]
    pub publications: Vec<RowSnapshot>,
    #[serde(default)]
    pub training: Vec<RowSnapshot>,
}

impl TablesSnapshot {
    pub fn capture(session: &FormSession) -> Self {
        let rows = |kind: TableKind| session.table(kind).drafted();
        Self {
            projects: rows(TableKind::Projects),
            programs: rows(TableKind::Programs),
            ipr: rows(TableKind::Ipr),
            tech_com: rows(TableKind::TechCom),
            publications: rows(TableKind::Publications),
            training: rows(TableKind::Training),
        }
    }

    pub fn get(&self, kind: TableKind) -> &[RowSnapshot] {
        match kind {
            TableKind::Projects => &self.projects,
            TableKind::Programs => &self.programs,
            TableKind::Ipr => &self.ipr,
            TableKind::TechCom => &self.tech_com,
            TableKind::Publications => &self.publications,
            TableKind::Training => &self.training,
        }
    }
}

/// Everything needed to bring a form session back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    #[serde(flatten)]
    pub fields: ReportFields,
    #[serde(default)]
    pub tables: TablesSnapshot,
    #[serde(default)]
    pub figures: Vec<Figure>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl DraftSnapshot {
    pub fn capture(session: &FormSession) -> Self {
        Self {
            fields: session.fields.clone(),
            tables: TablesSnapshot::capture(session),
            figures: session.figures().figures().to_vec(),
            saved_at: Some(Utc::now()),
        }
    }

    /// Rebuild `session` from the snapshot: tables are emptied and refilled
    /// one stored row at a time.
    pub fn apply(self, session: &mut FormSession) {
        session.fields = self.fields;
        for kind in TableKind::ALL {
            let table = session.table_mut(kind);
            table.clear();
            for row in self.tables.get(kind) {
                table.push_restored(row);
            }
        }
        session.figures_mut().restore(self.figures);
        session.ensure_rows();
    }
}

pub struct DraftStore<S: Storage> {
    storage: S,
    log: Option<ActivityLog>,
}

impl<S: Storage> DraftStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage, log: None }
    }

    pub fn with_log(mut self, log: ActivityLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn note(&self, operation: &str, message: &str) {
        if let Some(log) = &self.log {
            log.note(operation, DRAFT_KEY, message);
        }
    }

    /// Serialize the whole session under [`DRAFT_KEY`], replacing any previous
    /// draft.
    pub fn save(&self, session: &FormSession) -> AppResult<DraftSnapshot> {
        let snapshot = DraftSnapshot::capture(session);
        let json = serde_json::to_string(&snapshot)?;
        if let Err(e) = self.storage.set_item(DRAFT_KEY, &json) {
            self.note("save_failed", &e.to_string());
            return Err(e);
        }
        self.note("save", &format!("Draft saved ({} bytes)", json.len()));
        Ok(snapshot)
    }

    /// Stored snapshot, if any. Malformed data is an error here.
    pub fn load(&self) -> AppResult<Option<DraftSnapshot>> {
        match self.storage.get_item(DRAFT_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Bring the stored draft into `session`.
    ///
    /// Returns `Ok(false)` when there is no draft or when it cannot be
    /// parsed; in the latter case the problem is logged and the session is
    /// left as a fresh form.
    pub fn restore(&self, session: &mut FormSession) -> AppResult<bool> {
        let Some(raw) = self.storage.get_item(DRAFT_KEY)? else {
            return Ok(false);
        };

        match serde_json::from_str::<DraftSnapshot>(&raw) {
            Ok(snapshot) => {
                snapshot.apply(session);
                Ok(true)
            }
            Err(e) => {
                self.note("restore_failed", &format!("Ignoring malformed draft: {e}"));
                session.reset();
                Ok(false)
            }
        }
    }

    /// Delete the draft and reset the form. Nothing happens unless the user
    /// confirmed.
    pub fn clear(&self, session: &mut FormSession, confirmed: bool) -> AppResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.discard()?;
        session.reset();
        Ok(true)
    }

    /// Delete the stored draft only.
    pub fn discard(&self) -> AppResult<()> {
        self.storage.remove_item(DRAFT_KEY)?;
        self.note("clear", "Draft removed");
        Ok(())
    }
}
