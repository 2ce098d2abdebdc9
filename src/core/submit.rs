//! Validation, payload assembly and delivery of a finished report.

use crate::core::draft::DraftStore;
use crate::errors::{AppError, AppResult};
use crate::export::archive::{self, Archive};
use crate::models::figure::{Figure, base64_bytes};
use crate::models::form::FormSession;
use crate::models::schema::TableKind;
use crate::models::table::RowSnapshot;
use crate::storage::Storage;
use crate::storage::log::ActivityLog;
use crate::transport::Transport;
use crate::utils::text::{institute_short_code, word_count};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Accepted length of the research highlight, in words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitPolicy {
    pub min_words: usize,
    pub max_words: usize,
}

impl Default for SubmitPolicy {
    fn default() -> Self {
        Self {
            min_words: 1,
            max_words: 500,
        }
    }
}

/// Reject a report that cannot be sent. Nothing is mutated.
pub fn validate(session: &FormSession, policy: &SubmitPolicy) -> AppResult<()> {
    if session.fields.scientist_name.trim().is_empty() {
        return Err(AppError::Validation("Please enter scientist name".into()));
    }

    let words = word_count(&session.fields.res_highlight);
    if words < policy.min_words || words > policy.max_words {
        return Err(AppError::Validation(format!(
            "Research highlight must be between {}-{} words. Current: {} words.",
            policy.min_words, policy.max_words, words
        )));
    }

    for table in session.tables() {
        if let Some((row, label)) = table.missing_details().first() {
            return Err(AppError::Validation(format!(
                "{}: row {row} selects OTHER but '{label}' is not specified",
                table.kind().title()
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub name: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub caption: String,
    #[serde(rename = "localIndex")]
    pub local_index: usize,
}

impl From<&Figure> for ImagePayload {
    fn from(f: &Figure) -> Self {
        Self {
            name: f.file_name.clone(),
            mime_type: f.mime_type.clone(),
            data: f.data.clone(),
            caption: f.caption.clone(),
            local_index: f.local_index,
        }
    }
}

/// Document posted to the endpoint and stored in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub smd_name: String,
    pub institute_name_short: String,
    pub scientist_name: String,
    pub month: String,
    pub year: String,
    pub h_ind_google: String,
    pub h_ind_res_gate: String,
    pub num_cit_google: String,
    pub num_cit_res_gate: String,
    pub projects: Vec<RowSnapshot>,
    pub programs: Vec<RowSnapshot>,
    pub ipr: Vec<RowSnapshot>,
    pub tech_com: Vec<RowSnapshot>,
    pub publications: Vec<RowSnapshot>,
    pub training: Vec<RowSnapshot>,
    pub res_highlight: String,
    pub images: Vec<ImagePayload>,
    pub submission_timestamp: DateTime<Utc>,
}

impl Payload {
    pub fn build(session: &FormSession, now: DateTime<Utc>) -> Self {
        let f = &session.fields;
        let rows = |kind: TableKind| session.table(kind).persisted();
        Self {
            smd_name: f.smd_name.clone(),
            institute_name_short: institute_short_code(&f.institute_name),
            scientist_name: f.scientist_name.clone(),
            month: f.month.clone(),
            year: f.year.clone(),
            h_ind_google: f.h_ind_google.clone(),
            h_ind_res_gate: f.h_ind_res_gate.clone(),
            num_cit_google: f.num_cit_google.clone(),
            num_cit_res_gate: f.num_cit_res_gate.clone(),
            projects: rows(TableKind::Projects),
            programs: rows(TableKind::Programs),
            ipr: rows(TableKind::Ipr),
            tech_com: rows(TableKind::TechCom),
            publications: rows(TableKind::Publications),
            training: rows(TableKind::Training),
            res_highlight: f.res_highlight.clone(),
            images: session
                .figures()
                .figures()
                .iter()
                .map(ImagePayload::from)
                .collect(),
            submission_timestamp: now,
        }
    }

    pub fn table(&self, kind: TableKind) -> &[RowSnapshot] {
        match kind {
            TableKind::Projects => &self.projects,
            TableKind::Programs => &self.programs,
            TableKind::Ipr => &self.ipr,
            TableKind::TechCom => &self.tech_com,
            TableKind::Publications => &self.publications,
            TableKind::Training => &self.training,
        }
    }

    /// `Scientist_Report_<name>_<month>_<year>`, shared by every exported
    /// file.
    pub fn report_stem(&self) -> String {
        let name: String = self
            .scientist_name
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
            .collect();
        format!("Scientist_Report_{}_{}_{}", name, self.month, self.year)
    }
}

/// What a successful submission leaves behind.
#[derive(Debug, Clone)]
pub struct Receipt {
    pub payload: Payload,
    pub archive: Archive,
    /// Where the archive was written, when an output directory was given.
    pub path: Option<PathBuf>,
    /// False when the draft could not be removed after delivery.
    pub draft_cleared: bool,
}

struct Output {
    dir: PathBuf,
    force: bool,
}

pub struct SubmissionPipeline<'a, S: Storage, T: Transport> {
    drafts: &'a DraftStore<S>,
    transport: &'a T,
    policy: SubmitPolicy,
    output: Option<Output>,
    log: Option<ActivityLog>,
}

impl<'a, S: Storage, T: Transport> SubmissionPipeline<'a, S, T> {
    pub fn new(drafts: &'a DraftStore<S>, transport: &'a T, policy: SubmitPolicy) -> Self {
        Self {
            drafts,
            transport,
            policy,
            output: None,
            log: None,
        }
    }

    /// Also write the archive into `dir` once the report is delivered.
    pub fn with_output(mut self, dir: PathBuf, force: bool) -> Self {
        self.output = Some(Output { dir, force });
        self
    }

    pub fn with_log(mut self, log: ActivityLog) -> Self {
        self.log = Some(log);
        self
    }

    fn note(&self, operation: &str, target: &str, message: &str) {
        if let Some(log) = &self.log {
            log.note(operation, target, message);
        }
    }

    /// Validate, build the archive, deliver, write the archive, then drop
    /// the draft and reset the form.
    ///
    /// The draft and the session are only touched once every step has
    /// succeeded. A report that fails to render is never sent.
    pub fn submit(&self, session: &mut FormSession) -> AppResult<Receipt> {
        validate(session, &self.policy)?;

        let payload = Payload::build(session, Utc::now());
        let stem = payload.report_stem();
        let built = archive::build(&payload)?;
        let path = match &self.output {
            Some(out) => Some(archive::target(&built, &out.dir, out.force)?),
            None => None,
        };

        let body = serde_json::to_vec(&payload)?;
        if let Err(e) = self.transport.send(&body) {
            self.note("submit_failed", &stem, &e.to_string());
            return Err(e);
        }
        self.note("submit", &stem, &format!("Report delivered ({} bytes)", body.len()));

        if let Some(path) = &path {
            if let Err(e) = archive::save(&built, path) {
                self.note("export_failed", &stem, &e.to_string());
                return Err(AppError::Export(format!(
                    "report delivered, but {} could not be written ({e}); the draft is kept",
                    path.display()
                )));
            }
            self.note("export", &stem, &format!("Archive written to {}", path.display()));
        }

        let draft_cleared = match self.drafts.discard() {
            Ok(()) => true,
            Err(e) => {
                self.note("clear_failed", &stem, &e.to_string());
                false
            }
        };
        session.reset();

        Ok(Receipt {
            payload,
            archive: built,
            path,
            draft_cleared,
        })
    }
}
