//! The form session: scalar fields, the six tables and the figures.

use crate::errors::{AppError, AppResult};
use crate::models::figure::{Figure, FigureRegistry};
use crate::models::schema::TableKind;
use crate::models::table::TableModel;
use crate::utils::date::{self, MONTH_NAMES};
use crate::utils::text::{insert_at_char, sanitize_name, word_count};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SMD_NAME: &str = "CROP SCIENCE";
pub const DEFAULT_INSTITUTE: &str = "IIAB";

fn default_smd() -> String {
    DEFAULT_SMD_NAME.to_string()
}

fn default_institute() -> String {
    DEFAULT_INSTITUTE.to_string()
}

/// Scalar part of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportFields {
    #[serde(default = "default_smd")]
    pub smd_name: String,
    #[serde(default = "default_institute")]
    pub institute_name: String,
    #[serde(default)]
    pub scientist_name: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub h_ind_google: String,
    #[serde(default)]
    pub h_ind_res_gate: String,
    #[serde(default)]
    pub num_cit_google: String,
    #[serde(default)]
    pub num_cit_res_gate: String,
    #[serde(default)]
    pub res_highlight: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScalarField {
    SmdName,
    Institute,
    ScientistName,
    Month,
    Year,
    HIndexGoogle,
    HIndexResearchgate,
    CitationsGoogle,
    CitationsResearchgate,
    Highlight,
}

impl ScalarField {
    pub fn label(&self) -> &'static str {
        match self {
            ScalarField::SmdName => "SMD",
            ScalarField::Institute => "Institute",
            ScalarField::ScientistName => "Scientist",
            ScalarField::Month => "Month",
            ScalarField::Year => "Year",
            ScalarField::HIndexGoogle => "Google Scholar H-index",
            ScalarField::HIndexResearchgate => "ResearchGate H-index",
            ScalarField::CitationsGoogle => "Google Scholar Citations",
            ScalarField::CitationsResearchgate => "ResearchGate Citations",
            ScalarField::Highlight => "Research highlight",
        }
    }

    fn is_numeric(&self) -> bool {
        matches!(
            self,
            ScalarField::HIndexGoogle
                | ScalarField::HIndexResearchgate
                | ScalarField::CitationsGoogle
                | ScalarField::CitationsResearchgate
        )
    }
}

/// Values a fresh form starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub smd_name: String,
    pub institute_name: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            smd_name: default_smd(),
            institute_name: default_institute(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormSession {
    pub fields: ReportFields,
    tables: Vec<TableModel>,
    figures: FigureRegistry,
    defaults: FormDefaults,
}

impl FormSession {
    pub fn new(defaults: FormDefaults) -> Self {
        let mut session = Self {
            fields: blank_fields(&defaults),
            tables: TableKind::ALL.iter().map(|k| TableModel::new(*k)).collect(),
            figures: FigureRegistry::new(),
            defaults,
        };
        session.ensure_rows();
        session
    }

    pub fn defaults(&self) -> &FormDefaults {
        &self.defaults
    }

    /// Back to the state of a new form: default scalars, one empty row per
    /// table, no figures.
    pub fn reset(&mut self) {
        self.fields = blank_fields(&self.defaults);
        for t in &mut self.tables {
            t.clear();
        }
        self.figures.clear();
        self.ensure_rows();
    }

    /// Give every empty table one blank row to type into.
    pub fn ensure_rows(&mut self) {
        for t in &mut self.tables {
            if t.is_empty() {
                t.append();
            }
        }
    }

    pub fn table(&self, kind: TableKind) -> &TableModel {
        &self.tables[kind as usize]
    }

    pub fn table_mut(&mut self, kind: TableKind) -> &mut TableModel {
        &mut self.tables[kind as usize]
    }

    pub fn tables(&self) -> &[TableModel] {
        &self.tables
    }

    pub fn figures(&self) -> &FigureRegistry {
        &self.figures
    }

    pub(crate) fn figures_mut(&mut self) -> &mut FigureRegistry {
        &mut self.figures
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.fields.res_highlight)
    }

    pub fn scalar(&self, field: ScalarField) -> &str {
        let f = &self.fields;
        match field {
            ScalarField::SmdName => &f.smd_name,
            ScalarField::Institute => &f.institute_name,
            ScalarField::ScientistName => &f.scientist_name,
            ScalarField::Month => &f.month,
            ScalarField::Year => &f.year,
            ScalarField::HIndexGoogle => &f.h_ind_google,
            ScalarField::HIndexResearchgate => &f.h_ind_res_gate,
            ScalarField::CitationsGoogle => &f.num_cit_google,
            ScalarField::CitationsResearchgate => &f.num_cit_res_gate,
            ScalarField::Highlight => &f.res_highlight,
        }
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: &str) -> AppResult<()> {
        let value = match field {
            ScalarField::ScientistName => sanitize_name(value),
            ScalarField::Month => normalize_month(value)?,
            ScalarField::Year => {
                let v = value.trim();
                if !v.is_empty() && (v.len() != 4 || v.parse::<u16>().is_err()) {
                    return Err(AppError::Validation(format!("Invalid year: {v}")));
                }
                v.to_string()
            }
            f if f.is_numeric() => {
                let v = value.trim();
                if !v.is_empty() && v.parse::<f64>().is_err() {
                    return Err(AppError::Validation(format!(
                        "{} must be a number, got '{v}'",
                        f.label()
                    )));
                }
                v.to_string()
            }
            _ => value.to_string(),
        };

        let f = &mut self.fields;
        let slot = match field {
            ScalarField::SmdName => &mut f.smd_name,
            ScalarField::Institute => &mut f.institute_name,
            ScalarField::ScientistName => &mut f.scientist_name,
            ScalarField::Month => &mut f.month,
            ScalarField::Year => &mut f.year,
            ScalarField::HIndexGoogle => &mut f.h_ind_google,
            ScalarField::HIndexResearchgate => &mut f.h_ind_res_gate,
            ScalarField::CitationsGoogle => &mut f.num_cit_google,
            ScalarField::CitationsResearchgate => &mut f.num_cit_res_gate,
            ScalarField::Highlight => &mut f.res_highlight,
        };
        *slot = value;
        Ok(())
    }

    /// Add a figure and drop its token into the highlight at character
    /// offset `cursor` (end of text when `None`).
    pub fn insert_figure(
        &mut self,
        data: Vec<u8>,
        mime_type: &str,
        file_name: &str,
        caption: &str,
        cursor: Option<usize>,
    ) -> AppResult<String> {
        let token = self.figures.add(data, mime_type, file_name, caption)?;
        insert_at_char(
            &mut self.fields.res_highlight,
            cursor,
            &format!(" {token}"),
        );
        Ok(token)
    }

    /// Delete a figure by id, local index or token, renumbering the rest.
    pub fn delete_figure(&mut self, key: &str) -> AppResult<Figure> {
        let id = self
            .figures
            .find(key)
            .map(|f| f.id.clone())
            .ok_or_else(|| AppError::FigureNotFound(key.to_string()))?;
        self.figures.delete(&id, &mut self.fields.res_highlight)
    }
}

fn blank_fields(defaults: &FormDefaults) -> ReportFields {
    let (month, year) = date::previous_month(date::today());
    ReportFields {
        smd_name: defaults.smd_name.clone(),
        institute_name: defaults.institute_name.clone(),
        scientist_name: String::new(),
        month: month.to_string(),
        year: year.to_string(),
        h_ind_google: String::new(),
        h_ind_res_gate: String::new(),
        num_cit_google: String::new(),
        num_cit_res_gate: String::new(),
        res_highlight: String::new(),
    }
}

/// Accept `march`, `Mar` or `3` and store the full month name.
fn normalize_month(value: &str) -> AppResult<String> {
    let v = value.trim();
    if v.is_empty() {
        return Ok(String::new());
    }
    if let Ok(n) = v.parse::<u32>() {
        return date::month_name(n)
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(format!("Invalid month: {v}")));
    }
    let lower = v.to_lowercase();
    MONTH_NAMES
        .iter()
        .find(|m| m.to_lowercase() == lower || (lower.len() >= 3 && m.to_lowercase().starts_with(&lower)))
        .map(|m| m.to_string())
        .ok_or_else(|| AppError::Validation(format!("Invalid month: {v}")))
}
