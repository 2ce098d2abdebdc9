//! Column schemas of the six repeating tables.
//!
//! Column numbers are 1-based: column 0 of every row is its display index,
//! so `schema()[i]` describes `col_{i + 1}`.

use crate::core::duration::DurationMode;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Choice value that unlocks the free-text detail of a closed choice.
pub const OTHER: &str = "OTHER";

/// Title value that marks a project row as not applicable.
pub const NOT_APPLICABLE: &str = "NA";

/// Offset added to a journal impact factor to obtain its NAAS rating.
pub const NAAS_OFFSET: f64 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnKind {
    Text,
    LongText,
    Number,
    Date,
    Choice(&'static [&'static str]),
    /// Read-only cell filled from the `start` and `end` date columns.
    Duration {
        start: usize,
        end: usize,
        mode: DurationMode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub label: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    const fn new(label: &'static str, kind: ColumnKind) -> Self {
        Self { label, kind }
    }

    pub fn options(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            ColumnKind::Choice(opts) => Some(opts),
            _ => None,
        }
    }

    pub fn allows_other(&self) -> bool {
        self.options().is_some_and(|opts| opts.contains(&OTHER))
    }

    pub fn is_derived(&self) -> bool {
        matches!(self.kind, ColumnKind::Duration { .. })
    }
}

const AGENCIES: &[&str] = &["RKVY", "DST", "DBT", "ANRF", "SERB", OTHER];
const PROGRAM_TYPES: &[&str] = &["AICRP AGM", "AINP AGM", "Conference", "Symposium", OTHER];
const IPR_TYPES: &[&str] = &["Patent", "Copyright", "Trademark", "Design", "GI"];
const TECH_HEADS: &[&str] = &["Technology", "Varieties", "MoA Signed"];
const TRAINING_TYPES: &[&str] = &[
    "Summer/Winter School",
    "Training for Farmers/Government officials/Others",
    "ICAR-Industry Interface Meetings",
    OTHER,
];
const SPONSORS: &[&str] = &["ICAR", "RKVY", "DST", "DBT", "ANRF", "SERB", OTHER];

const PROJECTS: &[Column] = &[
    Column::new("Title", ColumnKind::Text),
    Column::new("Funding agency", ColumnKind::Choice(AGENCIES)),
    Column::new("Start date", ColumnKind::Date),
    Column::new("End date", ColumnKind::Date),
    Column::new(
        "Duration",
        ColumnKind::Duration {
            start: 3,
            end: 4,
            mode: DurationMode::Short,
        },
    ),
    Column::new("Budget", ColumnKind::Number),
];

const PROGRAMS: &[Column] = &[
    Column::new("Program type", ColumnKind::Choice(PROGRAM_TYPES)),
    Column::new("Start date", ColumnKind::Date),
    Column::new("End date", ColumnKind::Date),
    Column::new(
        "Duration",
        ColumnKind::Duration {
            start: 2,
            end: 3,
            mode: DurationMode::Full,
        },
    ),
    Column::new("Venue", ColumnKind::Text),
];

const IPR: &[Column] = &[
    Column::new("IPR type", ColumnKind::Choice(IPR_TYPES)),
    Column::new("Date", ColumnKind::Date),
    Column::new("Registration no.", ColumnKind::Text),
];

const TECH_COM: &[Column] = &[
    Column::new("Head", ColumnKind::Choice(TECH_HEADS)),
    Column::new("Name", ColumnKind::Text),
    Column::new("Licensee", ColumnKind::Text),
    Column::new("Date", ColumnKind::Date),
    Column::new("License fee", ColumnKind::Number),
];

const PUBLICATIONS: &[Column] = &[
    Column::new("Reference (APA)", ColumnKind::LongText),
    Column::new("Impact factor", ColumnKind::Text),
    Column::new("NAAS rating", ColumnKind::Text),
];

const TRAINING: &[Column] = &[
    Column::new("Training type", ColumnKind::Choice(TRAINING_TYPES)),
    Column::new("Training name", ColumnKind::Text),
    Column::new("Sponsor", ColumnKind::Choice(SPONSORS)),
    Column::new("Start date", ColumnKind::Date),
    Column::new("End date", ColumnKind::Date),
    Column::new(
        "Duration",
        ColumnKind::Duration {
            start: 4,
            end: 5,
            mode: DurationMode::Full,
        },
    ),
    Column::new("Participants", ColumnKind::Number),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Projects,
    Programs,
    Ipr,
    #[value(alias = "tech_com")]
    TechCom,
    #[value(alias = "pub")]
    Publications,
    Training,
}

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        TableKind::Projects,
        TableKind::Programs,
        TableKind::Ipr,
        TableKind::TechCom,
        TableKind::Publications,
        TableKind::Training,
    ];

    /// Key used in drafts and payloads.
    pub fn key(&self) -> &'static str {
        match self {
            TableKind::Projects => "projects",
            TableKind::Programs => "programs",
            TableKind::Ipr => "ipr",
            TableKind::TechCom => "tech_com",
            TableKind::Publications => "publications",
            TableKind::Training => "training",
        }
    }

    /// Section title in the generated document.
    pub fn title(&self) -> &'static str {
        match self {
            TableKind::Projects => "Externally Funded Projects",
            TableKind::Programs => "Programs Organized",
            TableKind::Ipr => "IPR Generated",
            TableKind::TechCom => "Technology Commercialization",
            TableKind::Publications => "Publications",
            TableKind::Training => "Training Conducted",
        }
    }

    pub fn schema(&self) -> &'static [Column] {
        match self {
            TableKind::Projects => PROJECTS,
            TableKind::Programs => PROGRAMS,
            TableKind::Ipr => IPR,
            TableKind::TechCom => TECH_COM,
            TableKind::Publications => PUBLICATIONS,
            TableKind::Training => TRAINING,
        }
    }

    /// Schema entry for a 1-based column number.
    pub fn column(&self, col: usize) -> Option<&'static Column> {
        col.checked_sub(1).and_then(|i| self.schema().get(i))
    }

    /// Column whose `NA` value disables the rest of the row.
    pub fn not_applicable_column(&self) -> Option<usize> {
        match self {
            TableKind::Projects => Some(1),
            _ => None,
        }
    }

    /// `(impact factor, NAAS rating)` column pair.
    pub fn rating_columns(&self) -> Option<(usize, usize)> {
        match self {
            TableKind::Publications => Some((2, 3)),
            _ => None,
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
