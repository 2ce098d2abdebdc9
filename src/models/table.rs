//! Repeating-row tables.
//!
//! A [`TableModel`] is the source of truth for one section of the report.
//! Display indices live in the rows and are renumbered on every deletion so
//! they always read 1..N.

use crate::core::duration::describe_cells;
use crate::errors::{AppError, AppResult};
use crate::models::schema::{ColumnKind, NAAS_OFFSET, NOT_APPLICABLE, OTHER, TableKind};
use crate::utils::date::parse_date;
use serde::de::{Deserializer, Error as _};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub value: String,
    /// Free-text detail of a closed choice. `Some` while `OTHER` is selected,
    /// in which case it is also required.
    pub detail: Option<String>,
    /// Set on every cell but the title of a project marked `NA`.
    pub disabled: bool,
    /// Read-only: derived durations and computed NAAS ratings.
    pub locked: bool,
}

impl Cell {
    pub fn is_revealed(&self) -> bool {
        self.detail.is_some()
    }

    /// What the cell contributes to payloads.
    pub fn persisted(&self) -> &str {
        self.detail.as_deref().unwrap_or(&self.value)
    }

    /// What the cell contributes to drafts. Same as [`Cell::persisted`]
    /// except that an `OTHER` still waiting for its detail stays `OTHER`.
    pub fn drafted(&self) -> &str {
        match self.detail.as_deref() {
            Some("") => OTHER,
            _ => self.persisted(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    pub index: usize,
    pub cells: Vec<Cell>,
}

impl RowRecord {
    fn blank(kind: TableKind, index: usize) -> Self {
        let cells = kind
            .schema()
            .iter()
            .map(|c| Cell {
                locked: c.is_derived(),
                ..Cell::default()
            })
            .collect();
        Self { index, cells }
    }

    pub fn cell(&self, col: usize) -> Option<&Cell> {
        col.checked_sub(1).and_then(|i| self.cells.get(i))
    }

    /// Persisted value of a 1-based column; empty for unknown columns.
    pub fn value(&self, col: usize) -> &str {
        self.cell(col).map(Cell::persisted).unwrap_or("")
    }

    /// True when at least one non-index column holds something.
    pub fn has_content(&self) -> bool {
        self.cells.iter().any(|c| !c.persisted().trim().is_empty())
    }

    pub fn snapshot(&self) -> RowSnapshot {
        self.snapshot_with(Cell::persisted)
    }

    /// Snapshot kept in the draft; see [`Cell::drafted`].
    pub fn draft_snapshot(&self) -> RowSnapshot {
        self.snapshot_with(Cell::drafted)
    }

    fn snapshot_with(&self, view: fn(&Cell) -> &str) -> RowSnapshot {
        let mut values = Vec::with_capacity(self.cells.len() + 1);
        values.push(self.index.to_string());
        values.extend(self.cells.iter().map(|c| view(c).to_string()));
        RowSnapshot(values)
    }

    fn cell_mut(&mut self, col: usize) -> AppResult<&mut Cell> {
        col.checked_sub(1)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(AppError::InvalidColumn(col))
    }

    /// Re-run the row reactions that depend on column `col`.
    fn react(&mut self, kind: TableKind, col: usize) {
        if kind.not_applicable_column() == Some(col) {
            self.apply_not_applicable(col);
        }

        if let Some((factor, naas)) = kind.rating_columns()
            && factor == col
        {
            let factor_value = self.value(factor).trim().to_string();
            if let Some(cell) = self.cells.get_mut(naas - 1) {
                if factor_value == NOT_APPLICABLE {
                    cell.value.clear();
                    cell.locked = false;
                } else if let Some(rating) = naas_rating(&factor_value) {
                    cell.value = rating;
                    cell.locked = true;
                } else {
                    cell.locked = false;
                }
            }
        }

        for (i, column) in kind.schema().iter().enumerate() {
            if let ColumnKind::Duration { start, end, mode } = column.kind
                && (start == col || end == col)
            {
                let text = describe_cells(self.value(start), self.value(end), mode);
                self.cells[i].value = text;
            }
        }
    }

    fn apply_not_applicable(&mut self, col: usize) {
        let off = self.value(col).trim() == NOT_APPLICABLE;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if i + 1 != col {
                cell.disabled = off;
            }
        }
    }

    /// Recompute the flags a restored row cannot carry in its stored values.
    fn refresh_flags(&mut self, kind: TableKind) {
        if let Some(col) = kind.not_applicable_column() {
            self.apply_not_applicable(col);
        }
        if let Some((factor, naas)) = kind.rating_columns() {
            let locked = naas_rating(self.value(factor).trim()).is_some();
            if let Some(cell) = self.cells.get_mut(naas - 1) {
                cell.locked = locked;
            }
        }
    }
}

/// `IF + 6` with two decimals, for a numeric impact factor.
pub fn naas_rating(impact_factor: &str) -> Option<String> {
    let v: f64 = impact_factor.parse().ok()?;
    v.is_finite().then(|| format!("{:.2}", v + NAAS_OFFSET))
}

/// Stored shape of a row: `{"col_0": "1", "col_1": ..., "col_N": ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSnapshot(pub Vec<String>);

impl RowSnapshot {
    pub fn get(&self, col: usize) -> &str {
        self.0.get(col).map(String::as_str).unwrap_or("")
    }

    /// Non-empty values after the index column.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .skip(1)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

impl Serialize for RowSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (i, v) in self.0.iter().enumerate() {
            map.serialize_entry(&format!("col_{i}"), v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RowSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Option<String>>::deserialize(deserializer)?;
        let mut cols = BTreeMap::new();
        for (key, value) in raw {
            let Some(n) = key.strip_prefix("col_") else {
                continue;
            };
            let n: usize = n
                .parse()
                .map_err(|_| D::Error::custom(format!("bad column key: {key}")))?;
            cols.insert(n, value.unwrap_or_default());
        }

        let width = cols.keys().next_back().map_or(0, |n| n + 1);
        let mut values = vec![String::new(); width];
        for (n, v) in cols {
            values[n] = v;
        }
        Ok(RowSnapshot(values))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    kind: TableKind,
    rows: Vec<RowRecord>,
    counter: usize,
}

impl TableModel {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
            counter: 0,
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Live rows, empty ones included.
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Display index handed to the last appended row.
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn append(&mut self) -> usize {
        self.counter += 1;
        self.rows.push(RowRecord::blank(self.kind, self.counter));
        self.counter
    }

    pub fn delete(&mut self, index: usize) -> AppResult<RowRecord> {
        let pos = self.position(index)?;
        let removed = self.rows.remove(pos);
        for (i, row) in self.rows.iter_mut().enumerate().skip(pos) {
            row.index = i + 1;
        }
        self.counter = self.rows.len();
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.counter = 0;
    }

    pub fn row(&self, index: usize) -> AppResult<&RowRecord> {
        Ok(&self.rows[self.position(index)?])
    }

    fn position(&self, index: usize) -> AppResult<usize> {
        index
            .checked_sub(1)
            .filter(|&p| p < self.rows.len())
            .ok_or(AppError::InvalidRow(index))
    }

    fn writable_cell(&mut self, index: usize, col: usize) -> AppResult<&mut Cell> {
        let kind = self.kind;
        let column = kind.column(col).ok_or(AppError::InvalidColumn(col))?;
        let pos = self.position(index)?;
        let cell = self.rows[pos].cell_mut(col)?;

        if cell.locked {
            return Err(AppError::FieldLocked(column.label.to_string()));
        }
        if cell.disabled {
            return Err(AppError::FieldLocked(format!(
                "{} (row {index} is marked {NOT_APPLICABLE})",
                column.label
            )));
        }
        Ok(cell)
    }

    /// Write `value` into column `col` of row `index` and run the row
    /// reactions (reveal, NA, NAAS, durations).
    pub fn set_field(&mut self, index: usize, col: usize, value: &str) -> AppResult<()> {
        let kind = self.kind;
        let column = *kind.column(col).ok_or(AppError::InvalidColumn(col))?;
        let cell = self.writable_cell(index, col)?;

        match column.kind {
            ColumnKind::Choice(options) => {
                let value = value.trim();
                if value.is_empty() {
                    cell.value.clear();
                    cell.detail = None;
                } else if options.contains(&value) {
                    cell.value = value.to_string();
                    if value == OTHER {
                        cell.detail.get_or_insert_with(String::new);
                    } else {
                        cell.detail = None;
                    }
                } else {
                    return Err(AppError::InvalidChoice {
                        column: column.label.to_string(),
                        value: value.to_string(),
                    });
                }
            }
            ColumnKind::Date => {
                let value = value.trim();
                if !value.is_empty() && parse_date(value).is_none() {
                    return Err(AppError::InvalidDate(value.to_string()));
                }
                cell.value = value.to_string();
            }
            ColumnKind::Number => {
                let value = value.trim();
                if !value.is_empty() && value.parse::<f64>().is_err() {
                    return Err(AppError::Validation(format!(
                        "{} must be a number, got '{value}'",
                        column.label
                    )));
                }
                cell.value = value.to_string();
            }
            ColumnKind::Text | ColumnKind::LongText => cell.value = value.to_string(),
            ColumnKind::Duration { .. } => {
                return Err(AppError::FieldLocked(column.label.to_string()));
            }
        }

        let pos = self.position(index)?;
        self.rows[pos].react(kind, col);
        Ok(())
    }

    /// Fill the free-text detail revealed by selecting `OTHER`.
    pub fn set_detail(&mut self, index: usize, col: usize, text: &str) -> AppResult<()> {
        let column = *self.kind.column(col).ok_or(AppError::InvalidColumn(col))?;
        if !column.allows_other() {
            return Err(AppError::Validation(format!(
                "{} has no free-text option",
                column.label
            )));
        }

        let cell = self.writable_cell(index, col)?;
        match cell.detail.as_mut() {
            Some(detail) => {
                *detail = text.to_string();
                Ok(())
            }
            None => Err(AppError::Validation(format!(
                "Select {OTHER} in {} before specifying a value",
                column.label
            ))),
        }
    }

    /// Rows with content, as stored in drafts and payloads.
    pub fn persisted(&self) -> Vec<RowSnapshot> {
        self.rows
            .iter()
            .filter(|r| r.has_content())
            .map(RowRecord::snapshot)
            .collect()
    }

    /// Rows as kept in the draft: a pending `OTHER` counts as content and
    /// is stored as `OTHER` so a restore reveals it again.
    pub fn drafted(&self) -> Vec<RowSnapshot> {
        self.rows
            .iter()
            .filter(|r| r.has_content() || r.cells.iter().any(|c| c.drafted() == OTHER))
            .map(RowRecord::draft_snapshot)
            .collect()
    }

    /// Append a row and write stored values into it by schema position.
    pub fn push_restored(&mut self, stored: &RowSnapshot) {
        let kind = self.kind;
        self.append();
        let Some(row) = self.rows.last_mut() else {
            return;
        };

        for (i, column) in kind.schema().iter().enumerate() {
            let value = stored.get(i + 1);
            let cell = &mut row.cells[i];
            match column.options() {
                Some(_) if value.is_empty() => {}
                Some(options) if value == OTHER || !options.contains(&value) => {
                    if column.allows_other() {
                        cell.value = OTHER.to_string();
                        cell.detail = Some(if value == OTHER {
                            String::new()
                        } else {
                            value.to_string()
                        });
                    } else {
                        cell.value = value.to_string();
                    }
                }
                _ => cell.value = value.to_string(),
            }
        }

        row.refresh_flags(kind);
    }

    /// Revealed `OTHER` details left blank, as `(row, column label)`.
    pub fn missing_details(&self) -> Vec<(usize, &'static str)> {
        let schema = self.kind.schema();
        self.rows
            .iter()
            .flat_map(|row| {
                row.cells
                    .iter()
                    .zip(schema)
                    .filter(|(cell, _)| {
                        !cell.disabled
                            && cell.detail.as_deref().is_some_and(|d| d.trim().is_empty())
                    })
                    .map(move |(_, column)| (row.index, column.label))
            })
            .collect()
    }
}
