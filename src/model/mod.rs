use std::fmt;

use serde::Deserialize;

use crate::error::{ReportError, Result};

/// Agent or team size category published by the ranking site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSubset {
    Individuals,
    TeamsSmall,
    TeamsMedium,
    TeamsLarge,
    TeamsMega,
}

impl DataSubset {
    /// Every subset, in the order the report lays out its sheets.
    pub const ALL: [DataSubset; 5] = [
        DataSubset::Individuals,
        DataSubset::TeamsSmall,
        DataSubset::TeamsMedium,
        DataSubset::TeamsLarge,
        DataSubset::TeamsMega,
    ];

    /// URL and sheet-name slug.
    pub fn slug(self) -> &'static str {
        match self {
            DataSubset::Individuals => "individuals",
            DataSubset::TeamsSmall => "teams-small",
            DataSubset::TeamsMedium => "teams-medium",
            DataSubset::TeamsLarge => "teams-large",
            DataSubset::TeamsMega => "teams-mega",
        }
    }

    pub fn is_individuals(self) -> bool {
        matches!(self, DataSubset::Individuals)
    }
}

impl fmt::Display for DataSubset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Basis on which a source table is ranked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// Count of closed transaction sides.
    Sides,
    /// Total dollar volume.
    Volume,
}

impl TransactionType {
    pub const ALL: [TransactionType; 2] = [TransactionType::Sides, TransactionType::Volume];

    pub fn slug(self) -> &'static str {
        match self {
            TransactionType::Sides => "sides",
            TransactionType::Volume => "volume",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// A scraped table: one header row plus string cells, exactly as published.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Position of `column`, or a schema error naming the `table` it was
    /// expected in.
    pub fn column_index(&self, column: &str, table: &str) -> Result<usize> {
        self.position(column)
            .ok_or_else(|| ReportError::MissingColumn {
                column: column.to_string(),
                table: table.to_string(),
            })
    }

    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|heading| heading == column)
    }

    /// Removes `column` and its cells. Returns whether the column existed.
    pub fn drop_column(&mut self, column: &str) -> bool {
        let Some(index) = self.position(column) else {
            return false;
        };
        self.columns.remove(index);
        for row in &mut self.rows {
            if index < row.len() {
                row.remove(index);
            }
        }
        true
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Borrowed cell lookup that tolerates short rows.
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or_default()
}

/// A display cell carried through to the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

impl Cell {
    /// Numeric-looking source text becomes a number so spreadsheets can sort it.
    pub fn from_source(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.replace(',', "").parse::<f64>() {
            Ok(value) if value.is_finite() => Cell::Number(value),
            _ => Cell::Text(raw.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            Cell::Number(_) => None,
        }
    }
}

/// One output row of a ranked sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub rank: usize,
    pub identity: String,
    pub transactions: u64,
    pub volume: f64,
    /// Display cells aligned with [`RankedTable::headings`] minus the leading
    /// rank and trailing volume columns.
    pub cells: Vec<Cell>,
}

/// The merged, re-ranked result for one (state, subset) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedTable {
    pub state: String,
    pub subset: DataSubset,
    /// `Rank`, the record's display columns, then `Volume`.
    pub headings: Vec<String>,
    pub rows: Vec<RankedRow>,
}

impl RankedTable {
    /// Raw sheet name; the writer sanitises it for Excel.
    pub fn sheet_name(&self) -> String {
        format!("{}_{}", self.state, self.subset)
    }

    pub fn row_by_identity(&self, identity: &str) -> Option<&RankedRow> {
        self.rows.iter().find(|row| row.identity == identity)
    }

    pub fn volume_column(&self) -> usize {
        self.headings.len().saturating_sub(1)
    }
}

pub const RANK_COLUMN: &str = "Rank";
pub const VOLUME_COLUMN: &str = "Volume";
pub const TRANSACTIONS_COLUMN: &str = "Transactions";
pub const TEAM_NAME_COLUMN: &str = "Team Name";
pub const FIRST_NAME_COLUMN: &str = "First Name";
pub const LAST_NAME_COLUMN: &str = "Last Name";
pub const FULL_NAME_COLUMN: &str = "Full Name";
