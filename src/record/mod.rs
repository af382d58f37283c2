//! Row variants for the two kinds of ranking table.
//!
//! Individuals are keyed by a name assembled from two columns and lead with
//! that name; teams are keyed by their `Team Name` column and keep the
//! published column order. Both expose the same capability through
//! [`AgentRecord`], so the merge engine is written once.

use crate::currency::parse_count;
use crate::error::Result;
use crate::model::{
    Cell, FIRST_NAME_COLUMN, FULL_NAME_COLUMN, LAST_NAME_COLUMN, RANK_COLUMN, TEAM_NAME_COLUMN,
    TRANSACTIONS_COLUMN, Table, VOLUME_COLUMN, cell,
};

/// How the join key is read from a source row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKey {
    /// A single column holds the key.
    Column(usize),
    /// The key is `"<first> <last>"`.
    FullName { first: usize, last: usize },
}

impl IdentityKey {
    pub fn extract(&self, row: &[String]) -> String {
        match *self {
            IdentityKey::Column(index) => cell(row, index).to_string(),
            IdentityKey::FullName { first, last } => {
                format!("{} {}", cell(row, first), cell(row, last))
            }
        }
    }
}

/// Column positions resolved once from a sides table header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidesLayout {
    pub key: IdentityKey,
    pub transactions: usize,
    /// Source columns copied to the output, in output order.
    pub carried: Vec<usize>,
}

/// Common capability of individual and team rows: a join identity, a
/// transaction count and the cells to display.
pub trait AgentRecord: Sized {
    /// Resolves the join key in `table`; `label` names the table in errors.
    fn identity_key(table: &Table, label: &str) -> Result<IdentityKey>;

    /// Whether a source column is copied into the output.
    fn carries(heading: &str) -> bool;

    /// Display headings for the columns this record contributes, excluding
    /// rank and volume.
    fn headings(layout: &SidesLayout, sides: &Table) -> Vec<String>;

    fn from_row(layout: &SidesLayout, row: &[String]) -> Self;

    fn identity(&self) -> &str;

    fn transactions(&self) -> u64;

    /// Display cells aligned with [`AgentRecord::headings`].
    fn into_cells(self) -> Vec<Cell>;

    fn layout(sides: &Table, label: &str) -> Result<SidesLayout> {
        let key = Self::identity_key(sides, label)?;
        let transactions = sides.column_index(TRANSACTIONS_COLUMN, label)?;
        let carried = sides
            .columns
            .iter()
            .enumerate()
            .filter(|(_, heading)| Self::carries(heading))
            .map(|(index, _)| index)
            .collect();
        Ok(SidesLayout {
            key,
            transactions,
            carried,
        })
    }
}

fn carried_headings(layout: &SidesLayout, sides: &Table) -> Vec<String> {
    layout
        .carried
        .iter()
        .map(|index| sides.columns[*index].clone())
        .collect()
}

fn carried_cells(layout: &SidesLayout, row: &[String]) -> Vec<Cell> {
    layout
        .carried
        .iter()
        .map(|index| Cell::from_source(cell(row, *index)))
        .collect()
}

/// A single agent, identified by first and last name.
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualRecord {
    pub full_name: String,
    pub transactions: u64,
    pub cells: Vec<Cell>,
}

impl AgentRecord for IndividualRecord {
    fn identity_key(table: &Table, label: &str) -> Result<IdentityKey> {
        Ok(IdentityKey::FullName {
            first: table.column_index(FIRST_NAME_COLUMN, label)?,
            last: table.column_index(LAST_NAME_COLUMN, label)?,
        })
    }

    fn carries(heading: &str) -> bool {
        ![
            RANK_COLUMN,
            FIRST_NAME_COLUMN,
            LAST_NAME_COLUMN,
            VOLUME_COLUMN,
        ]
        .contains(&heading)
    }

    fn headings(layout: &SidesLayout, sides: &Table) -> Vec<String> {
        std::iter::once(FULL_NAME_COLUMN.to_string())
            .chain(carried_headings(layout, sides))
            .collect()
    }

    fn from_row(layout: &SidesLayout, row: &[String]) -> Self {
        Self {
            full_name: layout.key.extract(row),
            transactions: parse_count(cell(row, layout.transactions)),
            cells: carried_cells(layout, row),
        }
    }

    fn identity(&self) -> &str {
        &self.full_name
    }

    fn transactions(&self) -> u64 {
        self.transactions
    }

    fn into_cells(self) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.cells.len() + 1);
        cells.push(Cell::Text(self.full_name));
        cells.extend(self.cells);
        cells
    }
}

/// A team, identified by its published team name.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamRecord {
    pub team_name: String,
    pub transactions: u64,
    pub cells: Vec<Cell>,
}

impl AgentRecord for TeamRecord {
    fn identity_key(table: &Table, label: &str) -> Result<IdentityKey> {
        Ok(IdentityKey::Column(
            table.column_index(TEAM_NAME_COLUMN, label)?,
        ))
    }

    fn carries(heading: &str) -> bool {
        heading != RANK_COLUMN && heading != VOLUME_COLUMN
    }

    fn headings(layout: &SidesLayout, sides: &Table) -> Vec<String> {
        carried_headings(layout, sides)
    }

    fn from_row(layout: &SidesLayout, row: &[String]) -> Self {
        // Team names stay text even when a team is named after a number.
        let cells = layout
            .carried
            .iter()
            .map(|index| match layout.key {
                IdentityKey::Column(key) if key == *index => Cell::Text(cell(row, key).to_string()),
                _ => Cell::from_source(cell(row, *index)),
            })
            .collect();
        Self {
            team_name: layout.key.extract(row),
            transactions: parse_count(cell(row, layout.transactions)),
            cells,
        }
    }

    fn identity(&self) -> &str {
        &self.team_name
    }

    fn transactions(&self) -> u64 {
        self.transactions
    }

    fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}
