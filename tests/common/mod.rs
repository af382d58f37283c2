#![allow(dead_code)]

use std::collections::HashMap;

use real_trends_report::io::fetch::{TableSource, locator};
use real_trends_report::model::{DataSubset, Table, TransactionType};
use real_trends_report::{ReportError, Result};

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

pub fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(strings(columns), rows.iter().map(|row| strings(row)).collect())
}

pub fn team_sides() -> Table {
    table(
        &["Rank", "Team Name", "Brokerage", "City", "State", "Transactions"],
        &[
            &["1", "Alpha Team", "Keller Williams", "Atlanta", "GA", "12"],
            &["2", "Beta Group", "RE/MAX", "Savannah", "GA", "12"],
            &["3", "Gamma Co", "Compass", "Athens", "GA", "7"],
        ],
    )
}

pub fn team_volume() -> Table {
    table(
        &["Rank", "Team Name", "Brokerage", "City", "State", "Volume"],
        &[
            &["1", "Delta Partners", "eXp", "Macon", "GA", "$9,000,000"],
            &["2", "Beta Group", "RE/MAX", "Savannah", "GA", "$3,400,000"],
            &["3", "Alpha Team", "Keller Williams", "Atlanta", "GA", "$2,100,000"],
        ],
    )
}

pub fn individual_sides() -> Table {
    table(
        &["Rank", "First Name", "Last Name", "Brokerage", "Transactions"],
        &[
            &["1", "John", "Smith", "Compass", "8"],
            &["2", "Jane", "Doe", "Keller Williams", "10"],
        ],
    )
}

pub fn individual_volume() -> Table {
    table(
        &["Rank", "First Name", "Last Name", "Brokerage", "Volume"],
        &[
            &["1", "Jane", "Doe", "Keller Williams", "$500,000"],
            &["2", "John", "Smith", "Compass", "$450,000"],
            &["3", "Only", "Volume", "Compass", "$10,000,000"],
        ],
    )
}

/// In-memory table source keyed the same way the HTTP source is.
#[derive(Default)]
pub struct StaticSource {
    tables: HashMap<(String, DataSubset, TransactionType), Table>,
}

impl StaticSource {
    pub fn with(
        mut self,
        state: &str,
        subset: DataSubset,
        transaction_type: TransactionType,
        table: Table,
    ) -> Self {
        self.tables
            .insert((state.to_string(), subset, transaction_type), table);
        self
    }
}

impl TableSource for StaticSource {
    fn fetch(
        &self,
        state: &str,
        subset: DataSubset,
        transaction_type: TransactionType,
    ) -> Result<Table> {
        self.tables
            .get(&(state.to_string(), subset, transaction_type))
            .cloned()
            .ok_or_else(|| ReportError::NoTable {
                url: locator("mem://", state, subset, transaction_type),
            })
    }
}
