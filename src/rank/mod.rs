//! Merge of a sides table with its volume table, and the re-ranking that
//! follows.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::currency::parse_currency;
use crate::error::Result;
use crate::model::{
    DataSubset, RANK_COLUMN, RankedRow, RankedTable, Table, TransactionType, VOLUME_COLUMN, cell,
};
use crate::record::{AgentRecord, IndividualRecord, TeamRecord};

/// Merges and ranks one (state, subset) pair, picking the record variant that
/// matches the subset.
pub fn rank_subset(
    state: &str,
    subset: DataSubset,
    sides: &Table,
    volume: &Table,
) -> Result<RankedTable> {
    if subset.is_individuals() {
        merge_and_rank::<IndividualRecord>(state, subset, sides, volume)
    } else {
        merge_and_rank::<TeamRecord>(state, subset, sides, volume)
    }
}

/// Left-joins the volume table onto the sides table by identity, then sorts
/// by transactions and volume (both descending) and numbers the rows from 1.
///
/// Rows that only appear in the volume table are dropped. A sides row with no
/// matching volume, or with an unreadable one, gets a volume of zero.
#[instrument(level = "debug", skip_all, fields(state = %state, subset = %subset))]
pub fn merge_and_rank<R: AgentRecord>(
    state: &str,
    subset: DataSubset,
    sides: &Table,
    volume: &Table,
) -> Result<RankedTable> {
    let sides_label = format!("{subset} {}", TransactionType::Sides);
    let volume_label = format!("{subset} {}", TransactionType::Volume);

    let layout = R::layout(sides, &sides_label)?;
    let volumes = volume_lookup::<R>(volume, &volume_label)?;

    let mut merged: Vec<(R, f64)> = sides
        .rows
        .iter()
        .map(|row| {
            let record = R::from_row(&layout, row);
            let volume = volumes
                .get(record.identity())
                .map(|raw| parse_currency(raw))
                .unwrap_or(0.0);
            (record, volume)
        })
        .collect();

    let unmatched = merged
        .iter()
        .filter(|(record, _)| !volumes.contains_key(record.identity()))
        .count();
    debug!(
        rows = merged.len(),
        unmatched, "joined volume onto sides table"
    );

    merged.sort_by(|(lhs, lhs_volume), (rhs, rhs_volume)| {
        rank_order(lhs.transactions(), *lhs_volume, rhs.transactions(), *rhs_volume)
    });

    let mut headings = Vec::with_capacity(layout.carried.len() + 3);
    headings.push(RANK_COLUMN.to_string());
    headings.extend(R::headings(&layout, sides));
    headings.push(VOLUME_COLUMN.to_string());

    let rows = merged
        .into_iter()
        .enumerate()
        .map(|(position, (record, volume))| RankedRow {
            rank: position + 1,
            identity: record.identity().to_string(),
            transactions: record.transactions(),
            volume,
            cells: record.into_cells(),
        })
        .collect();

    Ok(RankedTable {
        state: state.to_string(),
        subset,
        headings,
        rows,
    })
}

/// Descending by transactions, then descending by volume. Equal keys compare
/// equal so a stable sort keeps the published order.
pub fn rank_order(lhs_count: u64, lhs_volume: f64, rhs_count: u64, rhs_volume: f64) -> Ordering {
    rhs_count
        .cmp(&lhs_count)
        .then_with(|| rhs_volume.total_cmp(&lhs_volume))
}

// First occurrence of an identity wins.
fn volume_lookup<'a, R: AgentRecord>(
    volume: &'a Table,
    label: &str,
) -> Result<HashMap<String, &'a str>> {
    let key = R::identity_key(volume, label)?;
    let column = volume.column_index(VOLUME_COLUMN, label)?;

    let mut lookup = HashMap::with_capacity(volume.len());
    for row in &volume.rows {
        lookup
            .entry(key.extract(row))
            .or_insert_with(|| cell(row, column));
    }
    Ok(lookup)
}
