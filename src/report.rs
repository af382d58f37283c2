use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::io::excel_write;
use crate::io::fetch::{TableSource, locator};
use crate::model::{DataSubset, RankedTable, TransactionType};
use crate::rank::rank_subset;

/// Workbook file name for a report run on `date`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("real_trends {}.xlsx", date.format("%Y-%m-%d"))
}

pub fn report_path(config: &ReportConfig, date: NaiveDate) -> PathBuf {
    config.output_dir.join(report_file_name(date))
}

/// Fetches both tables for one (state, subset) and ranks them.
#[instrument(level = "info", skip(source))]
pub fn build_subset<S: TableSource>(
    source: &S,
    state: &str,
    subset: DataSubset,
) -> Result<RankedTable> {
    let sides = source.fetch(state, subset, TransactionType::Sides)?;
    let volume = source.fetch(state, subset, TransactionType::Volume)?;
    let ranked = rank_subset(state, subset, &sides, &volume)?;
    info!(rows = ranked.rows.len(), "ranked subset");
    Ok(ranked)
}

/// Ranks every configured (state, subset) pair in order. The first failure
/// aborts the run.
pub fn build_report<S: TableSource>(source: &S, config: &ReportConfig) -> Result<Vec<RankedTable>> {
    let mut tables = Vec::with_capacity(config.states.len() * config.subsets.len());
    for state in &config.states {
        for subset in &config.subsets {
            tables.push(build_subset(source, state, *subset)?);
        }
    }
    Ok(tables)
}

/// Builds the whole report and writes it to `<output_dir>/real_trends <date>.xlsx`.
/// Nothing is written unless every table was fetched and ranked.
#[instrument(
    level = "info",
    skip_all,
    fields(output_dir = %config.output_dir.display(), date = %date)
)]
pub fn run_report<S: TableSource>(
    source: &S,
    config: &ReportConfig,
    date: NaiveDate,
) -> Result<PathBuf> {
    config.validate()?;
    let tables = build_report(source, config)?;

    ensure_dir(&config.output_dir)?;
    let path = report_path(config, date);
    excel_write::write_report(&path, &tables)?;
    info!(path = %path.display(), sheets = tables.len(), "report written");
    Ok(path)
}

/// Every URL a report run would request, in fetch order.
pub fn planned_locators(config: &ReportConfig) -> Vec<String> {
    config
        .states
        .iter()
        .flat_map(|state| {
            config.subsets.iter().flat_map(move |subset| {
                TransactionType::ALL
                    .into_iter()
                    .map(move |kind| locator(&config.base_url, state, *subset, kind))
            })
        })
        .collect()
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
