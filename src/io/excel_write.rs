use std::collections::HashSet;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::debug;

use crate::error::Result;
use crate::model::{Cell, RankedTable};

/// Column widths for columns A to G of every report sheet.
pub const COLUMN_WIDTHS: [f64; 7] = [6.0, 25.0, 30.0, 15.0, 10.0, 10.0, 20.0];
/// Width of any column past G.
pub const FALLBACK_WIDTH: f64 = 12.0;
/// Whole-dollar display format used for the volume column.
pub const CURRENCY_FORMAT: &str = "$#,##0";

const MAX_SHEET_NAME: usize = 31;

/// Writes one sheet per ranked table to the workbook at `path`.
pub fn write_report(path: &Path, tables: &[RankedTable]) -> Result<()> {
    let mut workbook = Workbook::new();
    let mut sheet_names = SheetNameRegistry::default();
    let heading_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format(CURRENCY_FORMAT);

    for table in tables {
        let sheet_name = sheet_names.assign(&table.sheet_name());
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&sheet_name)?;
        write_table(worksheet, table, &heading_format, &currency_format)?;
        debug!(sheet = %sheet_name, rows = table.rows.len(), "sheet written");
    }

    workbook.save(path)?;
    Ok(())
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &RankedTable,
    heading_format: &Format,
    currency_format: &Format,
) -> Result<()> {
    for (col_idx, heading) in table.headings.iter().enumerate() {
        worksheet.write_string_with_format(0, col_idx as u16, heading, heading_format)?;
    }

    let volume_col = table.volume_column() as u16;
    for (row_idx, row) in table.rows.iter().enumerate() {
        let sheet_row = (row_idx + 1) as u32;
        worksheet.write_number(sheet_row, 0, row.rank as f64)?;
        for (offset, cell) in row.cells.iter().enumerate() {
            let col = (offset + 1) as u16;
            match cell {
                Cell::Number(value) => worksheet.write_number(sheet_row, col, *value)?,
                Cell::Text(text) => worksheet.write_string(sheet_row, col, text)?,
            };
        }
        worksheet.write_number_with_format(sheet_row, volume_col, row.volume, currency_format)?;
    }

    for col_idx in 0..table.headings.len() {
        worksheet.set_column_width(col_idx as u16, column_width(col_idx))?;
    }

    let last_col = (table.headings.len() as u16).saturating_sub(1);
    worksheet.set_freeze_panes(1, 0)?;
    worksheet.autofilter(0, 0, table.rows.len() as u32, last_col)?;
    Ok(())
}

/// Display width of the column at `index` (0 is column A).
pub fn column_width(index: usize) -> f64 {
    COLUMN_WIDTHS.get(index).copied().unwrap_or(FALLBACK_WIDTH)
}

/// Hands out Excel-safe sheet names that are unique within one workbook.
#[derive(Debug, Default)]
pub struct SheetNameRegistry {
    used: HashSet<String>,
}

impl SheetNameRegistry {
    pub fn assign(&mut self, raw: &str) -> String {
        let base = sanitize_sheet_name(raw);
        // Excel compares sheet names case-insensitively.
        if self.used.insert(base.to_lowercase()) {
            return base;
        }

        let mut counter = 1;
        loop {
            let suffix = format!("_{counter}");
            let prefix = truncate_chars(&base, MAX_SHEET_NAME - suffix.len());
            let candidate = format!("{prefix}{suffix}");
            if self.used.insert(candidate.to_lowercase()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Replaces characters Excel rejects in sheet names and caps the length.
pub fn sanitize_sheet_name(raw: &str) -> String {
    let invalid = [':', '\\', '/', '?', '*', '[', ']'];
    let sanitized: String = raw
        .chars()
        .map(|ch| {
            if invalid.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    let sanitized = sanitized.trim().trim_matches('\'');
    if sanitized.is_empty() {
        return "Sheet".to_string();
    }
    truncate_chars(sanitized, MAX_SHEET_NAME)
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
