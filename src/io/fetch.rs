use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info, instrument, warn};

use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::io::html_table::parse_first_table;
use crate::model::{DataSubset, Table, TransactionType};

/// Builds the URL of one ranking table. Individual rankings use a `-by-`
/// infix, team rankings a plain dash.
pub fn locator(
    base_url: &str,
    state: &str,
    subset: DataSubset,
    transaction_type: TransactionType,
) -> String {
    let infix = if subset.is_individuals() { "-by-" } else { "-" };
    format!("{base_url}{state}/{subset}{infix}{transaction_type}")
}

/// Anything that can produce a source table for one
/// (state, subset, transaction type) combination.
pub trait TableSource {
    fn fetch(
        &self,
        state: &str,
        subset: DataSubset,
        transaction_type: TransactionType,
    ) -> Result<Table>;
}

/// Fetches tables over HTTP, one blocking request at a time.
pub struct HttpTableSource {
    client: Client,
    base_url: String,
    dropped_columns: Vec<String>,
}

impl HttpTableSource {
    pub fn new(config: &ReportConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            dropped_columns: config.dropped_columns.clone(),
        })
    }

    fn fetch_html(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text()?)
    }
}

impl TableSource for HttpTableSource {
    #[instrument(
        level = "info",
        skip(self, subset, transaction_type),
        fields(subset = %subset, transaction_type = %transaction_type)
    )]
    fn fetch(
        &self,
        state: &str,
        subset: DataSubset,
        transaction_type: TransactionType,
    ) -> Result<Table> {
        let url = locator(&self.base_url, state, subset, transaction_type);
        debug!(%url, "requesting table");

        let html = self.fetch_html(&url)?;
        let table = table_from_html(&html, &self.dropped_columns)
            .ok_or(ReportError::NoTable { url })?;

        if table.is_empty() {
            warn!(columns = table.columns.len(), "table has no rows");
        }
        info!(
            rows = table.len(),
            columns = table.columns.len(),
            "fetched table"
        );
        Ok(table)
    }
}

/// Parses the first table in `html` and removes the listed columns. Columns
/// that are not present are ignored.
pub fn table_from_html(html: &str, dropped_columns: &[String]) -> Option<Table> {
    let mut table = parse_first_table(html)?;
    for column in dropped_columns {
        if !table.drop_column(column) {
            debug!(column = %column, "column to drop not present");
        }
    }
    Some(table)
}
