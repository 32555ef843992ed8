//! Tabular ingestion: CSV text to raw source rows.
//!
//! Columns are located by header name; cell values are passed through
//! untouched (trimming and boolean parsing belong to the hierarchy builder).

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::ColumnSettings;
use crate::domain::SourceRow;

/// Positions of the configured columns within the header row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    type_name: usize,
    subtype: usize,
    detail: usize,
    connected_to_year: usize,
    campaign_name: usize,
}

impl ColumnIndex {
    fn locate(headers: &StringRecord, columns: &ColumnSettings) -> ApplicationResult<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| ApplicationError::Ingest {
                    message: format!(
                        "missing column '{}' (found: {})",
                        name,
                        headers.iter().collect::<Vec<_>>().join(", ")
                    ),
                })
        };
        Ok(Self {
            type_name: position(&columns.type_name)?,
            subtype: position(&columns.subtype)?,
            detail: position(&columns.detail)?,
            connected_to_year: position(&columns.connected_to_year)?,
            campaign_name: position(&columns.campaign_name)?,
        })
    }
}

fn cell(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}

/// Parse CSV content (with a header row) into source rows, in file order.
pub fn parse_rows(content: &str, columns: &ColumnSettings) -> ApplicationResult<Vec<SourceRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ApplicationError::Ingest {
            message: format!("failed to read headers: {e}"),
        })?
        .clone();
    let index = ColumnIndex::locate(&headers, columns)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ApplicationError::Ingest {
            message: format!("failed to parse row {}: {}", i + 1, e),
        })?;
        rows.push(SourceRow {
            type_name: cell(&record, index.type_name),
            subtype: cell(&record, index.subtype),
            detail: cell(&record, index.detail),
            connected_to_year: cell(&record, index.connected_to_year),
            campaign_name: cell(&record, index.campaign_name),
        });
    }

    debug!("parse_rows: {} rows", rows.len());
    Ok(rows)
}
