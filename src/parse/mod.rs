//! Incremental parser for the hurricane occurrence table.
//!
//! The source is CSV-shaped: a header line `Month,<year>,...,Average`
//! followed by one line per month. The body arrives as an arbitrary
//! sequence of byte chunks, so lines (and even UTF-8 sequences) may be
//! split across chunk boundaries; [`TableParser`] buffers bytes and only
//! consumes whole lines. The completed [`Dataset`] is yielded by value from
//! [`TableParser::finish`] — a failed parse never leaks a partially
//! populated dataset.

use std::collections::BTreeMap;
use std::str::FromStr;

use bytes::Bytes;
use futures_util::{pin_mut, Stream, StreamExt};
use tracing::{instrument, trace};

use crate::error::{HurricaneError, Result};
use crate::model::{round2, ColumnKey, Dataset, Month, MonthRecord};

/// Line-buffering incremental parser. Feed it chunks, then call `finish`.
#[derive(Debug, Default)]
pub struct TableParser {
    buf: Vec<u8>,
    header: Option<Vec<ColumnKey>>,
    dataset: Dataset,
}

impl TableParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk of the raw table. Complete lines are parsed
    /// immediately; a trailing partial line is held until the next chunk or
    /// `finish`.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<()> {
        self.buf.extend_from_slice(chunk);
        while let Some(pos) = self.buf.iter().position(|&b| b == b'\n') {
            let rest = self.buf.split_off(pos + 1);
            let line = std::mem::replace(&mut self.buf, rest);
            self.consume_line(&line[..pos])?;
        }
        Ok(())
    }

    /// Flush the trailing line and return the completed dataset.
    pub fn finish(mut self) -> Result<Dataset> {
        if !self.buf.is_empty() {
            let line = std::mem::take(&mut self.buf);
            self.consume_line(&line)?;
        }
        if self.header.is_none() {
            return Err(HurricaneError::MalformedTable(
                "empty input: no header row".to_string(),
            ));
        }
        Ok(self.dataset)
    }

    fn consume_line(&mut self, raw: &[u8]) -> Result<()> {
        let line = std::str::from_utf8(raw)
            .map_err(|e| HurricaneError::MalformedTable(format!("line is not valid UTF-8: {e}")))?
            .trim_end_matches('\r')
            .trim();
        if line.is_empty() {
            return Ok(());
        }
        match self.header.as_ref() {
            None => {
                self.header = Some(parse_header(line)?);
            }
            Some(header) => {
                let (month, record) = parse_row(line, header)?;
                trace!(month = %month, "parsed row");
                self.dataset.insert(month, record);
            }
        }
        Ok(())
    }
}

/// Drive a [`TableParser`] over a lazy chunk stream. A chunk-level error
/// aborts the fold and propagates.
#[instrument(level = "debug", skip(chunks))]
pub async fn parse_stream<S>(chunks: S) -> Result<Dataset>
where
    S: Stream<Item = Result<Bytes>>,
{
    let mut parser = TableParser::new();
    pin_mut!(chunks);
    while let Some(chunk) = chunks.next().await {
        parser.feed(&chunk?)?;
    }
    parser.finish()
}

/// Parse the header line into column keys. The leading `Month` cell carries
/// no data and is dropped; every other cell must be a year (digits) or the
/// single `Average` key.
fn parse_header(line: &str) -> Result<Vec<ColumnKey>> {
    let mut cells = line.split(',').map(clean_cell);
    cells.next(); // the month-name column

    let mut columns = Vec::new();
    for cell in cells {
        let key = match cell {
            "Average" => ColumnKey::Average,
            year if !year.is_empty() && year.bytes().all(|b| b.is_ascii_digit()) => {
                ColumnKey::Year(year.to_string())
            }
            other => {
                return Err(HurricaneError::MalformedTable(format!(
                    "unexpected column key {other:?}"
                )))
            }
        };
        if columns.contains(&key) {
            return Err(HurricaneError::MalformedTable(format!(
                "duplicate column key {cell:?}"
            )));
        }
        columns.push(key);
    }

    if !columns.contains(&ColumnKey::Average) {
        return Err(HurricaneError::MalformedTable(
            "header has no Average column".to_string(),
        ));
    }
    Ok(columns)
}

/// Parse one data row against the header. Fields align positionally; every
/// cell must coerce to its column's type or the row is rejected outright.
fn parse_row(line: &str, header: &[ColumnKey]) -> Result<(Month, MonthRecord)> {
    let mut fields = line.split(',').map(clean_cell);
    let month_cell = fields.next().unwrap_or_default();
    let month = Month::from_str(month_cell).map_err(|_| HurricaneError::MalformedRow {
        month: month_cell.to_string(),
        column: "Month".to_string(),
        reason: "not a canonical month abbreviation".to_string(),
    })?;

    let mut counts = BTreeMap::new();
    let mut average = None;
    for key in header {
        let cell = fields
            .next()
            .ok_or_else(|| malformed_row(month, key, "missing field"))?;
        match key {
            ColumnKey::Average => {
                let value: f64 = cell
                    .parse()
                    .map_err(|_| malformed_row(month, key, "not a decimal number"))?;
                if !value.is_finite() || value < 0.0 {
                    return Err(malformed_row(month, key, "not a non-negative decimal"));
                }
                average = Some(round2(value));
            }
            ColumnKey::Year(year) => {
                let value: u64 = cell
                    .parse()
                    .map_err(|_| malformed_row(month, key, "not a non-negative integer"))?;
                counts.insert(year.clone(), value);
            }
        }
    }
    if fields.next().is_some() {
        return Err(HurricaneError::MalformedRow {
            month: month.to_string(),
            column: String::new(),
            reason: "more fields than header columns".to_string(),
        });
    }

    let average = average.expect("header always holds exactly one Average column");
    Ok((month, MonthRecord { counts, average }))
}

fn malformed_row(month: Month, column: &ColumnKey, reason: &str) -> HurricaneError {
    HurricaneError::MalformedRow {
        month: month.to_string(),
        column: column.to_string(),
        reason: reason.to_string(),
    }
}

/// Strip surrounding whitespace and double quotes from a cell.
fn clean_cell(cell: &str) -> &str {
    cell.trim().trim_matches('"').trim()
}
