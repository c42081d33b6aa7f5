//! CSV Extractor — header-anchors a free-form model response and decodes the plan table.
//!
//! The header line is the only marker of where the table starts. Anything the
//! model wrote before it is dropped; nothing inside the table is ever repaired.

use anyhow::Context;
use csv::{ReaderBuilder, Terminator, Trim, WriterBuilder};
use tracing::debug;

use crate::errors::PlanError;
use crate::planner::models::{PlanRow, PlanTable};
use crate::planner::prompts::{CSV_HEADER, HEADER_COLUMNS};

const UTF8_BOM: &str = "\u{feff}";

/// A decoded plan together with the CSV text it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPlan {
    pub csv_text: String,
    pub table: PlanTable,
}

/// Extracts and decodes the plan CSV from `raw`.
///
/// On failure the error carries the candidate text exactly as it was handed to
/// the decoder, so the caller can show it for manual correction.
pub fn extract(raw: &str) -> Result<ExtractedPlan, PlanError> {
    let candidate = anchor_at_header(raw);
    match decode(candidate) {
        Ok(table) => Ok(ExtractedPlan {
            csv_text: candidate.to_string(),
            table,
        }),
        Err(reason) => Err(PlanError::decode(reason, candidate)),
    }
}

/// Returns the text from the first header occurrence on, or the whole trimmed
/// text when there is no header. A leading BOM goes with the discarded prefix.
pub fn anchor_at_header(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.find(CSV_HEADER) {
        Some(offset) => {
            if offset > 0 {
                debug!("Discarding {offset} bytes before the CSV header");
            }
            strip_closing_fence(&trimmed[offset..])
        }
        None => trimmed,
    }
}

/// Drops a trailing markdown fence line left over after a fenced answer.
fn strip_closing_fence(text: &str) -> &str {
    let text = text.trim_end();
    match text.rsplit_once('\n') {
        Some((body, last)) if last.trim().starts_with("```") => body.trim_end(),
        _ => text,
    }
}

/// Decodes `candidate` using the fixed header. Returns a human-readable reason on failure.
pub fn decode(candidate: &str) -> Result<PlanTable, String> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(candidate.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| format!("unreadable header row: {e}"))?
        .clone();
    if headers.iter().ne(HEADER_COLUMNS) {
        return Err(format!("the first line must be exactly '{CSV_HEADER}'"));
    }

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<PlanRow>().enumerate() {
        let row = record.map_err(|e| format!("row {}: {e}", index + 1))?;
        if row.intensity_level().is_none() {
            return Err(format!(
                "row {}: Intensity '{}' is not one of low/medium/high (低/中/高)",
                index + 1,
                row.intensity
            ));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err("no plan rows after the header".to_string());
    }
    Ok(PlanTable { rows })
}

impl PlanTable {
    /// Encodes the table as CSV text, header included.
    pub fn to_csv_string(&self) -> Result<String, PlanError> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(HEADER_COLUMNS)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer.serialize(row).context("Failed to write CSV row")?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {e}"))?;
        Ok(String::from_utf8(bytes).context("CSV output is not UTF-8")?)
    }

    /// CSV bytes prefixed with a UTF-8 BOM so spreadsheet apps pick the right encoding.
    pub fn to_csv_bytes_with_bom(&self) -> Result<Vec<u8>, PlanError> {
        let text = self.to_csv_string()?;
        let mut bytes = Vec::with_capacity(UTF8_BOM.len() + text.len());
        bytes.extend_from_slice(UTF8_BOM.as_bytes());
        bytes.extend_from_slice(text.as_bytes());
        Ok(bytes)
    }
}
