// ============================================================================
// CSV PREVIEW - First data rows of a file, header row as column names
// ============================================================================

use crate::models::{CsvPreview, CsvRow};

/// Reads up to `max_rows` data rows. Values are kept as literal strings.
/// Rows after `max_rows` are never read, so a malformed tail does not
/// affect the preview.
pub fn parse_preview(bytes: &[u8], max_rows: usize) -> Result<CsvPreview, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(CsvPreview::default());
    }

    let mut rows = Vec::with_capacity(max_rows);
    for record in reader.records().take(max_rows) {
        let record = record?;
        let fields = headers
            .iter()
            .zip(record.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();
        rows.push(CsvRow { fields });
    }

    Ok(CsvPreview { rows })
}
