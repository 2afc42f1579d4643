/// One data row of a CSV file, keyed by the header's column names.
/// Column order follows the header.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CsvRow {
    pub fields: Vec<(String, String)>,
}

impl CsvRow {
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }
}

/// First rows of an accepted file.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CsvPreview {
    pub rows: Vec<CsvRow>,
}

impl CsvPreview {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Column names of the first row, used as table header.
    pub fn columns(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.columns().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
