// ============================================================
// CSV DECODER
// ============================================================
// Parse CSV bytes with delimiter detection, encoding fallback,
// and opportunistic numeric conversion

use csv::{ReaderBuilder, Trim};

use super::dedupe_columns;
use crate::domain::{DecodedTable, IngestError, Result, Row, Value};

/// CSV decoder with encoding and delimiter detection
pub struct CsvDecoder {
    /// Delimiter character (default: comma)
    delimiter: u8,

    /// Whether to trim whitespace from values
    trim: bool,
}

impl Default for CsvDecoder {
    fn default() -> Self {
        Self {
            delimiter: b',',
            trim: true,
        }
    }
}

impl CsvDecoder {
    /// Create a new CSV decoder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set whether to trim whitespace
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Decode CSV bytes with automatic delimiter detection
    pub fn decode_auto_detect(self, bytes: &[u8]) -> Result<DecodedTable> {
        let content = decode_text(bytes);
        let delimiter = Self::detect_delimiter(&content);
        self.with_delimiter(delimiter).decode_content(&content)
    }

    /// Decode CSV content from text
    pub fn decode_content(&self, content: &str) -> Result<DecodedTable> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(if self.trim { Trim::All } else { Trim::None })
            // Rows with the wrong field count must surface as errors,
            // never be silently dropped
            .flexible(false)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| IngestError::Decode(format!("failed to read CSV header row: {}", e)))?
            .clone();

        // Blank header cells get the same placeholder the spreadsheet
        // decoder uses
        let columns = dedupe_columns(
            headers
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    let name = h.trim();
                    if name.is_empty() {
                        format!("column_{}", idx + 1)
                    } else {
                        name.to_string()
                    }
                })
                .collect(),
        );

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                IngestError::Decode(format!("failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let row: Row = columns
                .iter()
                .enumerate()
                .map(|(idx, column)| {
                    let cell = record.get(idx).unwrap_or("");
                    (column.clone(), Value::from_csv_cell(cell))
                })
                .collect();
            rows.push(row);
        }

        Ok(DecodedTable::new(rows, columns))
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();

            for line in &sample_lines {
                // Compare as chars: casting to u8 would truncate non-ASCII
                // scalars onto the delimiter values
                let count = line.chars().filter(|&c| c == delimiter as char).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }
}

/// Decode bytes as UTF-8, falling back to Windows-1252 for legacy exports
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(table.columns, vec!["name", "age", "city"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(
            table.rows[0]["name"],
            Value::String("Alice".to_string())
        );
        assert_eq!(table.rows[0]["age"], Value::Number(30.0));
    }

    #[test]
    fn test_numeric_cells_converted_opportunistically() {
        let content = "sku,price\nA-1,19.99\nA-2,7";
        let table = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(table.rows[0]["sku"], Value::String("A-1".to_string()));
        assert_eq!(table.rows[0]["price"], Value::Number(19.99));
        assert_eq!(table.rows[1]["price"], Value::Number(7.0));
    }

    #[test]
    fn test_empty_cells_become_null() {
        let content = "a,b\n1,\n,2";
        let table = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(table.rows[0]["b"], Value::Null);
        assert_eq!(table.rows[1]["a"], Value::Null);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let content = "a,b\n1,2\n\n3,4\n";
        let table = CsvDecoder::new().decode_content(content).unwrap();
        assert_eq!(table.rows.len(), 2);
    }

    #[test]
    fn test_malformed_row_surfaces_error() {
        let content = "a,b\n1,2\n3,4,5";
        let err = CsvDecoder::new().decode_content(content).unwrap_err();
        assert!(matches!(err, IngestError::Decode(_)));
    }

    #[test]
    fn test_blank_header_cells_get_placeholder_names() {
        let content = "a,,c\n1,2,3";
        let table = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(table.columns, vec!["a", "column_2", "c"]);
        assert_eq!(table.rows[0]["column_2"], Value::Number(2.0));
    }

    #[test]
    fn test_duplicate_headers_disambiguated() {
        let content = "region,sales,region\neast,10,west";
        let table = CsvDecoder::new().decode_content(content).unwrap();

        assert_eq!(table.columns, vec!["region", "sales", "region_2"]);
        assert_eq!(
            table.rows[0]["region_2"],
            Value::String("west".to_string())
        );
    }

    #[test]
    fn test_repeated_headers_keep_every_cell() {
        // A literal region_2 header must not collide with the generated
        // suffix for the repeated region column
        let content = "region,region,region_2\neast,west,north";
        let table = CsvDecoder::new().decode_content(content).unwrap();

        let unique: std::collections::HashSet<&String> = table.columns.iter().collect();
        assert_eq!(unique.len(), table.columns.len());

        assert_eq!(table.rows[0]["region"], Value::String("east".to_string()));
        assert_eq!(table.rows[0]["region_2"], Value::String("west".to_string()));
        assert_eq!(
            table.rows[0]["region_2_2"],
            Value::String("north".to_string())
        );
        assert_eq!(table.rows[0].len(), 3);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvDecoder::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvDecoder::detect_delimiter("a;b;c\nd;e;f"), b';');
        assert_eq!(CsvDecoder::detect_delimiter("a|b|c\nd|e|f"), b'|');
    }

    #[test]
    fn test_detect_delimiter_ignores_non_ascii_lookalikes() {
        // U+012C shares its low byte with ',' and must not count as one
        assert_eq!(CsvDecoder::detect_delimiter("aĬ;bĬ;c\ndĬ;eĬ;f"), b';');
    }

    #[test]
    fn test_windows_1252_fallback() {
        // "café" with a Latin-1 e-acute, invalid as UTF-8
        let bytes = b"name\ncaf\xe9";
        let table = CsvDecoder::new().decode_auto_detect(bytes).unwrap();
        assert_eq!(
            table.rows[0]["name"],
            Value::String("café".to_string())
        );
    }
}
