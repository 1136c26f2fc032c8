//! # Table loader
//!
//! Parses the tab-separated disease-pair table (Data S4) into typed rows.
//!
//! The source file opens with a free-text preamble. It is skipped by line
//! count alone; nothing looks for a header. Everything after it is bound
//! positionally to the fixed 10-column schema.
//!
//! ```text
//! line 1..=33   preamble (discarded)
//! line 34..     disease_A \t disease_B \t s_AB \t d_AB \t z \t p \t q \t z \t p \t q
//! ```

use std::io::{BufRead, BufReader, Read};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Number of fields in a row.
pub const ROW_WIDTH: usize = 10;

/// Preamble lines preceding the first data row in Data S4.
pub const DEFAULT_SKIP_ROWS: usize = 33;

/// Source column labels, in positional order.
pub const COLUMNS: [&str; ROW_WIDTH] = [
    "disease_A",
    "disease_B",
    "s_AB (observed)",
    "d_AB (observed)",
    "z (full rand)",
    "p (full rand)",
    "q (full rand)",
    "z (MeSH rand)",
    "p (MeSH rand)",
    "q (MeSH rand)",
];

/// Leading label columns; every later column is numeric.
const LABEL_COLUMNS: usize = 2;

// ============================================================================
// Row / Table
// ============================================================================

/// One observed disease pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub disease_a: String,
    pub disease_b: String,
    pub s_ab_observed: f64,
    pub d_ab_observed: f64,
    pub z_full_rand: f64,
    pub p_full_rand: f64,
    pub q_full_rand: f64,
    pub z_mesh_rand: f64,
    pub p_mesh_rand: f64,
    pub q_mesh_rand: f64,
}

impl Row {
    /// A row with only the fields the graph builder reads; statistics are NaN.
    pub fn pair(disease_a: impl Into<String>, disease_b: impl Into<String>, s_ab_observed: f64) -> Self {
        Self {
            disease_a: disease_a.into(),
            disease_b: disease_b.into(),
            s_ab_observed,
            d_ab_observed: f64::NAN,
            z_full_rand: f64::NAN,
            p_full_rand: f64::NAN,
            q_full_rand: f64::NAN,
            z_mesh_rand: f64::NAN,
            p_mesh_rand: f64::NAN,
            q_mesh_rand: f64::NAN,
        }
    }
}

/// Rows in source order. Duplicate pairs are kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }
}

impl From<Vec<Row>> for Table {
    fn from(rows: Vec<Row>) -> Self {
        Self::new(rows)
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

// ============================================================================
// TableLoader
// ============================================================================

/// Positional TSV loader with a fixed-length preamble skip.
#[derive(Debug, Clone)]
pub struct TableLoader {
    columns: Vec<String>,
    skip_rows: usize,
}

impl Default for TableLoader {
    fn default() -> Self {
        Self {
            columns: COLUMNS.iter().map(|c| c.to_string()).collect(),
            skip_rows: DEFAULT_SKIP_ROWS,
        }
    }
}

impl TableLoader {
    /// Loader with custom column labels and preamble length.
    ///
    /// `columns` must name exactly [`ROW_WIDTH`] columns.
    pub fn new(columns: &[&str], skip_rows: usize) -> Result<Self> {
        if columns.len() != ROW_WIDTH {
            return Err(Error::Schema(format!(
                "expected {ROW_WIDTH} column names, got {}",
                columns.len()
            )));
        }
        Ok(Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            skip_rows,
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn skip_rows(&self) -> usize {
        self.skip_rows
    }

    /// Parse a whole stream into a [`Table`]. Fails on the first bad line.
    ///
    /// Lines end at `\n` only; a trailing `\r` stays in the last field.
    pub fn load<R: Read>(&self, reader: R) -> Result<Table> {
        let mut reader = BufReader::new(reader);

        // Preamble: raw bytes, so it need not be valid UTF-8.
        let mut skipped = 0usize;
        let mut discard = Vec::new();
        while skipped < self.skip_rows {
            discard.clear();
            if reader.read_until(b'\n', &mut discard)? == 0 {
                break;
            }
            skipped += 1;
        }

        let mut body = Vec::new();
        reader.read_to_end(&mut body)?;

        let mut records = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(body.as_slice());

        let mut lines = LineCounter::new(&body, skipped as u64 + 1);
        let mut rows = Vec::new();
        let mut record = csv::ByteRecord::new();
        while records.read_byte_record(&mut record)? {
            let start = record.position().map_or(0, |p| p.byte() as usize);
            let line = lines.line_at(start);
            if is_blank(&record) {
                continue;
            }
            rows.push(self.parse_record(&record, line)?);
        }

        debug!(rows = rows.len(), preamble = skipped, "loaded disease pair table");
        Ok(Table::new(rows))
    }

    fn parse_record(&self, record: &csv::ByteRecord, line: u64) -> Result<Row> {
        if record.len() < self.columns.len() {
            return Err(Error::MalformedRow {
                line,
                expected: self.columns.len(),
                found: record.len(),
            });
        }

        let mut values = [0.0f64; ROW_WIDTH - LABEL_COLUMNS];
        for (slot, col) in values.iter_mut().zip(LABEL_COLUMNS..ROW_WIDTH) {
            let raw = self.field(record, col, line)?;
            *slot = self.parse_float(raw, col, line)?;
        }
        let [s_ab, d_ab, z_full, p_full, q_full, z_mesh, p_mesh, q_mesh] = values;

        Ok(Row {
            disease_a: self.field(record, 0, line)?.to_string(),
            disease_b: self.field(record, 1, line)?.to_string(),
            s_ab_observed: s_ab,
            d_ab_observed: d_ab,
            z_full_rand: z_full,
            p_full_rand: p_full,
            q_full_rand: q_full,
            z_mesh_rand: z_mesh,
            p_mesh_rand: p_mesh,
            q_mesh_rand: q_mesh,
        })
    }

    fn field<'r>(&self, record: &'r csv::ByteRecord, col: usize, line: u64) -> Result<&'r str> {
        std::str::from_utf8(&record[col]).map_err(|_| Error::Encoding {
            line,
            column: self.columns[col].clone(),
        })
    }

    /// Blank cells are missing values and read as NaN.
    fn parse_float(&self, raw: &str, col: usize, line: u64) -> Result<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(f64::NAN);
        }
        trimmed.parse::<f64>().map_err(|_| Error::NumericParse {
            line,
            column: self.columns[col].clone(),
            value: raw.to_string(),
        })
    }
}

/// A line holding nothing but whitespace (e.g. a lone `\r`).
fn is_blank(record: &csv::ByteRecord) -> bool {
    record.len() == 1 && record[0].trim_ascii().is_empty()
}

/// Maps byte offsets in the post-preamble body to physical line numbers.
///
/// Offsets must be queried in increasing order.
struct LineCounter<'a> {
    body: &'a [u8],
    offset: usize,
    line: u64,
}

impl<'a> LineCounter<'a> {
    fn new(body: &'a [u8], first_line: u64) -> Self {
        Self { body, offset: 0, line: first_line }
    }

    /// Line of the record starting at `start`. The reader may report the
    /// start of skipped empty lines, so leading `\n` bytes are stepped over.
    fn line_at(&mut self, start: usize) -> u64 {
        let mut pos = start.max(self.offset).min(self.body.len());
        while self.body.get(pos) == Some(&b'\n') {
            pos += 1;
        }
        self.line += self.body[self.offset..pos].iter().filter(|&&b| b == b'\n').count() as u64;
        self.offset = pos;
        self.line
    }
}

/// Parse `reader` with the given column labels and preamble length.
pub fn load<R: Read>(reader: R, columns: &[&str], skip_rows: usize) -> Result<Table> {
    TableLoader::new(columns, skip_rows)?.load(reader)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_preamble() -> TableLoader {
        TableLoader::new(&COLUMNS, 0).unwrap()
    }

    #[test]
    fn test_parse_full_row() {
        let input = "Asthma\tDiabetes\t-0.3\t0.1\t1\t0.5\t0.6\t2\t0.01\t0.02\n";
        let table = no_preamble().load(input.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        let row = &table.rows()[0];
        assert_eq!(row.disease_a, "Asthma");
        assert_eq!(row.disease_b, "Diabetes");
        assert_eq!(row.s_ab_observed, -0.3);
        assert_eq!(row.d_ab_observed, 0.1);
        assert_eq!(row.q_mesh_rand, 0.02);
    }

    #[test]
    fn test_blank_numeric_cell_is_nan() {
        let input = "A\tB\t\t0.1\t1\t0.5\t0.6\t2\t0.01\t0.02\n";
        let table = no_preamble().load(input.as_bytes()).unwrap();
        assert!(table.rows()[0].s_ab_observed.is_nan());
    }

    #[test]
    fn test_nan_literal_is_accepted() {
        let input = "A\tB\tNaN\t0.1\t1\t0.5\t0.6\t2\t0.01\t0.02\n";
        let table = no_preamble().load(input.as_bytes()).unwrap();
        assert!(table.rows()[0].s_ab_observed.is_nan());
    }

    #[test]
    fn test_numeric_parse_error_names_column() {
        let input = "A\tB\t-0.1\tabc\t1\t0.5\t0.6\t2\t0.01\t0.02\n";
        let err = no_preamble().load(input.as_bytes()).unwrap_err();
        match err {
            Error::NumericParse { line, column, value } => {
                assert_eq!(line, 1);
                assert_eq!(column, "d_AB (observed)");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_column_count_rejected() {
        let err = TableLoader::new(&["a", "b"], 0).unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }

    #[test]
    fn test_empty_labels_are_kept_by_loader() {
        let input = "\tB\t-0.1\t0\t0\t0\t0\t0\t0\t0\n";
        let table = no_preamble().load(input.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].disease_a, "");
    }
}
