use csv::{ReaderBuilder, StringRecord, Trim};

use super::model::{
    RowIssue, RowWarning, Record, SurveyDataset, REQUIRED_COLUMNS, SLEEP_COLUMN, STRESS_COLUMN,
};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Parse survey CSV text into validated records.
///
/// Layout: comma-delimited, first line is the header. The five
/// [`REQUIRED_COLUMNS`] are looked up by exact name, so column order does not
/// matter and extra columns are ignored. Headers and values are trimmed.
/// Quotes carry no meaning: every line is one row, split on every comma.
///
/// A missing column or a blank first line aborts the whole call. A data row
/// with too few fields (blank lines included) or an unparseable number is
/// skipped and reported in [`SurveyDataset::skipped`]; the rest of the file
/// is still read.
pub fn ingest(text: &str) -> Result<SurveyDataset> {
    let mut lines = text.lines();

    let headers = match lines.next() {
        Some(line) if !line.trim().is_empty() => split_line(line)?,
        _ => return Err(Error::EmptyInput("no header row")),
    };
    let columns = ColumnIndex::resolve(&headers)?;

    let mut dataset = SurveyDataset::default();
    for (line_no, line) in (2u64..).zip(lines) {
        let parsed = match split_line(line) {
            Ok(row) => columns.parse_row(&row),
            Err(e) => Err(RowIssue::Malformed(e.to_string())),
        };
        match parsed {
            Ok(record) => dataset.records.push(record),
            Err(issue) => {
                let warning = RowWarning {
                    line: line_no,
                    issue,
                };
                log::debug!("Skipping row: {warning}");
                dataset.skipped.push(warning);
            }
        }
    }

    if !dataset.skipped.is_empty() {
        log::warn!("Skipped {} malformed row(s)", dataset.skipped.len());
    }
    log::info!("Ingested {} survey record(s)", dataset.len());
    Ok(dataset)
}

/// Split one line into trimmed fields. Quoting is off, so a stray `"` stays
/// inside its field instead of running on into the next line. An empty line
/// yields a record with no fields.
fn split_line(line: &str) -> csv::Result<StringRecord> {
    let mut record = StringRecord::new();
    ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(line.as_bytes())
        .read_record(&mut record)?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Header resolution
// ---------------------------------------------------------------------------

/// Field positions of the required columns, as declared by the header.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    sleep: usize,
    stress: usize,
    grade: usize,
    gender: usize,
    department: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let positions = REQUIRED_COLUMNS.map(|name| headers.iter().position(|h| h == name));

        match positions {
            [Some(sleep), Some(stress), Some(grade), Some(gender), Some(department)] => {
                Ok(ColumnIndex {
                    sleep,
                    stress,
                    grade,
                    gender,
                    department,
                })
            }
            _ => Err(Error::Schema {
                missing: REQUIRED_COLUMNS
                    .iter()
                    .zip(positions)
                    .filter(|(_, pos)| pos.is_none())
                    .map(|(name, _)| name.to_string())
                    .collect(),
            }),
        }
    }

    /// Fields a row needs to reach every required column.
    fn width(&self) -> usize {
        [self.sleep, self.stress, self.grade, self.gender, self.department]
            .into_iter()
            .max()
            .map_or(0, |i| i + 1)
    }

    fn parse_row(&self, row: &StringRecord) -> std::result::Result<Record, RowIssue> {
        let expected = self.width();
        if row.len() < expected {
            return Err(RowIssue::TooFewFields {
                expected,
                found: row.len(),
            });
        }

        let sleep = parse_number(row, self.sleep, SLEEP_COLUMN)?;
        let stress = parse_number(row, self.stress, STRESS_COLUMN)?;
        let text = |i: usize| row.get(i).unwrap_or_default();

        Ok(Record::new(
            sleep,
            stress,
            text(self.grade),
            text(self.gender),
            text(self.department),
        ))
    }
}

fn parse_number(
    row: &StringRecord,
    idx: usize,
    column: &'static str,
) -> std::result::Result<f64, RowIssue> {
    let raw = row.get(idx).unwrap_or_default();
    if raw.is_empty() {
        return Err(RowIssue::MissingValue { column });
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(RowIssue::NotANumber {
            column,
            value: raw.to_string(),
        }),
    }
}
