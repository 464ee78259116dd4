use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const SLEEP_COLUMN: &str = "Sleep_Hours_per_Night";
pub const STRESS_COLUMN: &str = "Stress_Level (1-10)";
pub const GRADE_COLUMN: &str = "Grade";
pub const GENDER_COLUMN: &str = "Gender";
pub const DEPARTMENT_COLUMN: &str = "Department";

/// Header names every input file must carry (case-sensitive, any order).
pub const REQUIRED_COLUMNS: [&str; 5] = [
    SLEEP_COLUMN,
    STRESS_COLUMN,
    GRADE_COLUMN,
    GENDER_COLUMN,
    DEPARTMENT_COLUMN,
];

// ---------------------------------------------------------------------------
// Record – one validated survey row
// ---------------------------------------------------------------------------

/// A single survey response. Both numeric fields are always finite; records
/// are only built by the loader after a row parsed cleanly.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    sleep_hours: f64,
    stress_level: f64,
    grade: String,
    gender: String,
    department: String,
}

impl Record {
    pub(crate) fn new(
        sleep_hours: f64,
        stress_level: f64,
        grade: impl Into<String>,
        gender: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        debug_assert!(sleep_hours.is_finite() && stress_level.is_finite());
        Record {
            sleep_hours,
            stress_level,
            grade: grade.into(),
            gender: gender.into(),
            department: department.into(),
        }
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
    }

    pub fn stress_level(&self) -> f64 {
        self.stress_level
    }

    pub fn grade(&self) -> &str {
        &self.grade
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    pub fn department(&self) -> &str {
        &self.department
    }
}

// ---------------------------------------------------------------------------
// GroupBy – which categorical column partitions the records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GroupBy {
    Grade,
    Gender,
    Department,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grouping attribute '{0}' (expected grade, gender or department)")]
pub struct UnknownAttribute(pub String);

impl GroupBy {
    /// Every attribute, in selector order.
    pub const ALL: [GroupBy; 3] = [GroupBy::Grade, GroupBy::Gender, GroupBy::Department];

    /// The header name of the column this attribute reads.
    pub fn column(self) -> &'static str {
        match self {
            GroupBy::Grade => GRADE_COLUMN,
            GroupBy::Gender => GENDER_COLUMN,
            GroupBy::Department => DEPARTMENT_COLUMN,
        }
    }

    /// The group key of `record` under this attribute.
    pub fn key_of(self, record: &Record) -> &str {
        match self {
            GroupBy::Grade => record.grade(),
            GroupBy::Gender => record.gender(),
            GroupBy::Department => record.department(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for GroupBy {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grade" => Ok(GroupBy::Grade),
            "gender" => Ok(GroupBy::Gender),
            "department" => Ok(GroupBy::Department),
            _ => Err(UnknownAttribute(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Row diagnostics
// ---------------------------------------------------------------------------

/// Why a data row was skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowIssue {
    #[error("expected at least {expected} fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
    #[error("'{column}' is empty")]
    MissingValue { column: &'static str },
    #[error("'{column}' value '{value}' is not a finite number")]
    NotANumber { column: &'static str, value: String },
    #[error("unreadable row: {0}")]
    Malformed(String),
}

/// A skipped row and the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct RowWarning {
    pub line: u64,
    pub issue: RowIssue,
}

impl fmt::Display for RowWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.issue)
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the result of one ingestion
// ---------------------------------------------------------------------------

/// Records in input order, plus the rows that were dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    pub records: Vec<Record>,
    pub skipped: Vec<RowWarning>,
}

impl SurveyDataset {
    /// Number of ingested records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no row survived validation.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sorted distinct group keys for `by`, e.g. for a legend.
    pub fn group_keys(&self, by: GroupBy) -> BTreeSet<&str> {
        self.records.iter().map(|r| by.key_of(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_by_parses_case_insensitively() {
        assert_eq!("Grade".parse::<GroupBy>(), Ok(GroupBy::Grade));
        assert_eq!("gender".parse::<GroupBy>(), Ok(GroupBy::Gender));
        assert_eq!(" DEPARTMENT ".parse::<GroupBy>(), Ok(GroupBy::Department));
        assert!("major".parse::<GroupBy>().is_err());
    }

    #[test]
    fn test_group_by_displays_column_name() {
        assert_eq!(GroupBy::Grade.to_string(), "Grade");
        assert_eq!(GroupBy::Department.column(), "Department");
    }

    #[test]
    fn test_key_of_selects_field() {
        let r = Record::new(7.0, 5.0, "A", "F", "CS");
        assert_eq!(GroupBy::Grade.key_of(&r), "A");
        assert_eq!(GroupBy::Gender.key_of(&r), "F");
        assert_eq!(GroupBy::Department.key_of(&r), "CS");
    }

    #[test]
    fn test_group_keys_sorted_and_distinct() {
        let ds = SurveyDataset {
            records: vec![
                Record::new(7.0, 5.0, "B", "F", "CS"),
                Record::new(6.0, 4.0, "A", "M", "EE"),
                Record::new(5.0, 3.0, "B", "M", ""),
            ],
            skipped: Vec::new(),
        };
        let keys: Vec<&str> = ds.group_keys(GroupBy::Grade).into_iter().collect();
        assert_eq!(keys, vec!["A", "B"]);
        let depts: Vec<&str> = ds.group_keys(GroupBy::Department).into_iter().collect();
        assert_eq!(depts, vec!["", "CS", "EE"]);
    }

    #[test]
    fn test_row_warning_display() {
        let w = RowWarning {
            line: 4,
            issue: RowIssue::NotANumber {
                column: STRESS_COLUMN,
                value: "N/A".into(),
            },
        };
        assert_eq!(
            w.to_string(),
            "line 4: 'Stress_Level (1-10)' value 'N/A' is not a finite number"
        );
    }
}
