//! Sleep vs stress trend aggregation.
//!
//! Survey CSV text goes through [`ingest`], the resulting records are grouped
//! and binned by [`aggregate`], and the series are rendered by
//! [`format_series`] (plain-text tables) or [`export::to_json`]. Every step is
//! a pure function over its inputs; holding a dataset between calls is up to
//! the caller.

pub mod color;
pub mod data;
pub mod error;
pub mod export;

pub use data::aggregate::{aggregate, Point, Series, SeriesMap, BIN_SIZE};
pub use data::loader::ingest;
pub use data::model::{GroupBy, Record, RowIssue, RowWarning, SurveyDataset};
pub use error::{Error, Result};
pub use export::format_series;
