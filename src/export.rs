use serde::Serialize;

use crate::color::{self, ColorMap};
use crate::data::aggregate::{Point, SeriesMap};
use crate::data::model::GroupBy;
use crate::error::{Error, Result};

const TITLE: &str = "=== Chart Export ===";
const FIELD_WIDTH: usize = 12;

// ---------------------------------------------------------------------------
// Plain-text tables
// ---------------------------------------------------------------------------

/// Render every series as an aligned two-column table, one block per group
/// in key order:
///
/// ```text
/// Dataset: A
/// Avg Sleep   ,Avg Stress
/// 7.30        ,7.00
///
/// ```
pub fn format_series(series: &SeriesMap) -> Result<String> {
    if series.is_empty() {
        return Err(Error::EmptyInput("no series to export"));
    }

    let header = format!("{:<w$},{:<w$}\n", "Avg Sleep", "Avg Stress", w = FIELD_WIDTH);
    let mut out = format!("{TITLE}\n\n");
    for (key, s) in series {
        out.push_str(&format!("Dataset: {key}\n"));
        out.push_str(&header);
        for p in &s.points {
            out.push_str(&format!("{:<w$.2},{:<w$.2}\n", p.x, p.y, w = FIELD_WIDTH));
        }
        out.push('\n');
    }
    Ok(out)
}

// ---------------------------------------------------------------------------
// JSON for chart front-ends
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ChartExport<'a> {
    group_by: GroupBy,
    series: Vec<ChartSeries<'a>>,
}

#[derive(Serialize)]
struct ChartSeries<'a> {
    key: &'a str,
    color: String,
    points: &'a [Point],
}

/// Serialize the series map, with one colour per series, as pretty JSON.
pub fn to_json(series: &SeriesMap, by: GroupBy) -> Result<String> {
    if series.is_empty() {
        return Err(Error::EmptyInput("no series to export"));
    }

    let colors = ColorMap::new(by, series.keys().map(String::as_str));
    let export = ChartExport {
        group_by: by,
        series: series
            .iter()
            .map(|(key, s)| ChartSeries {
                key,
                color: color::to_hex(colors.color_for(key)),
                points: &s.points,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
