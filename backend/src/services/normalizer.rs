use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{DateRange, MergedTable, RawSeries, SymbolColumns};

pub const SCALE_MIN: f64 = 0.0;
pub const SCALE_MAX: f64 = 100.0;

/// Min-max scale `values` into [0, 100].
///
/// The minimum maps to 0 and the maximum to 100. A series without spread
/// (all equal, or a single value) maps entirely to 0.
pub fn scale_min_max(values: &[f64]) -> Vec<f64> {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    let spread = max - min;
    if !spread.is_finite() || spread <= 0.0 {
        return vec![SCALE_MIN; values.len()];
    }

    values
        .iter()
        .map(|v| {
            if *v == max {
                SCALE_MAX
            } else {
                (v - min) / spread * (SCALE_MAX - SCALE_MIN) + SCALE_MIN
            }
        })
        .collect()
}

/// Scaled and actual value for each date of one series, limited to `range`.
fn scale_series(range: &DateRange, series: &RawSeries) -> HashMap<NaiveDate, (f64, f64)> {
    let in_range: Vec<_> = series
        .points()
        .iter()
        .filter(|p| range.contains(p.date))
        .collect();

    let actual: Vec<f64> = in_range.iter().map(|p| p.adj_close).collect();
    let scaled = scale_min_max(&actual);

    in_range
        .iter()
        .zip(scaled)
        .map(|(p, s)| (p.date, (s, p.adj_close)))
        .collect()
}

/// Merge every series onto the calendar of `range`.
///
/// Each series is scaled on its own. Dates where no series has data are
/// dropped; dates where only some series have data keep `None` for the
/// others. Column order follows `series`.
pub fn align(range: &DateRange, series: &[RawSeries]) -> MergedTable {
    let scaled: Vec<_> = series.iter().map(|s| scale_series(range, s)).collect();

    let mut dates = Vec::new();
    let mut columns: Vec<SymbolColumns> = series
        .iter()
        .map(|s| SymbolColumns {
            symbol: s.symbol.clone(),
            scaled: Vec::new(),
            actual: Vec::new(),
        })
        .collect();

    for date in range.days() {
        let row: Vec<Option<(f64, f64)>> = scaled.iter().map(|s| s.get(&date).copied()).collect();
        if row.iter().all(Option::is_none) {
            continue;
        }

        dates.push(date);
        for (column, cell) in columns.iter_mut().zip(row) {
            column.scaled.push(cell.map(|(s, _)| s));
            column.actual.push(cell.map(|(_, a)| a));
        }
    }

    MergedTable { dates, columns }
}
