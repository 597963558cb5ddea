use chrono::NaiveDate;
use serde::Serialize;

/// Scaled and actual values of one symbol, parallel to `MergedTable::dates`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolColumns {
    pub symbol: String,
    pub scaled: Vec<Option<f64>>,
    pub actual: Vec<Option<f64>>,
}

/// Date-indexed table holding every requested symbol side by side.
///
/// `dates` is strictly ascending. Every column has exactly `dates.len()`
/// entries and `None` marks a date the provider had no data for. Each row has
/// at least one symbol with data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<SymbolColumns>,
}

impl MergedTable {
    pub fn column(&self, symbol: &str) -> Option<&SymbolColumns> {
        self.columns.iter().find(|c| c.symbol == symbol)
    }

    pub fn row_count(&self) -> usize {
        self.dates.len()
    }
}
