use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::MergedTable;

/// Symbol selection as sent by the page: either one symbol or a list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SymbolSelection {
    One(String),
    Many(Vec<String>),
}

impl SymbolSelection {
    /// Comma separated form used in query strings (`?symbols=BTC,ETH`).
    pub fn from_csv(raw: &str) -> Self {
        Self::Many(raw.split(',').map(str::to_string).collect())
    }

    /// Trimmed, upper-cased, non-empty symbols with duplicates removed,
    /// first occurrence kept.
    pub fn into_symbols(self) -> Vec<String> {
        let raw = match self {
            SymbolSelection::One(symbol) => vec![symbol],
            SymbolSelection::Many(symbols) => symbols,
        };

        let mut out: Vec<String> = Vec::with_capacity(raw.len());
        for symbol in raw {
            let symbol = symbol.trim().to_uppercase();
            if !symbol.is_empty() && !out.contains(&symbol) {
                out.push(symbol);
            }
        }
        out
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardRequest {
    pub symbols: Option<SymbolSelection>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub symbols: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl From<DashboardQuery> for DashboardRequest {
    fn from(query: DashboardQuery) -> Self {
        Self {
            symbols: query.symbols.as_deref().map(SymbolSelection::from_csv),
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

// Plotly-shaped chart description, serialized as-is for `Plotly.react`.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub data: Vec<LineTrace>,
    pub layout: ChartLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineTrace {
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    pub mode: &'static str,
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
    pub hovertemplate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartLayout {
    pub title: AxisTitle,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub showlegend: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AxisTitle {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub title: AxisTitle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableColumn {
    pub name: &'static str,
    pub id: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CorrelationRow {
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "Spearman Coefficient")]
    pub spearman_coefficient: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSpec {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<CorrelationRow>,
    pub sortable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub reference: String,
    pub caption: String,
    pub chart: ChartSpec,
    pub table: TableSpec,
    pub merged: MergedTable,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    pub symbols: Vec<crate::models::CatalogEntry>,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    pub default_selection: Vec<String>,
}
