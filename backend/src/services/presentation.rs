use crate::models::{
    Axis, AxisTitle, ChartLayout, ChartSpec, CorrelationResult, CorrelationRow, LineTrace,
    MergedTable, TableColumn, TableSpec,
};

pub const CURRENCY_COLUMN: &str = "Currency";
pub const COEFFICIENT_COLUMN: &str = "Spearman Coefficient";
pub const Y_AXIS_TITLE: &str = "Scaled price";
const HOVER_TEMPLATE: &str = "<i>Value</i> : %{y:.2f} - %{x}<extra></extra>";

pub fn chart_title(symbols: &[String]) -> String {
    format!("{} historical price scaled", symbols.join(", "))
}

pub fn caption(reference: &str) -> String {
    format!("Correlation coefficient score to {}", reference)
}

/// One line per symbol over the scaled columns only.
pub fn build_chart(table: &MergedTable, symbols: &[String]) -> ChartSpec {
    let data = table
        .columns
        .iter()
        .map(|column| LineTrace {
            trace_type: "scatter",
            mode: "lines",
            name: column.symbol.clone(),
            x: table.dates.clone(),
            y: column.scaled.clone(),
            hovertemplate: HOVER_TEMPLATE.to_string(),
        })
        .collect();

    ChartSpec {
        data,
        layout: ChartLayout {
            title: AxisTitle { text: chart_title(symbols) },
            xaxis: Axis {
                title: AxisTitle { text: String::new() },
                range: None,
            },
            yaxis: Axis {
                title: AxisTitle { text: Y_AXIS_TITLE.to_string() },
                range: Some([0.0, 100.0]),
            },
            showlegend: true,
        },
    }
}

pub fn build_table(result: &CorrelationResult) -> TableSpec {
    TableSpec {
        columns: vec![
            TableColumn { name: CURRENCY_COLUMN, id: CURRENCY_COLUMN },
            TableColumn { name: COEFFICIENT_COLUMN, id: COEFFICIENT_COLUMN },
        ],
        rows: result
            .entries
            .iter()
            .map(|entry| CorrelationRow {
                currency: entry.symbol.clone(),
                spearman_coefficient: entry.coefficient,
            })
            .collect(),
        sortable: true,
    }
}
