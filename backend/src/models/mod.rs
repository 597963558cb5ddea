mod catalog;
mod correlation;
pub(crate) mod dashboard;
mod date_range;
mod merged_table;
mod price_point;

pub use catalog::{Catalog, CatalogEntry};
pub use correlation::{CorrelationEntry, CorrelationResult};
pub use dashboard::{
    Axis, AxisTitle, CatalogResponse, ChartLayout, ChartSpec, CorrelationRow, DashboardQuery,
    DashboardRequest, DashboardResponse, LineTrace, TableColumn, TableSpec,
};
pub use date_range::{DateRange, DateRangeError};
pub use merged_table::{MergedTable, SymbolColumns};
pub use price_point::{PricePoint, RawSeries};
