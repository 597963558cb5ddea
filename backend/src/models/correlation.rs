use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationEntry {
    pub symbol: String,
    /// Spearman rho in [-1, 1]; `None` when it is undefined for the pair.
    pub coefficient: Option<f64>,
}

/// Coefficients of every non-reference symbol against the reference, in
/// selection order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    pub reference: String,
    pub entries: Vec<CorrelationEntry>,
}
