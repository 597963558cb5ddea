use crate::models::{CorrelationEntry, CorrelationResult, MergedTable};

/// Ranks starting at 1. Tied values share the mean of the ranks they span.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*a].total_cmp(&values[*b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // positions i..=j hold ranks i+1..=j+1
        let rank = (i + j) as f64 / 2.0 + 1.0;
        for k in i..=j {
            ranks[order[k]] = rank;
        }
        i = j + 1;
    }
    ranks
}

fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x <= 0.0 || var_y <= 0.0 {
        return None;
    }

    Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0))
}

/// Spearman rank correlation of two equally long samples.
///
/// `None` when fewer than two pairs exist or either side is constant.
pub fn spearman(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Scaled values of both symbols on the dates where both are present.
fn paired_values(table: &MergedTable, reference: &str, other: &str) -> (Vec<f64>, Vec<f64>) {
    let (Some(reference), Some(other)) = (table.column(reference), table.column(other)) else {
        return (Vec::new(), Vec::new());
    };

    reference
        .scaled
        .iter()
        .zip(&other.scaled)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .unzip()
}

/// Correlate each of `others` with `reference` over their common dates.
///
/// Output follows the order of `others`; `reference` itself is skipped if
/// it appears there.
pub fn correlate(table: &MergedTable, reference: &str, others: &[String]) -> CorrelationResult {
    let entries = others
        .iter()
        .filter(|symbol| symbol.as_str() != reference)
        .map(|symbol| {
            let (x, y) = paired_values(table, reference, symbol);
            CorrelationEntry {
                symbol: symbol.clone(),
                coefficient: spearman(&x, &y),
            }
        })
        .collect();

    CorrelationResult {
        reference: reference.to_string(),
        entries,
    }
}
