use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::data::models::{CorrelationMatrix, SymbolSeries};

/// Pearson correlation coefficient of two equal-length samples.
/// Undefined for fewer than two points or zero spread on either side.
fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let mx = xs[..n].iter().sum::<f64>() / n as f64;
    let my = ys[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = xs[i] - mx;
        let dy = ys[i] - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some(cov / denom)
}

fn round2(r: f64) -> f64 {
    (r * 100.0).round() / 100.0
}

/// Pairwise correlation of opening prices, aligned on the dates each pair
/// of symbols has in common. Dates present on only one side are excluded
/// pair by pair. Coefficients are rounded to two decimals for display;
/// every non-empty symbol correlates 1.0 with itself.
pub fn compute_correlation(series: &[SymbolSeries]) -> CorrelationMatrix {
    let symbols: Vec<String> = series.iter().map(|s| s.symbol.clone()).collect();
    let n = symbols.len();

    let by_date: Vec<BTreeMap<NaiveDate, f64>> = series
        .iter()
        .map(|s| s.points.iter().map(|p| (p.date, p.open)).collect())
        .collect();

    let mut matrix = vec![vec![None; n]; n];
    for i in 0..n {
        if !by_date[i].is_empty() {
            matrix[i][i] = Some(1.0);
        }
        for j in (i + 1)..n {
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for (date, x) in &by_date[i] {
                if let Some(y) = by_date[j].get(date) {
                    xs.push(*x);
                    ys.push(*y);
                }
            }
            let r = pearson(&xs, &ys).map(round2);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    CorrelationMatrix { symbols, matrix }
}

/// Mean of the defined off-diagonal coefficients, 0.0 when none are defined
pub fn average_cross_correlation(corr: &CorrelationMatrix) -> f64 {
    let n = corr.symbols.len();
    let mut sum = 0.0;
    let mut count = 0usize;
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            if let Some(r) = corr.matrix[i][j] {
                sum += r;
                count += 1;
            }
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
