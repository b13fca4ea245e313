use crate::data::models::{FeatureRow, SymbolSeries};

/// Compute the mean of a slice
fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Compute the standard deviation (population, divisor N) of a slice
fn population_std(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / data.len() as f64;
    variance.sqrt()
}

/// Compute the standard deviation (sample, divisor N-1) of a slice
fn sample_std(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let variance =
        data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / (data.len() - 1) as f64;
    variance.sqrt()
}

/// Day-over-day relative change of consecutive values.
/// Undefined at the first entry and wherever the previous value is zero.
pub fn pct_changes(values: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            out.push(None);
            continue;
        }
        let prev = values[i - 1];
        if prev == 0.0 {
            out.push(None);
            continue;
        }
        let change = (v - prev) / prev;
        out.push(if change.is_finite() { Some(change) } else { None });
    }
    out
}

/// Rolling mean of `pct` over a trailing `window`, divided again by the
/// window length. Undefined wherever the trailing window is incomplete or
/// contains an undefined entry, so the first defined index is `window`
/// (the window ending there no longer covers the undefined first change).
pub fn rolling_mean_pct(pct: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; pct.len()];
    if window == 0 {
        return out;
    }
    for i in 0..pct.len() {
        if i + 1 < window {
            continue;
        }
        let mut sum = 0.0;
        let mut complete = true;
        for entry in &pct[i + 1 - window..=i] {
            match entry {
                Some(v) => sum += v,
                None => {
                    complete = false;
                    break;
                }
            }
        }
        if complete {
            out[i] = Some(sum / window as f64 / window as f64);
        }
    }
    out
}

/// Rolling population standard deviation of `values` over a trailing window.
/// Undefined until the window first fills, at index `window - 1`.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 {
        return out;
    }
    for i in 0..values.len() {
        if i + 1 < window {
            continue;
        }
        out[i] = Some(population_std(&values[i + 1 - window..=i]));
    }
    out
}

/// Z-score of each value against the mean and sample standard deviation of
/// the whole slice. All undefined when the slice has no spread.
pub fn standard_scores(values: &[f64]) -> Vec<Option<f64>> {
    let s = sample_std(values);
    if s <= 0.0 || !s.is_finite() {
        return vec![None; values.len()];
    }
    let m = mean(values);
    values.iter().map(|v| Some((v - m) / s)).collect()
}

/// Derive the full feature set for one symbol's history.
/// The input must be ascending by date; the output keeps one row per input
/// point in the same order.
pub fn compute_features(series: &SymbolSeries, window: usize) -> Vec<FeatureRow> {
    let opens = series.opens();
    let pct = pct_changes(&opens);
    let rolling = rolling_mean_pct(&pct, window);
    let stds = rolling_std(&opens, window);
    let scores = standard_scores(&opens);

    series
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let sharpe = match (rolling[i], stds[i]) {
                (Some(r), Some(s)) if s > 0.0 => Some(r / s),
                _ => None,
            };
            FeatureRow {
                unix_ms: p.unix_ms,
                date: p.date,
                symbol: p.symbol.clone(),
                open: p.open,
                pct_change: pct[i],
                rolling_pct_change: rolling[i],
                std_deviation: stds[i],
                sharpe_score: sharpe,
                standard_score: scores[i],
            }
        })
        .collect()
}

/// Combined long-form feature table: per-symbol outputs concatenated in
/// store order, so rows stay grouped by symbol and ascending by date
/// within each group.
pub fn compute_table(series: &[SymbolSeries], window: usize) -> Vec<FeatureRow> {
    let mut table = Vec::new();
    for s in series {
        table.extend(compute_features(s, window));
    }
    table
}
