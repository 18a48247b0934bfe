//! Per-column statistics computed by the encoder over raw values.

use crate::field::{Field, Stats};
use crate::value::Value;

/// Computes start/end/min/max/mean for one column, skipping cells with no
/// numeric view. Returns `None` when the column has no numeric values at
/// all. The mean accumulates in `f64` and is stored as `f32`.
pub fn column_stats(data: &[Vec<Value>], col: usize) -> Option<Stats> {
    let mut first = None;
    let mut last = 0.0f64;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0f64;
    let mut count = 0usize;

    for row in data {
        let Some(v) = row.get(col).and_then(Value::as_f64) else {
            continue;
        };
        if first.is_none() {
            first = Some(v);
        }
        last = v;
        min = min.min(v);
        max = max.max(v);
        sum += v;
        count += 1;
    }

    let start = first?;
    Some(Stats {
        start: start as f32,
        end: last as f32,
        min: min as f32,
        max: max as f32,
        mean: (sum / count as f64) as f32,
    })
}

/// Attaches fresh statistics to every numeric field, replacing any stale
/// ones. Non-numeric fields and all-null columns keep `stats: None`.
pub fn attach_stats(header: &mut [Field], data: &[Vec<Value>]) {
    for (col, field) in header.iter_mut().enumerate() {
        field.stats = if field.field_type.is_numeric() {
            column_stats(data, col)
        } else {
            None
        };
    }
}
