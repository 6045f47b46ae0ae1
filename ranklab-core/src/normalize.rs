//! Min-max normalization across the instrument universe.
//!
//! The scale depends on the whole column, so this is an explicit two-pass
//! algorithm: scan min/max over every present value, then map each cell.
//! It is a reduction over the universe, never a streaming fold.

/// Rescale a metric column to `[0, 1]` using the column's own min and max.
///
/// Non-finite values (NaN, ±inf) are treated as absent. A column with no
/// present values or no spread (`min == max`) maps every present value to
/// the neutral `0.5`, so a degenerate zero-variance universe neither
/// rewards nor penalizes anyone. With `higher_is_better` false the scale
/// is inverted (`1 − scaled`).
///
/// Output cells are always in `[0, 1]` or absent; this never panics.
pub fn min_max_normalize(values: &[Option<f64>], higher_is_better: bool) -> Vec<Option<f64>> {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut any_present = false;
    for v in values.iter().filter_map(present) {
        any_present = true;
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    if !any_present || min == max {
        return values
            .iter()
            .map(|cell| cell.filter(|v| v.is_finite()).map(|_| 0.5))
            .collect();
    }

    values
        .iter()
        .map(|cell| {
            cell.filter(|v| v.is_finite()).map(|v| {
                let scaled = (v - min) / (max - min);
                if higher_is_better {
                    scaled
                } else {
                    1.0 - scaled
                }
            })
        })
        .collect()
}

fn present(cell: &Option<f64>) -> Option<f64> {
    cell.filter(|v| v.is_finite())
}
