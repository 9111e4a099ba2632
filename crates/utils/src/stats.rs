//! Summary statistics over parsed table values.

/// Mean and population standard deviation of one table's values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub std: f64,
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let total: f64 = values.iter().sum();
    Some(total / values.len() as f64)
}

/// Population standard deviation (denominator N), `None` for an empty slice.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let avg = mean(values)?;
    let variance = values
        .iter()
        .map(|value| {
            let delta = value - avg;
            delta * delta
        })
        .sum::<f64>()
        / values.len() as f64;
    Some(variance.sqrt())
}

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// Mean and standard deviation, each rounded to two decimals.
pub fn summarize(values: &[f64]) -> Option<Summary> {
    Some(Summary {
        mean: round_to(mean(values)?, 2),
        std: round_to(population_std(values)?, 2),
    })
}
