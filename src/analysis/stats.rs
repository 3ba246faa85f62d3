//! Descriptive statistics over a column of samples.

use stampwatch_types::Stats;

/// Mean, maximum and population standard deviation of `samples`.
///
/// NaN anywhere in the input yields NaN in every field. An empty slice
/// yields NaN as well; callers gate on sample count before getting here.
pub fn describe(samples: &[f64]) -> Stats {
    let mean = mean(samples);
    Stats::new(mean, max(samples), pstdev(samples, mean))
}

/// Arithmetic mean.
pub fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Largest sample. Unlike `f64::max`, NaN wins over any number.
pub fn max(samples: &[f64]) -> f64 {
    let mut iter = samples.iter().copied();
    let Some(first) = iter.next() else {
        return f64::NAN;
    };
    iter.fold(first, |acc, v| {
        if acc.is_nan() || v.is_nan() {
            f64::NAN
        } else {
            acc.max(v)
        }
    })
}

/// Population standard deviation (divisor N) around a known mean.
pub fn pstdev(samples: &[f64], mean: f64) -> f64 {
    let sum_sq: f64 = samples.iter().map(|&v| (v - mean).powi(2)).sum();
    (sum_sq / samples.len() as f64).sqrt()
}

/// Successive differences: `out[i] = column[i + 1] - column[i]`.
pub fn successive_differences(column: &[f64]) -> Vec<f64> {
    column.windows(2).map(|w| w[1] - w[0]).collect()
}
