//! Descriptive statistics over plain `f64` series.
//!
//! Every function here treats an empty series as "no result" rather than
//! producing a NaN placeholder.

use serde::{Deserialize, Serialize};

/// Count, centre, spread and quartiles of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent below two values
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Summary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];

        Some(Self {
            count: values.len(),
            mean: bounded_mean(values, min, max),
            std_dev: sample_std_dev(values),
            min,
            q1: quantile_sorted(&sorted, 0.25),
            median: quantile_sorted(&sorted, 0.5),
            q3: quantile_sorted(&sorted, 0.75),
            max,
        })
    }

    pub fn interquartile_range(&self) -> f64 {
        self.q3 - self.q1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram; every bin is half-open except the last, which is closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    pub fn from_values(values: &[f64], bin_count: usize) -> Option<Self> {
        if values.is_empty() || bin_count == 0 {
            return None;
        }

        let (mut lower, mut upper) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            });

        if lower == upper {
            lower -= 0.5;
            upper += 0.5;
        }

        let width = (upper - lower) / bin_count as f64;
        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| HistogramBin {
                lower: lower + width * i as f64,
                upper: if i + 1 == bin_count {
                    upper
                } else {
                    lower + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for value in values {
            let index = (((value - lower) / width) as usize).min(bin_count - 1);
            bins[index].count += 1;
        }

        Some(Self { bins })
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    Some(bounded_mean(values, min, max))
}

/// Arithmetic mean kept inside [min, max]; summation rounding can otherwise
/// step just outside a constant series
fn bounded_mean(values: &[f64], min: f64, max: f64) -> f64 {
    let sum: f64 = values.iter().sum();
    let mean = sum / values.len() as f64;
    if min.is_finite() && max.is_finite() && min <= max {
        mean.clamp(min, max)
    } else {
        mean
    }
}

pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (n - 1.0)).sqrt())
}

/// Quantile of an ascending series by linear interpolation between closest ranks
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Pearson correlation coefficient of two equally long series.
///
/// Undefined (None) for fewer than two pairs or a constant series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    // An identical series correlates perfectly; skip the rounding in the division
    if xs == ys {
        return Some(1.0);
    }

    Some((covariance / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_matches_describe() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let summary = Summary::from_values(&values).unwrap();

        assert_eq!(summary.count, 8);
        assert_eq!(summary.mean, 4.5);
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 8.0);
        assert_eq!(summary.q1, 2.75);
        assert_eq!(summary.median, 4.5);
        assert_eq!(summary.q3, 6.25);
        assert!((summary.std_dev.unwrap() - 2.449_489_742_783_178).abs() < 1e-12);
        assert_eq!(summary.interquartile_range(), 3.5);
    }

    #[test]
    fn test_summary_single_value() {
        let summary = Summary::from_values(&[42.0]).unwrap();
        assert_eq!(summary.median, 42.0);
        assert_eq!(summary.std_dev, None);
    }

    #[test]
    fn test_summary_empty() {
        assert!(Summary::from_values(&[]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_mean_stays_within_bounds() {
        let values = [0.1, 0.1, 0.1];
        // The plain sum / n gives 0.10000000000000002 here
        assert_eq!(mean(&values), Some(0.1));
    }

    #[test]
    fn test_non_finite_values_do_not_panic() {
        assert!(mean(&[f64::NAN]).is_some_and(f64::is_nan));
        assert!(mean(&[1.0, f64::INFINITY]).is_some());

        let summary = Summary::from_values(&[288.28, f64::NAN]).unwrap();
        assert!(summary.mean.is_nan());
        assert_eq!(summary.min, 288.28);
    }

    #[test]
    fn test_histogram_bins() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let histogram = Histogram::from_values(&values, 5).unwrap();

        assert_eq!(histogram.bins.len(), 5);
        assert_eq!(histogram.total(), values.len());
        assert_eq!(histogram.bins[0].lower, 0.0);
        assert_eq!(histogram.bins[4].upper, 10.0);
        // The maximum falls in the last, closed bin
        assert_eq!(histogram.bins[4].count, 3);
        assert_eq!(histogram.max_count(), 3);
    }

    #[test]
    fn test_histogram_constant_series() {
        let histogram = Histogram::from_values(&[3.0, 3.0], 10).unwrap();
        assert_eq!(histogram.bins[0].lower, 2.5);
        assert_eq!(histogram.bins[9].upper, 3.5);
        assert_eq!(histogram.total(), 2);
    }

    #[test]
    fn test_pearson_self_correlation_is_exactly_one() {
        let values = [100.0, 6000.0, 5900.0, 4321.0, 17.0];
        assert_eq!(pearson(&values, &values), Some(1.0));
    }

    #[test]
    fn test_pearson_known_values() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let inverse = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &inverse).unwrap() + 1.0).abs() < 1e-12);

        let ys = [2.0, 1.0, 4.0, 3.0];
        assert!((pearson(&xs, &ys).unwrap() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_undefined_cases() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[5.0, 5.0, 5.0]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[1.0, 2.0, 3.0]), None);
    }
}
