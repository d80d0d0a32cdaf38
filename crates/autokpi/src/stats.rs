//! Descriptive statistics over `f64` slices.
//!
//! Every helper reports degenerate input as a [`StatError`] instead of
//! returning NaN, so callers decide explicitly whether to skip a value.

use thiserror::Error;

/// Why a statistic could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("insufficient data: need at least {needed} values, found {found}")]
    InsufficientData { needed: usize, found: usize },

    #[error("values have zero variance")]
    ZeroVariance,

    #[error("baseline is zero")]
    ZeroBaseline,
}

pub type StatResult<T> = std::result::Result<T, StatError>;

fn require(values: &[f64], needed: usize) -> StatResult<()> {
    if values.len() < needed {
        Err(StatError::InsufficientData {
            needed,
            found: values.len(),
        })
    } else {
        Ok(())
    }
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> StatResult<f64> {
    require(values, 1)?;
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

fn sum_squared_deviations(values: &[f64], center: f64) -> f64 {
    values.iter().map(|v| (v - center).powi(2)).sum()
}

/// Sample variance (n - 1 denominator).
pub fn sample_variance(values: &[f64]) -> StatResult<f64> {
    require(values, 2)?;
    let m = mean(values)?;
    Ok(sum_squared_deviations(values, m) / (values.len() - 1) as f64)
}

/// Sample standard deviation (n - 1 denominator).
pub fn sample_std(values: &[f64]) -> StatResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Population standard deviation (n denominator).
pub fn population_std(values: &[f64]) -> StatResult<f64> {
    let m = mean(values)?;
    Ok((sum_squared_deviations(values, m) / values.len() as f64).sqrt())
}

/// Quantile `q` in `[0, 1]` using linear interpolation between order
/// statistics.
pub fn quantile(values: &[f64], q: f64) -> StatResult<f64> {
    require(values, 1)?;
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    Ok(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Median, the 0.5 quantile.
pub fn median(values: &[f64]) -> StatResult<f64> {
    quantile(values, 0.5)
}

/// Tukey fences `(q1 - width * iqr, q3 + width * iqr)`.
pub fn iqr_fences(values: &[f64], width: f64) -> StatResult<(f64, f64)> {
    let q1 = quantile(values, 0.25)?;
    let q3 = quantile(values, 0.75)?;
    let iqr = q3 - q1;
    Ok((q1 - width * iqr, q3 + width * iqr))
}

/// Absolute z-scores using the population standard deviation.
pub fn abs_z_scores(values: &[f64]) -> StatResult<Vec<f64>> {
    let m = mean(values)?;
    let sd = population_std(values)?;
    if sd == 0.0 {
        return Err(StatError::ZeroVariance);
    }
    Ok(values.iter().map(|v| ((v - m) / sd).abs()).collect())
}

/// Biased sample skewness `g1 = m3 / m2^1.5`.
pub fn skewness(values: &[f64]) -> StatResult<f64> {
    require(values, 1)?;
    let m = mean(values)?;
    let n = values.len() as f64;
    let m2 = sum_squared_deviations(values, m) / n;
    if m2 == 0.0 {
        return Err(StatError::ZeroVariance);
    }
    let m3 = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / n;
    Ok(m3 / m2.powf(1.5))
}

/// Biased excess kurtosis `m4 / m2^2 - 3`.
pub fn excess_kurtosis(values: &[f64]) -> StatResult<f64> {
    require(values, 1)?;
    let m = mean(values)?;
    let n = values.len() as f64;
    let m2 = sum_squared_deviations(values, m) / n;
    if m2 == 0.0 {
        return Err(StatError::ZeroVariance);
    }
    let m4 = values.iter().map(|v| (v - m).powi(4)).sum::<f64>() / n;
    Ok(m4 / (m2 * m2) - 3.0)
}

/// Pearson correlation of two equally long series.
///
/// Pairs are taken position by position; callers drop incomplete pairs
/// first.
pub fn pearson(xs: &[f64], ys: &[f64]) -> StatResult<f64> {
    let n = xs.len().min(ys.len());
    let (xs, ys) = (&xs[..n], &ys[..n]);
    require(xs, 2)?;

    let (mx, my) = (mean(xs)?, mean(ys)?);
    let (sxx, syy) = (sum_squared_deviations(xs, mx), sum_squared_deviations(ys, my));
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatError::ZeroVariance);
    }
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Relative change of `value` against `baseline`, in percent.
pub fn pct_change(value: f64, baseline: f64) -> StatResult<f64> {
    if baseline == 0.0 {
        return Err(StatError::ZeroBaseline);
    }
    Ok((value - baseline) / baseline * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(close(mean(&values).unwrap(), 5.0));
        assert!(close(population_std(&values).unwrap(), 2.0));
        assert!(close(sample_variance(&values).unwrap(), 32.0 / 7.0));
    }

    #[test]
    fn test_insufficient_data() {
        assert_eq!(
            mean(&[]),
            Err(StatError::InsufficientData { needed: 1, found: 0 })
        );
        assert_eq!(
            sample_std(&[1.0]),
            Err(StatError::InsufficientData { needed: 2, found: 1 })
        );
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert!(close(quantile(&values, 0.5).unwrap(), 2.5));
        assert!(close(quantile(&values, 0.25).unwrap(), 1.75));
        assert!(close(quantile(&values, 0.75).unwrap(), 3.25));
        assert!(close(quantile(&[7.0], 0.9).unwrap(), 7.0));
    }

    #[test]
    fn test_z_scores() {
        let z = abs_z_scores(&[1.0, 3.0]).unwrap();
        assert!(close(z[0], 1.0));
        assert!(close(z[1], 1.0));
        assert_eq!(abs_z_scores(&[5.0, 5.0]), Err(StatError::ZeroVariance));
    }

    #[test]
    fn test_skewness() {
        assert!(close(skewness(&[1.0, 2.0, 3.0]).unwrap(), 0.0));
        assert!(skewness(&[1.0, 1.0, 1.0, 10.0]).unwrap() > 1.0);
        assert_eq!(skewness(&[2.0, 2.0]), Err(StatError::ZeroVariance));
    }

    #[test]
    fn test_iqr_fences() {
        let (lower, upper) = iqr_fences(&[4.0, 1.0, 3.0, 2.0], 1.5).unwrap();
        assert!(close(lower, -0.5));
        assert!(close(upper, 5.5));
        assert!(close(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0));
    }

    #[test]
    fn test_excess_kurtosis() {
        // Two-point distributions have the minimum kurtosis.
        assert!(close(excess_kurtosis(&[0.0, 1.0, 0.0, 1.0]).unwrap(), -2.0));
        assert!(excess_kurtosis(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 10.0]).unwrap() > 0.0);
        assert_eq!(excess_kurtosis(&[3.0, 3.0]), Err(StatError::ZeroVariance));
    }

    #[test]
    fn test_pearson() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!(close(pearson(&xs, &[2.0, 4.0, 6.0, 8.0]).unwrap(), 1.0));
        assert!(close(pearson(&xs, &[8.0, 6.0, 4.0, 2.0]).unwrap(), -1.0));
        assert!(close(pearson(&xs, &[1.0, 3.0, 3.0, 1.0]).unwrap(), 0.0));
        assert_eq!(pearson(&xs, &[5.0; 4]), Err(StatError::ZeroVariance));
        assert_eq!(
            pearson(&[1.0], &[2.0]),
            Err(StatError::InsufficientData { needed: 2, found: 1 })
        );
    }

    #[test]
    fn test_pct_change() {
        assert!(close(pct_change(110.0, 100.0).unwrap(), 10.0));
        assert!(close(pct_change(50.0, 100.0).unwrap(), -50.0));
        assert_eq!(pct_change(1.0, 0.0), Err(StatError::ZeroBaseline));
    }
}
