//! Unbiasing factors for the fully-dynamic estimator.
//!
//! Binomial coefficients are evaluated in log space so that memory sizes in
//! the tens of thousands do not overflow. `C(n, k)` with `k > n` is treated as
//! an exact zero rather than a tiny float, which keeps the no-loss case exact.

/// Natural log of `C(n, k)`, or `None` when the coefficient is zero.
pub fn ln_binomial(n: i64, k: i64) -> Option<f64> {
    if n < 0 || k < 0 || k > n {
        return None;
    }
    let k = k.min(n - k);
    let ln: f64 = (0..k)
        .map(|i| ((n - i) as f64).ln() - ((i + 1) as f64).ln())
        .sum();
    Some(ln)
}

/// Probability correction `κ` for a sample of at most `memory_size` edges,
/// given `s` surviving insertions and `d = di + do` uncompensated deletions:
///
/// `κ = 1 − Σ_{j=0}^{2} C(s, j)·C(d, w − j) / C(s + d, w)`, `w = min(M, s + d)`.
///
/// Returns `None` when the factor is undefined or not positive.
pub fn sample_correction(s: i64, d: i64, memory_size: usize) -> Option<f64> {
    if s < 0 || d < 0 {
        return None;
    }
    let population = s + d;
    let w = population.min(memory_size as i64);
    let ln_total = ln_binomial(population, w)?;

    let missed: f64 = (0..=2)
        .filter_map(|j| {
            let ln_sampled = ln_binomial(s, j)?;
            let ln_rest = ln_binomial(d, w - j)?;
            Some((ln_sampled + ln_rest - ln_total).exp())
        })
        .sum();

    let kappa = 1.0 - missed;
    (kappa.is_finite() && kappa > 0.0).then_some(kappa)
}

/// `s(s−1)(s−2) / (n(n−1)(n−2))`, the reweighting from sampled-edge
/// triangles to triangles over all surviving insertions.
pub fn triple_ratio(s: i64, sampled: i64) -> Option<f64> {
    if sampled < 3 || s < 3 {
        return None;
    }
    let ratio: f64 = (0..3)
        .map(|i| (s - i) as f64 / (sampled - i) as f64)
        .product();
    Some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binomial(n: i64, k: i64) -> f64 {
        ln_binomial(n, k).map_or(0.0, f64::exp)
    }

    #[test]
    fn test_ln_binomial_small_values() {
        assert!((binomial(5, 2) - 10.0).abs() < 1e-9);
        assert!((binomial(10, 3) - 120.0).abs() < 1e-9);
        assert!((binomial(52, 5) - 2_598_960.0).abs() < 1e-3);
        assert_eq!(ln_binomial(7, 0), Some(0.0));
        assert_eq!(ln_binomial(7, 7), Some(0.0));
    }

    #[test]
    fn test_ln_binomial_zero_cases() {
        assert_eq!(ln_binomial(2, 3), None);
        assert_eq!(ln_binomial(0, 1), None);
        assert_eq!(ln_binomial(4, -1), None);
        assert_eq!(ln_binomial(-2, 1), None);
    }

    #[test]
    fn test_ln_binomial_large_values_are_finite() {
        let ln = ln_binomial(1_000_000, 5_000).unwrap();
        assert!(ln.is_finite());
        assert!(ln > 0.0);
    }

    #[test]
    fn test_correction_without_loss_is_exactly_one() {
        // Everything fits in memory and no deletions happened
        assert_eq!(sample_correction(3, 0, 10), Some(1.0));
        assert_eq!(sample_correction(100, 0, 100), Some(1.0));
        // Deletions all compensated by a memory larger than the population
        assert_eq!(sample_correction(10, 2, 50), Some(1.0));
    }

    #[test]
    fn test_correction_with_deletions() {
        // s = 3, d = 3, M = 3: only the draw that picks all three surviving
        // insertions counts, so κ = C(3,3)·C(3,0) / C(6,3) = 1 / 20
        let kappa = sample_correction(3, 3, 3).unwrap();
        assert!((kappa - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_correction_undefined() {
        assert_eq!(sample_correction(-1, 0, 10), None);
        assert_eq!(sample_correction(2, 0, 10), None);
        assert_eq!(sample_correction(0, 0, 10), None);
    }

    #[test]
    fn test_triple_ratio() {
        assert_eq!(triple_ratio(3, 3), Some(1.0));
        let ratio = triple_ratio(10, 5).unwrap();
        assert!((ratio - 720.0 / 60.0).abs() < 1e-12);
        assert_eq!(triple_ratio(10, 2), None);
        assert_eq!(triple_ratio(2, 3), None);
    }
}
