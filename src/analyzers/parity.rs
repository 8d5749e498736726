//! Two-sided normal-approximation test of 50% male representation.

use statrs::distribution::{ContinuousCDF, Normal};
use std::fmt;

pub const DEFAULT_ALPHA: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    EquityRespected,
    EquityNotRespected,
}

impl Verdict {
    pub fn decide(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Verdict::EquityNotRespected
        } else {
            Verdict::EquityRespected
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::EquityRespected => f.write_str("equity is respected"),
            Verdict::EquityNotRespected => f.write_str("equity is not respected"),
        }
    }
}

/// Outcome of one parity test. `n` counts appearances by men or women.
#[derive(Debug, Clone, PartialEq)]
pub struct ParityTest {
    pub n: u64,
    pub men: u64,
    pub observed_rate: f64,
    pub z: f64,
    pub p_value: f64,
    pub verdict: Verdict,
}

fn z_score(observed_rate: f64, n: u64) -> f64 {
    let n = n as f64;
    let expected_mean = 0.5 * n;
    let expected_std_dev = (n * 0.5 * 0.5).sqrt();
    (observed_rate * n - expected_mean) / expected_std_dev
}

/// p-value of the two-sided test `H0: p = 0.5` under the normal
/// approximation to the binomial. `None` for an empty sample.
pub fn perform_normal_approximation_test(observed_rate: f64, n: u64) -> Option<f64> {
    if n == 0 || !observed_rate.is_finite() {
        return None;
    }
    let standard = Normal::new(0.0, 1.0).ok()?;
    let z = z_score(observed_rate, n);
    Some((2.0 * (1.0 - standard.cdf(z.abs()))).clamp(0.0, 1.0))
}

/// Runs the test on raw appearance counts.
pub fn parity_test(men: u64, women: u64, alpha: f64) -> Option<ParityTest> {
    let n = men + women;
    if n == 0 {
        return None;
    }
    let observed_rate = men as f64 / n as f64;
    let p_value = perform_normal_approximation_test(observed_rate, n)?;

    Some(ParityTest {
        n,
        men,
        observed_rate,
        z: z_score(observed_rate, n),
        p_value,
        verdict: Verdict::decide(p_value, alpha),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_parity_has_p_value_one() {
        let p = perform_normal_approximation_test(0.5, 100).unwrap();
        assert!((p - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_p_value_in_unit_interval() {
        for rate in [0.0, 0.1, 0.37, 0.5, 0.81, 1.0] {
            for n in [1, 10, 1_000, 1_000_000] {
                let p = perform_normal_approximation_test(rate, n).unwrap();
                assert!((0.0..=1.0).contains(&p), "rate={rate} n={n} p={p}");
            }
        }
    }

    #[test]
    fn test_symmetric_around_half() {
        for delta in [0.01, 0.05, 0.2] {
            let above = perform_normal_approximation_test(0.5 + delta, 400).unwrap();
            let below = perform_normal_approximation_test(0.5 - delta, 400).unwrap();
            assert!((above - below).abs() < 1e-9);
        }
    }

    #[test]
    fn test_known_value() {
        // 60 of 100: z = 2, p ~= 0.0455
        let p = perform_normal_approximation_test(0.6, 100).unwrap();
        assert!((p - 0.0455).abs() < 1e-3);
    }

    #[test]
    fn test_empty_sample_is_none() {
        assert_eq!(perform_normal_approximation_test(0.7, 0), None);
        assert_eq!(parity_test(0, 0, DEFAULT_ALPHA), None);
    }

    #[test]
    fn test_verdicts() {
        let skewed = parity_test(70, 30, DEFAULT_ALPHA).unwrap();
        assert_eq!(skewed.verdict, Verdict::EquityNotRespected);
        assert!((skewed.z - 4.0).abs() < 1e-9);

        let balanced = parity_test(52, 48, DEFAULT_ALPHA).unwrap();
        assert_eq!(balanced.verdict, Verdict::EquityRespected);
        assert_eq!(balanced.n, 100);
    }
}
