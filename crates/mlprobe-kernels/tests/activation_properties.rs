//! Property tests for the SELU kernels.

use mlprobe_kernels::{CandleBackend, SeluParams, TensorBackend, selu, selu_slice};
use proptest::prelude::*;

proptest! {
    #[test]
    fn selu_is_scaled_identity_for_positive_inputs(x in 1e-3f32..1e3) {
        let p = SeluParams::default();
        let expected = 1.05 * x;
        prop_assert!((selu(x, p) - expected).abs() <= expected.abs() * 1e-6 + 1e-6);
    }

    #[test]
    fn selu_is_bounded_below(x in -1e3f32..0.0) {
        let p = SeluParams::default();
        let y = selu(x, p);
        prop_assert!(y >= p.negative_limit() - 1e-5);
        prop_assert!(y <= 0.0);
    }

    #[test]
    fn selu_is_monotonic(a in -50f32..50.0, b in -50f32..50.0) {
        let p = SeluParams::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(selu(lo, p) <= selu(hi, p));
    }

    #[test]
    fn candle_selu_matches_scalar(values in prop::collection::vec(-20f32..20.0, 1..32)) {
        let p = SeluParams::default();
        let backend = CandleBackend::cpu();
        let actual = backend.selu(&values, p).unwrap();
        let expected = selu_slice(&values, p);
        prop_assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(&expected) {
            prop_assert!((a - e).abs() <= 1e-4 * e.abs().max(1.0), "{} vs {}", a, e);
        }
    }
}

#[test]
fn fixed_range_evaluation_is_non_decreasing() {
    let backend = CandleBackend::cpu();
    let x = backend.arange(5).unwrap();
    let y = backend.selu(&x, SeluParams::default()).unwrap();
    assert_eq!(y.len(), 5);
    assert_eq!(y[0], 0.0);
    assert!(y.windows(2).all(|w| w[0] <= w[1]));
}
