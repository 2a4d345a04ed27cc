//! Scaled exponential linear unit.
//!
//! `selu(x) = lambda * (x if x > 0, else alpha * (exp(x) - 1))`

/// SELU parameters.
///
/// The default is the rounded pair used by the activation smoke check; use
/// [`SeluParams::standard`] for the self-normalizing constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeluParams {
    pub alpha: f32,
    pub lambda: f32,
}

// SELU constants (Klambauer et al., 2017)
const SELU_ALPHA: f32 = 1.673_263_2;
const SELU_LAMBDA: f32 = 1.050_701;

impl SeluParams {
    pub const fn new(alpha: f32, lambda: f32) -> Self {
        Self { alpha, lambda }
    }

    pub const fn standard() -> Self {
        Self { alpha: SELU_ALPHA, lambda: SELU_LAMBDA }
    }

    /// Value approached as `x -> -inf`.
    pub fn negative_limit(&self) -> f32 {
        -self.lambda * self.alpha
    }
}

impl Default for SeluParams {
    fn default() -> Self {
        Self { alpha: 1.67, lambda: 1.05 }
    }
}

/// Exponential Linear Unit: x if x > 0, else alpha * (exp(x) - 1)
#[inline]
pub fn elu(x: f32, alpha: f32) -> f32 {
    if x.is_nan() || x > 0.0 { x } else { alpha * x.exp_m1() }
}

/// Scaled ELU
#[inline]
pub fn selu(x: f32, params: SeluParams) -> f32 {
    params.lambda * elu(x, params.alpha)
}

pub fn selu_slice(input: &[f32], params: SeluParams) -> Vec<f32> {
    input.iter().map(|&x| selu(x, params)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn selu_at_zero_is_zero() {
        assert_eq!(selu(0.0, SeluParams::default()), 0.0);
        assert_eq!(selu(-0.0, SeluParams::standard()), 0.0);
    }

    #[test]
    fn selu_positive_is_scaled_identity() {
        let p = SeluParams::default();
        for x in [0.5_f32, 1.0, 2.0, 3.0, 4.0, 100.0] {
            assert!(approx_eq(selu(x, p), 1.05 * x, 1e-4), "x={x}");
        }
    }

    #[test]
    fn selu_negative_saturates() {
        let p = SeluParams::default();
        assert!(approx_eq(selu(-30.0, p), p.negative_limit(), 1e-5));
        assert!(approx_eq(p.negative_limit(), -1.05 * 1.67, 1e-6));
        assert!(selu(-1.0, p) > p.negative_limit());
    }

    #[test]
    fn selu_standard_constants() {
        let p = SeluParams::standard();
        assert!(approx_eq(selu(1.0, p), 1.050_701, 1e-6));
        assert!(approx_eq(selu(-1.0, p), 1.050_701 * 1.673_263_2 * ((-1.0f32).exp() - 1.0), 1e-5));
    }

    #[test]
    fn selu_propagates_nan() {
        assert!(selu(f32::NAN, SeluParams::default()).is_nan());
    }

    #[test]
    fn selu_slice_over_fixed_range() {
        let out = selu_slice(&[0.0, 1.0, 2.0, 3.0, 4.0], SeluParams::default());
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], 0.0);
        assert!(approx_eq(out[4], 4.2, 1e-5));
    }
}
