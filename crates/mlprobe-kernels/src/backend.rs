//! Candle-backed tensor backend.

use candle_core::Tensor;
use mlprobe_common::{Device, FrameworkInfo, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use tracing::debug;

use crate::TensorBackend;
use crate::activations::SeluParams;

/// candle-core version resolved from the workspace lockfile at build time.
pub const CANDLE_VERSION: &str = env!("MLPROBE_CANDLE_VERSION");

/// [`TensorBackend`] running every operation through `candle_core` on one device.
#[derive(Debug, Clone)]
pub struct CandleBackend {
    device: Device,
    candle: candle_core::Device,
}

impl CandleBackend {
    /// Open `device`; fails when the device cannot be initialised.
    pub fn new(device: Device) -> Result<Self> {
        let candle = device.to_candle()?;
        debug!(%device, "opened candle device");
        Ok(Self { device, candle })
    }

    pub fn cpu() -> Self {
        Self { device: Device::Cpu, candle: candle_core::Device::Cpu }
    }

    fn upload(&self, data: &[f32]) -> Result<Tensor> {
        Ok(Tensor::from_slice(data, data.len(), &self.candle)?)
    }
}

impl TensorBackend for CandleBackend {
    fn framework(&self) -> FrameworkInfo {
        FrameworkInfo::new("candle", CANDLE_VERSION)
    }

    fn device(&self) -> Device {
        self.device
    }

    fn add_scalar(&self, input: &[f32], scalar: f32) -> Result<Vec<f32>> {
        let tensor = self.upload(input)?;
        let result = tensor.affine(1.0, f64::from(scalar))?;
        Ok(result.to_vec1::<f32>()?)
    }

    fn selu(&self, input: &[f32], params: SeluParams) -> Result<Vec<f32>> {
        let tensor = self.upload(input)?;
        let result =
            tensor.elu(f64::from(params.alpha))?.affine(f64::from(params.lambda), 0.0)?;
        Ok(result.to_vec1::<f32>()?)
    }

    fn arange(&self, end: usize) -> Result<Vec<f32>> {
        let tensor = Tensor::arange(0f32, end as f32, &self.candle)?;
        Ok(tensor.to_vec1::<f32>()?)
    }

    fn random_normal(&self, len: usize, seed: Option<u64>) -> Result<Vec<f32>> {
        let tensor = match seed {
            None => Tensor::randn(0f32, 1f32, len, &self.candle)?,
            // The CPU device cannot be seeded through candle.
            Some(seed) if self.candle.is_cpu() => {
                let mut rng = StdRng::seed_from_u64(seed);
                let samples: Vec<f32> = (0..len).map(|_| rng.sample(StandardNormal)).collect();
                Tensor::from_vec(samples, len, &self.candle)?
            }
            Some(seed) => {
                self.candle.set_seed(seed)?;
                Tensor::randn(0f32, 1f32, len, &self.candle)?
            }
        };
        debug!(device = %self.device, len, seeded = seed.is_some(), "allocated random input");
        Ok(tensor.to_vec1::<f32>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_scalar_matches_expected_exactly() {
        let backend = CandleBackend::cpu();
        let result = backend.add_scalar(&[1.0, 2.0, 3.0], 1.0).unwrap();
        assert_eq!(result, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn selu_agrees_with_scalar_kernel() {
        let backend = CandleBackend::cpu();
        let params = SeluParams::default();
        let input = [-3.0, -1.0, 0.0, 0.5, 2.0];
        let result = backend.selu(&input, params).unwrap();
        let reference = crate::activations::selu_slice(&input, params);
        for (a, b) in result.iter().zip(&reference) {
            assert!((a - b).abs() < 1e-5, "{a} vs {b}");
        }
    }

    #[test]
    fn arange_is_half_open() {
        let backend = CandleBackend::cpu();
        assert_eq!(backend.arange(5).unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn random_normal_is_seeded() {
        let backend = CandleBackend::cpu();
        let a = backend.random_normal(10, Some(42)).unwrap();
        let b = backend.random_normal(10, Some(42)).unwrap();
        let c = backend.random_normal(10, Some(43)).unwrap();
        assert_eq!(a.len(), 10);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|v| v.is_finite()));
    }

    fn mean_and_variance(samples: &[f32]) -> (f32, f32) {
        let n = samples.len() as f32;
        let mean = samples.iter().sum::<f32>() / n;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n;
        (mean, var)
    }

    #[test]
    fn random_normal_is_standard_normal() {
        let backend = CandleBackend::cpu();
        for seed in [None, Some(7)] {
            let samples = backend.random_normal(4096, seed).unwrap();
            let (mean, var) = mean_and_variance(&samples);
            assert!(mean.abs() < 0.15, "mean {mean} for seed {seed:?}");
            assert!((0.8..1.2).contains(&var), "variance {var} for seed {seed:?}");
        }
    }

    #[test]
    fn random_normal_handles_odd_lengths() {
        let backend = CandleBackend::cpu();
        assert_eq!(backend.random_normal(7, None).unwrap().len(), 7);
        assert_eq!(backend.random_normal(1, Some(1)).unwrap().len(), 1);
    }

    #[test]
    fn candle_version_comes_from_lockfile() {
        let parts: Vec<&str> = CANDLE_VERSION.split('.').collect();
        assert!(parts.len() >= 3, "{CANDLE_VERSION}");
        assert!(parts[..2].iter().all(|p| p.parse::<u32>().is_ok()), "{CANDLE_VERSION}");
    }

    #[test]
    fn framework_version_is_reported() {
        let info = CandleBackend::cpu().framework();
        assert_eq!(info.name, "candle");
        assert!(!info.version.is_empty());
    }
}
