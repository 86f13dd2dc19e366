use common::Result;
use nanorand::WyRand;
use rc_matrix::Matrix;

use crate::{EsnParams, ReservoirConstructor, SpectralScaling};

/// Constructs the weights of a classic Echo State Network
#[derive(Debug, Clone)]
pub struct ESNConstructor {
    /// Controls the retention of information from previous time steps.
    spectral_radius: f64,

    /// How `spectral_radius` is reached
    spectral_scaling: SpectralScaling,

    /// The number of nodes in the reservoir
    reservoir_size: usize,

    /// Scales the input weights
    input_scaling: f64,

    rng: WyRand,
}

impl ESNConstructor {
    pub fn new(
        seed: Option<u64>,
        reservoir_size: usize,
        spectral_radius: f64,
        spectral_scaling: SpectralScaling,
        input_scaling: f64,
    ) -> Self {
        let rng = match seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        Self {
            spectral_radius,
            spectral_scaling,
            reservoir_size,
            input_scaling,
            rng,
        }
    }

    pub fn from_params(params: &EsnParams) -> Self {
        Self::new(
            params.seed,
            params.reservoir_size,
            params.spectral_radius,
            params.spectral_scaling,
            params.input_scaling,
        )
    }
}

impl ReservoirConstructor for ESNConstructor {
    fn construct_input_weight_matrix(&mut self, input_dim: usize) -> Matrix {
        Matrix::random(self.reservoir_size, input_dim, -1.0, 1.0, &mut self.rng)
            .scale(self.input_scaling)
    }

    fn construct_reservoir_weights(&mut self) -> Result<Matrix> {
        let raw = Matrix::random(self.reservoir_size, self.reservoir_size, -1.0, 1.0, &mut self.rng);
        if self.reservoir_size == 0 {
            return Ok(raw);
        }

        let factor = match self.spectral_scaling {
            SpectralScaling::Eigen => {
                let spec_rad = raw.spectral_radius()?;
                if spec_rad <= f64::EPSILON {
                    warn!("raw reservoir has vanishing spectral radius {}, leaving it unscaled", spec_rad);
                    return Ok(raw);
                }
                debug!("raw spectral radius: {}", spec_rad);
                self.spectral_radius / spec_rad
            }
            SpectralScaling::UnitDivisor => self.spectral_radius / self.reservoir_size as f64,
        };

        Ok(raw.scale(factor))
    }
}

#[cfg(test)]
mod tests {
    use round::round;

    use super::*;

    #[test]
    fn eigen_scaling_hits_target() {
        if let Err(_) = pretty_env_logger::try_init() {}

        let mut c = ESNConstructor::new(Some(0), 50, 0.9, SpectralScaling::Eigen, 1.0);
        let w = c.construct_reservoir_weights().unwrap();
        assert_eq!(w.shape(), (50, 50));

        let spec_rad = w.spectral_radius().unwrap();
        info!("scaled spectral radius: {}", spec_rad);
        assert_eq!(round(spec_rad, 6), 0.9);
    }

    #[test]
    fn unit_divisor_bounds_weights() {
        let mut c = ESNConstructor::new(Some(1), 20, 0.9, SpectralScaling::UnitDivisor, 1.0);
        let w = c.construct_reservoir_weights().unwrap();
        let bound = 0.9 / 20.0;
        assert!(w.to_row_major().iter().all(|v| v.abs() <= bound));
    }

    #[test]
    fn input_weights_scaled() {
        let mut c = ESNConstructor::new(Some(2), 8, 0.9, SpectralScaling::Eigen, 0.25);
        let w_in = c.construct_input_weight_matrix(3);
        assert_eq!(w_in.shape(), (8, 3));
        assert!(w_in.to_row_major().iter().all(|v| v.abs() <= 0.25));
    }

    #[test]
    fn empty_reservoir() {
        let mut c = ESNConstructor::new(Some(3), 0, 0.9, SpectralScaling::Eigen, 1.0);
        assert_eq!(c.construct_reservoir_weights().unwrap().shape(), (0, 0));
    }
}
