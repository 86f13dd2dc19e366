use common::{Error, Reservoir, ReservoirParams, Result};
use nanorand::{Rng, WyRand};

use crate::LightweightParams;

/// Scalar driven reservoir with flat storage, cheap enough to embed many times.
/// The recurrent weights live in a row major `N * N` array and are drawn from
/// `[-spectral_radius, spectral_radius]`, a crude stand-in for real spectral control.
#[derive(Debug, Clone)]
pub struct LightweightReservoir {
    params: LightweightParams,
    weights: Vec<f64>,
    state: Vec<f64>,
}

impl LightweightReservoir {
    /// Create a new reservoir, with random initiallization
    pub fn new(params: LightweightParams) -> Result<Self> {
        params.validate()?;

        let mut rng = match params.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };
        let n = params.reservoir_size;
        let weights: Vec<f64> = (0..weight_count(n)?)
            .map(|_| (rng.generate::<f64>() * 2.0 - 1.0) * params.spectral_radius)
            .collect();
        trace!("lightweight weights: {:?}", weights);

        Ok(Self {
            state: vec![0.0; n],
            params,
            weights,
        })
    }

    /// Use caller supplied row major recurrent weights, which must hold `N * N` values
    pub fn from_weights(params: LightweightParams, weights: Vec<f64>) -> Result<Self> {
        params.validate()?;

        let n = params.reservoir_size;
        if weights.len() != weight_count(n)? {
            return Err(Error::dimension_mismatch("from_weights", (n, n), (1, weights.len())));
        }

        Ok(Self {
            state: vec![0.0; n],
            params,
            weights,
        })
    }

    /// `state[i] = tanh(input * input_scaling + sum_j state[j] * w[i * N + j])`.
    /// The previous state is read in full before the new one replaces it.
    pub fn update(&mut self, input: f64) -> &[f64] {
        let n = self.params.reservoir_size;
        let drive = input * self.params.input_scaling;

        let mut next: Vec<f64> = self
            .weights
            .chunks_exact(n.max(1))
            .take(n)
            .map(|row| drive + row.iter().zip(self.state.iter()).map(|(w, s)| w * s).sum::<f64>())
            .collect();
        self.params.reservoir_activation.activate(&mut next);

        self.state = next;
        &self.state
    }

    /// Zero the state
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|v| *v = 0.0);
    }

    #[inline(always)]
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Row major `N * N` recurrent weights
    #[inline(always)]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[inline(always)]
    pub fn params(&self) -> &LightweightParams {
        &self.params
    }
}

impl Reservoir for LightweightReservoir {
    type Input = f64;
    type State = [f64];

    #[inline(always)]
    fn params(&self) -> &dyn ReservoirParams {
        &self.params
    }

    #[inline(always)]
    fn step(&mut self, input: &f64) -> Result<&[f64]> {
        Ok(self.update(*input))
    }

    #[inline(always)]
    fn reset(&mut self) {
        LightweightReservoir::reset(self)
    }

    #[inline(always)]
    fn state(&self) -> Option<&[f64]> {
        Some(&self.state)
    }
}

/// Length of the flat `N * N` weight array
fn weight_count(n: usize) -> Result<usize> {
    n.checked_mul(n)
        .ok_or_else(|| Error::invalid("reservoir_size", format!("{n} * {n} weights overflow usize")))
}
