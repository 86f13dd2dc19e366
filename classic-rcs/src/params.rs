use common::{Activation, ReservoirParams};

/// How the raw random recurrent weights are brought to the targeted spectral radius.
/// Both strategies are approximations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpectralScaling {
    /// Divide by the estimated largest absolute eigenvalue, then multiply by the target
    #[default]
    Eigen,
    /// Multiply every weight by `spectral_radius / reservoir_size`.
    /// Cheap, but only bounds the radius loosely.
    UnitDivisor,
}

/// The parameters of the single node Echo State reservoir
#[derive(Debug, Clone)]
pub struct EsnParams {
    /// Number of nodes in the reservoir
    pub reservoir_size: usize,
    /// Scales the input weight matrix
    pub input_scaling: f64,

    /// Controls the retention of information from previous time steps.
    /// The spectral radius determines how fast the influence of an input
    /// dies out in a reservoir with time, and how stable the reservoir
    /// activations are. The spectral radius should be greater in tasks
    /// requiring longer memory of the input.
    pub spectral_radius: f64,
    /// Strategy used to reach `spectral_radius`
    pub spectral_scaling: SpectralScaling,
    /// Activation function of reservoir state transition
    pub reservoir_activation: Activation,
    /// Optional seed for Rng
    pub seed: Option<u64>,
}

impl Default for EsnParams {
    fn default() -> Self {
        Self {
            reservoir_size: 100,
            input_scaling: 1.0,
            spectral_radius: 0.99,
            spectral_scaling: SpectralScaling::Eigen,
            reservoir_activation: Activation::Tanh,
            seed: None,
        }
    }
}

impl ReservoirParams for EsnParams {
    #[inline(always)]
    fn reservoir_size(&self) -> usize {
        self.reservoir_size
    }

    #[inline(always)]
    fn input_scaling(&self) -> f64 {
        self.input_scaling
    }

    #[inline(always)]
    fn spectral_radius(&self) -> f64 {
        self.spectral_radius
    }
}

/// The parameters of the flat, scalar driven reservoir
#[derive(Debug, Clone)]
pub struct LightweightParams {
    /// Number of nodes in the reservoir
    pub reservoir_size: usize,
    /// Multiplies the scalar input before it reaches every node
    pub input_scaling: f64,
    /// Recurrent weights are drawn from `[-spectral_radius, spectral_radius]`
    pub spectral_radius: f64,
    /// Activation function of reservoir state transition
    pub reservoir_activation: Activation,
    /// Optional seed for Rng
    pub seed: Option<u64>,
}

impl Default for LightweightParams {
    fn default() -> Self {
        Self {
            reservoir_size: 100,
            input_scaling: 0.5,
            spectral_radius: 0.9,
            reservoir_activation: Activation::Tanh,
            seed: None,
        }
    }
}

impl ReservoirParams for LightweightParams {
    #[inline(always)]
    fn reservoir_size(&self) -> usize {
        self.reservoir_size
    }

    #[inline(always)]
    fn input_scaling(&self) -> f64 {
        self.input_scaling
    }

    #[inline(always)]
    fn spectral_radius(&self) -> f64 {
        self.spectral_radius
    }
}
