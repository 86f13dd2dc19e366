use common::Result;
use rc_matrix::Matrix;

/// Provides the abstraction needed for custom implementations of the reservoir generation process
pub trait ReservoirConstructor {
    /// Input weights of shape `(reservoir_size, input_dim)`
    fn construct_input_weight_matrix(&mut self, input_dim: usize) -> Matrix;

    /// Recurrent weights of shape `(reservoir_size, reservoir_size)`
    fn construct_reservoir_weights(&mut self) -> Result<Matrix>;
}
