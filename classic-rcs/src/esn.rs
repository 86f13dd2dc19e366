use std::collections::BTreeMap;

use common::{Error, Reservoir, ReservoirParams, Result};
use rc_matrix::Matrix;

use crate::{ESNConstructor, EsnParams, ReservoirConstructor};

/// Weights and state of a reservoir that has seen its first input
#[derive(Debug, Clone)]
struct Ready {
    /// Shape `(reservoir_size, input_dim)`
    input_weights: Matrix,
    /// Shape `(reservoir_size, reservoir_size)`
    reservoir_weights: Matrix,
    /// Shape `(1, reservoir_size)`
    state: Matrix,
}

impl Ready {
    /// `tanh(input * W_in^T + state * W)`, computed without touching the current state
    fn next_state(&self, input: &Matrix, params: &EsnParams) -> Result<Matrix> {
        let input_projection = input.multiply(&self.input_weights.transpose())?;
        let recurrent_projection = self.state.multiply(&self.reservoir_weights)?;
        let activation = params.reservoir_activation;

        Ok(input_projection.add(&recurrent_projection)?.map(|v| activation.apply(v)))
    }
}

/// The single node Echo State reservoir.
/// Weights are allocated lazily from the width of the first input and stay
/// fixed for the lifetime of the reservoir, `reset` only clears the state.
#[derive(Debug)]
pub struct EchoStateReservoir<C = ESNConstructor> {
    params: EsnParams,
    constructor: C,
    /// `None` until the first input fixes the input dimensionality
    ready: Option<Ready>,
}

impl EchoStateReservoir<ESNConstructor> {
    /// Create a new reservoir, weights are drawn on the first call to `forward`
    pub fn new(params: EsnParams) -> Result<Self> {
        let constructor = ESNConstructor::from_params(&params);
        Self::with_constructor(params, constructor)
    }
}

impl<C> EchoStateReservoir<C>
where
    C: ReservoirConstructor,
{
    /// Create a new reservoir which draws its weights from a custom constructor
    pub fn with_constructor(params: EsnParams, constructor: C) -> Result<Self> {
        params.validate()?;

        Ok(Self {
            params,
            constructor,
            ready: None,
        })
    }

    /// Feed a `1 x D` row through the reservoir.
    /// The first call fixes `D`, later inputs of another width are rejected.
    pub fn forward(&mut self, input: &Matrix) -> Result<&Matrix> {
        if input.nrows() != 1 {
            let expected_cols = self.input_dim().unwrap_or(input.ncols());
            return Err(Error::dimension_mismatch("forward", (1, expected_cols), input.shape()));
        }

        let Self {
            params,
            constructor,
            ready,
        } = self;
        let ready = match ready {
            Some(ready) => {
                ready.state = ready.next_state(input, params)?;
                ready
            }
            None => {
                let fresh = Self::dimension(params, constructor, input)?;
                ready.insert(fresh)
            }
        };
        debug!("state: {}", ready.state);

        Ok(&ready.state)
    }

    /// Draw the weights for the width of `input` and take the first step.
    /// Nothing is kept unless both succeed.
    fn dimension(params: &EsnParams, constructor: &mut C, input: &Matrix) -> Result<Ready> {
        let input_dim = input.ncols();
        let input_weights = constructor.construct_input_weight_matrix(input_dim);
        let reservoir_weights = constructor.construct_reservoir_weights()?;
        let n = params.reservoir_size;
        if input_weights.shape() != (n, input_dim) {
            return Err(Error::dimension_mismatch(
                "input_weights",
                (n, input_dim),
                input_weights.shape(),
            ));
        }
        if reservoir_weights.shape() != (n, n) {
            return Err(Error::dimension_mismatch(
                "reservoir_weights",
                (n, n),
                reservoir_weights.shape(),
            ));
        }
        info!("dimensioned reservoir with {} units for input dim {}", n, input_dim);
        trace!("input_weights: {}\nreservoir_weights: {}", input_weights, reservoir_weights);

        let mut ready = Ready {
            input_weights,
            reservoir_weights,
            state: Matrix::new(1, n),
        };
        ready.state = ready.next_state(input, params)?;

        Ok(ready)
    }

    /// Resets the state to zeros, keeping the weights
    pub fn reset(&mut self) {
        if let Some(ready) = &mut self.ready {
            ready.state = Matrix::new(1, self.params.reservoir_size);
        }
    }

    /// The current `1 x N` state, `None` before the first `forward`
    #[inline(always)]
    pub fn state(&self) -> Option<&Matrix> {
        self.ready.as_ref().map(|ready| &ready.state)
    }

    #[inline(always)]
    pub fn is_initialized(&self) -> bool {
        self.ready.is_some()
    }

    /// The input width fixed by the first `forward`
    pub fn input_dim(&self) -> Option<usize> {
        self.ready.as_ref().map(|ready| ready.input_weights.ncols())
    }

    pub fn input_weights(&self) -> Option<&Matrix> {
        self.ready.as_ref().map(|ready| &ready.input_weights)
    }

    pub fn reservoir_weights(&self) -> Option<&Matrix> {
        self.ready.as_ref().map(|ready| &ready.reservoir_weights)
    }

    #[inline(always)]
    pub fn params(&self) -> &EsnParams {
        &self.params
    }

    /// Every state cell keyed as `state_{row}_{col}`, empty before the first `forward`
    pub fn export_state(&self) -> BTreeMap<String, f64> {
        self.state()
            .map(|state| state.to_named_entries("state"))
            .unwrap_or_default()
    }
}

impl<C> Reservoir for EchoStateReservoir<C>
where
    C: ReservoirConstructor,
{
    type Input = Matrix;
    type State = Matrix;

    #[inline(always)]
    fn params(&self) -> &dyn ReservoirParams {
        &self.params
    }

    #[inline(always)]
    fn step(&mut self, input: &Matrix) -> Result<&Matrix> {
        self.forward(input)
    }

    #[inline(always)]
    fn reset(&mut self) {
        EchoStateReservoir::<C>::reset(self)
    }

    #[inline(always)]
    fn state(&self) -> Option<&Matrix> {
        EchoStateReservoir::<C>::state(self)
    }
}
