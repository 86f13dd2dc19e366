use crate::{Error, Result};

/// The Reservoir trait
/// A fixed, randomly weighted recurrent unit whose state evolves from its input history.
/// Nothing is trained, the state is meant to be read by downstream consumers.
pub trait Reservoir {
    /// What a single step consumes, e.g. a row vector or a scalar
    type Input: ?Sized;

    /// The activation representation handed back to callers
    type State: ?Sized;

    /// The reservoir parameters
    fn params(&self) -> &dyn ReservoirParams;

    /// Update the reservoir state with the newest observed input,
    /// returning the freshly computed state.
    fn step(&mut self, input: &Self::Input) -> Result<&Self::State>;

    /// Clears the history, weights are left untouched
    fn reset(&mut self);

    /// The current state, `None` as long as the reservoir has not been dimensioned
    fn state(&self) -> Option<&Self::State>;
}

/// Any reservoir parameter struct must implement this.
pub trait ReservoirParams {
    /// The number of inner nodes (`neurons`) in the reservoir
    fn reservoir_size(&self) -> usize;

    /// Multiplier applied to the input before it enters the reservoir
    fn input_scaling(&self) -> f64;

    /// The targeted spectral radius of the recurrent weights
    fn spectral_radius(&self) -> f64;

    /// Check that the parameters describe a usable reservoir
    fn validate(&self) -> Result<()> {
        if !self.input_scaling().is_finite() {
            return Err(Error::invalid("input_scaling", "must be finite"));
        }
        let sr = self.spectral_radius();
        if !sr.is_finite() || sr < 0.0 {
            return Err(Error::invalid(
                "spectral_radius",
                format!("must be finite and non-negative, got {sr}"),
            ));
        }
        Ok(())
    }
}
