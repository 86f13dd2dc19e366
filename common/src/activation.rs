/// The possible activation functions to apply to reservoir states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// The identity function
    Identity,
    /// The hyperbolic tangent
    #[default]
    Tanh,
    /// The rectified linear unit
    Relu,
}

impl Activation {
    /// Apply the activation function to a single value
    #[inline(always)]
    pub fn apply(&self, v: f64) -> f64 {
        match self {
            Activation::Identity => v,
            Activation::Tanh => v.tanh(),
            Activation::Relu => v.max(0.0),
        }
    }

    /// Perform the activation function over all elements
    pub fn activate(&self, vals: &mut [f64]) {
        match self {
            Activation::Identity => {}
            Activation::Tanh => {
                for v in vals {
                    *v = v.tanh();
                }
            }
            Activation::Relu => {
                for v in vals {
                    if *v < 0.0 {
                        *v = 0.0;
                    }
                }
            }
        }
    }
}
