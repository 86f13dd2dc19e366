//! Dense, shape checked matrix primitives used by the reservoirs

#[macro_use]
extern crate log;

mod matrix;
mod spectral;

pub use matrix::Matrix;
pub use spectral::spectral_radius;
