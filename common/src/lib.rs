//! This crate provides common funcionality shared by all reservoir kinds

#![deny(unused_imports)]
#![warn(missing_docs)]

mod activation;
mod error;
mod rc_trait;

pub use activation::Activation;
pub use error::{Error, Result};
pub use rc_trait::{Reservoir, ReservoirParams};
