//! Classic, single node reservoirs: the lazily dimensioned Echo State reservoir
//! and a flat, scalar driven variant.

#[macro_use]
extern crate log;

mod esn;
mod esn_constructor;
mod lightweight;
mod params;
mod reservoir_constructor;

pub use esn::EchoStateReservoir;
pub use esn_constructor::ESNConstructor;
pub use lightweight::LightweightReservoir;
pub use params::{EsnParams, LightweightParams, SpectralScaling};
pub use reservoir_constructor::ReservoirConstructor;
