//! A weighted graph of small reservoir nodes.
//!
//! Every node mixes its own scalar input with the states of its neighbors,
//! and the network republishes each node's latest state under an export key
//! (Plan 9 style `/n/<id>` by default).
//!
//! Calls to [`ReservoirNetwork::process`] are sequential: a node sees the
//! states its neighbors hold at the moment it is processed, including updates
//! made earlier in the same tick. [`ReservoirNetwork::tick_synchronous`] is the
//! order independent alternative, it updates a set of nodes from a single snapshot.

#![warn(missing_docs)]

#[macro_use]
extern crate log;

mod export;
mod network;
mod node;
mod params;

pub use export::NodeExport;
pub use network::ReservoirNetwork;
pub use node::{Edge, GraphNode, NeighborState, NodeId};
pub use params::{EdgeWeight, NetworkParams};
