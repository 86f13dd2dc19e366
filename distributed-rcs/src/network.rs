use std::collections::HashMap;

use common::{Error, Result};
use nanorand::{Rng, WyRand};

use crate::{EdgeWeight, GraphNode, NeighborState, NetworkParams, NodeExport, NodeId};

/// Owns all nodes of the graph and the store of their republished states
#[derive(Debug)]
pub struct ReservoirNetwork {
    params: NetworkParams,
    /// Arena, a node's [`NodeId`] is its position
    nodes: Vec<GraphNode>,
    index: HashMap<String, NodeId>,
    /// Latest export of every processed node, keyed by namespace
    exports: HashMap<String, NodeExport>,
    rng: WyRand,
}

impl ReservoirNetwork {
    /// Create an empty network
    pub fn new(params: NetworkParams) -> Result<Self> {
        params.validate()?;

        let rng = match params.seed {
            Some(seed) => WyRand::new_seed(seed),
            None => WyRand::new(),
        };

        Ok(Self {
            params,
            nodes: Vec::new(),
            index: HashMap::new(),
            exports: HashMap::new(),
            rng,
        })
    }

    /// Register a node with a zeroed state of `capacity` units.
    /// Ids are unique, a second registration fails and leaves the network unchanged.
    pub fn add_node(&mut self, id: impl Into<String>, capacity: usize) -> Result<NodeId> {
        let id = id.into();
        if self.index.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }

        let node_id = NodeId(self.nodes.len());
        let namespace = format!("{}{}", self.params.namespace_prefix, id);
        info!("adding node {} with capacity {} at {}", id, capacity, namespace);

        self.index.insert(id.clone(), node_id);
        self.nodes.push(GraphNode::new(id, capacity, namespace));

        Ok(node_id)
    }

    /// Register a node with the configured default capacity
    pub fn add_default_node(&mut self, id: impl Into<String>) -> Result<NodeId> {
        let capacity = self.params.default_capacity;
        self.add_node(id, capacity)
    }

    /// Wire `id1` and `id2` in both directions with the configured edge weight.
    /// Does nothing if either node is unknown, returns whether the nodes were wired.
    pub fn connect(&mut self, id1: &str, id2: &str) -> bool {
        let (Some(a), Some(b)) = (self.node_id(id1), self.node_id(id2)) else {
            debug!("not connecting {} and {}, missing endpoint", id1, id2);
            return false;
        };
        let (w_ab, w_ba) = match self.params.edge_weight {
            EdgeWeight::Random => (self.rng.generate::<f64>(), self.rng.generate::<f64>()),
            EdgeWeight::Fixed(w) => (w, w),
        };

        self.wire(a, b, w_ab, w_ba);
        true
    }

    /// Like [`Self::connect`], with the same explicit weight in both directions
    pub fn connect_with_weight(&mut self, id1: &str, id2: &str, weight: f64) -> bool {
        let (Some(a), Some(b)) = (self.node_id(id1), self.node_id(id2)) else {
            debug!("not connecting {} and {}, missing endpoint", id1, id2);
            return false;
        };

        self.wire(a, b, weight, weight);
        true
    }

    fn wire(&mut self, a: NodeId, b: NodeId, w_ab: f64, w_ba: f64) {
        info!(
            "connecting {} <-> {} with weights ({}, {})",
            self.nodes[a.0].id(),
            self.nodes[b.0].id(),
            w_ab,
            w_ba
        );
        self.nodes[a.0].connect(b, w_ab);
        self.nodes[b.0].connect(a, w_ba);
    }

    /// Remove the edges between `id1` and `id2` in both directions.
    /// Returns whether any edge was removed.
    pub fn disconnect(&mut self, id1: &str, id2: &str) -> bool {
        let (Some(a), Some(b)) = (self.node_id(id1), self.node_id(id2)) else {
            return false;
        };
        let removed_ab = self.nodes[a.0].disconnect(b);
        let removed_ba = self.nodes[b.0].disconnect(a);

        removed_ab || removed_ba
    }

    /// Update a single node from its input and the current states of its neighbors,
    /// then republish it. `None` if the node is unknown.
    pub fn process(&mut self, id: &str, input: f64) -> Option<&[f64]> {
        let node_id = self.node_id(id)?;

        let snapshot: Vec<(Vec<f64>, f64)> = self.nodes[node_id.0]
            .edges()
            .iter()
            .map(|e| (self.nodes[e.target.0].state().to_vec(), e.weight))
            .collect();
        self.apply(node_id, input, &snapshot);

        Some(self.nodes[node_id.0].state())
    }

    /// Sequential tick, processes the nodes in the given order with the same input.
    /// Later nodes see the states written by earlier ones. Unknown ids are skipped.
    /// Returns the number of processed nodes.
    pub fn process_sequence(&mut self, order: &[&str], input: f64) -> usize {
        order.iter().filter(|id| self.process(id, input).is_some()).count()
    }

    /// Synchronous tick, every listed node is updated from the states all nodes held
    /// before the tick, so the order of `inputs` does not matter.
    /// A node listed twice is updated twice from the same snapshot, the last one wins.
    /// Unknown ids are skipped, returns the number of processed nodes.
    pub fn tick_synchronous(&mut self, inputs: &[(&str, f64)]) -> usize {
        let states: Vec<Vec<f64>> = self.nodes.iter().map(|n| n.state().to_vec()).collect();

        let mut processed = 0;
        for (id, input) in inputs {
            let Some(node_id) = self.node_id(id) else {
                continue;
            };
            let snapshot: Vec<(Vec<f64>, f64)> = self.nodes[node_id.0]
                .edges()
                .iter()
                .map(|e| (states[e.target.0].clone(), e.weight))
                .collect();
            self.apply(node_id, *input, &snapshot);
            processed += 1;
        }

        processed
    }

    fn apply(&mut self, node_id: NodeId, input: f64, snapshot: &[(Vec<f64>, f64)]) {
        let neighbors: Vec<NeighborState> = snapshot
            .iter()
            .map(|(state, weight)| NeighborState {
                state,
                weight: *weight,
            })
            .collect();

        let node = &mut self.nodes[node_id.0];
        let _ = node.update(input, &neighbors, self.params.activation);
        debug!("processed {} with {} neighbors", node.id(), neighbors.len());

        let export = node.export();
        self.exports.insert(export.namespace.clone(), export);
    }

    /// The latest republished state under an export key, `None` if nothing was
    /// published there yet
    #[inline]
    pub fn query_namespace(&self, key: &str) -> Option<&NodeExport> {
        self.exports.get(key)
    }

    /// The export key of a node
    pub fn export_key(&self, id: &str) -> Option<&str> {
        self.node(id).map(|n| n.namespace())
    }

    /// Arena index of a node
    #[inline]
    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.index.get(id).copied()
    }

    /// Look up a node by id
    #[inline]
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.node_id(id).map(|n| &self.nodes[n.0])
    }

    /// Outgoing edges of a node as `(neighbor id, weight)`
    pub fn neighbors(&self, id: &str) -> Option<Vec<(&str, f64)>> {
        let node = self.node(id)?;
        Some(
            node.edges()
                .iter()
                .map(|e| (self.nodes[e.target.0].id(), e.weight))
                .collect(),
        )
    }

    /// Number of registered nodes
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges
    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges().len()).sum()
    }

    /// The network parameters
    #[inline(always)]
    pub fn params(&self) -> &NetworkParams {
        &self.params
    }
}
