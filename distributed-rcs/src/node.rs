use common::Activation;

use crate::NodeExport;

/// Index of a node inside the network's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position in the arena
    #[inline(always)]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A directed, weighted link to another node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// The node whose state is read
    pub target: NodeId,
    /// Multiplies the target's state
    pub weight: f64,
}

/// A neighbor's state as captured before the updating node changes
#[derive(Debug, Clone, Copy)]
pub struct NeighborState<'a> {
    /// The neighbor's state, may be of any length
    pub state: &'a [f64],
    /// Weight of the edge leading to it
    pub weight: f64,
}

/// One reservoir instance in the network.
/// Neighbors are referenced by [`NodeId`], the node never owns them.
#[derive(Debug, Clone)]
pub struct GraphNode {
    id: String,
    namespace: String,
    state: Vec<f64>,
    edges: Vec<Edge>,
}

impl GraphNode {
    pub(crate) fn new(id: String, capacity: usize, namespace: String) -> Self {
        Self {
            id,
            namespace,
            state: vec![0.0; capacity],
            edges: Vec::new(),
        }
    }

    /// Register a one directional edge, replacing the weight of an existing one
    pub fn connect(&mut self, target: NodeId, weight: f64) {
        match self.edges.iter_mut().find(|e| e.target == target) {
            Some(edge) => edge.weight = weight,
            None => self.edges.push(Edge { target, weight }),
        }
    }

    /// Remove the edge to `target`, returns whether there was one
    pub fn disconnect(&mut self, target: NodeId) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.target != target);
        self.edges.len() != before
    }

    /// For every unit `i`: `act(input + sum_n neighbor_n[i % len_n] * weight_n)`.
    /// Neighbors with an empty state contribute nothing.
    /// The whole state is replaced at once.
    pub fn update(
        &mut self,
        input: f64,
        neighbors: &[NeighborState<'_>],
        activation: Activation,
    ) -> &[f64] {
        let mut next: Vec<f64> = (0..self.state.len())
            .map(|i| {
                neighbors
                    .iter()
                    .filter(|n| !n.state.is_empty())
                    .fold(input, |sum, n| sum + n.state[i % n.state.len()] * n.weight)
            })
            .collect();
        activation.activate(&mut next);

        self.state = next;
        &self.state
    }

    /// Clears the state to zeros
    pub fn reset(&mut self) {
        self.state.iter_mut().for_each(|v| *v = 0.0);
    }

    /// The node identifier
    #[inline(always)]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of units, fixed at construction
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.state.len()
    }

    /// Current activation of every unit
    #[inline(always)]
    pub fn state(&self) -> &[f64] {
        &self.state
    }

    /// Outgoing edges in the order they were added
    #[inline(always)]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The key this node's state is exported under
    #[inline(always)]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Snapshot of the node for the network's export store
    pub fn export(&self) -> NodeExport {
        NodeExport {
            name: self.id.clone(),
            value: self.state.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(capacity: usize) -> GraphNode {
        GraphNode::new("a".to_string(), capacity, "/n/a".to_string())
    }

    #[test]
    fn no_neighbors() {
        let mut n = node(3);
        assert_eq!(n.update(0.5, &[], Activation::Tanh), &[0.5_f64.tanh(); 3]);
    }

    #[test]
    fn neighbor_index_wraps() {
        let mut n = node(5);
        let small = [1.0, 2.0];
        let neighbors = [NeighborState {
            state: &small,
            weight: 0.5,
        }];

        let state = n.update(0.0, &neighbors, Activation::Identity);
        assert_eq!(state, &[0.5, 1.0, 0.5, 1.0, 0.5]);
    }

    #[test]
    fn weighted_sum_of_neighbors() {
        let mut n = node(2);
        let (x, y) = ([1.0, -1.0], [0.25, 0.5, 0.75]);
        let neighbors = [
            NeighborState {
                state: &x,
                weight: 0.5,
            },
            NeighborState {
                state: &y,
                weight: 2.0,
            },
        ];

        let state = n.update(1.0, &neighbors, Activation::Identity);
        assert_eq!(state, &[1.0 + 0.5 + 0.5, 1.0 - 0.5 + 1.0]);
    }

    #[test]
    fn empty_neighbor_is_skipped() {
        let mut n = node(2);
        let neighbors = [NeighborState {
            state: &[],
            weight: 1.0,
        }];
        assert_eq!(n.update(0.25, &neighbors, Activation::Identity), &[0.25, 0.25]);
    }

    #[test]
    fn connect_replaces_weight() {
        let mut n = node(1);
        n.connect(NodeId(1), 0.3);
        n.connect(NodeId(2), 0.4);
        n.connect(NodeId(1), 0.9);
        assert_eq!(
            n.edges(),
            &[
                Edge {
                    target: NodeId(1),
                    weight: 0.9
                },
                Edge {
                    target: NodeId(2),
                    weight: 0.4
                }
            ]
        );

        assert!(n.disconnect(NodeId(1)));
        assert!(!n.disconnect(NodeId(1)));
        assert_eq!(n.edges().len(), 1);
    }

    #[test]
    fn export_mirrors_state() {
        let mut n = node(4);
        let _ = n.update(1.0, &[], Activation::Tanh);
        let export = n.export();
        assert_eq!(export.name, "a");
        assert_eq!(export.namespace, "/n/a");
        assert_eq!(export.value, n.state());

        n.reset();
        assert_eq!(n.state(), &[0.0; 4]);
        assert_eq!(n.capacity(), 4);
    }
}
