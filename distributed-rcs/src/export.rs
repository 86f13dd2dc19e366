/// A node's latest state as republished by the network
#[derive(Debug, Clone, PartialEq)]
pub struct NodeExport {
    /// Identifier of the node
    pub name: String,
    /// Copy of the node state right after its last update
    pub value: Vec<f64>,
    /// The export key this record is stored under
    pub namespace: String,
}
