use common::{Activation, Error, Result};

/// Weight given to edges created by [`crate::ReservoirNetwork::connect`]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EdgeWeight {
    /// Drawn uniformly from `[0, 1)` for every edge
    #[default]
    Random,
    /// The same weight for every edge
    Fixed(f64),
}

/// The parameters of a reservoir network
#[derive(Debug, Clone)]
pub struct NetworkParams {
    /// Capacity used by [`crate::ReservoirNetwork::add_default_node`]
    pub default_capacity: usize,
    /// Export keys are `{namespace_prefix}{id}`
    pub namespace_prefix: String,
    /// Weight of edges created without an explicit one
    pub edge_weight: EdgeWeight,
    /// Applied to every node's summed drive
    pub activation: Activation,
    /// Optional seed for Rng
    pub seed: Option<u64>,
}

impl Default for NetworkParams {
    fn default() -> Self {
        Self {
            default_capacity: 32,
            namespace_prefix: "/n/".to_string(),
            edge_weight: EdgeWeight::Random,
            activation: Activation::Tanh,
            seed: None,
        }
    }
}

impl NetworkParams {
    /// Check that the parameters describe a usable network
    pub fn validate(&self) -> Result<()> {
        if let EdgeWeight::Fixed(w) = self.edge_weight {
            if !w.is_finite() {
                return Err(Error::invalid("edge_weight", format!("must be finite, got {w}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = NetworkParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.default_capacity, 32);
        assert_eq!(params.namespace_prefix, "/n/");
    }

    #[test]
    fn rejects_non_finite_weight() {
        for w in [f64::NAN, f64::INFINITY] {
            let params = NetworkParams {
                edge_weight: EdgeWeight::Fixed(w),
                ..Default::default()
            };
            assert!(matches!(params.validate(), Err(Error::InvalidParameter { .. })));
        }
        let params = NetworkParams {
            edge_weight: EdgeWeight::Fixed(-0.5),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }
}
