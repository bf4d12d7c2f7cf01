//! Network graph data structures and operations

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Endpoint, NetError, Result};
use crate::layers::instance::{LayerId, LayerInstance};
use crate::layers::registry::LayerKindRegistry;

/// Position of a connection in its graph's connection list
pub type ConnectionId = usize;

/// Identifier of a graph, minted by the graph store
pub type GraphId = String;

/// Represents a directed connection between two layers of one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: LayerId,
    pub target: LayerId,
}

impl Connection {
    /// Creates a new connection
    pub fn new(source: LayerId, target: LayerId) -> Self {
        Self { source, target }
    }
}

/// Which connections a graph accepts beyond endpoint existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConnectionPolicy {
    pub allow_self_loops: bool,
    pub allow_parallel: bool,
}

impl Default for ConnectionPolicy {
    fn default() -> Self {
        Self {
            allow_self_loops: true,
            allow_parallel: true,
        }
    }
}

/// A graph containing layers and their connections.
///
/// Append-only: layer ids equal their position in `layers`, and the
/// connection list is the single record of adjacency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetworkGraph {
    id: GraphId,
    layers: Vec<LayerInstance>,
    connections: Vec<Connection>,
    #[serde(skip)]
    policy: ConnectionPolicy,
}

impl NetworkGraph {
    /// Creates a new empty graph with the permissive default policy
    pub fn new(id: impl Into<GraphId>) -> Self {
        Self::with_policy(id, ConnectionPolicy::default())
    }

    pub fn with_policy(id: impl Into<GraphId>, policy: ConnectionPolicy) -> Self {
        Self {
            id: id.into(),
            layers: Vec::new(),
            connections: Vec::new(),
            policy,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn layers(&self) -> &[LayerInstance] {
        &self.layers
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn policy(&self) -> ConnectionPolicy {
        self.policy
    }

    /// Resolve, construct, and add a layer of the named kind.
    ///
    /// The graph is untouched when the kind is unknown or construction fails.
    pub fn create_layer(
        &mut self,
        registry: &LayerKindRegistry,
        kind_name: &str,
        raw: &Map<String, Value>,
    ) -> Result<&LayerInstance> {
        let instance = registry.construct(kind_name, raw)?;
        let id = self.add_layer(instance);
        Ok(&self.layers[id])
    }

    /// Adds a constructed layer to the graph and returns its ID
    pub fn add_layer(&mut self, mut layer: LayerInstance) -> LayerId {
        let id = self.layers.len();
        layer.id = id;
        debug!("Graph {}: added {} layer {}", self.id, layer.kind, id);
        self.layers.push(layer);
        id
    }

    /// Find a layer by id. Absence is an ordinary outcome.
    pub fn find_layer(&self, id: LayerId) -> Option<&LayerInstance> {
        self.layers.get(id)
    }

    /// Adds a connection between two existing layers
    pub fn connect(&mut self, source: LayerId, target: LayerId) -> Result<ConnectionId> {
        // Validate the connection
        if self.find_layer(source).is_none() {
            return Err(NetError::UnknownLayer {
                endpoint: Endpoint::Source,
                id: source,
            });
        }
        if self.find_layer(target).is_none() {
            return Err(NetError::UnknownLayer {
                endpoint: Endpoint::Target,
                id: target,
            });
        }
        if source == target && !self.policy.allow_self_loops {
            warn!("Graph {}: rejected self-loop on layer {}", self.id, source);
            return Err(NetError::SelfLoop(source));
        }
        let connection = Connection::new(source, target);
        if !self.policy.allow_parallel && self.connections.contains(&connection) {
            warn!("Graph {}: rejected parallel connection {} -> {}", self.id, source, target);
            return Err(NetError::DuplicateConnection { from: source, to: target });
        }

        let id = self.connections.len();
        self.connections.push(connection);
        debug!("Graph {}: connection {} is {} -> {}", self.id, id, source, target);
        Ok(id)
    }

    /// Get a connection by its position
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id)
    }

    /// Positions of the connections leaving a layer, in creation order
    pub fn outgoing(&self, id: LayerId) -> Vec<ConnectionId> {
        self.positions_where(|c| c.source == id)
    }

    /// Positions of the connections entering a layer, in creation order
    pub fn incoming(&self, id: LayerId) -> Vec<ConnectionId> {
        self.positions_where(|c| c.target == id)
    }

    /// Targets reachable over one connection from a layer, in creation order
    pub fn successors(&self, id: LayerId) -> Vec<LayerId> {
        self.connections
            .iter()
            .filter(|c| c.source == id)
            .map(|c| c.target)
            .collect()
    }

    fn positions_where(&self, pred: impl Fn(&Connection) -> bool) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .enumerate()
            .filter(|(_, c)| pred(c))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::builtin;
    use crate::layers::parameter::ParamValue;
    use serde_json::json;

    fn params(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn graph_with_layers(n: usize, policy: ConnectionPolicy) -> (LayerKindRegistry, NetworkGraph) {
        let registry = builtin::registry().unwrap();
        let mut graph = NetworkGraph::with_policy("0", policy);
        for _ in 0..n {
            graph.create_layer(&registry, "Dense", &Map::new()).unwrap();
        }
        (registry, graph)
    }

    #[test]
    fn test_ids_are_sequential() {
        let registry = builtin::registry().unwrap();
        let mut graph = NetworkGraph::new("0");
        let kinds = ["Dense", "ReLU", "Dropout", "Dense", "Flatten", "Tanh"];

        let ids: Vec<LayerId> = kinds
            .iter()
            .map(|k| graph.create_layer(&registry, k, &Map::new()).unwrap().id)
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);

        // A failed creation must not consume an id
        assert!(graph.create_layer(&registry, "Nope", &Map::new()).is_err());
        assert_eq!(graph.create_layer(&registry, "Dense", &Map::new()).unwrap().id, 6);
    }

    #[test]
    fn test_create_then_find() {
        let registry = builtin::registry().unwrap();
        let mut graph = NetworkGraph::new("0");
        let id = graph
            .create_layer(&registry, "Dropout", &params(json!({"probability": 0.2})))
            .unwrap()
            .id;

        let layer = graph.find_layer(id).unwrap();
        assert!(layer.is_attached());
        assert_eq!(layer.kind, "Dropout");
        assert_eq!(layer.param("probability"), Some(&ParamValue::from(0.2)));
        assert_eq!(layer.param("inplace"), Some(&ParamValue::from(false)));
        assert!(graph.find_layer(id + 1).is_none());
    }

    #[test]
    fn test_connect_unknown_endpoint_adds_nothing() {
        let (_, mut graph) = graph_with_layers(2, ConnectionPolicy::default());

        assert_eq!(
            graph.connect(0, 9).unwrap_err(),
            NetError::UnknownLayer {
                endpoint: Endpoint::Target,
                id: 9
            }
        );
        assert_eq!(
            graph.connect(5, 1).unwrap_err(),
            NetError::UnknownLayer {
                endpoint: Endpoint::Source,
                id: 5
            }
        );
        assert!(graph.connections().is_empty());
    }

    #[test]
    fn test_connect_appends_and_updates_adjacency() {
        let (_, mut graph) = graph_with_layers(3, ConnectionPolicy::default());

        assert_eq!(graph.connect(0, 1).unwrap(), 0);
        assert_eq!(graph.connect(0, 2).unwrap(), 1);
        assert_eq!(graph.connect(1, 2).unwrap(), 2);

        assert_eq!(graph.connections().len(), 3);
        assert_eq!(graph.successors(0), vec![1, 2]);
        assert_eq!(graph.outgoing(0), vec![0, 1]);
        assert_eq!(graph.incoming(2), vec![1, 2]);
        assert_eq!(graph.connection(2), Some(&Connection::new(1, 2)));
    }

    #[test]
    fn test_default_policy_accepts_self_loops_and_parallel_edges() {
        let (_, mut graph) = graph_with_layers(2, ConnectionPolicy::default());
        graph.connect(1, 1).unwrap();
        graph.connect(0, 1).unwrap();
        graph.connect(0, 1).unwrap();
        assert_eq!(graph.connections().len(), 3);
    }

    #[test]
    fn test_strict_policy_rejects_without_mutation() {
        let strict = ConnectionPolicy {
            allow_self_loops: false,
            allow_parallel: false,
        };
        let (_, mut graph) = graph_with_layers(2, strict);

        assert_eq!(graph.connect(1, 1).unwrap_err(), NetError::SelfLoop(1));
        graph.connect(0, 1).unwrap();
        assert_eq!(
            graph.connect(0, 1).unwrap_err(),
            NetError::DuplicateConnection { from: 0, to: 1 }
        );
        assert_eq!(graph.connections().len(), 1);
    }

    #[test]
    fn test_snapshot_serialization() {
        let (_, mut graph) = graph_with_layers(1, ConnectionPolicy::default());
        graph.connect(0, 0).unwrap();

        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["id"], "0");
        assert_eq!(json["layers"][0]["kind"], "Dense");
        assert_eq!(json["layers"][0]["params"]["units"], 50);
        assert_eq!(json["connections"], json!([{"source": 0, "target": 0}]));
    }
}
