//! Graph store
//!
//! Owns every network graph of the process, keyed by graph id. Ids come from a
//! counter guarded by the same lock as the map, so creation never duplicates or
//! skips an id. Each graph has its own lock: readers of one graph run
//! concurrently, writers are exclusive.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};
use serde_json::{Map, Value};

use crate::error::{NetError, Result};
use crate::layers::{ConnectionId, ConnectionPolicy, GraphId, LayerId, LayerKindRegistry, NetworkGraph};

/// Shared handle to one graph
pub type GraphHandle = Arc<RwLock<NetworkGraph>>;

#[derive(Debug, Default)]
struct StoreInner {
    next_id: u64,
    graphs: HashMap<GraphId, GraphHandle>,
}

/// Collection of network graphs sharing one layer-kind registry
#[derive(Debug)]
pub struct GraphStore {
    registry: Arc<LayerKindRegistry>,
    policy: ConnectionPolicy,
    inner: RwLock<StoreInner>,
}

impl GraphStore {
    /// Create an empty store whose graphs use the default connection policy
    pub fn new(registry: Arc<LayerKindRegistry>) -> Self {
        Self::with_policy(registry, ConnectionPolicy::default())
    }

    pub fn with_policy(registry: Arc<LayerKindRegistry>, policy: ConnectionPolicy) -> Self {
        Self {
            registry,
            policy,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    pub fn registry(&self) -> &LayerKindRegistry {
        &self.registry
    }

    pub fn policy(&self) -> ConnectionPolicy {
        self.policy
    }

    /// Create an empty graph and return its id
    pub fn create_graph(&self) -> GraphId {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id.to_string();
        inner.next_id += 1;
        inner.graphs.insert(
            id.clone(),
            Arc::new(RwLock::new(NetworkGraph::with_policy(id.clone(), self.policy))),
        );
        info!("Created network graph {}", id);
        id
    }

    /// Find a graph by id. Absence is an ordinary outcome.
    pub fn find_graph(&self, id: &str) -> Option<GraphHandle> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.graphs.get(id).cloned()
    }

    pub fn graph_count(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).graphs.len()
    }

    /// Construct a layer of `kind` and add it to the graph
    pub fn add_layer(&self, graph_id: &str, kind: &str, raw: &Map<String, Value>) -> Result<LayerId> {
        let handle = self.graph(graph_id)?;
        let mut graph = write(&handle);
        let id = graph.create_layer(&self.registry, kind, raw)?.id;
        debug!("Graph {}: layer {} is a {}", graph_id, id, kind);
        Ok(id)
    }

    /// Connect two layers of the graph
    pub fn connect(&self, graph_id: &str, source: LayerId, target: LayerId) -> Result<ConnectionId> {
        let handle = self.graph(graph_id)?;
        let mut graph = write(&handle);
        graph.connect(source, target)
    }

    /// Owned copy of a graph's current state
    pub fn snapshot(&self, graph_id: &str) -> Result<NetworkGraph> {
        let handle = self.graph(graph_id)?;
        let graph = read(&handle);
        Ok(graph.clone())
    }

    fn graph(&self, id: &str) -> Result<GraphHandle> {
        self.find_graph(id).ok_or_else(|| NetError::UnknownGraph(id.to_string()))
    }
}

// A panic mid-mutation cannot leave a graph half-updated: every mutation
// validates before it appends.
fn read(handle: &GraphHandle) -> RwLockReadGuard<'_, NetworkGraph> {
    handle.read().unwrap_or_else(PoisonError::into_inner)
}

fn write(handle: &GraphHandle) -> RwLockWriteGuard<'_, NetworkGraph> {
    handle.write().unwrap_or_else(PoisonError::into_inner)
}
