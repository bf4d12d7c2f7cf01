//! Transport-neutral request facade over a [`GraphStore`]
//!
//! Requests and responses are plain serde types so any transport (the bundled
//! CLI replay, or an HTTP layer) can marshal them as JSON.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::NetError;
use crate::layers::{ConnectionId, GraphId, KindSchema, LayerId, NetworkGraph};
use crate::store::GraphStore;

/// One client request, tagged by `op`. Fields are camelCase like the responses.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    ListLayerTypes,
    CreateGraph,
    #[serde(rename_all = "camelCase")]
    AddLayer {
        graph_id: GraphId,
        kind_name: String,
        #[serde(default)]
        params: Map<String, Value>,
    },
    #[serde(rename_all = "camelCase")]
    AddConnection {
        graph_id: GraphId,
        source_layer_id: LayerId,
        target_layer_id: LayerId,
    },
    #[serde(rename_all = "camelCase")]
    GetGraph { graph_id: GraphId },
}

/// Failure payload: a message naming the offending field plus a status code
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    pub error: String,
    pub status: u16,
}

impl From<NetError> for ApiError {
    fn from(err: NetError) -> Self {
        Self {
            status: status_code(&err),
            error: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    LayerTypes {
        #[serde(rename = "layerTypes")]
        layer_types: Vec<KindSchema>,
    },
    Graph {
        id: GraphId,
    },
    Layer {
        #[serde(rename = "layerId")]
        layer_id: LayerId,
    },
    Connection {
        #[serde(rename = "connectionId")]
        connection_id: ConnectionId,
    },
    Snapshot {
        graph: NetworkGraph,
    },
    Error(ApiError),
}

impl Response {
    pub fn is_error(&self) -> bool {
        matches!(self, Response::Error(_))
    }
}

/// Status code a failure maps to
pub fn status_code(err: &NetError) -> u16 {
    match err {
        NetError::UnknownGraph(_) | NetError::UnknownLayer { .. } => 404,
        NetError::DuplicateKind(_) | NetError::CyclicSpecialization { .. } | NetError::InvalidKind { .. } => 409,
        NetError::UnknownKind(_)
        | NetError::MissingParameter { .. }
        | NetError::InvalidShape { .. }
        | NetError::UnknownEnumMember { .. }
        | NetError::InvalidValue { .. }
        | NetError::SelfLoop(_)
        | NetError::DuplicateConnection { .. } => 400,
    }
}

/// Execute one request against the store
pub fn handle(store: &GraphStore, request: Request) -> Response {
    let result = match request {
        Request::ListLayerTypes => store
            .registry()
            .schema_listing()
            .map(|layer_types| Response::LayerTypes { layer_types }),
        Request::CreateGraph => Ok(Response::Graph {
            id: store.create_graph(),
        }),
        Request::AddLayer {
            graph_id,
            kind_name,
            params,
        } => store
            .add_layer(&graph_id, &kind_name, &params)
            .map(|layer_id| Response::Layer { layer_id }),
        Request::AddConnection {
            graph_id,
            source_layer_id,
            target_layer_id,
        } => store
            .connect(&graph_id, source_layer_id, target_layer_id)
            .map(|connection_id| Response::Connection { connection_id }),
        Request::GetGraph { graph_id } => store.snapshot(&graph_id).map(|graph| Response::Snapshot { graph }),
    };

    result.unwrap_or_else(|err| {
        warn!("Request failed: {}", err);
        Response::Error(err.into())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::builtin;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    fn store() -> GraphStore {
        GraphStore::new(Arc::new(builtin::registry().unwrap()))
    }

    fn request(value: Value) -> Request {
        serde_json::from_value(value).unwrap()
    }

    fn call(store: &GraphStore, value: Value) -> Value {
        serde_json::to_value(handle(store, request(value))).unwrap()
    }

    #[test]
    fn test_request_parsing() {
        assert_eq!(request(json!({"op": "create_graph"})), Request::CreateGraph);
        assert_eq!(
            request(json!({"op": "add_layer", "graphId": "0", "kindName": "Dense"})),
            Request::AddLayer {
                graph_id: "0".into(),
                kind_name: "Dense".into(),
                params: Map::new(),
            }
        );
        assert_eq!(
            request(json!({"op": "add_connection", "graphId": "0", "sourceLayerId": 2, "targetLayerId": 3})),
            Request::AddConnection {
                graph_id: "0".into(),
                source_layer_id: 2,
                target_layer_id: 3,
            }
        );
        assert!(serde_json::from_value::<Request>(json!({"op": "delete_graph"})).is_err());
        assert!(serde_json::from_value::<Request>(json!({"op": "get_graph", "graph_id": "0"})).is_err());
    }

    #[test]
    fn test_session_flow() {
        let store = store();
        assert_eq!(call(&store, json!({"op": "create_graph"})), json!({"id": "0"}));
        assert_eq!(
            call(&store, json!({"op": "add_layer", "graphId": "0", "kindName": "Dense", "params": {"units": 64}})),
            json!({"layerId": 0})
        );
        assert_eq!(
            call(&store, json!({"op": "add_layer", "graphId": "0", "kindName": "Dense"})),
            json!({"layerId": 1})
        );
        assert_eq!(
            call(&store, json!({"op": "add_connection", "graphId": "0", "sourceLayerId": 0, "targetLayerId": 1})),
            json!({"connectionId": 0})
        );

        let snapshot = call(&store, json!({"op": "get_graph", "graphId": "0"}));
        assert_eq!(snapshot["graph"]["connections"], json!([{"source": 0, "target": 1}]));
        assert_eq!(snapshot["graph"]["layers"][0]["params"]["units"], json!(64));
    }

    #[test]
    fn test_errors_map_to_status_codes() {
        let store = store();
        store.create_graph();

        let missing_graph = call(&store, json!({"op": "add_layer", "graphId": "9", "kindName": "Dense"}));
        assert_eq!(missing_graph, json!({"error": "network not found: 9", "status": 404}));

        let missing_layer = call(&store, json!({"op": "add_connection", "graphId": "0", "sourceLayerId": 0, "targetLayerId": 1}));
        assert_eq!(missing_layer, json!({"error": "source layer not found: 0", "status": 404}));

        let bad_kind = call(&store, json!({"op": "add_layer", "graphId": "0", "kindName": "Dens"}));
        assert_eq!(bad_kind["status"], json!(400));

        let bad_enum = call(
            &store,
            json!({"op": "add_layer", "graphId": "0", "kindName": "Recurrent", "params": {"recurrent_type": "lstm"}}),
        );
        assert_eq!(bad_enum["status"], json!(400));
        assert!(bad_enum["error"].as_str().unwrap().contains("recurrent_type"));

        assert_eq!(status_code(&NetError::DuplicateKind("Dense".into())), 409);
    }

    #[test]
    fn test_list_layer_types() {
        let store = store();
        let response = handle(&store, Request::ListLayerTypes);
        assert!(!response.is_error());

        let json = serde_json::to_value(response).unwrap();
        let kinds = json["layerTypes"].as_array().unwrap();
        assert_eq!(kinds.len(), 20);
        assert_eq!(kinds[0]["kindName"], json!("Convolutional"));
    }
}
