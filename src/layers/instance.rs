//! Layer instances - concrete nodes of a network graph

use serde::Serialize;

use crate::constants;
use crate::layers::parameter::{ParamMap, ParamValue};

/// Unique identifier for a layer within its graph
pub type LayerId = usize;

/// One constructed layer: a kind name plus its resolved parameter values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerInstance {
    pub id: LayerId,
    pub kind: String,
    pub params: ParamMap,
}

impl LayerInstance {
    /// Creates an instance that no graph owns yet
    pub fn unattached(kind: &str, params: ParamMap) -> Self {
        Self {
            id: constants::layer::UNATTACHED_ID,
            kind: kind.to_string(),
            params,
        }
    }

    /// Whether a graph has assigned this instance an id
    pub fn is_attached(&self) -> bool {
        self.id != constants::layer::UNATTACHED_ID
    }

    /// Resolved value of a parameter
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}
