//! Error taxonomy for the layer registry and network graph

use std::fmt;

use thiserror::Error;

use crate::layers::LayerId;

/// Which end of a connection a layer id was supplied for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => f.write_str("source"),
            Endpoint::Target => f.write_str("target"),
        }
    }
}

/// Errors raised by the registry, construction, graphs, and the graph store.
///
/// Every variant is local and recoverable: callers fix the input and retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NetError {
    #[error("layer kind already registered: {0}")]
    DuplicateKind(String),

    #[error("cyclic specialization: {}", .chain.join(" -> "))]
    CyclicSpecialization { chain: Vec<String> },

    #[error("unknown layer kind: {0}")]
    UnknownKind(String),

    #[error("invalid layer kind {kind}: {reason}")]
    InvalidKind { kind: String, reason: String },

    #[error("network not found: {0}")]
    UnknownGraph(String),

    #[error("{endpoint} layer not found: {id}")]
    UnknownLayer { endpoint: Endpoint, id: LayerId },

    #[error("missing parameter '{param}' for layer kind {kind}")]
    MissingParameter { kind: String, param: String },

    #[error("parameter '{param}' of {kind} takes 1 or {expected} values, got {got}")]
    InvalidShape {
        kind: String,
        param: String,
        expected: usize,
        got: usize,
    },

    #[error("unknown {enum_name} member '{value}' for parameter '{param}'")]
    UnknownEnumMember {
        param: String,
        enum_name: String,
        value: String,
    },

    #[error("invalid value for parameter '{param}' of {kind}: {reason}")]
    InvalidValue {
        kind: String,
        param: String,
        reason: String,
    },

    #[error("self-loop connections are not allowed (layer {0})")]
    SelfLoop(LayerId),

    #[error("connection already exists: {from} -> {to}")]
    DuplicateConnection { from: LayerId, to: LayerId },
}

impl NetError {
    /// Shorthand for a value that does not fit its parameter
    pub fn invalid_value(kind: &str, param: &str, reason: impl Into<String>) -> Self {
        NetError::InvalidValue {
            kind: kind.to_string(),
            param: param.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a kind definition rejected at registration
    pub fn invalid_kind(kind: &str, reason: impl Into<String>) -> Self {
        NetError::InvalidKind {
            kind: kind.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_field() {
        let err = NetError::MissingParameter {
            kind: "Dense".into(),
            param: "units".into(),
        };
        assert_eq!(err.to_string(), "missing parameter 'units' for layer kind Dense");

        let err = NetError::UnknownLayer {
            endpoint: Endpoint::Target,
            id: 7,
        };
        assert_eq!(err.to_string(), "target layer not found: 7");

        let err = NetError::CyclicSpecialization {
            chain: vec!["A".into(), "B".into(), "A".into()],
        };
        assert_eq!(err.to_string(), "cyclic specialization: A -> B -> A");
    }
}
