//! Registry of layer kinds
//!
//! Kinds are listed in registration order so the editor palette is stable.
//! The registry only stores descriptors; graphs own the instances.

use std::collections::HashMap;

use log::debug;
use serde_json::{Map, Value};

use crate::error::{NetError, Result};
use crate::layers::instance::LayerInstance;
use crate::layers::kind::LayerKind;
use crate::layers::parameter::ParameterSpec;
use crate::layers::schema::{self, KindSchema, ResolvedKind};

/// Registry for managing layer kinds
#[derive(Debug, Default)]
pub struct LayerKindRegistry {
    kinds: Vec<LayerKind>,
    index: HashMap<String, usize>,
}

impl LayerKindRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Register one kind. Its base, if any, must already be registered.
    pub fn register(&mut self, kind: LayerKind) -> Result<()> {
        self.register_all(vec![kind])
    }

    /// Register several kinds at once.
    ///
    /// Kinds in the batch may specialize each other in any order. Either every
    /// kind is registered or, on the first error, none is.
    pub fn register_all(&mut self, kinds: Vec<LayerKind>) -> Result<()> {
        {
            let mut pending: HashMap<&str, &LayerKind> = HashMap::new();
            for kind in &kinds {
                if self.index.contains_key(&kind.name) || pending.insert(kind.name.as_str(), kind).is_some() {
                    return Err(NetError::DuplicateKind(kind.name.clone()));
                }
            }

            let lookup = |name: &str| pending.get(name).copied().or_else(|| self.get(name));
            for kind in &kinds {
                schema::validate_kind(kind, lookup)?;
            }
        }

        for kind in kinds {
            debug!("Registered layer kind {} ({})", kind.name, kind.category.name());
            self.index.insert(kind.name.clone(), self.kinds.len());
            self.kinds.push(kind);
        }
        Ok(())
    }

    /// Get a kind by name
    pub fn get(&self, name: &str) -> Option<&LayerKind> {
        self.index.get(name).map(|&i| &self.kinds[i])
    }

    /// Get a kind by name, failing when it is not registered
    pub fn lookup(&self, name: &str) -> Result<&LayerKind> {
        self.get(name).ok_or_else(|| NetError::UnknownKind(name.to_string()))
    }

    /// All kinds in registration order
    pub fn list_kinds(&self) -> &[LayerKind] {
        &self.kinds
    }

    /// Fold a registered kind's specialization chain
    pub fn resolve(&self, kind: &LayerKind) -> Result<ResolvedKind> {
        schema::resolve(kind, |name: &str| self.get(name))
    }

    /// Effective parameter schema of a kind
    pub fn effective_schema(&self, kind: &LayerKind) -> Result<Vec<ParameterSpec>> {
        self.resolve(kind).map(|r| r.schema)
    }

    /// Palette listing for every kind, in registration order
    pub fn schema_listing(&self) -> Result<Vec<KindSchema>> {
        self.kinds
            .iter()
            .map(|kind| -> Result<KindSchema> { Ok(KindSchema::new(kind, &self.effective_schema(kind)?)) })
            .collect()
    }

    /// Construct an unattached instance of the named kind
    pub fn construct(&self, kind_name: &str, raw: &Map<String, Value>) -> Result<LayerInstance> {
        let kind = self.lookup(kind_name)?;
        self.resolve(kind)?.construct(raw)
    }
}
