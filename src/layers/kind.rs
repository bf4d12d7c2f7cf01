//! Layer kind descriptors - the single source of truth for a layer type's contract

use crate::error::Result;
use crate::layers::parameter::{EnumSpec, ParamMap, ParameterSpec};

/// Per-kind fix-up applied after all parameters are resolved
pub type Normalizer = fn(&str, &mut ParamMap) -> Result<()>;

/// Palette category a layer kind is listed under
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KindCategory(&'static str);

impl KindCategory {
    pub fn name(&self) -> &str {
        self.0
    }

    pub fn input() -> Self {
        Self("Input")
    }

    pub fn convolution() -> Self {
        Self("Convolution")
    }

    pub fn activation() -> Self {
        Self("Activation")
    }

    pub fn core() -> Self {
        Self("Core")
    }

    pub fn sequence() -> Self {
        Self("Sequence")
    }

    pub fn regularization() -> Self {
        Self("Regularization")
    }

    pub fn custom() -> Self {
        Self("Custom")
    }
}

/// Marks a kind as a fixed sub-variant of its base: the discriminating enum
/// parameter always takes `value` for this kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discriminator {
    pub param: String,
    pub enumeration: EnumSpec,
    pub value: String,
}

impl Discriminator {
    pub fn new(param: &str, enumeration: EnumSpec, value: &str) -> Self {
        Self {
            param: param.to_string(),
            enumeration,
            value: value.to_string(),
        }
    }
}

/// Maps the members of a selector enum to the number of spatial dimensions
/// that shape-like parameters are broadcast to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeRule {
    pub selector: String,
    pub dims: Vec<(String, usize)>,
}

impl ShapeRule {
    pub fn new(selector: &str, dims: &[(&str, usize)]) -> Self {
        Self {
            selector: selector.to_string(),
            dims: dims.iter().map(|(m, n)| (m.to_string(), *n)).collect(),
        }
    }

    /// Dimensionality selected by an enum member
    pub fn dims_for(&self, member: &str) -> Option<usize> {
        self.dims.iter().find(|(m, _)| m == member).map(|(_, n)| *n)
    }
}

/// Descriptor of one layer kind
#[derive(Debug, Clone)]
pub struct LayerKind {
    // Core identity
    pub name: String,
    pub description: String,
    pub category: KindCategory,

    // Parameter contract
    pub params: Vec<ParameterSpec>,
    pub specializes: Option<String>,
    pub discriminator: Option<Discriminator>,
    pub shape_rule: Option<ShapeRule>,
    pub normalizer: Option<Normalizer>,
    /// Keep raw parameters that are not in the schema instead of dropping them
    pub accepts_extra_params: bool,

    // Visual appearance
    pub visual_asset: Option<String>,
}

impl LayerKind {
    /// Create a kind with no parameters and no base
    pub fn new(name: &str, category: KindCategory, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            category,
            params: Vec::new(),
            specializes: None,
            discriminator: None,
            shape_rule: None,
            normalizer: None,
            accepts_extra_params: false,
            visual_asset: None,
        }
    }

    pub fn with_params(mut self, params: Vec<ParameterSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn with_param(mut self, param: ParameterSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn specializing(mut self, base: &str) -> Self {
        self.specializes = Some(base.to_string());
        self
    }

    pub fn with_discriminator(mut self, discriminator: Discriminator) -> Self {
        self.discriminator = Some(discriminator);
        self
    }

    pub fn with_shape_rule(mut self, rule: ShapeRule) -> Self {
        self.shape_rule = Some(rule);
        self
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    pub fn with_visual_asset(mut self, asset: &str) -> Self {
        self.visual_asset = Some(asset.to_string());
        self
    }

    pub fn accepting_extra_params(mut self) -> Self {
        self.accepts_extra_params = true;
        self
    }
}
