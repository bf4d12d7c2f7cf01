//! Built-in layer catalog
//!
//! Each submodule exposes one constructor per kind. [`registry`] registers them
//! all in palette order.

pub mod activation;
pub mod general;
pub mod input;
pub mod sequence;
pub mod spatial;

use crate::error::Result;
use crate::layers::kind::LayerKind;
use crate::layers::registry::LayerKindRegistry;

/// Every built-in kind, in palette order
pub fn kinds() -> Vec<LayerKind> {
    let mut kinds = vec![
        spatial::convolutional(),
        spatial::pooling(),
        activation::relu(),
        activation::leaky_relu(),
        activation::tanh(),
        activation::softmax(),
        input::input(),
    ];
    kinds.extend(input::variants());
    kinds.extend([
        general::dense(),
        general::flatten(),
        sequence::embedding(),
        sequence::attention(),
        general::normalization(),
        general::dropout(),
        sequence::recurrent(),
        general::custom(),
    ]);
    kinds
}

/// A registry holding the built-in catalog
pub fn registry() -> Result<LayerKindRegistry> {
    let mut registry = LayerKindRegistry::new();
    registry.register_all(kinds())?;
    Ok(registry)
}
