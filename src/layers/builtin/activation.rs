//! Activation kinds

use crate::layers::defaults::ActivationDefaults;
use crate::layers::kind::{KindCategory, LayerKind};
use crate::layers::parameter::ParameterSpec;

pub fn relu() -> LayerKind {
    LayerKind::new("ReLU", KindCategory::activation(), "Rectified linear unit")
        .with_param(ParameterSpec::boolean("inplace").with_default(false))
}

pub fn leaky_relu() -> LayerKind {
    LayerKind::new("LeakyReLU", KindCategory::activation(), "ReLU with a small negative slope").with_params(vec![
        ParameterSpec::number("negative_slope")
            .primary()
            .with_default(ActivationDefaults::NEGATIVE_SLOPE_DEFAULT),
        ParameterSpec::boolean("inplace").with_default(false),
    ])
}

pub fn tanh() -> LayerKind {
    LayerKind::new("Tanh", KindCategory::activation(), "Hyperbolic tangent")
}

pub fn softmax() -> LayerKind {
    LayerKind::new("Softmax", KindCategory::activation(), "Normalizes scores into probabilities")
        .with_param(ParameterSpec::number("dim").primary().nullable())
}
