//! General-purpose kinds: dense, flatten, normalization, dropout, and the free-form custom layer

use crate::layers::defaults::CoreDefaults;
use crate::layers::kind::{KindCategory, LayerKind};
use crate::layers::parameter::{EnumSpec, ParameterSpec};

pub fn dense() -> LayerKind {
    LayerKind::new("Dense", KindCategory::core(), "Fully connected layer")
        .with_params(vec![
            ParameterSpec::number("units").primary().with_default(CoreDefaults::UNITS_DEFAULT),
            ParameterSpec::number("in_features").with_default(CoreDefaults::IN_FEATURES_DEFAULT),
            ParameterSpec::boolean("bias").with_default(true),
        ])
        .with_visual_asset("dense_layer.svg")
}

pub fn flatten() -> LayerKind {
    LayerKind::new("Flatten", KindCategory::core(), "Collapses a range of dimensions")
        .with_params(vec![
            ParameterSpec::number("start_dim").primary().with_default(CoreDefaults::START_DIM_DEFAULT),
            ParameterSpec::number("end_dim").primary().with_default(CoreDefaults::END_DIM_DEFAULT),
        ])
        .with_visual_asset("flattening_layer.svg")
}

pub fn normalization() -> LayerKind {
    let types = EnumSpec::new("NormalizationType", CoreDefaults::NORMALIZATION_TYPES);
    LayerKind::new("Normalization", KindCategory::regularization(), "Normalizes activations")
        .with_param(
            ParameterSpec::enumeration("normalization_type", types)
                .primary()
                .with_default_member(CoreDefaults::NORMALIZATION_DEFAULT),
        )
        .with_visual_asset("normalization_layer.svg")
}

pub fn dropout() -> LayerKind {
    LayerKind::new("Dropout", KindCategory::regularization(), "Randomly zeroes activations while training")
        .with_params(vec![
            ParameterSpec::number("probability")
                .primary()
                .with_default(CoreDefaults::DROPOUT_PROBABILITY_DEFAULT),
            ParameterSpec::boolean("inplace").primary().with_default(false),
        ])
        .with_visual_asset("dropout_layer.svg")
}

/// Free-form layer: every supplied parameter is kept verbatim
pub fn custom() -> LayerKind {
    LayerKind::new("Custom", KindCategory::custom(), "User-defined layer")
        .accepting_extra_params()
        .with_visual_asset("custom_layer.svg")
}
