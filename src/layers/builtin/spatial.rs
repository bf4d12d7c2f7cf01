//! Convolution and pooling kinds: parameters broadcast over 1 to 3 spatial dimensions

use crate::error::Result;
use crate::layers::defaults::{ConvolutionDefaults as Conv, PoolingDefaults as Pool};
use crate::layers::kind::{KindCategory, LayerKind, ShapeRule};
use crate::layers::parameter::{EnumSpec, ParamMap, ParamValue, ParameterSpec};

pub fn convolutional() -> LayerKind {
    LayerKind::new("Convolutional", KindCategory::convolution(), "Learned spatial filters")
        .with_params(vec![
            ParameterSpec::enumeration("conv_type", EnumSpec::new("ConvolutionType", Conv::TYPES))
                .primary()
                .with_default_member(Conv::TYPE_DEFAULT),
            ParameterSpec::number("in_channels").primary().with_default(Conv::CHANNELS_DEFAULT),
            ParameterSpec::number("out_channels").primary().with_default(Conv::CHANNELS_DEFAULT),
            ParameterSpec::shape("kernel_size").primary().with_default(Conv::KERNEL_SIZE_DEFAULT),
            ParameterSpec::shape("stride").primary().with_default(Conv::STRIDE_DEFAULT),
            ParameterSpec::number("padding").with_default(Conv::PADDING_DEFAULT),
            ParameterSpec::shape("dilation").with_default(Conv::DILATION_DEFAULT),
            ParameterSpec::number("groups").with_default(Conv::GROUPS_DEFAULT),
            ParameterSpec::boolean("bias").with_default(true),
            ParameterSpec::enumeration("padding_mode", EnumSpec::new("PaddingMode", Conv::PADDING_MODES))
                .with_default_member(Conv::PADDING_MODE_DEFAULT),
        ])
        .with_shape_rule(ShapeRule::new(
            "conv_type",
            &[("CONV1D", 1), ("CONV2D", 2), ("CONV3D", 3)],
        ))
        .with_visual_asset("drawing.svg")
}

pub fn pooling() -> LayerKind {
    LayerKind::new("Pooling", KindCategory::convolution(), "Downsamples by max or average")
        .with_params(vec![
            ParameterSpec::enumeration("pooling_type", EnumSpec::new("PoolingType", Pool::TYPES))
                .primary()
                .with_default_member(Pool::TYPE_DEFAULT),
            ParameterSpec::enumeration("pool_dimension", EnumSpec::new("PoolingDimension", Pool::DIMENSIONS))
                .primary()
                .with_default_member(Pool::DIMENSION_DEFAULT),
            ParameterSpec::shape("kernel_size").primary().with_default(Pool::KERNEL_SIZE_DEFAULT),
            ParameterSpec::shape("stride").nullable(),
            ParameterSpec::enumeration("padding", EnumSpec::new("PaddingType", Pool::PADDING_TYPES))
                .with_default_member(Pool::PADDING_DEFAULT),
            ParameterSpec::shape("dilation").with_default(Pool::DILATION_DEFAULT),
            ParameterSpec::boolean("return_indices").with_default(false),
            ParameterSpec::boolean("ceil_mode").with_default(false),
        ])
        .with_shape_rule(ShapeRule::new(
            "pool_dimension",
            &[("POOL1D", 1), ("POOL2D", 2), ("POOL3D", 3)],
        ))
        .with_normalizer(stride_defaults_to_kernel)
        .with_visual_asset("pooling.svg")
}

/// An unset pooling stride steps by the window size
fn stride_defaults_to_kernel(_kind: &str, params: &mut ParamMap) -> Result<()> {
    if params.get("stride").map_or(true, ParamValue::is_null) {
        if let Some(kernel) = params.get("kernel_size").cloned() {
            params.insert("stride".to_string(), kernel);
        }
    }
    Ok(())
}
