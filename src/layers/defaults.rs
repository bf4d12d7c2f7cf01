//! Default parameter values for layer kinds
//!
//! Centralizes the defaults and enum member tables of the built-in catalog so
//! every kind draws from the same values.

/// Defaults for convolution layers
pub struct ConvolutionDefaults;

impl ConvolutionDefaults {
    pub const TYPES: &'static [&'static str] = &["CONV1D", "CONV2D", "CONV3D"];
    pub const TYPE_DEFAULT: &'static str = "CONV2D";
    pub const PADDING_MODES: &'static [&'static str] = &["ZEROS", "REPLICATE", "REFLECT", "CIRCULAR"];
    pub const PADDING_MODE_DEFAULT: &'static str = "ZEROS";

    pub const CHANNELS_DEFAULT: i64 = 32;
    pub const KERNEL_SIZE_DEFAULT: i64 = 3;
    pub const STRIDE_DEFAULT: i64 = 1;
    pub const PADDING_DEFAULT: i64 = 1;
    pub const DILATION_DEFAULT: i64 = 1;
    pub const GROUPS_DEFAULT: i64 = 1;
}

/// Defaults for pooling layers
pub struct PoolingDefaults;

impl PoolingDefaults {
    pub const TYPES: &'static [&'static str] = &["MAX", "AVG"];
    pub const TYPE_DEFAULT: &'static str = "MAX";
    pub const DIMENSIONS: &'static [&'static str] = &["POOL1D", "POOL2D", "POOL3D"];
    pub const DIMENSION_DEFAULT: &'static str = "POOL2D";
    pub const PADDING_TYPES: &'static [&'static str] = &["VALID", "SAME"];
    pub const PADDING_DEFAULT: &'static str = "VALID";

    pub const KERNEL_SIZE_DEFAULT: i64 = 32;
    pub const DILATION_DEFAULT: i64 = 1;
}

/// Defaults for activation layers
pub struct ActivationDefaults;

impl ActivationDefaults {
    pub const NEGATIVE_SLOPE_DEFAULT: f64 = 0.01;
}

/// Defaults for dense and other core layers
pub struct CoreDefaults;

impl CoreDefaults {
    pub const UNITS_DEFAULT: i64 = 50;
    pub const IN_FEATURES_DEFAULT: i64 = 10;
    pub const START_DIM_DEFAULT: i64 = 1;
    pub const END_DIM_DEFAULT: i64 = -1;

    pub const NORMALIZATION_TYPES: &'static [&'static str] = &[
        "BATCH_NORMALIZATION",
        "LAYER_NORMALIZATION",
        "GROUP_NORMALIZATION",
        "INSTANCE_NORMALIZATION",
    ];
    pub const NORMALIZATION_DEFAULT: &'static str = "BATCH_NORMALIZATION";

    pub const DROPOUT_PROBABILITY_DEFAULT: f64 = 0.5;
}

/// Defaults for embedding, attention, and recurrent layers
pub struct SequenceDefaults;

impl SequenceDefaults {
    // Embedding
    pub const INPUT_DIM_DEFAULT: i64 = 1000;
    pub const OUTPUT_DIM_DEFAULT: i64 = 100;
    pub const INITIALIZERS: &'static [&'static str] =
        &["UNIFORM", "NORMAL", "ZEROS", "ONES", "GLOROT_UNIFORM", "GLOROT_NORMAL"];
    pub const INITIALIZER_DEFAULT: &'static str = "UNIFORM";
    pub const REGULARIZERS: &'static [&'static str] = &["NONE", "L1", "L2", "L1_L2"];
    pub const CONSTRAINTS: &'static [&'static str] = &["NONE", "MAX_NORM", "NON_NEG", "UNIT_NORM"];
    pub const NONE_MEMBER: &'static str = "NONE";

    // Attention
    pub const EMBED_DIM_DEFAULT: i64 = 512;
    pub const NUM_HEADS_DEFAULT: i64 = 8;

    // Recurrent
    pub const RECURRENT_TYPES: &'static [&'static str] = &["LSTM", "GRU", "RNN"];
    pub const RECURRENT_DEFAULT: &'static str = "LSTM";
    pub const INPUT_SIZE_DEFAULT: i64 = 10;
    pub const HIDDEN_SIZE_DEFAULT: i64 = 32;
    pub const NUM_LAYERS_DEFAULT: i64 = 1;

    pub const DROPOUT_DEFAULT: f64 = 0.0;
}
