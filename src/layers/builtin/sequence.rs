//! Sequence kinds: embedding, attention, recurrent

use crate::layers::defaults::SequenceDefaults as Seq;
use crate::layers::kind::{KindCategory, LayerKind};
use crate::layers::parameter::{EnumSpec, ParameterSpec};

pub fn embedding() -> LayerKind {
    LayerKind::new("Embedding", KindCategory::sequence(), "Maps token ids to dense vectors")
        .with_params(vec![
            ParameterSpec::number("input_dim").primary().with_default(Seq::INPUT_DIM_DEFAULT),
            ParameterSpec::number("output_dim").primary().with_default(Seq::OUTPUT_DIM_DEFAULT),
            ParameterSpec::enumeration("embeddings_initializer", EnumSpec::new("InitializerType", Seq::INITIALIZERS))
                .with_default_member(Seq::INITIALIZER_DEFAULT),
            ParameterSpec::enumeration("embeddings_regularizer", EnumSpec::new("RegularizerType", Seq::REGULARIZERS))
                .with_default_member(Seq::NONE_MEMBER),
            ParameterSpec::enumeration("embeddings_constraint", EnumSpec::new("ConstraintType", Seq::CONSTRAINTS))
                .with_default_member(Seq::NONE_MEMBER),
            ParameterSpec::boolean("mask_zero").with_default(false),
            ParameterSpec::number("lora_rank").nullable(),
        ])
        .accepting_extra_params()
        .with_visual_asset("embedding_layer.svg")
}

pub fn attention() -> LayerKind {
    LayerKind::new("Attention", KindCategory::sequence(), "Multi-head attention")
        .with_params(vec![
            ParameterSpec::number("embed_dim").primary().with_default(Seq::EMBED_DIM_DEFAULT),
            ParameterSpec::number("num_heads").primary().with_default(Seq::NUM_HEADS_DEFAULT),
            ParameterSpec::number("dropout").with_default(Seq::DROPOUT_DEFAULT),
            ParameterSpec::boolean("bias").with_default(true),
            ParameterSpec::boolean("add_bias_kv").with_default(false),
            ParameterSpec::boolean("add_zero_attn").with_default(false),
            ParameterSpec::number("kdim").nullable(),
            ParameterSpec::number("vdim").nullable(),
            ParameterSpec::boolean("batch_first").with_default(false),
        ])
        .with_visual_asset("attention_layer.svg")
}

pub fn recurrent() -> LayerKind {
    LayerKind::new("Recurrent", KindCategory::sequence(), "Recurrent layer over a sequence")
        .with_params(vec![
            ParameterSpec::enumeration("recurrent_type", EnumSpec::new("RecurrentType", Seq::RECURRENT_TYPES))
                .primary()
                .with_default_member(Seq::RECURRENT_DEFAULT),
            ParameterSpec::number("input_size").primary().with_default(Seq::INPUT_SIZE_DEFAULT),
            ParameterSpec::number("hidden_size").primary().with_default(Seq::HIDDEN_SIZE_DEFAULT),
            ParameterSpec::number("num_layers").primary().with_default(Seq::NUM_LAYERS_DEFAULT),
            ParameterSpec::boolean("bias").with_default(true),
            ParameterSpec::boolean("batch_first").with_default(false),
            ParameterSpec::number("dropout").with_default(Seq::DROPOUT_DEFAULT),
            ParameterSpec::boolean("bidirectional").with_default(false),
        ])
        .with_visual_asset("recurrent_layer.svg")
}
