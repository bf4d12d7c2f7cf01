//! Input layer family: one base kind plus a fixed variant per input type

use crate::constants::input::{ASSET_DIR, DISCRIMINATOR, ENUM_NAME, MEMBERS};
use crate::layers::kind::{Discriminator, KindCategory, LayerKind};
use crate::layers::parameter::{EnumSpec, ParameterSpec};

pub const INPUT: &str = "Input";

fn input_types() -> EnumSpec {
    EnumSpec::new(ENUM_NAME, &MEMBERS)
}

/// Glyph for one member of the input type enum
fn asset_for(member: &str) -> String {
    format!("{}/input_{}.svg", ASSET_DIR, member.to_lowercase())
}

/// Generic input layer; the input type is chosen by parameter
pub fn input() -> LayerKind {
    LayerKind::new(INPUT, KindCategory::input(), "Entry point of the network")
        .with_params(vec![
            ParameterSpec::enumeration(DISCRIMINATOR, input_types())
                .primary()
                .with_default_member(MEMBERS[0]),
            ParameterSpec::array("input_shape").primary().nullable(),
        ])
        .with_visual_asset(&asset_for(MEMBERS[0]))
}

/// Fixed input variants, one per input type, in enum order
pub fn variants() -> Vec<LayerKind> {
    MEMBERS
        .iter()
        .map(|member| {
            let name = variant_name(member);
            LayerKind::new(&name, KindCategory::input(), &format!("{} input", title_case(member)))
                .specializing(INPUT)
                .with_discriminator(Discriminator::new(DISCRIMINATOR, input_types(), member))
                .with_visual_asset(&asset_for(member))
        })
        .collect()
}

/// `TEXT` -> `TextInput`
fn variant_name(member: &str) -> String {
    format!("{}Input", title_case(member))
}

fn title_case(member: &str) -> String {
    let lower = member.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
