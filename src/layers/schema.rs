//! Effective parameter schemas
//!
//! A kind's effective schema is its own parameter list merged with everything
//! it inherits along its specialization chain. The most specific declaration of
//! a name wins, and the order is: this kind's own parameters first, then the
//! names each successive base adds, each level in declared order.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{NetError, Result};
use crate::layers::kind::{Discriminator, LayerKind, Normalizer, ShapeRule};
use crate::layers::parameter::{ParamValue, ParameterSpec, SemanticType};

/// Walk `kind` up to its ultimate base, most specific first.
///
/// Fails on a dangling base or when a name repeats in the chain.
pub fn specialization_chain<'a, F>(kind: &'a LayerKind, lookup: F) -> Result<Vec<&'a LayerKind>>
where
    F: Fn(&str) -> Option<&'a LayerKind>,
{
    let mut chain = vec![kind];
    let mut next = kind.specializes.as_deref();

    while let Some(base_name) = next {
        if chain.iter().any(|k| k.name == base_name) {
            let mut names: Vec<String> = chain.iter().map(|k| k.name.clone()).collect();
            names.push(base_name.to_string());
            return Err(NetError::CyclicSpecialization { chain: names });
        }
        let base = lookup(base_name).ok_or_else(|| NetError::UnknownKind(base_name.to_string()))?;
        chain.push(base);
        next = base.specializes.as_deref();
    }

    Ok(chain)
}

/// A kind with its inheritance folded in: everything construction needs
#[derive(Debug, Clone)]
pub struct ResolvedKind {
    pub name: String,
    pub schema: Vec<ParameterSpec>,
    pub shape_rule: Option<ShapeRule>,
    pub discriminator: Option<Discriminator>,
    pub normalizer: Option<Normalizer>,
    pub accepts_extra_params: bool,
}

impl ResolvedKind {
    /// Parameter of the effective schema by name
    pub fn param(&self, name: &str) -> Option<&ParameterSpec> {
        self.schema.iter().find(|p| p.name == name)
    }
}

/// Fold the specialization chain of `kind` into a [`ResolvedKind`]
pub fn resolve<'a, F>(kind: &'a LayerKind, lookup: F) -> Result<ResolvedKind>
where
    F: Fn(&str) -> Option<&'a LayerKind>,
{
    let chain = specialization_chain(kind, lookup)?;

    let mut seen = HashSet::new();
    let mut schema = Vec::new();
    for level in &chain {
        for param in &level.params {
            if seen.insert(param.name.as_str()) {
                schema.push(param.clone());
            }
        }
    }

    // Nearest declaration along the chain applies
    let discriminator = chain.iter().find_map(|k| k.discriminator.clone());
    if let Some(d) = &discriminator {
        pin_discriminator(&mut schema, d);
    }

    Ok(ResolvedKind {
        name: kind.name.clone(),
        schema,
        shape_rule: chain.iter().find_map(|k| k.shape_rule.clone()),
        discriminator,
        normalizer: chain.iter().find_map(|k| k.normalizer),
        accepts_extra_params: chain.iter().any(|k| k.accepts_extra_params),
    })
}

/// Effective schema of `kind`
pub fn effective_schema<'a, F>(kind: &'a LayerKind, lookup: F) -> Result<Vec<ParameterSpec>>
where
    F: Fn(&str) -> Option<&'a LayerKind>,
{
    resolve(kind, lookup).map(|r| r.schema)
}

/// Make the discriminator report the variant's own value, synthesizing the
/// parameter when no level of the chain declares it.
fn pin_discriminator(schema: &mut Vec<ParameterSpec>, d: &Discriminator) {
    let fixed = ParamValue::String(d.value.clone());
    match schema.iter_mut().find(|p| p.name == d.param) {
        Some(existing) => existing.default = Some(fixed),
        None => schema.push(
            ParameterSpec::enumeration(&d.param, d.enumeration.clone())
                .with_default_member(&d.value)
                .primary(),
        ),
    }
}

/// Registration-time checks for a kind against the kinds it can see.
pub fn validate_kind<'a, F>(kind: &'a LayerKind, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<&'a LayerKind>,
{
    if kind.name.trim().is_empty() {
        return Err(NetError::invalid_kind(&kind.name, "kind name is empty"));
    }

    let mut own = HashSet::new();
    for param in &kind.params {
        if !own.insert(param.name.as_str()) {
            return Err(NetError::invalid_kind(
                &kind.name,
                format!("parameter '{}' declared twice", param.name),
            ));
        }
        param
            .check()
            .map_err(|reason| NetError::invalid_kind(&kind.name, reason))?;
    }

    if let Some(d) = &kind.discriminator {
        if !d.enumeration.contains(&d.value) {
            return Err(NetError::invalid_kind(
                &kind.name,
                format!("discriminator value '{}' is not a member of {}", d.value, d.enumeration.name),
            ));
        }
    }

    let resolved = resolve(kind, lookup)?;

    // The pinned discriminator must still be a valid enum parameter of the
    // effective schema, whichever level declared it.
    if let Some(d) = &resolved.discriminator {
        let pinned = resolved
            .param(&d.param)
            .ok_or_else(|| NetError::invalid_kind(&kind.name, format!("discriminator '{}' missing", d.param)))?;
        let is_member = pinned.semantic_type == SemanticType::Enum
            && pinned.enumeration.as_ref().is_some_and(|e| e.contains(&d.value));
        if !is_member {
            return Err(NetError::invalid_kind(
                &kind.name,
                format!("discriminator value '{}' is not a member of parameter '{}'", d.value, d.param),
            ));
        }
        pinned
            .check()
            .map_err(|reason| NetError::invalid_kind(&kind.name, reason))?;
    }

    if resolved.schema.iter().any(|p| p.shaped) {
        let Some(rule) = &resolved.shape_rule else {
            return Err(NetError::invalid_kind(
                &kind.name,
                "shape parameters need a dimensionality rule",
            ));
        };
        let selector = resolved
            .param(&rule.selector)
            .filter(|p| p.semantic_type == SemanticType::Enum)
            .ok_or_else(|| {
                NetError::invalid_kind(
                    &kind.name,
                    format!("dimensionality selector '{}' is not an enum parameter", rule.selector),
                )
            })?;
        if let Some(e) = &selector.enumeration {
            if let Some((member, _)) = rule.dims.iter().find(|(m, _)| !e.contains(m)) {
                return Err(NetError::invalid_kind(
                    &kind.name,
                    format!("'{}' is not a member of {}", member, e.name),
                ));
            }
        }

        // Sequence defaults must broadcast to every dimensionality the rule allows
        for param in resolved.schema.iter().filter(|p| p.shaped) {
            if let Some(ParamValue::Shape(dims)) = &param.default {
                if let Some((member, n)) = rule.dims.iter().find(|(_, n)| dims.len() != 1 && dims.len() != *n) {
                    return Err(NetError::invalid_kind(
                        &kind.name,
                        format!(
                            "default of '{}' has {} values but {} selects {}",
                            param.name,
                            dims.len(),
                            member,
                            n
                        ),
                    ));
                }
            }
        }
    }

    Ok(())
}

/// One parameter as listed to editors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    pub name: String,
    pub semantic_type: SemanticType,
    pub is_primary: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<ParamValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub shaped: bool,
}

impl From<&ParameterSpec> for ParameterDescriptor {
    fn from(spec: &ParameterSpec) -> Self {
        Self {
            name: spec.name.clone(),
            semantic_type: spec.semantic_type,
            is_primary: spec.is_primary,
            default: spec.default.clone(),
            enum_name: spec.enumeration.as_ref().map(|e| e.name.clone()),
            enum_values: spec.enumeration.as_ref().map(|e| e.members.clone()),
            nullable: spec.nullable,
            shaped: spec.shaped,
        }
    }
}

/// Palette entry for one layer kind: what an editor needs to render its form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindSchema {
    pub kind_name: String,
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specializes: Option<String>,
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_asset_id: Option<String>,
}

impl KindSchema {
    pub fn new(kind: &LayerKind, schema: &[ParameterSpec]) -> Self {
        Self {
            kind_name: kind.name.clone(),
            category: kind.category.name().to_string(),
            description: kind.description.clone(),
            specializes: kind.specializes.clone(),
            parameters: schema.iter().map(ParameterDescriptor::from).collect(),
            visual_asset_id: kind.visual_asset.clone(),
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::kind::KindCategory;
    use crate::layers::parameter::EnumSpec;
    use std::collections::HashMap;

    fn kinds(list: Vec<LayerKind>) -> HashMap<String, LayerKind> {
        list.into_iter().map(|k| (k.name.clone(), k)).collect()
    }

    fn names(schema: &[ParameterSpec]) -> Vec<&str> {
        schema.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_specific_level_overrides_and_orders_first() {
        let table = kinds(vec![
            LayerKind::new("Base", KindCategory::core(), "").with_params(vec![
                ParameterSpec::number("a").with_default(1),
                ParameterSpec::number("b").with_default(2),
            ]),
            LayerKind::new("Mid", KindCategory::core(), "")
                .specializing("Base")
                .with_params(vec![
                    ParameterSpec::number("c").with_default(3),
                    ParameterSpec::number("a").with_default(10),
                ]),
            LayerKind::new("Leaf", KindCategory::core(), "")
                .specializing("Mid")
                .with_params(vec![ParameterSpec::number("d"), ParameterSpec::number("b").with_default(20)]),
        ]);
        let lookup = |n: &str| table.get(n);

        let schema = effective_schema(&table["Leaf"], lookup).unwrap();
        assert_eq!(names(&schema), vec!["d", "b", "c", "a"]);
        assert_eq!(schema[1].default, Some(ParamValue::from(20)));
        assert_eq!(schema[3].default, Some(ParamValue::from(10)));
    }

    #[test]
    fn test_discriminator_synthesized_when_absent() {
        let input_types = EnumSpec::new("InputType", &["IMAGE", "TEXT"]);
        let table = kinds(vec![
            LayerKind::new("In", KindCategory::input(), "")
                .with_param(ParameterSpec::array("input_shape").nullable()),
            LayerKind::new("TextIn", KindCategory::input(), "")
                .specializing("In")
                .with_discriminator(Discriminator::new("input_type", input_types, "TEXT")),
        ]);

        let schema = effective_schema(&table["TextIn"], |n: &str| table.get(n)).unwrap();
        assert_eq!(names(&schema), vec!["input_shape", "input_type"]);
        let synthesized = &schema[1];
        assert_eq!(synthesized.semantic_type, SemanticType::Enum);
        assert_eq!(synthesized.default, Some(ParamValue::from("TEXT")));
        assert_eq!(synthesized.enumeration.as_ref().unwrap().members, vec!["IMAGE", "TEXT"]);
    }

    #[test]
    fn test_chain_rejects_cycles_and_dangling_bases() {
        let table = kinds(vec![
            LayerKind::new("A", KindCategory::core(), "").specializing("B"),
            LayerKind::new("B", KindCategory::core(), "").specializing("A"),
            LayerKind::new("Orphan", KindCategory::core(), "").specializing("Missing"),
        ]);
        let lookup = |n: &str| table.get(n);

        match specialization_chain(&table["A"], lookup) {
            Err(NetError::CyclicSpecialization { chain }) => assert_eq!(chain, vec!["A", "B", "A"]),
            other => panic!("expected a cycle, got {:?}", other.map(|c| c.len())),
        }
        assert_eq!(
            specialization_chain(&table["Orphan"], lookup).unwrap_err(),
            NetError::UnknownKind("Missing".into())
        );
    }

    #[test]
    fn test_shape_params_need_a_rule() {
        let kind = LayerKind::new("Conv", KindCategory::convolution(), "")
            .with_param(ParameterSpec::shape("kernel_size").with_default(3));
        let err = validate_kind(&kind, |_: &str| None).unwrap_err();
        assert!(matches!(err, NetError::InvalidKind { .. }));
    }

    #[test]
    fn test_shape_default_must_fit_every_dimensionality() {
        let kind = LayerKind::new("Conv", KindCategory::convolution(), "")
            .with_params(vec![
                ParameterSpec::enumeration("conv_type", EnumSpec::new("ConvolutionType", &["CONV1D", "CONV2D"]))
                    .with_default_member("CONV2D"),
                ParameterSpec::shape("kernel_size").with_default(vec![3, 3]),
            ])
            .with_shape_rule(ShapeRule::new("conv_type", &[("CONV1D", 1), ("CONV2D", 2)]));
        match validate_kind(&kind, |_: &str| None) {
            Err(NetError::InvalidKind { reason, .. }) => assert!(reason.contains("CONV1D"), "{}", reason),
            other => panic!("expected InvalidKind, got {:?}", other),
        }

        let broadcastable = kind.clone().with_params(vec![
            ParameterSpec::enumeration("conv_type", EnumSpec::new("ConvolutionType", &["CONV1D", "CONV2D"]))
                .with_default_member("CONV2D"),
            ParameterSpec::shape("kernel_size").with_default(vec![3]),
        ]);
        assert!(validate_kind(&broadcastable, |_: &str| None).is_ok());
    }

    #[test]
    fn test_descriptor_omits_empty_fields() {
        let spec = ParameterSpec::number("units").primary().with_default(50);
        let json = serde_json::to_value(ParameterDescriptor::from(&spec)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "units", "semanticType": "number", "isPrimary": true, "default": 50})
        );
    }
}
