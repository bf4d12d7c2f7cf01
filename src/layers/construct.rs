//! Construction of layer instances from untyped client parameters

use log::{debug, warn};
use serde_json::{Map, Number, Value};

use crate::error::{NetError, Result};
use crate::layers::instance::LayerInstance;
use crate::layers::parameter::{ParamMap, ParamValue, ParameterSpec, SemanticType};
use crate::layers::schema::ResolvedKind;

impl ResolvedKind {
    /// Build an unattached instance from raw client parameters.
    ///
    /// Missing parameters take their schema default; the dimensionality
    /// selector is resolved before any shape-like parameter is broadcast.
    pub fn construct(&self, raw: &Map<String, Value>) -> Result<LayerInstance> {
        let dims = self.dimensionality(raw)?;
        let mut params = ParamMap::new();

        for spec in &self.schema {
            let value = match supplied(raw, &spec.name) {
                Some(v) => self.coerce(spec, v, dims)?,
                None => self.default_for(spec, dims)?,
            };
            self.check_fixed(spec, &value)?;
            params.insert(spec.name.clone(), value);
        }

        for (key, value) in raw {
            if self.param(key).is_some() {
                continue;
            }
            if self.accepts_extra_params {
                params.insert(key.clone(), ParamValue::from_json(value));
            } else {
                warn!("Ignoring unknown parameter '{}' for layer kind {}", key, self.name);
            }
        }

        if let Some(normalize) = self.normalizer {
            normalize(&self.name, &mut params)?;
        }

        debug!("Constructed {} with {} parameters", self.name, params.len());
        Ok(LayerInstance::unattached(&self.name, params))
    }

    /// Number of dimensions shape-like parameters broadcast to, if any
    fn dimensionality(&self, raw: &Map<String, Value>) -> Result<Option<usize>> {
        let Some(rule) = &self.shape_rule else {
            return Ok(None);
        };
        let selector = self
            .param(&rule.selector)
            .ok_or_else(|| NetError::invalid_kind(&self.name, "dimensionality selector missing"))?;
        let member = match supplied(raw, &selector.name) {
            Some(v) => self.coerce(selector, v, None)?,
            None => self.default_for(selector, None)?,
        };
        let member = member.as_str().unwrap_or_default();
        rule.dims_for(member).map(Some).ok_or_else(|| {
            NetError::invalid_value(&self.name, &selector.name, format!("'{}' selects no dimensionality", member))
        })
    }

    fn coerce(&self, spec: &ParameterSpec, value: &Value, dims: Option<usize>) -> Result<ParamValue> {
        if spec.shaped {
            let given = shape_elements(value)
                .ok_or_else(|| self.invalid(spec, "expected an integer or a list of integers"))?;
            return self.fit_shape(spec, given, dims.unwrap_or(1));
        }

        match spec.semantic_type {
            SemanticType::Number => number(value)
                .map(ParamValue::Number)
                .ok_or_else(|| self.invalid(spec, "expected a number")),
            SemanticType::Boolean => match value {
                Value::Bool(b) => Ok(ParamValue::Boolean(*b)),
                Value::String(s) if s == "true" => Ok(ParamValue::Boolean(true)),
                Value::String(s) if s == "false" => Ok(ParamValue::Boolean(false)),
                _ => Err(self.invalid(spec, "expected a boolean")),
            },
            SemanticType::String => match value {
                Value::String(s) => Ok(ParamValue::String(s.clone())),
                _ => Err(self.invalid(spec, "expected a string")),
            },
            SemanticType::Array => match value {
                Value::Array(items) => Ok(ParamValue::Array(items.clone())),
                _ => Err(self.invalid(spec, "expected an array")),
            },
            SemanticType::Object => match value {
                Value::Object(map) => Ok(ParamValue::Object(map.clone())),
                _ => Err(self.invalid(spec, "expected an object")),
            },
            SemanticType::Enum => {
                let Value::String(name) = value else {
                    return Err(self.invalid(spec, "expected an enum member name"));
                };
                let Some(enumeration) = &spec.enumeration else {
                    return Err(NetError::invalid_kind(&self.name, format!("'{}' has no enumeration", spec.name)));
                };
                if enumeration.contains(name) {
                    Ok(ParamValue::String(name.clone()))
                } else {
                    Err(NetError::UnknownEnumMember {
                        param: spec.name.clone(),
                        enum_name: enumeration.name.clone(),
                        value: name.clone(),
                    })
                }
            }
        }
    }

    fn default_for(&self, spec: &ParameterSpec, dims: Option<usize>) -> Result<ParamValue> {
        match &spec.default {
            Some(default) if spec.shaped => {
                let given = match default {
                    ParamValue::Shape(d) => d.clone(),
                    other => other.as_i64().into_iter().collect(),
                };
                self.fit_shape(spec, given, dims.unwrap_or(1))
            }
            Some(default) => Ok(default.clone()),
            None if spec.nullable => Ok(ParamValue::Null),
            None => Err(NetError::MissingParameter {
                kind: self.name.clone(),
                param: spec.name.clone(),
            }),
        }
    }

    /// Length n is kept, length 1 is broadcast, anything else is rejected
    fn fit_shape(&self, spec: &ParameterSpec, given: Vec<i64>, n: usize) -> Result<ParamValue> {
        match given.len() {
            len if len == n => Ok(ParamValue::Shape(given)),
            1 => Ok(ParamValue::Shape(vec![given[0]; n])),
            got => Err(NetError::InvalidShape {
                kind: self.name.clone(),
                param: spec.name.clone(),
                expected: n,
                got,
            }),
        }
    }

    /// A fixed sub-variant only accepts its own discriminator value
    fn check_fixed(&self, spec: &ParameterSpec, value: &ParamValue) -> Result<()> {
        match &self.discriminator {
            Some(d) if d.param == spec.name && value.as_str() != Some(d.value.as_str()) => Err(self.invalid(
                spec,
                format!("{} is fixed to {}", self.name, d.value),
            )),
            _ => Ok(()),
        }
    }

    fn invalid(&self, spec: &ParameterSpec, reason: impl Into<String>) -> NetError {
        NetError::invalid_value(&self.name, &spec.name, reason)
    }
}

/// Explicit null counts as absent
fn supplied<'a>(raw: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    raw.get(name).filter(|v| !v.is_null())
}

/// JSON number, or a string that parses as one
fn number(value: &Value) -> Option<Number> {
    match value {
        Value::Number(n) => Some(n.clone()),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .map(Number::from)
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(Number::from_f64))
        }
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A scalar becomes a one-element list
fn shape_elements(value: &Value) -> Option<Vec<i64>> {
    match value {
        Value::Array(items) => items.iter().map(integer).collect(),
        scalar => integer(scalar).map(|v| vec![v]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::kind::{Discriminator, KindCategory, LayerKind, ShapeRule};
    use crate::layers::parameter::EnumSpec;
    use crate::layers::schema::resolve;
    use serde_json::json;

    fn conv2d() -> ResolvedKind {
        let kind = LayerKind::new("Conv", KindCategory::convolution(), "")
            .with_params(vec![
                ParameterSpec::enumeration("conv_type", EnumSpec::new("ConvolutionType", &["CONV1D", "CONV2D"]))
                    .with_default_member("CONV2D"),
                ParameterSpec::shape("kernel_size").with_default(3),
                ParameterSpec::number("filters"),
                ParameterSpec::number("groups").nullable(),
            ])
            .with_shape_rule(ShapeRule::new("conv_type", &[("CONV1D", 1), ("CONV2D", 2)]));
        resolve(&kind, |_: &str| None).unwrap()
    }

    fn raw(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_shape_broadcasting() {
        let kind = conv2d();
        let build = |k: Value| kind.construct(&raw(json!({"filters": 8, "kernel_size": k})));

        assert_eq!(build(json!(3)).unwrap().param("kernel_size"), Some(&ParamValue::Shape(vec![3, 3])));
        assert_eq!(build(json!([5])).unwrap().param("kernel_size"), Some(&ParamValue::Shape(vec![5, 5])));
        assert_eq!(build(json!([1, 2])).unwrap().param("kernel_size"), Some(&ParamValue::Shape(vec![1, 2])));
        assert_eq!(
            build(json!([1, 2, 3])).unwrap_err(),
            NetError::InvalidShape {
                kind: "Conv".into(),
                param: "kernel_size".into(),
                expected: 2,
                got: 3,
            }
        );
    }

    #[test]
    fn test_selector_resolved_before_broadcast() {
        let kind = conv2d();
        let layer = kind
            .construct(&raw(json!({"conv_type": "CONV1D", "filters": 8})))
            .unwrap();
        assert_eq!(layer.param("kernel_size"), Some(&ParamValue::Shape(vec![3])));
    }

    #[test]
    fn test_missing_and_nullable_parameters() {
        let kind = conv2d();
        assert_eq!(
            kind.construct(&Map::new()).unwrap_err(),
            NetError::MissingParameter {
                kind: "Conv".into(),
                param: "filters".into(),
            }
        );

        let layer = kind.construct(&raw(json!({"filters": "16", "groups": null}))).unwrap();
        assert_eq!(layer.param("filters"), Some(&ParamValue::from(16)));
        assert_eq!(layer.param("groups"), Some(&ParamValue::Null));
    }

    #[test]
    fn test_enum_members_resolve_case_sensitively() {
        let kind = conv2d();
        let err = kind
            .construct(&raw(json!({"conv_type": "conv2d", "filters": 1})))
            .unwrap_err();
        assert_eq!(
            err,
            NetError::UnknownEnumMember {
                param: "conv_type".into(),
                enum_name: "ConvolutionType".into(),
                value: "conv2d".into(),
            }
        );
    }

    #[test]
    fn test_fixed_variant_rejects_other_values() {
        let kind = LayerKind::new("TextIn", KindCategory::input(), "").with_discriminator(Discriminator::new(
            "input_type",
            EnumSpec::new("InputType", &["IMAGE", "TEXT"]),
            "TEXT",
        ));
        let kind = resolve(&kind, |_: &str| None).unwrap();

        let layer = kind.construct(&Map::new()).unwrap();
        assert_eq!(layer.param("input_type"), Some(&ParamValue::from("TEXT")));

        let err = kind.construct(&raw(json!({"input_type": "IMAGE"}))).unwrap_err();
        assert!(matches!(err, NetError::InvalidValue { .. }));
    }

    #[test]
    fn test_unknown_keys_dropped_unless_extras_accepted() {
        let kind = LayerKind::new("Custom", KindCategory::custom(), "");
        let strict = resolve(&kind, |_: &str| None).unwrap();
        let open = resolve(&kind.clone().accepting_extra_params(), |_: &str| None).unwrap();

        let params = raw(json!({"note": "hello"}));
        assert!(strict.construct(&params).unwrap().params.is_empty());
        assert_eq!(open.construct(&params).unwrap().param("note"), Some(&ParamValue::from("hello")));
    }
}
