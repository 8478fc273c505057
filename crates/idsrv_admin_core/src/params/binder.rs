//! Generic parameter binder.
//!
//! # Responsibility
//! - Match raw parameters against a schema table.
//! - Convert JSON values into typed bound values and apply validation rules.
//!
//! # Invariants
//! - Binding either fully succeeds or returns the first error; callers never
//!   see a partially bound set.
//! - Unknown parameter names are rejected, never ignored.

use super::schema::{ParamKind, ParamSpec, Rule, Schema};
use super::ParamSet;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Parameter binding and validation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum BindError {
    UnknownParameter {
        command: &'static str,
        name: String,
    },
    MissingRequired {
        command: &'static str,
        name: &'static str,
    },
    Blank {
        name: &'static str,
    },
    InvalidType {
        name: &'static str,
        expected: String,
        found: String,
    },
    InvalidChoice {
        name: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },
    OutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    Nested {
        name: &'static str,
        index: usize,
        source: Box<BindError>,
    },
    /// One document spelled the same parameter twice.
    DuplicateParameter {
        first: String,
        second: String,
    },
    /// Raw `Name=Value` text could not be split.
    InvalidAssignment(String),
}

impl Display for BindError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownParameter { command, name } => {
                write!(f, "{command}: unknown parameter `{name}`")
            }
            Self::MissingRequired { command, name } => {
                write!(f, "{command}: missing required parameter `{name}`")
            }
            Self::Blank { name } => write!(f, "parameter `{name}` must not be blank"),
            Self::InvalidType {
                name,
                expected,
                found,
            } => write!(f, "parameter `{name}` expects {expected}, got {found}"),
            Self::InvalidChoice {
                name,
                value,
                allowed,
            } => write!(
                f,
                "parameter `{name}` value `{value}` is not one of {}",
                allowed.join("|")
            ),
            Self::OutOfRange {
                name,
                value,
                min,
                max,
            } => write!(
                f,
                "parameter `{name}` value {value} is outside [{min}, {max}]"
            ),
            Self::Nested {
                name,
                index,
                source,
            } => write!(f, "{name}[{index}]: {source}"),
            Self::DuplicateParameter { first, second } => {
                write!(f, "parameters `{first}` and `{second}` name the same parameter")
            }
            Self::InvalidAssignment(raw) => {
                write!(f, "invalid parameter assignment `{raw}`; expected Name=Value")
            }
        }
    }
}

impl Error for BindError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Nested { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// A converted, validated parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundValue {
    Text(String),
    Bool(bool),
    Int(i64),
    Choice(&'static str),
    TextList(Vec<String>),
    ObjectList(Vec<BoundParams>),
}

/// Result of a successful bind, keyed by canonical schema names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParams {
    values: BTreeMap<&'static str, BoundValue>,
}

impl BoundParams {
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(BoundValue::Text(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(BoundValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(BoundValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn choice(&self, name: &str) -> Option<&'static str> {
        match self.values.get(name) {
            Some(BoundValue::Choice(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        match self.values.get(name) {
            Some(BoundValue::TextList(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    pub fn objects(&self, name: &str) -> Option<&[BoundParams]> {
        match self.values.get(name) {
            Some(BoundValue::ObjectList(values)) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Reads a range-checked integer as `u32`.
    pub fn seconds(&self, name: &'static str) -> Result<Option<u32>, BindError> {
        self.int(name)
            .map(|value| {
                u32::try_from(value).map_err(|_| BindError::OutOfRange {
                    name,
                    value,
                    min: 0,
                    max: i64::from(u32::MAX),
                })
            })
            .transpose()
    }

    /// Reads a mandatory text parameter.
    ///
    /// `bind` already guarantees presence for required specs, so a miss here
    /// means the caller asked for a name outside the schema.
    pub fn required_text(
        &self,
        command: &'static str,
        name: &'static str,
    ) -> Result<String, BindError> {
        self.text(name)
            .map(str::to_string)
            .ok_or(BindError::MissingRequired { command, name })
    }
}

/// Binds raw parameters against `schema`.
///
/// # Errors
/// - `UnknownParameter` for names the schema does not declare.
/// - `MissingRequired` when a mandatory parameter is absent or `null`.
/// - `InvalidType`/`InvalidChoice`/`Blank`/`OutOfRange` for bad values.
/// - `Nested` wraps errors from object-list elements.
pub fn bind(schema: &'static Schema, params: &ParamSet) -> Result<BoundParams, BindError> {
    for (name, _) in params.iter() {
        if schema.find(name).is_none() {
            return Err(BindError::UnknownParameter {
                command: schema.command,
                name: name.to_string(),
            });
        }
    }

    let mut bound = BoundParams::default();
    for spec in schema.params {
        match params.get(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    return Err(BindError::MissingRequired {
                        command: schema.command,
                        name: spec.name,
                    });
                }
            }
            Some(raw) => {
                let value = convert(spec, raw)?;
                check_rule(spec, &value)?;
                bound.values.insert(spec.name, value);
            }
        }
    }
    Ok(bound)
}

fn convert(spec: &ParamSpec, raw: &Value) -> Result<BoundValue, BindError> {
    match spec.kind {
        ParamKind::Text => convert_text(spec, raw).map(BoundValue::Text),
        ParamKind::Bool => convert_bool(spec, raw).map(BoundValue::Bool),
        ParamKind::Int => convert_int(spec, raw).map(BoundValue::Int),
        ParamKind::Choice(allowed) => {
            let value = convert_text(spec, raw)?;
            allowed
                .iter()
                .copied()
                .find(|name| name.eq_ignore_ascii_case(value.trim()))
                .map(BoundValue::Choice)
                .ok_or(BindError::InvalidChoice {
                    name: spec.name,
                    value,
                    allowed,
                })
        }
        ParamKind::TextList => convert_text_list(spec, raw).map(BoundValue::TextList),
        ParamKind::ObjectList(nested) => {
            convert_object_list(spec, nested, raw).map(BoundValue::ObjectList)
        }
    }
}

fn convert_text(spec: &ParamSpec, raw: &Value) -> Result<String, BindError> {
    match raw {
        Value::String(value) => Ok(value.clone()),
        Value::Number(value) => Ok(value.to_string()),
        Value::Bool(value) => Ok(value.to_string()),
        other => Err(type_error(spec, other)),
    }
}

fn convert_bool(spec: &ParamSpec, raw: &Value) -> Result<bool, BindError> {
    match raw {
        Value::Bool(value) => Ok(*value),
        Value::String(value) => match value.trim().to_ascii_lowercase().as_str() {
            "true" | "$true" => Ok(true),
            "false" | "$false" => Ok(false),
            _ => Err(type_error(spec, raw)),
        },
        other => Err(type_error(spec, other)),
    }
}

fn convert_int(spec: &ParamSpec, raw: &Value) -> Result<i64, BindError> {
    match raw {
        Value::Number(value) => value.as_i64().ok_or_else(|| type_error(spec, raw)),
        Value::String(value) => value
            .trim()
            .parse::<i64>()
            .map_err(|_| type_error(spec, raw)),
        other => Err(type_error(spec, other)),
    }
}

fn convert_text_list(spec: &ParamSpec, raw: &Value) -> Result<Vec<String>, BindError> {
    match raw {
        Value::Array(items) => items.iter().map(|item| convert_text(spec, item)).collect(),
        Value::String(value) => Ok(value
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()),
        other => Err(type_error(spec, other)),
    }
}

fn convert_object_list(
    spec: &ParamSpec,
    nested: &'static Schema,
    raw: &Value,
) -> Result<Vec<BoundParams>, BindError> {
    let items: Vec<&Value> = match raw {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![raw],
        other => return Err(type_error(spec, other)),
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let wrap = |err| BindError::Nested {
                name: spec.name,
                index,
                source: Box::new(err),
            };
            let params = match item {
                Value::Object(map) => ParamSet::from_entries(
                    map.iter().map(|(name, value)| (name.clone(), value.clone())),
                )
                .map_err(wrap)?,
                other => return Err(type_error(spec, other)),
            };
            bind(nested, &params).map_err(wrap)
        })
        .collect()
}

fn check_rule(spec: &ParamSpec, value: &BoundValue) -> Result<(), BindError> {
    match (spec.rule, value) {
        (Rule::NotBlank, BoundValue::Text(text)) if text.trim().is_empty() => {
            Err(BindError::Blank { name: spec.name })
        }
        (Rule::Range { min, max }, BoundValue::Int(value)) if *value < min || *value > max => {
            Err(BindError::OutOfRange {
                name: spec.name,
                value: *value,
                min,
                max,
            })
        }
        _ => Ok(()),
    }
}

fn type_error(spec: &ParamSpec, found: &Value) -> BindError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    BindError::InvalidType {
        name: spec.name,
        expected: spec.kind.describe(),
        found: found.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{bind, BindError};
    use crate::params::schema::{NEW_CLIENT, NEW_SCOPE};
    use crate::params::ParamSet;
    use serde_json::json;

    fn client_params() -> ParamSet {
        ParamSet::new()
            .with("ClientId", "web")
            .with("ClientName", "Web App")
    }

    #[test]
    fn binds_required_and_optional_values() {
        let params = client_params()
            .with("accesstokenlifetime", 60)
            .with("Flow", "hybrid")
            .with("RedirectUris", json!(["https://a", "https://b"]));
        let bound = bind(&NEW_CLIENT, &params).unwrap();

        assert_eq!(bound.text("ClientId"), Some("web"));
        assert_eq!(bound.int("AccessTokenLifetime"), Some(60));
        assert_eq!(bound.choice("Flow"), Some("Hybrid"));
        assert_eq!(
            bound.list("RedirectUris"),
            Some(&["https://a".to_string(), "https://b".to_string()][..])
        );
        assert!(!bound.contains("Enabled"));
    }

    #[test]
    fn missing_required_is_rejected() {
        let params = ParamSet::new().with("ClientName", "Web App");
        let err = bind(&NEW_CLIENT, &params).unwrap_err();
        assert_eq!(
            err,
            BindError::MissingRequired {
                command: "new-client",
                name: "ClientId"
            }
        );
    }

    #[test]
    fn null_counts_as_missing() {
        let params = client_params().with("ClientId", json!(null));
        let err = bind(&NEW_CLIENT, &params).unwrap_err();
        assert!(matches!(
            err,
            BindError::MissingRequired {
                name: "ClientId",
                ..
            }
        ));
    }

    #[test]
    fn blank_required_text_is_rejected() {
        let params = client_params().with("ClientName", "   ");
        let err = bind(&NEW_CLIENT, &params).unwrap_err();
        assert_eq!(err, BindError::Blank { name: "ClientName" });
    }

    #[test]
    fn negative_lifetime_is_rejected() {
        let params = client_params().with("IdentityTokenLifetime", -1);
        let err = bind(&NEW_CLIENT, &params).unwrap_err();
        assert!(matches!(
            err,
            BindError::OutOfRange {
                name: "IdentityTokenLifetime",
                value: -1,
                ..
            }
        ));
    }

    #[test]
    fn lifetime_above_i32_max_is_rejected() {
        let params = client_params().with("AccessTokenLifetime", i64::from(i32::MAX) + 1);
        assert!(matches!(
            bind(&NEW_CLIENT, &params).unwrap_err(),
            BindError::OutOfRange { .. }
        ));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let params = client_params().with("Colour", "blue");
        let err = bind(&NEW_CLIENT, &params).unwrap_err();
        assert_eq!(
            err,
            BindError::UnknownParameter {
                command: "new-client",
                name: "Colour".to_string()
            }
        );
    }

    #[test]
    fn wrong_type_is_rejected() {
        let params = client_params().with("Enabled", json!([true]));
        assert!(matches!(
            bind(&NEW_CLIENT, &params).unwrap_err(),
            BindError::InvalidType {
                name: "Enabled",
                ..
            }
        ));
    }

    #[test]
    fn invalid_choice_is_rejected() {
        let params = client_params().with("AccessTokenType", "Opaque");
        assert!(matches!(
            bind(&NEW_CLIENT, &params).unwrap_err(),
            BindError::InvalidChoice {
                name: "AccessTokenType",
                ..
            }
        ));
    }

    #[test]
    fn string_values_coerce_for_flags_ints_and_lists() {
        let params = client_params()
            .with("RequireConsent", "$false")
            .with("AccessTokenLifetime", "120")
            .with("AllowedScopes", "openid, profile,");
        let bound = bind(&NEW_CLIENT, &params).unwrap();
        assert_eq!(bound.flag("RequireConsent"), Some(false));
        assert_eq!(bound.int("AccessTokenLifetime"), Some(120));
        assert_eq!(
            bound.list("AllowedScopes"),
            Some(&["openid".to_string(), "profile".to_string()][..])
        );
    }

    #[test]
    fn nested_objects_bind_through_their_schema() {
        let params = ParamSet::new().with("Name", "api").with(
            "Claims",
            json!([
                { "Name": "role", "AlwaysIncludeInIdToken": true },
                { "name": "email" }
            ]),
        );
        let bound = bind(&NEW_SCOPE, &params).unwrap();
        let claims = bound.objects("Claims").unwrap();
        assert_eq!(claims.len(), 2);
        assert_eq!(claims[0].flag("AlwaysIncludeInIdToken"), Some(true));
        assert_eq!(claims[1].text("Name"), Some("email"));
    }

    #[test]
    fn nested_errors_report_their_position() {
        let params = ParamSet::new()
            .with("Name", "api")
            .with("Claims", json!([{ "Name": "role" }, { "Description": "x" }]));
        let err = bind(&NEW_SCOPE, &params).unwrap_err();
        match err {
            BindError::Nested { name, index, source } => {
                assert_eq!(name, "Claims");
                assert_eq!(index, 1);
                assert!(matches!(*source, BindError::MissingRequired { name: "Name", .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn padded_names_bind_to_their_parameter() {
        let params = ParamSet::new().with("Name", "api").with(" Enabled", false);
        let bound = bind(&NEW_SCOPE, &params).unwrap();
        assert_eq!(bound.flag("Enabled"), Some(false));
    }

    #[test]
    fn nested_duplicate_names_are_rejected() {
        let params = ParamSet::new()
            .with("Name", "api")
            .with("Claims", json!([{ "Name": "role", "name": "email" }]));
        match bind(&NEW_SCOPE, &params).unwrap_err() {
            BindError::Nested { name, index, source } => {
                assert_eq!(name, "Claims");
                assert_eq!(index, 0);
                assert!(matches!(*source, BindError::DuplicateParameter { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
