//! Command parameter input, schema tables and binding.
//!
//! # Responsibility
//! - Carry raw, named command parameters (`ParamSet`).
//! - Declare every command's accepted parameters as static schema tables.
//! - Validate and convert raw parameters before any entity is constructed.
//!
//! # Invariants
//! - Parameter names are matched case-insensitively, ignoring surrounding
//!   whitespace.
//! - A document may not spell the same name twice.
//! - A JSON `null` value is treated as "not supplied".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub mod binder;
pub mod schema;

pub use binder::{bind, BindError, BoundParams, BoundValue};
pub use schema::{ParamKind, ParamSpec, Rule, Schema};

static ASSIGNMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-?([A-Za-z][A-Za-z0-9_]*)\s*=(.*)$").expect("valid assignment regex")
});

/// Raw named parameters supplied to one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Value>")]
pub struct ParamSet {
    // Keyed by lowercase name; keeps the caller's spelling for diagnostics.
    entries: BTreeMap<String, (String, Value)>,
}

fn key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into().trim().to_string();
        self.entries.insert(key(&name), (name, value.into()));
    }

    /// Builds a set from a document's entries.
    ///
    /// # Errors
    /// - `DuplicateParameter` when two names differ only by case or padding.
    pub fn from_entries<N, V>(entries: impl IntoIterator<Item = (N, V)>) -> Result<Self, BindError>
    where
        N: Into<String>,
        V: Into<Value>,
    {
        let mut params = ParamSet::new();
        for (name, value) in entries {
            let name = name.into();
            if let Some((first, _)) = params.entries.get(&key(&name)) {
                return Err(BindError::DuplicateParameter {
                    first: first.clone(),
                    second: name,
                });
            }
            params.insert(name, value);
        }
        Ok(params)
    }

    /// Builder-style variant of [`ParamSet::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Looks up a parameter by case-insensitive name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .get(&key(name))
            .map(|(_, value)| value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates `(caller spelling, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .values()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Merges another set on top of this one; `other` wins on conflicts.
    pub fn extend(&mut self, other: ParamSet) {
        self.entries.extend(other.entries);
    }

    /// Parses one `Name=Value` assignment and inserts it.
    ///
    /// The value is read as JSON when it parses (`true`, `42`, `["a"]`,
    /// `{"Name": "x"}`), otherwise it is kept as plain text.
    pub fn insert_assignment(&mut self, raw: &str) -> Result<(), BindError> {
        let (name, value) = parse_assignment(raw)?;
        self.insert(name, value);
        Ok(())
    }
}

impl TryFrom<BTreeMap<String, Value>> for ParamSet {
    type Error = BindError;

    fn try_from(value: BTreeMap<String, Value>) -> Result<Self, Self::Error> {
        ParamSet::from_entries(value)
    }
}

/// Splits `Name=Value` into a parameter name and a JSON value.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), BindError> {
    let captures = ASSIGNMENT_RE
        .captures(raw)
        .ok_or_else(|| BindError::InvalidAssignment(raw.to_string()))?;
    let name = captures[1].to_string();
    let text = &captures[2];
    let value = serde_json::from_str::<Value>(text.trim())
        .unwrap_or_else(|_| Value::String(text.to_string()));
    Ok((name, value))
}

#[cfg(test)]
mod tests {
    use super::{parse_assignment, BindError, ParamSet};
    use serde_json::{json, Value};

    #[test]
    fn lookups_ignore_case() {
        let params = ParamSet::new().with("ClientId", "web");
        assert_eq!(params.get("clientid"), Some(&json!("web")));
        assert_eq!(params.get("CLIENTID"), Some(&json!("web")));
    }

    #[test]
    fn parse_assignment_reads_json_then_falls_back_to_text() {
        assert_eq!(
            parse_assignment("Enabled=false").unwrap(),
            ("Enabled".to_string(), json!(false))
        );
        assert_eq!(
            parse_assignment("-AccessTokenLifetime=60").unwrap(),
            ("AccessTokenLifetime".to_string(), json!(60))
        );
        assert_eq!(
            parse_assignment("RedirectUris=https://a,https://b").unwrap(),
            (
                "RedirectUris".to_string(),
                Value::String("https://a,https://b".to_string())
            )
        );
    }

    #[test]
    fn parse_assignment_rejects_missing_equals() {
        let err = parse_assignment("ClientId").unwrap_err();
        assert!(matches!(err, BindError::InvalidAssignment(_)));
    }

    #[test]
    fn deserializes_from_json_object() {
        let params: ParamSet = serde_json::from_value(json!({
            "Name": "api",
            "Enabled": true
        }))
        .unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("name"), Some(&json!("api")));
    }

    #[test]
    fn padded_names_share_a_key() {
        let params = ParamSet::new().with(" Enabled ", false);
        assert_eq!(params.get("enabled"), Some(&json!(false)));
        assert_eq!(params.iter().next().map(|(name, _)| name), Some("Enabled"));
    }

    #[test]
    fn documents_reject_names_differing_only_by_case() {
        let err = serde_json::from_value::<ParamSet>(json!({
            "Name": "first",
            "name": "second"
        }))
        .unwrap_err();
        assert!(err.to_string().contains("`Name`"), "{err}");

        let err = ParamSet::from_entries([("Enabled", true), (" enabled", false)]).unwrap_err();
        assert_eq!(
            err,
            BindError::DuplicateParameter {
                first: "Enabled".to_string(),
                second: " enabled".to_string(),
            }
        );
    }

    #[test]
    fn explicit_inserts_still_override() {
        let mut params = ParamSet::new().with("Required", false);
        params.insert_assignment("required=true").unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("Required"), Some(&json!(true)));
    }
}
