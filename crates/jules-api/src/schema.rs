//! Response and request shape validation
//!
//! Validators collect every violated field constraint instead of stopping at
//! the first one, so a bad payload can be diagnosed in a single pass. The
//! typed value is only produced once the violation list is empty.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// One violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Dotted JSON path of the offending field, e.g. `sourceContext.source`.
    pub path: String,
    /// What the schema expected at that path.
    pub expected: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
        }
    }
}

/// A payload that is well-formed JSON but does not satisfy the expected
/// shape. Carries the raw payload alongside the violation list.
#[derive(Error, Debug)]
#[error("{shape} payload failed validation: {}", describe(.violations))]
pub struct ValidationFailure {
    /// Name of the shape the payload was checked against.
    pub shape: &'static str,
    /// The payload as received, for diagnosis.
    pub raw: Value,
    pub violations: Vec<Violation>,
}

pub(crate) fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| {
            if v.path.is_empty() {
                v.expected.clone()
            } else {
                format!("{} (expected {})", v.path, v.expected)
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A payload shape the API accepts or returns.
///
/// Implementations compose: a record schema invokes the schemas of its
/// nested fields with an extended path.
pub trait Schema {
    /// Shape name used in failures and log lines.
    const NAME: &'static str;

    /// Record a violation for every constraint `value` breaks.
    fn check(value: &Value, path: &str, violations: &mut Vec<Violation>);
}

/// Validate `value` against `T`'s schema, then deserialize it.
pub fn decode<T>(value: Value) -> Result<T, ValidationFailure>
where
    T: Schema + for<'de> Deserialize<'de>,
{
    let mut violations = Vec::new();
    T::check(&value, "", &mut violations);
    if !violations.is_empty() {
        return Err(ValidationFailure {
            shape: T::NAME,
            raw: value,
            violations,
        });
    }
    match T::deserialize(&value) {
        Ok(typed) => Ok(typed),
        Err(err) => Err(ValidationFailure {
            shape: T::NAME,
            violations: vec![Violation::new("", err.to_string())],
            raw: value,
        }),
    }
}

/// Field-level check helpers shared by all `Schema` impls.
pub(crate) mod check {
    use serde_json::Value;

    use super::Violation;

    pub fn join(path: &str, field: &str) -> String {
        if path.is_empty() {
            field.to_string()
        } else {
            format!("{path}.{field}")
        }
    }

    pub fn index(path: &str, field: &str, i: usize) -> String {
        format!("{}[{i}]", join(path, field))
    }

    /// The record itself must be a JSON object before field checks mean
    /// anything. Returns false (with one violation) otherwise.
    pub fn expect_object(value: &Value, path: &str, violations: &mut Vec<Violation>) -> bool {
        if value.is_object() {
            true
        } else {
            violations.push(Violation::new(path, "a JSON object"));
            false
        }
    }

    pub fn require_str(value: &Value, path: &str, field: &str, violations: &mut Vec<Violation>) {
        match value.get(field) {
            Some(Value::String(_)) => {}
            Some(_) => violations.push(Violation::new(join(path, field), "a string")),
            None => violations.push(Violation::new(join(path, field), "a required string")),
        }
    }

    /// Required string that must also contain something other than
    /// whitespace. Used on request shapes.
    pub fn require_nonempty_str(
        value: &Value,
        path: &str,
        field: &str,
        violations: &mut Vec<Violation>,
    ) {
        match value.get(field) {
            Some(Value::String(s)) if !s.trim().is_empty() => {}
            Some(Value::String(_)) => {
                violations.push(Violation::new(join(path, field), "a non-empty string"))
            }
            Some(_) => violations.push(Violation::new(join(path, field), "a string")),
            None => violations.push(Violation::new(join(path, field), "a required string")),
        }
    }

    pub fn optional_str(value: &Value, path: &str, field: &str, violations: &mut Vec<Violation>) {
        if let Some(v) = value.get(field) {
            if !v.is_string() {
                violations.push(Violation::new(join(path, field), "a string"));
            }
        }
    }

    pub fn optional_bool(value: &Value, path: &str, field: &str, violations: &mut Vec<Violation>) {
        if let Some(v) = value.get(field) {
            if !v.is_boolean() {
                violations.push(Violation::new(join(path, field), "a boolean"));
            }
        }
    }

    pub fn optional_int(value: &Value, path: &str, field: &str, violations: &mut Vec<Violation>) {
        if let Some(v) = value.get(field) {
            if !v.is_i64() && !v.is_u64() {
                violations.push(Violation::new(join(path, field), "an integer"));
            }
        }
    }

    pub fn require_object<'a>(
        value: &'a Value,
        path: &str,
        field: &str,
        violations: &mut Vec<Violation>,
    ) -> Option<&'a Value> {
        match value.get(field) {
            Some(v) if v.is_object() => Some(v),
            Some(_) => {
                violations.push(Violation::new(join(path, field), "an object"));
                None
            }
            None => {
                violations.push(Violation::new(join(path, field), "a required object"));
                None
            }
        }
    }

    pub fn optional_object<'a>(
        value: &'a Value,
        path: &str,
        field: &str,
        violations: &mut Vec<Violation>,
    ) -> Option<&'a Value> {
        match value.get(field) {
            Some(v) if v.is_object() => Some(v),
            Some(_) => {
                violations.push(Violation::new(join(path, field), "an object"));
                None
            }
            None => None,
        }
    }

    pub fn optional_array<'a>(
        value: &'a Value,
        path: &str,
        field: &str,
        violations: &mut Vec<Violation>,
    ) -> Option<&'a Vec<Value>> {
        match value.get(field) {
            Some(Value::Array(items)) => Some(items),
            Some(_) => {
                violations.push(Violation::new(join(path, field), "an array"));
                None
            }
            None => None,
        }
    }

    /// The at-least-one-present rule for polymorphic content records: the
    /// upstream omits a discriminator tag, so any payload supplying one or
    /// more of the recognized fields is acceptable, and only a payload
    /// supplying none of them is rejected.
    pub fn require_one_of(
        value: &Value,
        path: &str,
        fields: &[&str],
        violations: &mut Vec<Violation>,
    ) {
        if !fields.iter().any(|field| value.get(*field).is_some()) {
            violations.push(Violation::new(
                path,
                format!("at least one of: {}", fields.join(", ")),
            ));
        }
    }
}
