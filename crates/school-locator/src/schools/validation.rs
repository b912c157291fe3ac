use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;
use serde_json::Value;

use super::domain::{SchoolFields, LATITUDE_BOUNDS, LONGITUDE_BOUNDS};

/// Category of a rejected input, shared by payload and query-parameter checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    EmptyField,
    TypeMismatch,
    OutOfRange,
    MissingParameter,
}

impl ViolationKind {
    pub fn label(self) -> &'static str {
        match self {
            ViolationKind::EmptyField => "empty field",
            ViolationKind::TypeMismatch => "type mismatch",
            ViolationKind::OutOfRange => "out of range",
            ViolationKind::MissingParameter => "missing parameter",
        }
    }
}

/// One rejected field together with a reason a caller can act on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub kind: ViolationKind,
    pub reason: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, kind: ViolationKind, reason: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.field, self.kind.label(), self.reason)
    }
}

/// Every violation found in a school payload, in field order.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("school payload failed validation on {} field(s)", .violations.len())]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.violations.iter().map(|violation| violation.field).collect()
    }

    pub fn kind_of(&self, field: &str) -> Option<ViolationKind> {
        self.violations
            .iter()
            .find(|violation| violation.field == field)
            .map(|violation| violation.kind)
    }
}

/// Check a candidate school payload of unknown shape.
///
/// Every field is inspected even after an earlier one fails, so the caller
/// receives the complete list of problems in a single response. Text fields are
/// trimmed before the emptiness check and stored trimmed.
pub fn validate_school(payload: &Value) -> Result<SchoolFields, ValidationErrors> {
    let mut violations = Vec::new();

    let name = required_text(payload, "name", &mut violations);
    let address = required_text(payload, "address", &mut violations);
    let latitude = bounded_number(payload, "latitude", &LATITUDE_BOUNDS, &mut violations);
    let longitude = bounded_number(payload, "longitude", &LONGITUDE_BOUNDS, &mut violations);

    match (name, address, latitude, longitude) {
        (Some(name), Some(address), Some(latitude), Some(longitude)) => Ok(SchoolFields {
            name,
            address,
            latitude,
            longitude,
        }),
        _ => Err(ValidationErrors { violations }),
    }
}

fn required_text(
    payload: &Value,
    field: &'static str,
    violations: &mut Vec<FieldViolation>,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            violations.push(FieldViolation::new(
                field,
                ViolationKind::EmptyField,
                format!("{field} is required"),
            ));
            None
        }
        Some(Value::String(raw)) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                violations.push(FieldViolation::new(
                    field,
                    ViolationKind::EmptyField,
                    format!("{field} must not be blank"),
                ));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(other) => {
            violations.push(FieldViolation::new(
                field,
                ViolationKind::TypeMismatch,
                format!("{field} must be a string, found {}", json_type(other)),
            ));
            None
        }
    }
}

fn bounded_number(
    payload: &Value,
    field: &'static str,
    bounds: &RangeInclusive<f64>,
    violations: &mut Vec<FieldViolation>,
) -> Option<f64> {
    let Some(value) = payload.get(field) else {
        violations.push(FieldViolation::new(
            field,
            ViolationKind::TypeMismatch,
            format!("{field} is required and must be a number"),
        ));
        return None;
    };

    let Some(number) = value.as_f64() else {
        violations.push(FieldViolation::new(
            field,
            ViolationKind::TypeMismatch,
            format!("{field} must be a number, found {}", json_type(value)),
        ));
        return None;
    };

    if bounds.contains(&number) {
        Some(number)
    } else {
        violations.push(FieldViolation::new(
            field,
            ViolationKind::OutOfRange,
            format!(
                "{field} must be between {} and {}, found {number}",
                bounds.start(),
                bounds.end()
            ),
        ));
        None
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
