//! Validation failures, shared field rules, and the bridge from
//! `validator::ValidationErrors` to named failures.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::id::UserId;

/// A single named validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    /// Wire name of the offending field (e.g. `givenNames`).
    pub field: String,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// A failure without a message carries no information and is dropped
    /// when failures are aggregated.
    pub fn is_blank(&self) -> bool {
        self.message.trim().is_empty()
    }
}

/// A struct field and the name it has on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName {
    pub rust: &'static str,
    pub wire: &'static str,
}

impl FieldName {
    pub const fn new(rust: &'static str, wire: &'static str) -> Self {
        Self { rust, wire }
    }

    fn matches(&self, key: &str) -> bool {
        key == self.rust || key == self.wire
    }
}

/// Flatten `errors` into failures, ordered by `fields` (declaration order).
///
/// Messages are prefixed with the quoted wire name, e.g.
/// `'givenNames' must not be empty.`. Errors on fields missing from `fields`
/// follow, sorted by name, so nothing is lost.
pub fn failures_from(errors: &ValidationErrors, fields: &[FieldName]) -> Vec<ValidationFailure> {
    let by_field = errors.field_errors();
    let mut failures = Vec::new();

    for field in fields {
        let found = by_field.iter().find(|(name, _)| field.matches(name));
        if let Some((_, errs)) = found {
            failures.extend(errs.iter().map(|e| failure(field.wire, e)));
        }
    }

    let mut rest: Vec<_> = by_field
        .iter()
        .filter(|(name, _)| !fields.iter().any(|f| f.matches(name)))
        .collect();
    rest.sort_by(|a, b| a.0.cmp(b.0));
    for (name, errs) in rest {
        failures.extend(errs.iter().map(|e| failure(name, e)));
    }

    failures
}

fn failure(field: &str, error: &ValidationError) -> ValidationFailure {
    let message = error
        .message
        .clone()
        .unwrap_or_else(|| error.code.clone());
    ValidationFailure::new(field, format!("'{field}' {message}"))
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// `#[validate(custom(function = "..."))]` rules shared by request types.
pub mod rules {
    use super::*;

    /// Fails on empty or whitespace-only text.
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(rule("not_blank", "must not be empty."));
        }
        Ok(())
    }

    /// Required email address: blank reports as empty, otherwise the trimmed
    /// value must be a well-formed address. One failure at most.
    pub fn email_address(value: &str) -> Result<(), ValidationError> {
        not_blank(value)?;
        if !value.trim().validate_email() {
            return Err(rule("email", "is not a valid email address."));
        }
        Ok(())
    }

    /// Identifiers name stored users only when strictly positive.
    pub fn assignable_id(id: &UserId) -> Result<(), ValidationError> {
        if !id.is_assignable() {
            return Err(rule("range", "must be greater than '0'."));
        }
        Ok(())
    }
}
