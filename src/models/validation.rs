// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Guardrail validation outcome.

use serde::Serialize;

/// Outcome of a guardrail check.
///
/// `Sanitized` means the input failed but a narrowly corrected value
/// exists; the correction may not address every error listed.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation<T> {
    Valid(T),
    Sanitized { value: T, errors: Vec<String> },
    Invalid(Vec<String>),
}

impl<T> Validation<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    /// Errors in the order the checks ran. Empty when valid.
    pub fn errors(&self) -> &[String] {
        match self {
            Validation::Valid(_) => &[],
            Validation::Sanitized { errors, .. } => errors,
            Validation::Invalid(errors) => errors,
        }
    }

    /// The corrected value, present only for `Sanitized`.
    pub fn sanitized(&self) -> Option<&T> {
        match self {
            Validation::Sanitized { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Flatten into the `{valid, errors, sanitized}` report shape.
    pub fn into_report(self) -> ValidationReport<T> {
        match self {
            Validation::Valid(_) => ValidationReport {
                valid: true,
                errors: Vec::new(),
                sanitized: None,
            },
            Validation::Sanitized { value, errors } => ValidationReport {
                valid: false,
                errors,
                sanitized: Some(value),
            },
            Validation::Invalid(errors) => ValidationReport {
                valid: false,
                errors,
                sanitized: None,
            },
        }
    }
}

/// Serializable view of a [`Validation`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport<T> {
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sanitized: Option<T>,
}
