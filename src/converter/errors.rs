//! # Converter Errors

use thiserror::Error;

use crate::registry::ConstraintError;

/// Result type for goal conversion
pub type ConverterResult<T> = Result<T, ConverterError>;

/// Errors raised while turning a goal tree into an executable goal
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConverterError {
    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),

    #[error("Constraint {name} could not be rebuilt: {source}")]
    Constraint {
        name: String,
        #[source]
        source: ConstraintError,
    },

    #[error("Constructor for {0} did not return an executable constraint")]
    MissingGoal(String),

    #[error("Malformed goal tree: conversion ended with {0} goals")]
    Malformed(usize),
}

impl ConverterError {
    /// Registry mismatches and broken trees cannot be fixed by retrying
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConverterError::Constraint { .. })
    }
}
