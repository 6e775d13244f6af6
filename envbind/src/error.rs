use std::fmt;

use crate::{aggregate::BindingReport, value::TypeTag};

/// A candidate value that was absent or blank. Coercion is not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing environment variable")]
    Missing,
    #[error("Cannot be blank")]
    Blank,
}

/// A present value that could not be converted into the field's type.
///
/// None of the messages carry the raw input, so they are safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CoercionError {
    #[error("Failed to coerce type to \"{target}\": cannot bind null to non-nullable type")]
    NullToNonNullable { target: TypeTag },
    #[error("Failed to coerce type to \"{target}\": expected 'true' or 'false' (case-insensitive)")]
    InvalidBool { target: TypeTag },
    #[error("Failed to coerce type to \"{target}\": invalid numeric format")]
    Numeric { target: TypeTag },
    #[error("Failed to coerce type to \"{target}\": length must be 1, found length {len}")]
    CharLength { target: TypeTag, len: usize },
    #[error("Failed to coerce type to \"{target}\": unsupported type")]
    Unsupported { target: TypeTag },
}

/// Why a single candidate key did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

impl CandidateError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_coercion(&self) -> bool {
        matches!(self, Self::Coercion(_))
    }
}

/// The target type cannot be bound, whatever the environment holds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeConfigurationError {
    #[error(
        "`{type_name}`: all fields must carry binding annotations ({bound} of {total} are bound)"
    )]
    UnboundFields {
        type_name: &'static str,
        bound: usize,
        total: usize,
    },
    #[error("`{type_name}.{field}`: binding declares no candidate keys")]
    EmptyCandidateKeys {
        type_name: &'static str,
        field: &'static str,
    },
    #[error(
        "`{type_name}`: no suitable constructor, expected a constructor taking every bound field in order or a no-argument constructor"
    )]
    NoSuitableConstructor { type_name: &'static str },
    #[error("`{type_name}.{field}`: cannot assign to an immutable field after construction")]
    ImmutableField {
        type_name: &'static str,
        field: &'static str,
    },
    #[error("`{field}`: expected a value of type \"{expected}\", found {found}")]
    ValueMismatch {
        field: &'static str,
        expected: TypeTag,
        found: &'static str,
    },
    #[error("`{field}`: constructor ran out of resolved values")]
    MissingArgument { field: &'static str },
    #[error("`{type_name}`: field index {index} is not assignable")]
    UnknownField { type_name: &'static str, index: usize },
}

/// One or more required fields could not be resolved from the environment.
///
/// The message lists every failing field and, under it, each key that was
/// tried with the reason it was rejected. Values are never included.
///
/// ```text
/// failed to bind environment for type `Config`:
///   field `database_url`:
///     "DATABASE_URL": Missing environment variable
///     "DB_URL": Cannot be blank
///   field `port`:
///     "PORT": Failed to coerce type to "u16": invalid numeric format
/// ```
#[derive(Debug)]
pub struct InvalidEnvironmentError {
    type_name: &'static str,
    report: BindingReport,
}

impl InvalidEnvironmentError {
    pub(crate) fn new(type_name: &'static str, report: BindingReport) -> Self {
        Self { type_name, report }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn report(&self) -> &BindingReport {
        &self.report
    }
}

impl fmt::Display for InvalidEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report.render(self.type_name, f)
    }
}

impl std::error::Error for InvalidEnvironmentError {}

/// Everything that can go wrong while loading a type.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    InvalidEnvironment(#[from] InvalidEnvironmentError),
    #[error(transparent)]
    TypeConfiguration(#[from] TypeConfigurationError),
}

impl LoadError {
    pub fn as_invalid_environment(&self) -> Option<&InvalidEnvironmentError> {
        match self {
            Self::InvalidEnvironment(err) => Some(err),
            Self::TypeConfiguration(_) => None,
        }
    }

    pub fn as_type_configuration(&self) -> Option<&TypeConfigurationError> {
        match self {
            Self::TypeConfiguration(err) => Some(err),
            Self::InvalidEnvironment(_) => None,
        }
    }
}
