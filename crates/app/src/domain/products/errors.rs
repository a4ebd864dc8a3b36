//! Products errors.

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
};

use smallvec::SmallVec;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

/// A single rejected product field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Blank, non-positive or otherwise unusable value.
    #[error("invalid '{0}' field")]
    Invalid(&'static str),

    /// Text that does not parse as a decimal.
    #[error("'{0}' field should be a decimal")]
    NotDecimal(&'static str),

    /// Value longer than the column allows.
    #[error("'{field}' field must be at most {max} characters")]
    TooLong {
        /// Field name.
        field: &'static str,
        /// Longest accepted length.
        max: usize,
    },

    /// Value with more decimal places than are stored.
    #[error("'{field}' field must have at most {places} decimal places")]
    TooManyDecimalPlaces {
        /// Field name.
        field: &'static str,
        /// Decimal places kept.
        places: u32,
    },

    /// Value above the stored precision.
    #[error("'{field}' field must not be greater than {max}")]
    TooLarge {
        /// Field name.
        field: &'static str,
        /// Largest accepted value.
        max: &'static str,
    },
}

impl FieldError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match *self {
            Self::Invalid(field)
            | Self::NotDecimal(field)
            | Self::TooLong { field, .. }
            | Self::TooManyDecimalPlaces { field, .. }
            | Self::TooLarge { field, .. } => field,
        }
    }
}

/// Every field rejected while validating a product payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    errors: SmallVec<[FieldError; 2]>,
}

impl ValidationError {
    /// The individual field errors, in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Names of the offending fields.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(FieldError::field)
    }

    /// Whether no field was rejected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl FromIterator<FieldError> for ValidationError {
    fn from_iter<I: IntoIterator<Item = FieldError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl From<FieldError> for ValidationError {
    fn from(error: FieldError) -> Self {
        Self::from_iter([error])
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }

            Display::fmt(error, f)?;
        }

        Ok(())
    }
}

impl StdError for ValidationError {}

/// Products repository failure. Absent records are not errors.
#[derive(Debug, Error)]
pub enum ProductsRepositoryError {
    /// A not-null constraint rejected the write.
    #[error("missing required data")]
    MissingRequiredData,

    /// A check constraint rejected the write.
    #[error("invalid data")]
    InvalidData,

    /// Any other database failure.
    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for ProductsRepositoryError {
    fn from(error: Error) -> Self {
        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::NotNullViolation) => Self::MissingRequiredData,
            Some(ErrorKind::CheckViolation) => Self::InvalidData,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}
