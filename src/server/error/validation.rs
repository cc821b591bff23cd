use thiserror::Error;

use crate::model::economy::FieldErrorDto;

/// A single violated economy configuration invariant.
///
/// Field names are the camelCase names used by the dashboard.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvalidRange {
        min_field: &'static str,
        max_field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} ({value}) is out of range")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        /// `None` when the range is unbounded above.
        max: Option<f64>,
    },

    #[error("{field} ({value}) must not be negative")]
    Negative { field: &'static str, value: i64 },
}

impl ValidationError {
    pub fn into_dto(self) -> FieldErrorDto {
        match self {
            Self::InvalidRange {
                min_field,
                max_field,
                min,
                max,
            } => FieldErrorDto::InvalidRange {
                min_field: min_field.to_string(),
                max_field: max_field.to_string(),
                min,
                max,
            },
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => FieldErrorDto::OutOfRange {
                field: field.to_string(),
                // NaN is not representable in JSON
                value: if value.is_nan() { 0.0 } else { value },
                min,
                max,
            },
            Self::Negative { field, value } => FieldErrorDto::Negative {
                field: field.to_string(),
                value,
            },
        }
    }
}
