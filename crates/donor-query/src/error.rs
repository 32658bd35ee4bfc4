use std::fmt;

use crate::operator::Operator;

/// Operator/value mismatches reported by [`Filter::validate`](crate::Filter::validate).
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    MissingValue { field: String, operator: Operator },
    NonNumericValue { field: String, operator: Operator, value: String },
    MalformedRange { field: String, value: String },
    EmptyList { field: String, operator: Operator },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::MissingValue { field, operator } => {
                write!(f, "{field}: operator {operator} requires a value")
            }
            FilterError::NonNumericValue {
                field,
                operator,
                value,
            } => write!(f, "{field}: operator {operator} needs a number, got {value:?}"),
            FilterError::MalformedRange { field, value } => {
                write!(f, "{field}: expected a range like \"10,20\", got {value:?}")
            }
            FilterError::EmptyList { field, operator } => {
                write!(f, "{field}: operator {operator} needs at least one list item")
            }
        }
    }
}

impl std::error::Error for FilterError {}
