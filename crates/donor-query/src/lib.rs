mod error;
mod field;
mod filter;
mod filter_set;
mod operator;
mod sort;
mod value;

pub use error::FilterError;
pub use field::{FIELD_LABELS, field_label, is_known_field};
pub use filter::{Filter, FilterGroup, FilterId, FilterNode, LogicalOp, format_label};
pub use filter_set::FilterSet;
pub use operator::Operator;
pub use sort::{SortConfig, SortDirection, SortState, compare_values, sort_records};
pub use value::{FieldValue, Record, parse_number};
