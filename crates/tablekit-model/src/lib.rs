//! Record model shared by the tablekit engines.
//!
//! The sort, filter, and form engines never assume a concrete record shape.
//! They read fields through the [`Record`] trait and coerce what they read
//! through [`FieldValue`].
//!
//! # Module Organization
//!
//! - [`value`]: `FieldValue`, string coercion, and the sort comparator
//! - [`record`]: the `Record` trait and the map-backed `Row`

pub mod record;
pub mod value;

pub use record::{Record, Row};
pub use value::{FieldValue, compare_values, format_numeric, parse_f64};
