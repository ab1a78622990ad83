//! Sort and filter engines for record collections.
//!
//! Both engines hold only their own state (the active sort, the filter
//! text). The collection stays with the caller and is passed to the derived
//! views, which return references into it in display order.
//!
//! - [`sort`]: three-state single-column sort
//! - [`filter`]: case-insensitive substring filter across fields
//! - [`table`]: filter-then-sort composition with columns and paging

pub mod filter;
pub mod sort;
pub mod table;

pub use filter::{FilterEngine, matches_query};
pub use sort::{SortConfig, SortDirection, SortEngine, sort_records};
pub use table::{Column, DEFAULT_PAGE_SIZE, DataTable, TableView};
