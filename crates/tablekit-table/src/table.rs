//! Composed table view: filter, then sort, then page.
//!
//! [`DataTable`] owns one [`FilterEngine`] and one [`SortEngine`] and applies
//! them to the same base collection. Filtering and sorting stay independent:
//! changing the sort never changes which records match, and changing the
//! filter never changes the sort state.

use serde::Serialize;
use tablekit_model::Record;

use crate::filter::FilterEngine;
use crate::sort::{SortConfig, SortDirection, SortEngine};

/// Rows per page when paging is enabled without an explicit size.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Column metadata for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Record field the column reads.
    pub key: String,
    /// Header text.
    pub label: String,
    /// Whether clicking the header may sort by this column.
    pub sortable: bool,
    /// Whether the free-text filter inspects this column.
    pub searchable: bool,
}

impl Column {
    /// A sortable, searchable column whose label is its key.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            label: key.clone(),
            key,
            sortable: true,
            searchable: true,
        }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }
}

/// Summary of the current table state against a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Records in the base collection.
    pub total: usize,
    /// Records passing the filter.
    pub matched: usize,
    /// Zero-based current page.
    pub page: usize,
    pub page_count: usize,
    pub sort: Option<SortConfig>,
    pub filter_text: String,
}

/// Filter + sort + pagination over a caller-owned collection.
///
/// Columns declared with `sortable(false)` ignore
/// [`request_sort`](Self::request_sort); any other key sorts, and a key that
/// names no record field sorts every record as missing, keeping input order.
/// When columns are declared only searchable columns are inspected by the
/// filter, otherwise every field is searched.
#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    sort: SortEngine,
    filter: FilterEngine,
    page: usize,
    page_size: Option<usize>,
}

impl Default for DataTable {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl DataTable {
    /// Create a table over the given columns, paged at [`DEFAULT_PAGE_SIZE`].
    pub fn new(columns: Vec<Column>) -> Self {
        let mut filter = FilterEngine::new();
        if !columns.is_empty() {
            filter.set_fields(Some(
                columns
                    .iter()
                    .filter(|column| column.searchable)
                    .map(|column| column.key.clone())
                    .collect(),
            ));
        }
        Self {
            columns,
            sort: SortEngine::new(),
            filter,
            page: 0,
            page_size: Some(DEFAULT_PAGE_SIZE),
        }
    }

    /// Set the table-wide sortable flag.
    #[must_use]
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sort.set_sortable(sortable);
        self
    }

    /// Set rows per page; `None` shows every row on one page.
    ///
    /// A page size of zero is treated as `None`.
    #[must_use]
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.set_page_size(page_size);
        self
    }

    pub fn set_page_size(&mut self, page_size: Option<usize>) {
        self.page_size = page_size.filter(|size| *size > 0);
        self.page = 0;
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.key == key)
    }

    pub fn sort_engine(&self) -> &SortEngine {
        &self.sort
    }

    pub fn filter_engine(&self) -> &FilterEngine {
        &self.filter
    }

    pub fn sort_config(&self) -> Option<&SortConfig> {
        self.sort.sort_config()
    }

    pub fn filter_text(&self) -> &str {
        self.filter.filter_text()
    }

    /// Advance the sort cycle for `key`.
    ///
    /// Ignored for declared non-sortable columns.
    pub fn request_sort(&mut self, key: &str) -> Option<&SortConfig> {
        if self.column(key).is_some_and(|column| !column.sortable) {
            tracing::debug!(key, "column is not sortable");
            return self.sort.sort_config();
        }
        self.sort.request_sort(key)
    }

    /// Set the filter text and return to the first page.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        self.filter.set_filter_text(text);
        self.page = 0;
    }

    /// Header text for a column, with the sort arrow when it is active.
    pub fn header_label(&self, column: &Column) -> String {
        match self.sort.direction_for(&column.key) {
            Some(direction) => format!("{} {}", column.label, direction.indicator()),
            None => column.label.clone(),
        }
    }

    /// Direction of the active sort on `key`, if any.
    pub fn direction_for(&self, key: &str) -> Option<SortDirection> {
        self.sort.direction_for(key)
    }

    /// Every matching record in display order (filter, then sort).
    pub fn rows<'a, R: Record>(&self, data: &'a [R]) -> Vec<&'a R> {
        self.sort.sort_view(self.filter.filtered(data))
    }

    /// Number of pages for `matched` rows. Always at least one.
    pub fn page_count(&self, matched: usize) -> usize {
        match self.page_size {
            Some(size) => matched.div_ceil(size).max(1),
            None => 1,
        }
    }

    /// Zero-based current page.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Move to `page`, clamped to the last page for `matched` rows.
    pub fn set_page(&mut self, page: usize, matched: usize) {
        self.page = page.min(self.page_count(matched) - 1);
    }

    /// The current page of [`rows`](Self::rows).
    pub fn page_rows<'a, R: Record>(&self, data: &'a [R]) -> Vec<&'a R> {
        let rows = self.rows(data);
        let Some(size) = self.page_size else {
            return rows;
        };
        rows.into_iter().skip(self.page * size).take(size).collect()
    }

    /// Summarize the table state against `data`.
    pub fn view<R: Record>(&self, data: &[R]) -> TableView {
        let matched = self.filter.filtered(data).len();
        TableView {
            total: data.len(),
            matched,
            page: self.page,
            page_count: self.page_count(matched),
            sort: self.sort.sort_config().cloned(),
            filter_text: self.filter.filter_text().to_string(),
        }
    }
}
