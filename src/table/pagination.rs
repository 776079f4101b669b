use tracing::warn;

use crate::error::{TableError, TableResult};

/// One page cut from a derived row sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub rows: Vec<T>,
    pub total_pages: usize,
    /// The requested index, clamped into `0..total_pages` (0 when empty)
    pub page_index: usize,
}

pub fn total_pages(row_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    row_count.div_ceil(page_size)
}

pub fn clamp_page_index(page_index: usize, row_count: usize, page_size: usize) -> usize {
    page_index.min(total_pages(row_count, page_size).saturating_sub(1))
}

/// Slice `rows` into the page at `page_index`, clamping out-of-range indices
pub fn paginate<T: Clone>(rows: &[T], page_index: usize, page_size: usize) -> Page<T> {
    let total = total_pages(rows.len(), page_size);
    let page_index = clamp_page_index(page_index, rows.len(), page_size);
    let start = (page_index * page_size).min(rows.len());
    let end = (start + page_size).min(rows.len());
    Page {
        rows: rows[start..end].to_vec(),
        total_pages: total,
        page_index,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    page_index: usize,
    page_size: usize,
}

impl PaginationState {
    pub fn new(page_size: usize) -> TableResult<Self> {
        if page_size == 0 {
            return Err(TableError::InvalidPageSize);
        }
        Ok(Self {
            page_index: 0,
            page_size,
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn with_page_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// Changing the size returns to the first page; a size of 0 is ignored
    pub fn with_page_size(self, page_size: usize) -> Self {
        if page_size == 0 {
            warn!(target: "pagination", "ignoring page size 0");
            return self;
        }
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Pull the index back inside the pages available for `row_count` rows
    pub fn clamped(self, row_count: usize) -> Self {
        Self {
            page_index: clamp_page_index(self.page_index, row_count, self.page_size),
            ..self
        }
    }

    pub fn info(&self, row_count: usize) -> PageInfo {
        PageInfo::new(self.page_index, self.page_size, row_count)
    }
}

/// Footer text data: "Showing 11-20 of 23"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    /// 1-based first row on the page, 0 when there are no rows
    pub first_row: usize,
    /// 1-based last row on the page, 0 when there are no rows
    pub last_row: usize,
}

impl PageInfo {
    pub fn new(page_index: usize, page_size: usize, total_rows: usize) -> Self {
        let page_index = clamp_page_index(page_index, total_rows, page_size);
        let (first_row, last_row) = if total_rows == 0 {
            (0, 0)
        } else {
            let start = page_index * page_size;
            (start + 1, (start + page_size).min(total_rows))
        };
        Self {
            page_index,
            page_size,
            total_pages: total_pages(total_rows, page_size),
            total_rows,
            first_row,
            last_row,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.total_pages
    }
}
