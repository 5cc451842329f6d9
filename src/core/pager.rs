//! Sequential paging over the raw rows of a dataset

use crate::core::types::{Dataset, TripRecord};

#[derive(Debug, Clone)]
pub(crate) struct RowPager {
    offset: usize,
    page_size: usize,
}

impl RowPager {
    pub(crate) fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    /// Offset of the first row the next call will return
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    /// Next unviewed rows; empty once everything has been shown
    pub(crate) fn next_page<'a>(&mut self, dataset: &'a Dataset) -> &'a [TripRecord] {
        let page = dataset.page(self.offset, self.page_size);
        self.offset += page.len();
        page
    }

    pub(crate) fn is_exhausted(&self, dataset: &Dataset) -> bool {
        self.offset >= dataset.len()
    }
}
