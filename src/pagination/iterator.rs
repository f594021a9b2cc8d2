use super::config::PaginationConfig;

/// Iterator for paginated requests
pub struct PageIterator {
    current_page: usize,
    config: PaginationConfig,
}

impl PageIterator {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            current_page: 1,
            config,
        }
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_reached_max(&self) -> bool {
        self.config.max_pages.is_some_and(|max| self.current_page > max)
    }

    /// A page with fewer records than requested is the last one
    pub fn is_last_page(&self, records_on_page: usize) -> bool {
        records_on_page < self.config.page_size
    }

    pub fn advance(&mut self) {
        self.current_page += 1;
    }
}
