/// Configuration for paginated requests
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub max_pages: Option<usize>,
}

impl PaginationConfig {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}
