use log::info;

/// Track progress of per-match live-score fetching
pub struct FetchProgress {
    total: usize,
    analyzed: usize,
    without_data: usize,
    failed: usize,
}

impl FetchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            analyzed: 0,
            without_data: 0,
            failed: 0,
        }
    }

    pub fn increment_analyzed(&mut self) {
        self.analyzed += 1;
        self.log_progress();
    }

    pub fn increment_without_data(&mut self) {
        self.without_data += 1;
        self.log_progress();
    }

    pub fn increment_failed(&mut self) {
        self.failed += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.analyzed + self.without_data + self.failed
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Live scoring: {}/{} ({} analyzed, {} without data, {} failed)",
                current, self.total, self.analyzed, self.without_data, self.failed
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 10 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
