use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep_until};

/// Spaces out request starts so concurrent fetches do not burst the API
pub struct RateLimiter {
    delay: Duration,
    next_slot: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            next_slot: Mutex::new(None),
        }
    }

    pub async fn wait(&self) {
        if let Some(slot) = self.reserve_slot().await {
            sleep_until(slot).await;
        }
    }

    /// Claims the next free slot; `None` means the caller may go right away
    async fn reserve_slot(&self) -> Option<Instant> {
        let mut next = self.next_slot.lock().await;
        let now = Instant::now();
        let slot = match *next {
            Some(t) if t > now => t,
            _ => now,
        };
        *next = Some(slot + self.delay);
        (slot > now).then_some(slot)
    }
}
