use std::time::Duration;
use tokio::time::Instant;

/// Transient "copied" indicator
///
/// Each trigger restarts the window; the indicator has no effect on the
/// prompt itself.
#[derive(Debug, Clone)]
pub struct CopyFeedback {
    window: Duration,
    until: Option<Instant>,
}

impl CopyFeedback {
    pub fn new(window: Duration) -> Self {
        Self { window, until: None }
    }

    pub fn trigger(&mut self) {
        self.until = Some(Instant::now() + self.window);
    }

    pub fn is_active(&self) -> bool {
        self.until.map_or(false, |until| Instant::now() < until)
    }

    /// Resolves when the current window ends; pending while idle
    pub async fn expired(&mut self) {
        match self.until {
            Some(until) => {
                tokio::time::sleep_until(until).await;
                self.until = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
