use std::time::Duration;
use tokio::time::Instant;

/// How long a transient message stays visible.
pub const ADVISORY_TTL: Duration = Duration::from_secs(3);

/// A short-lived, non-fatal message (share failures, source rejections).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub message: String,
    expires_at: Instant,
}

impl Advisory {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + ADVISORY_TTL,
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Holds at most one advisory; a newer one replaces the old.
#[derive(Debug, Default)]
pub struct AdvisorySlot {
    current: Option<Advisory>,
}

impl AdvisorySlot {
    pub fn post(&mut self, message: impl Into<String>) {
        self.current = Some(Advisory::new(message));
    }

    /// The live message, dropping it once expired.
    pub fn current(&mut self) -> Option<&str> {
        if self.current.as_ref().is_some_and(Advisory::is_expired) {
            self.current = None;
        }
        self.current.as_ref().map(|a| a.message.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
