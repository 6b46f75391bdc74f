//! Commit-time source for server timestamps

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Hands out strictly increasing commit times
///
/// Two writes never share a timestamp, so ordering by a server timestamp
/// always follows commit order.
#[derive(Debug, Default)]
pub struct ServerClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl ServerClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> DateTime<Utc> {
        let mut last = self.last.lock();
        let mut now = Utc::now();
        if let Some(previous) = *last {
            if now <= previous {
                now = previous + Duration::nanoseconds(1);
            }
        }
        *last = Some(now);
        now
    }
}
