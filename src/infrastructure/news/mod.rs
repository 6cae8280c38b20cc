use crate::domain::ports::NewsFeed;
use std::sync::atomic::{AtomicUsize, Ordering};

const HEADLINES: &[&str] = &[
    "HAYQ staking rewards distributed for the current epoch",
    "Community vote open: treasury buyback proposal",
    "HAYQ dividend snapshot scheduled for the end of the week",
    "Economic growth report published on the dashboard",
    "New liquidity pool live for HAYQ pairs",
];

/// Rotating set of canned headlines.
///
/// Placeholder for a real feed; anything implementing [`NewsFeed`] can
/// replace it without touching the news loop.
pub struct RotatingNewsFeed {
    cursor: AtomicUsize,
}

impl RotatingNewsFeed {
    pub fn new() -> Self {
        Self {
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Default for RotatingNewsFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsFeed for RotatingNewsFeed {
    fn next_headline(&self) -> String {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed) % HEADLINES.len();
        HEADLINES[i].to_string()
    }
}
