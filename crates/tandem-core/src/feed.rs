//! ============================================================================
//! Focus Feed - Single-card candidate browsing
//! ============================================================================
//! One candidate at a time over a fixed pool; advancing wraps around
//! forever, so the feed never runs out. A detail overlay can open over the
//! current card, and while it is up advancing is ignored so the sheet
//! always describes the candidate on screen.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{TandemError, UserProfile};

/// Cyclic cursor over the candidate pool plus the detail-overlay flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusFeed {
    candidates: Vec<UserProfile>,
    position: usize,
    detail_open: bool,
}

impl FocusFeed {
    /// Build a feed over a non-empty candidate pool
    pub fn new(candidates: Vec<UserProfile>) -> Result<Self, TandemError> {
        if candidates.is_empty() {
            return Err(TandemError::EmptyDirectory);
        }
        Ok(Self {
            candidates,
            position: 0,
            detail_open: false,
        })
    }

    /// The candidate currently on screen
    pub fn current(&self) -> &UserProfile {
        &self.candidates[self.position]
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the detail overlay is showing
    pub fn detail_open(&self) -> bool {
        self.detail_open
    }

    /// Move to the next candidate, wrapping at the end of the pool.
    /// Ignored while the detail overlay is open.
    pub fn advance(&mut self) -> &UserProfile {
        if self.detail_open {
            debug!("advance ignored while detail overlay is open");
            return self.current();
        }
        self.position = (self.position + 1) % self.candidates.len();
        self.current()
    }

    /// Show the detail overlay for the current candidate (idempotent)
    pub fn open_detail(&mut self) {
        self.detail_open = true;
    }

    /// Hide the detail overlay (idempotent)
    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HabitCategory, SCHEDULE_DAYS};

    fn profile(id: &str) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: format!("Partner {}", id),
            age: 30,
            photo_url: String::new(),
            habit: HabitCategory::Running,
            bio: "Looking for a partner.".to_string(),
            schedule: [true; SCHEDULE_DAYS],
            streak: 1,
            ghost_score: 90,
            location: "Anywhere".to_string(),
            integrations: Vec::new(),
        }
    }

    fn pool(n: usize) -> Vec<UserProfile> {
        (0..n).map(|i| profile(&format!("u{}", i))).collect()
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(
            FocusFeed::new(Vec::new()),
            Err(TandemError::EmptyDirectory)
        ));
    }

    #[test]
    fn test_advance_wraps_to_start() {
        let mut feed = FocusFeed::new(pool(4)).unwrap();
        assert_eq!(feed.position(), 0);

        for expected in [1, 2, 3, 0] {
            feed.advance();
            assert_eq!(feed.position(), expected);
        }
        assert_eq!(feed.current().id, "u0");
    }

    #[test]
    fn test_single_candidate_stays_put() {
        let mut feed = FocusFeed::new(pool(1)).unwrap();
        for _ in 0..3 {
            assert_eq!(feed.advance().id, "u0");
        }
        assert_eq!(feed.position(), 0);
    }

    #[test]
    fn test_detail_toggle_idempotent() {
        let mut feed = FocusFeed::new(pool(2)).unwrap();
        assert!(!feed.detail_open());

        feed.open_detail();
        feed.open_detail();
        assert!(feed.detail_open());

        feed.close_detail();
        feed.close_detail();
        assert!(!feed.detail_open());
    }

    #[test]
    fn test_advance_ignored_while_detail_open() {
        let mut feed = FocusFeed::new(pool(3)).unwrap();
        feed.advance();
        assert_eq!(feed.position(), 1);

        feed.open_detail();
        feed.advance();
        feed.advance();
        assert_eq!(feed.position(), 1, "card changed under the overlay");

        feed.close_detail();
        feed.advance();
        assert_eq!(feed.position(), 2);
    }
}
