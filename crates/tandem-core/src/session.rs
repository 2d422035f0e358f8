//! ============================================================================
//! Session - Top-level view state
//! ============================================================================
//! Exactly one view is active at a time: the onboarding wizard or the focus
//! feed. The session owns that value, performs the single onboarding-to-feed
//! transition, and keeps the materialized own profile around for
//! compatibility reads. There is no ambient or global state.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog;
use crate::feed::FocusFeed;
use crate::onboarding::{OnboardingFlow, OnboardingStep};
use crate::types::{OwnProfile, TandemError};

/// The two top-level views of the app
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppView {
    /// Profile creation wizard
    Onboarding(OnboardingFlow),
    /// Candidate browsing
    Feed(FocusFeed),
}

/// Single owner of the view state for one user session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    view: AppView,
    own_profile: Option<OwnProfile>,
}

impl Session {
    /// Start a fresh session at onboarding step 1
    pub fn new() -> Self {
        Self {
            view: AppView::Onboarding(OnboardingFlow::new()),
            own_profile: None,
        }
    }

    pub fn view(&self) -> &AppView {
        &self.view
    }

    /// The onboarding flow, while that view is active
    pub fn onboarding(&self) -> Option<&OnboardingFlow> {
        match &self.view {
            AppView::Onboarding(flow) => Some(flow),
            AppView::Feed(_) => None,
        }
    }

    pub fn onboarding_mut(&mut self) -> Option<&mut OnboardingFlow> {
        match &mut self.view {
            AppView::Onboarding(flow) => Some(flow),
            AppView::Feed(_) => None,
        }
    }

    /// The focus feed, once onboarding is done
    pub fn feed(&self) -> Option<&FocusFeed> {
        match &self.view {
            AppView::Feed(feed) => Some(feed),
            AppView::Onboarding(_) => None,
        }
    }

    pub fn feed_mut(&mut self) -> Option<&mut FocusFeed> {
        match &mut self.view {
            AppView::Feed(feed) => Some(feed),
            AppView::Onboarding(_) => None,
        }
    }

    /// Profile materialized from the completed onboarding, if any
    pub fn own_profile(&self) -> Option<&OwnProfile> {
        self.own_profile.as_ref()
    }

    /// Advance the wizard. On completion, materialize the draft into the
    /// own profile and swap the view to a feed over the full directory.
    /// The directory itself is never modified.
    pub fn advance_onboarding(&mut self) -> Result<OnboardingStep, TandemError> {
        let flow = match &mut self.view {
            AppView::Onboarding(flow) => flow,
            AppView::Feed(_) => return Err(TandemError::OnboardingComplete),
        };

        let step = flow.advance()?;
        if step == OnboardingStep::Complete {
            let profile = flow.completed();
            let feed = FocusFeed::new(catalog::candidates().to_vec())?;
            info!("onboarding finished, entering feed with {} candidates", feed.len());
            self.own_profile = profile;
            self.view = AppView::Feed(feed);
        }
        Ok(step)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HabitCategory;

    fn completed_session() -> Session {
        let mut session = Session::new();
        session
            .onboarding_mut()
            .unwrap()
            .select_habit(HabitCategory::Running);
        session.advance_onboarding().unwrap();
        session.advance_onboarding().unwrap();
        session.advance_onboarding().unwrap();
        session
    }

    #[test]
    fn test_new_session_starts_onboarding() {
        let mut session = Session::new();
        assert!(matches!(session.view(), AppView::Onboarding(_)));
        assert_eq!(
            session.onboarding().unwrap().step(),
            OnboardingStep::Habit
        );
        assert!(session.feed().is_none());
        assert!(session.feed_mut().is_none());
        assert!(session.own_profile().is_none());
    }

    #[test]
    fn test_completion_swaps_to_feed() {
        let session = completed_session();
        assert!(matches!(session.view(), AppView::Feed(_)));
        assert!(session.onboarding().is_none());

        let feed = session.feed().unwrap();
        assert_eq!(feed.len(), catalog::candidates().len());
        assert_eq!(feed.position(), 0);

        let own = session.own_profile().unwrap();
        assert_eq!(own.habit, HabitCategory::Running);
    }

    #[test]
    fn test_own_profile_records_draft() {
        let mut session = Session::new();
        {
            let flow = session.onboarding_mut().unwrap();
            flow.select_habit(HabitCategory::Hiking);
            flow.toggle_day(5).unwrap();
            flow.set_bio("Rain or shine.");
            flow.toggle_integration("alltrails");
        }
        for _ in 0..3 {
            session.advance_onboarding().unwrap();
        }

        let own = session.own_profile().unwrap();
        assert_eq!(own.habit, HabitCategory::Hiking);
        assert!(own.availability[5]);
        assert_eq!(own.pitch, "Rain or shine.");
        assert!(own.integrations.contains("alltrails"));
    }

    #[test]
    fn test_advance_after_completion_fails() {
        let mut session = completed_session();
        assert!(matches!(
            session.advance_onboarding(),
            Err(TandemError::OnboardingComplete)
        ));
        // The feed is untouched by the failed call
        assert_eq!(session.feed().unwrap().position(), 0);
    }

    #[test]
    fn test_habit_gate_holds_through_session() {
        let mut session = Session::new();
        assert!(matches!(
            session.advance_onboarding(),
            Err(TandemError::HabitNotSelected)
        ));
        assert!(matches!(session.view(), AppView::Onboarding(_)));
    }
}
