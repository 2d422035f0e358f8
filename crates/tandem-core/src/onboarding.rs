//! ============================================================================
//! Onboarding Flow - Three-step profile creation wizard
//! ============================================================================
//! Linear and forward-only: habit choice, weekly availability, then the
//! pitch with its integrations. The flow owns the draft and enforces the
//! two rules that matter:
//! - step 1 cannot be left without a habit selected
//! - at most one polish request is outstanding at a time
//!
//! Draft setters are not gated by step; only advancement is. Steps 2 and 3
//! accept any draft state, including an empty schedule and an empty pitch.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::types::{HabitCategory, OnboardingDraft, OwnProfile, TandemError, SCHEDULE_DAYS};

/// Steps of the onboarding wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Pick the habit to build
    Habit,
    /// Mark weekly availability
    Schedule,
    /// Write the pitch and connect integrations
    Pitch,
    /// Terminal; the draft is ready to materialize
    Complete,
}

impl OnboardingStep {
    /// 1-based position for the progress header (Complete stays at 3)
    pub fn number(&self) -> usize {
        match self {
            OnboardingStep::Habit => 1,
            OnboardingStep::Schedule => 2,
            OnboardingStep::Pitch | OnboardingStep::Complete => 3,
        }
    }

    /// Prompt shown at the top of the step
    pub fn title(&self) -> &'static str {
        match self {
            OnboardingStep::Habit => "What habit are you building?",
            OnboardingStep::Schedule => "When are you available?",
            OnboardingStep::Pitch => "Your Pitch",
            OnboardingStep::Complete => "Profile complete",
        }
    }
}

/// Snapshot handed to the gateway when a polish request begins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolishRequest {
    pub text: String,
    pub habit_label: String,
}

/// Forward-only controller for the three onboarding steps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    draft: OnboardingDraft,
    polish_pending: bool,
}

impl OnboardingFlow {
    /// Start a fresh flow at step 1 with an empty draft
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Habit,
            draft: OnboardingDraft::default(),
            polish_pending: false,
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    pub fn draft(&self) -> &OnboardingDraft {
        &self.draft
    }

    /// Record the habit choice (step 1). Re-selection overwrites.
    pub fn select_habit(&mut self, habit: HabitCategory) {
        debug!("habit selected: {}", habit);
        self.draft.habit = Some(habit);
    }

    /// Flip one availability slot (step 2); returns the new value
    pub fn toggle_day(&mut self, day: usize) -> Result<bool, TandemError> {
        if day >= SCHEDULE_DAYS {
            return Err(TandemError::DayOutOfRange(day));
        }
        self.draft.availability[day] = !self.draft.availability[day];
        Ok(self.draft.availability[day])
    }

    /// Replace the pitch text (step 3)
    pub fn set_bio(&mut self, bio: impl Into<String>) {
        self.draft.bio = bio.into();
    }

    /// Toggle an integration connection; returns true when now connected
    pub fn toggle_integration(&mut self, id: &str) -> bool {
        if self.draft.integrations.remove(id) {
            false
        } else {
            self.draft.integrations.insert(id.to_string());
            true
        }
    }

    /// Whether the polish control should be enabled
    pub fn can_polish(&self) -> bool {
        !self.draft.bio.trim().is_empty() && !self.polish_pending
    }

    /// Whether a polish request is outstanding
    pub fn polish_pending(&self) -> bool {
        self.polish_pending
    }

    /// Reserve the single polish slot and snapshot the request payload.
    ///
    /// Fails while a request is outstanding, when the pitch is empty, or
    /// when no habit has been selected yet. The caller sends the snapshot
    /// to the gateway and stores the outcome with [`finish_polish`].
    ///
    /// [`finish_polish`]: OnboardingFlow::finish_polish
    pub fn begin_polish(&mut self) -> Result<PolishRequest, TandemError> {
        if self.polish_pending {
            return Err(TandemError::PolishInFlight);
        }
        if self.draft.bio.trim().is_empty() {
            return Err(TandemError::EmptyBio);
        }
        let habit = self.draft.habit.ok_or(TandemError::HabitNotSelected)?;

        self.polish_pending = true;
        info!("polish request started for {} pitch", habit.label());

        Ok(PolishRequest {
            text: self.draft.bio.clone(),
            habit_label: habit.label().to_string(),
        })
    }

    /// Store the polished pitch and release the polish slot.
    ///
    /// Also the path for a failed call: the gateway hands back the original
    /// text, so storing it is a no-op on the draft.
    pub fn finish_polish(&mut self, text: impl Into<String>) {
        self.draft.bio = text.into();
        self.polish_pending = false;
    }

    /// Whether the current step allows moving forward
    pub fn can_advance(&self) -> bool {
        match self.step {
            OnboardingStep::Habit => self.draft.habit.is_some(),
            OnboardingStep::Schedule | OnboardingStep::Pitch => true,
            OnboardingStep::Complete => false,
        }
    }

    /// Move to the next step and return it.
    ///
    /// Step 1 requires a habit; steps 2 and 3 advance unconditionally.
    /// Advancing past [`OnboardingStep::Complete`] is an error.
    pub fn advance(&mut self) -> Result<OnboardingStep, TandemError> {
        self.step = match self.step {
            OnboardingStep::Habit => {
                if self.draft.habit.is_none() {
                    return Err(TandemError::HabitNotSelected);
                }
                OnboardingStep::Schedule
            }
            OnboardingStep::Schedule => OnboardingStep::Pitch,
            OnboardingStep::Pitch => {
                info!("onboarding draft complete");
                OnboardingStep::Complete
            }
            OnboardingStep::Complete => return Err(TandemError::OnboardingComplete),
        };
        Ok(self.step)
    }

    /// The materialized profile, present only once the flow is terminal
    pub fn completed(&self) -> Option<OwnProfile> {
        if self.step != OnboardingStep::Complete {
            return None;
        }
        let habit = self.draft.habit?;
        Some(OwnProfile {
            habit,
            availability: self.draft.availability,
            pitch: self.draft.bio.clone(),
            integrations: self.draft.integrations.clone(),
        })
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}
