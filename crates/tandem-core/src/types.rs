//! ============================================================================
//! Core Types for Tandem
//! ============================================================================
//! Data structures for habit categories, candidate profiles, the onboarding
//! draft, and the materialized own profile. These types are serialized to
//! JSON for the presentation layer.
//! ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of slots in a weekly availability schedule (index 0 = Monday)
pub const SCHEDULE_DAYS: usize = 7;

/// Icon token for habits without a dedicated icon
pub const DEFAULT_HABIT_ICON: &str = "activity";

/// The fixed set of habits Tandem matches people on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HabitCategory {
    Running,
    Reading,
    Meditation,
    Coding,
    Hiking,
    Writing,
    Lifting,
    Yoga,
}

impl HabitCategory {
    /// Get the display label for this habit
    pub fn label(&self) -> &'static str {
        match self {
            HabitCategory::Running => "Running",
            HabitCategory::Reading => "Reading",
            HabitCategory::Meditation => "Meditation",
            HabitCategory::Coding => "Coding",
            HabitCategory::Hiking => "Hiking",
            HabitCategory::Writing => "Writing",
            HabitCategory::Lifting => "Lifting",
            HabitCategory::Yoga => "Yoga",
        }
    }

    /// Icon token for the presentation layer.
    ///
    /// Total over the enum: the six catalog habits carry their own token,
    /// everything else falls back to the default.
    pub fn icon_token(&self) -> &'static str {
        match self {
            HabitCategory::Running => "activity",
            HabitCategory::Reading => "book-open",
            HabitCategory::Meditation => "smile",
            HabitCategory::Hiking => "mountain",
            HabitCategory::Writing => "pen-tool",
            HabitCategory::Lifting => "dumbbell",
            _ => DEFAULT_HABIT_ICON,
        }
    }
}

impl std::fmt::Display for HabitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for HabitCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(HabitCategory::Running),
            "reading" => Ok(HabitCategory::Reading),
            "meditation" => Ok(HabitCategory::Meditation),
            "coding" => Ok(HabitCategory::Coding),
            "hiking" => Ok(HabitCategory::Hiking),
            "writing" => Ok(HabitCategory::Writing),
            "lifting" => Ok(HabitCategory::Lifting),
            "yoga" => Ok(HabitCategory::Yoga),
            _ => Err(format!("Unknown habit: {}", s)),
        }
    }
}

/// A linked external habit-tracking source surfaced on a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Integration {
    pub id: String,
    /// Display name, e.g. "Strava", "Goodreads"
    pub name: String,
    /// Icon token (emoji or icon name)
    pub icon: String,
    /// Short preview of the synced data, e.g. "187 km this week"
    pub data_preview: String,
    pub connected: bool,
}

/// A candidate profile in the focus feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub age: u8,
    pub photo_url: String,
    pub habit: HabitCategory,
    /// "The pitch": what this person is looking for in a partner
    pub bio: String,
    /// Weekly availability, true = free that day
    pub schedule: [bool; SCHEDULE_DAYS],
    /// Consecutive days of habit completion
    pub streak: u32,
    /// Reliability metric, 0-100
    pub ghost_score: u8,
    pub location: String,
    pub integrations: Vec<Integration>,
}

/// Mutable, transient state accumulated during onboarding.
/// Dropped once the flow completes and materializes an [`OwnProfile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingDraft {
    /// Chosen habit; `None` until step 1 records a selection
    pub habit: Option<HabitCategory>,
    /// Weekly availability, all false by default
    pub availability: [bool; SCHEDULE_DAYS],
    /// The pitch text, empty by default
    pub bio: String,
    /// Identifiers of connected integrations
    pub integrations: BTreeSet<String>,
}

/// A completed draft, materialized when onboarding finishes.
/// The candidate directory is never modified by materialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnProfile {
    pub habit: HabitCategory,
    pub availability: [bool; SCHEDULE_DAYS],
    pub pitch: String,
    pub integrations: BTreeSet<String>,
}

/// Days both schedules mark as available
pub fn shared_days(
    a: &[bool; SCHEDULE_DAYS],
    b: &[bool; SCHEDULE_DAYS],
) -> [bool; SCHEDULE_DAYS] {
    let mut shared = [false; SCHEDULE_DAYS];
    for (i, slot) in shared.iter_mut().enumerate() {
        *slot = a[i] && b[i];
    }
    shared
}

/// Share of the candidate's available days the viewer is also free on, as a
/// whole percentage. A candidate with no available days scores 0.
pub fn overlap_percent(
    viewer: &[bool; SCHEDULE_DAYS],
    candidate: &[bool; SCHEDULE_DAYS],
) -> u8 {
    let available = candidate.iter().filter(|day| **day).count();
    if available == 0 {
        return 0;
    }
    let shared = shared_days(viewer, candidate)
        .iter()
        .filter(|day| **day)
        .count();
    (shared * 100 / available) as u8
}

/// Error types for the Tandem core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum TandemError {
    #[error("no habit selected")]
    HabitNotSelected,

    #[error("onboarding is already complete")]
    OnboardingComplete,

    #[error("day index {0} out of range (0-6)")]
    DayOutOfRange(usize),

    #[error("cannot polish an empty pitch")]
    EmptyBio,

    #[error("a polish request is already in flight")]
    PolishInFlight,

    #[error("candidate directory is empty")]
    EmptyDirectory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_habit_label_round_trip() {
        assert_eq!("running".parse::<HabitCategory>().unwrap(), HabitCategory::Running);
        assert_eq!("Hiking".parse::<HabitCategory>().unwrap(), HabitCategory::Hiking);
        assert_eq!(HabitCategory::Lifting.to_string(), "Lifting");
        assert!("juggling".parse::<HabitCategory>().is_err());
    }

    #[test]
    fn test_icon_mapping_is_total() {
        let all = [
            HabitCategory::Running,
            HabitCategory::Reading,
            HabitCategory::Meditation,
            HabitCategory::Coding,
            HabitCategory::Hiking,
            HabitCategory::Writing,
            HabitCategory::Lifting,
            HabitCategory::Yoga,
        ];

        for habit in all {
            assert!(!habit.icon_token().is_empty(), "{:?} has no icon", habit);
        }

        // Categories outside the selectable catalog share the default token
        assert_eq!(HabitCategory::Coding.icon_token(), DEFAULT_HABIT_ICON);
        assert_eq!(HabitCategory::Yoga.icon_token(), DEFAULT_HABIT_ICON);
    }

    #[test]
    fn test_shared_days() {
        let a = [true, true, false, false, true, false, true];
        let b = [true, false, false, false, true, true, false];
        assert_eq!(
            shared_days(&a, &b),
            [true, false, false, false, true, false, false]
        );
    }

    #[test]
    fn test_overlap_percent() {
        let everyday = [true; SCHEDULE_DAYS];
        let weekends = [false, false, false, false, false, true, true];
        let weekdays = [true, true, true, true, true, false, false];
        let never = [false; SCHEDULE_DAYS];

        assert_eq!(overlap_percent(&everyday, &weekends), 100);
        assert_eq!(overlap_percent(&weekends, &weekdays), 0);
        assert_eq!(overlap_percent(&weekdays, &everyday), 71); // 5 of 7 days
        assert_eq!(overlap_percent(&everyday, &never), 0);
    }

    #[test]
    fn test_draft_defaults() {
        let draft = OnboardingDraft::default();
        assert!(draft.habit.is_none());
        assert_eq!(draft.availability, [false; SCHEDULE_DAYS]);
        assert!(draft.bio.is_empty());
        assert!(draft.integrations.is_empty());
    }
}
