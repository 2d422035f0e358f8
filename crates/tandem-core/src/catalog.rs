//! ============================================================================
//! Habit Catalog & Static Directory
//! ============================================================================
//! Compiled-in data: the selectable habit catalog, the integration options
//! offered during onboarding, and the seeded candidate directory. Nothing
//! here is loaded at runtime and nothing is ever mutated.
//! ============================================================================

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::types::{HabitCategory, Integration, UserProfile, SCHEDULE_DAYS};

/// Weekday labels for schedule rendering, Monday first
pub const WEEKDAYS: [&str; SCHEDULE_DAYS] = ["M", "T", "W", "T", "F", "S", "S"];

/// One selectable entry in the habit catalog
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HabitChoice {
    pub habit: HabitCategory,
    pub label: &'static str,
    pub icon: &'static str,
}

impl HabitChoice {
    fn new(habit: HabitCategory) -> Self {
        Self {
            habit,
            label: habit.label(),
            icon: habit.icon_token(),
        }
    }
}

/// A connectable data source offered during onboarding step 3
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IntegrationOption {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
}

/// The fixed habit choices shown in onboarding step 1, in display order
pub fn habits() -> &'static [HabitChoice] {
    &HABITS
}

/// Integration options offered during onboarding, in display order
pub fn integration_options() -> &'static [IntegrationOption] {
    &INTEGRATION_OPTIONS
}

/// The seeded candidate directory browsed by the focus feed
pub fn candidates() -> &'static [UserProfile] {
    &CANDIDATES
}

static HABITS: Lazy<Vec<HabitChoice>> = Lazy::new(|| {
    [
        HabitCategory::Running,
        HabitCategory::Reading,
        HabitCategory::Meditation,
        HabitCategory::Hiking,
        HabitCategory::Writing,
        HabitCategory::Lifting,
    ]
    .into_iter()
    .map(HabitChoice::new)
    .collect()
});

static INTEGRATION_OPTIONS: [IntegrationOption; 7] = [
    IntegrationOption {
        id: "strava",
        name: "Strava",
        subtitle: "Sync last 7 rides, weekly mileage",
        icon: "🏃",
    },
    IntegrationOption {
        id: "goodreads",
        name: "Goodreads",
        subtitle: "Current reads & yearly challenge",
        icon: "📚",
    },
    IntegrationOption {
        id: "alltrails",
        name: "AllTrails",
        subtitle: "Recent hikes & elevation gain",
        icon: "🌲",
    },
    IntegrationOption {
        id: "duolingo",
        name: "Duolingo",
        subtitle: "Daily streak & XP progress",
        icon: "🦉",
    },
    IntegrationOption {
        id: "chess",
        name: "Chess.com",
        subtitle: "Rapid rating & puzzle score",
        icon: "♟️",
    },
    IntegrationOption {
        id: "ravelry",
        name: "Ravelry",
        subtitle: "Current WIPs & stash status",
        icon: "🧶",
    },
    IntegrationOption {
        id: "letterboxd",
        name: "Letterboxd",
        subtitle: "Recent watches & reviews",
        icon: "🎬",
    },
];

fn integration(id: &str, name: &str, icon: &str, data_preview: &str, connected: bool) -> Integration {
    Integration {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        data_preview: data_preview.to_string(),
        connected,
    }
}

static CANDIDATES: Lazy<Vec<UserProfile>> = Lazy::new(|| {
    vec![
        UserProfile {
            id: "u1".to_string(),
            name: "Elena".to_string(),
            age: 28,
            photo_url: "https://picsum.photos/id/338/800/1200".to_string(),
            habit: HabitCategory::Running,
            bio: "Training for my first marathon. Need someone to ensure I don’t skip the long Sunday runs.".to_string(),
            schedule: [false, true, false, true, false, true, true],
            streak: 42,
            ghost_score: 98,
            location: "Central Park".to_string(),
            integrations: vec![
                integration("strava", "Strava", "👟", "187 km this week · 5:20 /km", true),
                integration("alltrails", "AllTrails", "🌲", "", false),
            ],
        },
        UserProfile {
            id: "u2".to_string(),
            name: "Marcus".to_string(),
            age: 31,
            photo_url: "https://picsum.photos/id/91/800/1200".to_string(),
            habit: HabitCategory::Reading,
            bio: "Architecture student. Trying to finish one biography a week. Let’s discuss over Sunday coffee.".to_string(),
            schedule: [true, true, true, true, true, false, false],
            streak: 12,
            ghost_score: 87,
            location: "Cafe Grumpy".to_string(),
            integrations: vec![
                integration("goodreads", "Goodreads", "📖", "Reading \"Atomic Habits\" · 28 pages/day", true),
            ],
        },
        UserProfile {
            id: "u3".to_string(),
            name: "Sarah".to_string(),
            age: 26,
            photo_url: "https://picsum.photos/id/64/800/1200".to_string(),
            habit: HabitCategory::Hiking,
            bio: "Badger Pass regular. I hike rain or shine. Looking for an early riser.".to_string(),
            schedule: [false, false, false, false, false, true, true],
            streak: 8,
            ghost_score: 94,
            location: "Yosemite Valley".to_string(),
            integrations: vec![
                integration("alltrails", "AllTrails", "🌲", "12 hikes this month · 4,200ft gain", true),
                integration("strava", "Strava", "👟", "Active recovery walks", true),
            ],
        },
        UserProfile {
            id: "u4".to_string(),
            name: "David".to_string(),
            age: 34,
            photo_url: "https://picsum.photos/id/177/800/1200".to_string(),
            habit: HabitCategory::Writing,
            bio: "Drafting a sci-fi novel. 500 words daily minimum. Silence is golden.".to_string(),
            schedule: [true, true, true, true, true, true, true],
            streak: 156,
            ghost_score: 99,
            location: "Home Office".to_string(),
            integrations: vec![
                integration("storygraph", "StoryGraph", "📊", "On track for 2024 reading goal", true),
            ],
        },
    ]
});
