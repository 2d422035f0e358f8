//! ============================================================================
//! TANDEM-CORE: Habit Accountability Matching Core
//! ============================================================================
//! Everything behind the rendering layer of the Tandem app:
//! - Profile data model and the compiled-in candidate directory
//! - Three-step onboarding wizard over a mutable draft
//! - Focus feed with its detail overlay
//! - Pitch polish / compatibility gateway to the Gemini API
//! ============================================================================

pub mod catalog;
pub mod config;
pub mod feed;
pub mod onboarding;
pub mod polish;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use catalog::{HabitChoice, IntegrationOption};
pub use config::AppConfig;
pub use feed::FocusFeed;
pub use onboarding::{OnboardingFlow, OnboardingStep, PolishRequest};
pub use polish::{PitchPolisher, COMPATIBILITY_FALLBACK};
pub use session::{AppView, Session};
pub use types::*;
