//! Capital-city quiz engine.
//!
//! This crate provides:
//! - A locale-partitioned country dataset (built-in or loaded from the
//!   offline generator's JSON format)
//! - Population-bucket difficulty levels and constrained random selection
//! - Forgiving capital-name answer matching
//! - The round controller: scoring, win/loss transitions, session reset
//!
//! # Quick Start
//!
//! ```
//! use capquiz_core::{Difficulty, Intent, Locale, QuizEngine, SessionState, UserProfile};
//!
//! let engine = QuizEngine::builtin(Locale::En);
//! let mut session = SessionState::default();
//! let mut profile = UserProfile::default();
//!
//! let reply = engine
//!     .dispatch(
//!         &mut session,
//!         &mut profile,
//!         Intent::ChooseDifficulty(Some(Difficulty::Easy)),
//!     )
//!     .expect("selection cannot fail on the built-in dataset");
//!
//! // First round: rules plus a country name, score starts at 0.
//! println!("{}", reply.text);
//! assert_eq!(session.score, Some(0));
//! ```

pub mod answer;
pub mod dataset;
pub mod difficulty;
pub mod intent;
pub mod locale;
pub mod select;
pub mod session;
pub mod store;
pub mod testing;

// Primary public API
pub use answer::answers_match;
pub use dataset::{CountryDataset, CountryRecord, DatasetError};
pub use difficulty::Difficulty;
pub use intent::Intent;
pub use locale::{Locale, Messages};
pub use select::{select_country, SelectError};
pub use session::{
    Expected, NextAction, QuizEngine, QuizError, Reply, SessionState, UserProfile,
};
pub use store::{SessionStore, UserId};
