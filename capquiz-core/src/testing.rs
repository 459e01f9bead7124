//! Testing utilities for the quiz.
//!
//! Provides deterministic building blocks for integration tests:
//! - seeded RNGs so selection is reproducible
//! - small ready-made datasets
//! - `TestQuiz`, a scripted one-user conversation harness

use crate::dataset::CountryRecord;
use crate::intent::Intent;
use crate::locale::Locale;
use crate::session::{QuizEngine, QuizError, Reply, SessionState, UserProfile};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A reproducible RNG for tests.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Build a country record without caring about the wiki URL.
pub fn record(name: &str, capital: &str, population: u64) -> CountryRecord {
    CountryRecord {
        country_name: name.to_string(),
        capital: capital.to_string(),
        wiki_url: String::new(),
        population,
    }
}

/// The minimal two-country dataset: one `insane` candidate, one `easy`.
pub fn two_country_dataset() -> Vec<CountryRecord> {
    vec![
        record("Iceland", "Reykjavik", 360_000),
        record("Brazil", "Brasilia", 211_000_000),
    ]
}

/// One country per difficulty level.
pub fn three_level_dataset() -> Vec<CountryRecord> {
    vec![
        record("Iceland", "Reykjavik", 360_000),
        record("Netherlands", "Amsterdam", 17_441_000),
        record("Brazil", "Brasilia", 211_000_000),
    ]
}

/// A one-user conversation harness with deterministic selection.
pub struct TestQuiz {
    engine: QuizEngine,
    session: SessionState,
    profile: UserProfile,
    rng: StdRng,
}

impl TestQuiz {
    /// Create a harness over an explicit country list.
    pub fn new(countries: Vec<CountryRecord>, locale: Locale) -> Self {
        Self {
            engine: QuizEngine::from_countries(countries, locale),
            session: SessionState::default(),
            profile: UserProfile::default(),
            rng: seeded_rng(0),
        }
    }

    /// Use a different RNG seed (the default is 0).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = seeded_rng(seed);
        self
    }

    /// Send one intent through the engine.
    pub fn send(&mut self, intent: Intent) -> Result<Reply, QuizError> {
        self.engine
            .dispatch_with_rng(&mut self.session, &mut self.profile, intent, &mut self.rng)
    }

    /// Answer the current round correctly, whatever the country is.
    pub fn answer_correctly(&mut self) -> Result<Reply, QuizError> {
        let capital = self
            .session
            .current_country
            .as_ref()
            .map(|c| c.capital.clone())
            .unwrap_or_default();
        self.send(Intent::Answer {
            guess: None,
            utterance: capital,
        })
    }

    pub fn engine(&self) -> &QuizEngine {
        &self.engine
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }
}
