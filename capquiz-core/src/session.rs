//! QuizEngine - the round controller and per-session state.
//!
//! The engine is the only stateful part of the quiz, and even it owns no
//! state itself: every operation takes the session (and, where relevant,
//! the user profile) as an explicit argument, mutates it, and returns a
//! [`Reply`] describing what to say next. Hosts keep the state wherever
//! they like (see [`crate::store`] for the in-memory store).

use crate::answer::answers_match;
use crate::dataset::{CountryDataset, CountryRecord};
use crate::difficulty::Difficulty;
use crate::locale::Locale;
use crate::select::{self, SelectError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Turn lifespan for most expected-action markers.
const EXPECT_TTL: u32 = 2;

/// Longer lifespan while a round's answer is awaited mid-game.
const PLAYING_TTL: u32 = 7;

/// Errors from quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Country selection failed: {0}")]
    Select(#[from] SelectError),
}

/// Mutable per-conversation quiz state.
///
/// All fields start unset; a wrong answer clears the whole struct back to
/// that state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub difficulty: Option<Difficulty>,
    /// `None` until the first round of a session; 0 after it.
    pub score: Option<u32>,
    pub current_country: Option<CountryRecord>,
}

impl SessionState {
    /// Reset every field to unset.
    pub fn clear(&mut self) {
        *self = SessionState::default();
    }

    pub fn is_empty(&self) -> bool {
        self.difficulty.is_none() && self.score.is_none() && self.current_country.is_none()
    }
}

/// Longer-lived per-user data, surviving across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_name: Option<String>,
    pub best_score: Option<u32>,
}

impl UserProfile {
    /// Record a finished game's score. Returns true when it set a new best.
    pub fn record_score(&mut self, score: u32) -> bool {
        let beaten = match self.best_score {
            Some(best) => score > best,
            None => score > 0,
        };
        if beaten {
            self.best_score = Some(score);
        }
        beaten
    }
}

/// The user action the quiz expects next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    /// Waiting for the user's name.
    ProvideName,
    /// Waiting for a yes/no on starting a game.
    StartGame,
    /// Waiting for a difficulty level.
    ChooseDifficulty,
    /// Waiting for a capital-name answer.
    Answer,
}

/// An expected-next-action marker with a turn-count lifespan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expected {
    pub action: NextAction,
    pub turns: u32,
}

impl Expected {
    pub fn new(action: NextAction, turns: u32) -> Self {
        Self { action, turns }
    }
}

/// What the quiz says back after handling one user turn.
#[derive(Debug, Clone)]
pub struct Reply {
    /// Text to speak/print. May span multiple lines.
    pub text: String,

    /// Quick-reply chips a host may render.
    pub suggestions: Vec<String>,

    /// Marker for the host's router, when a specific next action is expected.
    pub expect: Option<Expected>,
}

impl Reply {
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suggestions: Vec::new(),
            expect: None,
        }
    }

    fn with_suggestions<S: Into<String>>(mut self, suggestions: impl IntoIterator<Item = S>) -> Self {
        self.suggestions = suggestions.into_iter().map(Into::into).collect();
        self
    }

    fn expecting(mut self, action: NextAction, turns: u32) -> Self {
        self.expect = Some(Expected::new(action, turns));
        self
    }
}

/// The quiz round controller for one locale.
///
/// Holds the (immutable) country list and message table; all mutable state
/// lives in the [`SessionState`] / [`UserProfile`] passed into each call.
pub struct QuizEngine {
    countries: Vec<CountryRecord>,
    locale: Locale,
}

impl QuizEngine {
    /// Create an engine over one locale partition of a dataset.
    pub fn new(dataset: &CountryDataset, locale: Locale) -> Self {
        Self::from_countries(dataset.countries(locale).to_vec(), locale)
    }

    /// Create an engine over the built-in dataset.
    pub fn builtin(locale: Locale) -> Self {
        Self::new(CountryDataset::builtin(), locale)
    }

    /// Create an engine from an explicit country list.
    pub fn from_countries(countries: Vec<CountryRecord>, locale: Locale) -> Self {
        Self { countries, locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn countries(&self) -> &[CountryRecord] {
        &self.countries
    }

    /// Greet the user and offer a game.
    ///
    /// Known users are greeted by name; unknown users are asked for theirs.
    pub fn welcome(&self, profile: &UserProfile) -> Reply {
        let msgs = self.locale.messages();
        match &profile.user_name {
            Some(name) => Reply::new(format!("{} {}", msgs.welcome(name), msgs.ask_for_a_game))
                .with_suggestions([msgs.yes, msgs.no])
                .expecting(NextAction::StartGame, EXPECT_TTL),
            None => Reply::new(format!("{} {}", msgs.initial_welcome, msgs.ask_for_a_game))
                .with_suggestions([msgs.yes, msgs.no])
                .expecting(NextAction::ProvideName, EXPECT_TTL),
        }
    }

    /// Handle the user's response to the name request.
    pub fn name_given(&self, profile: &mut UserProfile, name: Option<&str>) -> Reply {
        let msgs = self.locale.messages();
        let text = match name {
            Some(name) if !name.trim().is_empty() => {
                let name = name.trim().to_string();
                let text = format!("{} {}", msgs.thanks_name(&name), msgs.ask_for_a_game);
                profile.user_name = Some(name);
                text
            }
            _ => format!("{} {}", msgs.no_worries, msgs.ask_for_a_game),
        };
        Reply::new(text)
            .with_suggestions([msgs.yes, msgs.no])
            .expecting(NextAction::StartGame, EXPECT_TTL)
    }

    /// Begin or continue a game.
    ///
    /// With a difficulty already chosen this starts the next round;
    /// otherwise it asks for a difficulty first.
    pub fn start_or_resume(&self, session: &mut SessionState) -> Result<Reply, QuizError> {
        self.start_or_resume_with_rng(session, &mut rand::thread_rng())
    }

    pub fn start_or_resume_with_rng<R: Rng>(
        &self,
        session: &mut SessionState,
        rng: &mut R,
    ) -> Result<Reply, QuizError> {
        if session.difficulty.is_some() {
            return self.play_round_with_rng(session, rng);
        }
        Ok(self.prompt_for_difficulty())
    }

    /// Record the chosen difficulty and immediately start a round.
    ///
    /// A missing level (the router could not extract one) re-prompts.
    pub fn choose_difficulty(
        &self,
        session: &mut SessionState,
        level: Option<Difficulty>,
    ) -> Result<Reply, QuizError> {
        self.choose_difficulty_with_rng(session, level, &mut rand::thread_rng())
    }

    pub fn choose_difficulty_with_rng<R: Rng>(
        &self,
        session: &mut SessionState,
        level: Option<Difficulty>,
        rng: &mut R,
    ) -> Result<Reply, QuizError> {
        let Some(level) = level else {
            return Ok(self.prompt_for_difficulty());
        };

        let msgs = self.locale.messages();
        session.difficulty = Some(level);
        debug!(%level, "difficulty chosen");

        let mut reply = self.play_round_with_rng(session, rng)?;
        reply.text = format!("{}\n{}", msgs.difficulty_chosen(level), reply.text);
        Ok(reply)
    }

    /// Run one round: pick a country, update the score, prompt with the
    /// country name.
    ///
    /// The first round of a session sets the score to 0 and prepends the
    /// one-time rules message; every later round adds exactly 1.
    pub fn play_round(&self, session: &mut SessionState) -> Result<Reply, QuizError> {
        self.play_round_with_rng(session, &mut rand::thread_rng())
    }

    pub fn play_round_with_rng<R: Rng>(
        &self,
        session: &mut SessionState,
        rng: &mut R,
    ) -> Result<Reply, QuizError> {
        // Missing difficulty falls through to the default instead of erroring.
        let difficulty = session.difficulty.unwrap_or(Difficulty::Easy);
        let country = select::select_country_with_rng(&self.countries, difficulty, rng)?;

        let msgs = self.locale.messages();
        let (text, score) = match session.score {
            None => (format!("{}\n{}", msgs.rules, country.country_name), 0),
            Some(score) => (country.country_name.clone(), score + 1),
        };
        debug!(round = score + 1, country = %country.country_name, "round started");

        session.current_country = Some(country);
        session.score = Some(score);

        Ok(Reply::new(text).expecting(NextAction::Answer, EXPECT_TTL))
    }

    /// Judge an answer to the current round.
    ///
    /// Correct answers keep the session going; a wrong answer reports the
    /// capital and final score, then clears the session entirely. If no
    /// round is in flight the answer is ignored and a fresh round starts.
    pub fn submit_answer(
        &self,
        session: &mut SessionState,
        profile: &mut UserProfile,
        answer: &str,
    ) -> Result<Reply, QuizError> {
        self.submit_answer_with_rng(session, profile, answer, &mut rand::thread_rng())
    }

    pub fn submit_answer_with_rng<R: Rng>(
        &self,
        session: &mut SessionState,
        profile: &mut UserProfile,
        answer: &str,
        rng: &mut R,
    ) -> Result<Reply, QuizError> {
        let msgs = self.locale.messages();

        if let (Some(country), Some(score)) = (session.current_country.clone(), session.score) {
            if !answers_match(&country.capital, answer) {
                debug!(expected = %country.capital, got = answer, score, "wrong answer, game over");
                let new_best = profile.record_score(score);
                session.clear();

                let mut parts = vec![msgs.incorrect(&country.capital), msgs.score(score)];
                if new_best {
                    parts.push(msgs.new_best_score(score));
                }
                parts.push(msgs.play_again.to_string());

                return Ok(Reply::new(parts.join(" "))
                    .with_suggestions([msgs.yes, msgs.no])
                    .expecting(NextAction::StartGame, EXPECT_TTL));
            }

            let mut reply = self.play_round_with_rng(session, rng)?;
            reply.text = format!("{}\n{}", msgs.correct, reply.text);
            reply.expect = Some(Expected::new(NextAction::Answer, PLAYING_TTL));
            return Ok(reply);
        }

        // No round in flight: silently reinitialize with a fresh round.
        let mut reply = self.play_round_with_rng(session, rng)?;
        reply.expect = Some(Expected::new(NextAction::Answer, PLAYING_TTL));
        Ok(reply)
    }

    /// Say goodbye. Ends the conversation; no next action is expected.
    pub fn farewell(&self) -> Reply {
        Reply::new(self.locale.messages().bye)
    }

    fn prompt_for_difficulty(&self) -> Reply {
        let msgs = self.locale.messages();
        Reply::new(msgs.choose_difficulty)
            .with_suggestions(msgs.difficulty_names())
            .expecting(NextAction::ChooseDifficulty, EXPECT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record(name: &str, capital: &str, population: u64) -> CountryRecord {
        CountryRecord {
            country_name: name.to_string(),
            capital: capital.to_string(),
            wiki_url: String::new(),
            population,
        }
    }

    fn engine() -> QuizEngine {
        QuizEngine::from_countries(
            vec![
                record("Iceland", "Reykjavik", 360_000),
                record("Brazil", "Brasilia", 211_000_000),
            ],
            Locale::En,
        )
    }

    #[test]
    fn test_first_round_scores_zero_and_states_rules() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(3);

        session.difficulty = Some(Difficulty::Easy);
        let reply = engine.play_round_with_rng(&mut session, &mut rng).unwrap();

        assert_eq!(session.score, Some(0));
        assert!(reply.text.contains("Rules are easy"));
        assert!(reply.text.contains("Brazil"));
        assert_eq!(
            reply.expect,
            Some(Expected::new(NextAction::Answer, EXPECT_TTL))
        );
    }

    #[test]
    fn test_later_rounds_increment_without_rules() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.difficulty = Some(Difficulty::Easy);

        engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        let reply = engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        assert_eq!(session.score, Some(1));
        assert!(!reply.text.contains("Rules are easy"));

        engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        assert_eq!(session.score, Some(2));
    }

    #[test]
    fn test_correct_answer_continues_session() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut profile = UserProfile::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.difficulty = Some(Difficulty::Easy);

        engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        let reply = engine
            .submit_answer_with_rng(&mut session, &mut profile, "brasilia", &mut rng)
            .unwrap();

        assert!(reply.text.starts_with("Correct!"));
        assert_eq!(session.difficulty, Some(Difficulty::Easy));
        assert_eq!(session.score, Some(1));
        assert!(session.current_country.is_some());
        // Mid-game answer markers get the longer lifespan.
        assert_eq!(
            reply.expect,
            Some(Expected::new(NextAction::Answer, PLAYING_TTL))
        );
    }

    #[test]
    fn test_wrong_answer_reports_and_clears_everything() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut profile = UserProfile::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.difficulty = Some(Difficulty::Easy);

        engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        engine
            .submit_answer_with_rng(&mut session, &mut profile, "Brasilia", &mut rng)
            .unwrap();
        let reply = engine
            .submit_answer_with_rng(&mut session, &mut profile, "London", &mut rng)
            .unwrap();

        assert!(reply.text.contains("Correct answer is Brasilia."));
        assert!(reply.text.contains("Your score is 1."));
        assert!(reply.text.contains("play again"));
        assert!(session.is_empty());
        assert_eq!(reply.suggestions, vec!["Yes", "No"]);
        assert_eq!(
            reply.expect,
            Some(Expected::new(NextAction::StartGame, EXPECT_TTL))
        );
    }

    #[test]
    fn test_wrong_answer_updates_best_score() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut profile = UserProfile::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.difficulty = Some(Difficulty::Easy);

        engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        engine
            .submit_answer_with_rng(&mut session, &mut profile, "Brasilia", &mut rng)
            .unwrap();
        let reply = engine
            .submit_answer_with_rng(&mut session, &mut profile, "nope", &mut rng)
            .unwrap();

        assert_eq!(profile.best_score, Some(1));
        assert!(reply.text.contains("new best score"));

        // A worse follow-up game leaves the best untouched.
        session.difficulty = Some(Difficulty::Easy);
        engine.play_round_with_rng(&mut session, &mut rng).unwrap();
        let reply = engine
            .submit_answer_with_rng(&mut session, &mut profile, "nope", &mut rng)
            .unwrap();
        assert_eq!(profile.best_score, Some(1));
        assert!(!reply.text.contains("new best score"));
    }

    #[test]
    fn test_answer_without_round_starts_fresh_round() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut profile = UserProfile::default();
        let mut rng = StdRng::seed_from_u64(3);

        let reply = engine
            .submit_answer_with_rng(&mut session, &mut profile, "whatever", &mut rng)
            .unwrap();

        // Fell through to a first round on the default difficulty.
        assert_eq!(session.score, Some(0));
        assert!(session.current_country.is_some());
        assert!(reply.text.contains("Rules are easy"));
    }

    #[test]
    fn test_start_or_resume_prompts_without_difficulty() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(3);

        let reply = engine
            .start_or_resume_with_rng(&mut session, &mut rng)
            .unwrap();

        assert_eq!(reply.text, "Please choose difficulty level.");
        assert_eq!(reply.suggestions, vec!["Easy", "Hard", "Insane"]);
        assert_eq!(
            reply.expect,
            Some(Expected::new(NextAction::ChooseDifficulty, EXPECT_TTL))
        );
        assert!(session.is_empty());
    }

    #[test]
    fn test_choose_difficulty_starts_round() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(3);

        let reply = engine
            .choose_difficulty_with_rng(&mut session, Some(Difficulty::Insane), &mut rng)
            .unwrap();

        assert_eq!(session.difficulty, Some(Difficulty::Insane));
        assert_eq!(session.score, Some(0));
        assert!(reply.text.contains("Your difficulty level - Insane."));
        assert!(reply.text.contains("Iceland"));
    }

    #[test]
    fn test_choose_difficulty_without_level_reprompts() {
        let engine = engine();
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(3);

        let reply = engine
            .choose_difficulty_with_rng(&mut session, None, &mut rng)
            .unwrap();

        assert_eq!(reply.text, "Please choose difficulty level.");
        assert!(session.difficulty.is_none());
    }

    #[test]
    fn test_selection_failure_is_typed() {
        let engine = QuizEngine::from_countries(
            vec![record("Edge", "Edge City", 40_000_000)],
            Locale::En,
        );
        let mut session = SessionState::default();
        let mut rng = StdRng::seed_from_u64(3);
        session.difficulty = Some(Difficulty::Easy);

        let err = engine
            .play_round_with_rng(&mut session, &mut rng)
            .unwrap_err();
        assert!(matches!(err, QuizError::Select(_)));
    }

    #[test]
    fn test_welcome_flows() {
        let engine = engine();

        let anonymous = UserProfile::default();
        let reply = engine.welcome(&anonymous);
        assert!(reply.text.contains("Can I ask your name?"));
        assert_eq!(
            reply.expect,
            Some(Expected::new(NextAction::ProvideName, EXPECT_TTL))
        );

        let known = UserProfile {
            user_name: Some("Alex".to_string()),
            best_score: None,
        };
        let reply = engine.welcome(&known);
        assert!(reply.text.contains("Hello again, Alex!"));
        assert_eq!(
            reply.expect,
            Some(Expected::new(NextAction::StartGame, EXPECT_TTL))
        );
    }

    #[test]
    fn test_name_given() {
        let engine = engine();
        let mut profile = UserProfile::default();

        let reply = engine.name_given(&mut profile, Some("  Dana  "));
        assert_eq!(profile.user_name.as_deref(), Some("Dana"));
        assert!(reply.text.contains("Thanks Dana!"));

        let mut anonymous = UserProfile::default();
        let reply = engine.name_given(&mut anonymous, None);
        assert!(anonymous.user_name.is_none());
        assert!(reply.text.contains("no worries"));
    }
}
