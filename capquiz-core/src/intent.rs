//! Host-agnostic intents and their dispatch.
//!
//! A host's router (voice platform, CLI, test harness) recognizes what the
//! user meant and hands the engine an [`Intent`]; the engine never sees raw
//! platform requests. `dispatch` is the single entry point mapping each
//! intent to its controller operation.

use crate::difficulty::Difficulty;
use crate::session::{QuizEngine, QuizError, Reply, SessionState, UserProfile};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One recognized user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    /// The conversation just started (or the user asked to start over).
    Welcome,
    /// The user answered the name request; `None` means they declined.
    ProvideName(Option<String>),
    /// The user wants to play (or keep playing).
    PlayGame,
    /// The user picked a difficulty; `None` when the router could not
    /// extract a level from the utterance.
    ChooseDifficulty(Option<Difficulty>),
    /// A capital-name answer. `guess` is the host's structured parameter
    /// when it has one; `utterance` is the raw text.
    Answer {
        guess: Option<String>,
        utterance: String,
    },
    /// The user does not want to play.
    Decline,
}

impl QuizEngine {
    /// Route an intent to its operation.
    pub fn dispatch(
        &self,
        session: &mut SessionState,
        profile: &mut UserProfile,
        intent: Intent,
    ) -> Result<Reply, QuizError> {
        self.dispatch_with_rng(session, profile, intent, &mut rand::thread_rng())
    }

    /// Route with a specific RNG (useful for testing).
    pub fn dispatch_with_rng<R: Rng>(
        &self,
        session: &mut SessionState,
        profile: &mut UserProfile,
        intent: Intent,
        rng: &mut R,
    ) -> Result<Reply, QuizError> {
        match intent {
            Intent::Welcome => Ok(self.welcome(profile)),
            Intent::ProvideName(name) => Ok(self.name_given(profile, name.as_deref())),
            Intent::PlayGame => self.start_or_resume_with_rng(session, rng),
            Intent::ChooseDifficulty(level) => {
                self.choose_difficulty_with_rng(session, level, rng)
            }
            Intent::Answer { guess, utterance } => {
                // Structured parameter wins over the raw utterance.
                let answer = guess.as_deref().unwrap_or(&utterance);
                self.submit_answer_with_rng(session, profile, answer, rng)
            }
            Intent::Decline => Ok(self.farewell()),
        }
    }
}
