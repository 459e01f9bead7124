//! Input routing: raw lines to engine intents.
//!
//! This is the host-side stand-in for a voice platform's intent router.
//! The expected-next-action marker the engine set on its previous reply
//! decides how a line is read; without one we fall back to yes/no/keyword
//! matching.

use capquiz_core::answer;
use capquiz_core::{Difficulty, Intent, Locale, NextAction};

/// Map one input line to an intent.
pub fn route(input: &str, expected: Option<NextAction>, locale: Locale) -> Intent {
    match expected {
        Some(NextAction::ProvideName) => {
            if is_no(input, locale) {
                Intent::ProvideName(None)
            } else {
                Intent::ProvideName(Some(input.to_string()))
            }
        }
        Some(NextAction::ChooseDifficulty) => {
            Intent::ChooseDifficulty(parse_difficulty(input, locale))
        }
        Some(NextAction::Answer) => Intent::Answer {
            guess: None,
            utterance: input.to_string(),
        },
        Some(NextAction::StartGame) | None => {
            if is_yes(input, locale) {
                Intent::PlayGame
            } else if is_no(input, locale) {
                Intent::Decline
            } else if let Some(level) = parse_difficulty(input, locale) {
                Intent::ChooseDifficulty(Some(level))
            } else {
                Intent::Welcome
            }
        }
    }
}

fn is_yes(input: &str, locale: Locale) -> bool {
    answer::answers_match(locale.messages().yes, input)
        || matches!(
            answer::normalize(input).as_str(),
            "yes" | "y" | "да" | "play" | "start"
        )
}

fn is_no(input: &str, locale: Locale) -> bool {
    answer::answers_match(locale.messages().no, input)
        || matches!(answer::normalize(input).as_str(), "no" | "n" | "нет")
}

fn parse_difficulty(input: &str, locale: Locale) -> Option<Difficulty> {
    if let Ok(level) = input.parse::<Difficulty>() {
        return Some(level);
    }
    // Localized display names work too ("Легкий", "Бог", ...).
    Difficulty::all()
        .into_iter()
        .find(|d| answer::answers_match(locale.messages().difficulty_name(*d), input))
}
