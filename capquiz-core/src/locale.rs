//! Locale selection and user-facing message tables.
//!
//! Two content locales exist: English and Russian. `Locale::from_tag` maps
//! any `ru*` language tag to Russian and everything else (including
//! unrecognized tags) to English.

use crate::difficulty::Difficulty;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Content locale for messages and the country dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ru,
}

impl Locale {
    /// Resolve a BCP 47-ish language tag. Falls back to English.
    pub fn from_tag(tag: &str) -> Locale {
        if tag.trim().to_ascii_lowercase().starts_with("ru") {
            Locale::Ru
        } else {
            Locale::En
        }
    }

    /// Short tag for this locale.
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ru => "ru",
        }
    }

    /// The message table for this locale.
    pub fn messages(&self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::Ru => &RU,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Every user-facing string of the quiz, for one locale.
///
/// Fixed phrases are plain fields; parameterized messages are methods.
pub struct Messages {
    locale: Locale,
    pub yes: &'static str,
    pub no: &'static str,
    pub initial_welcome: &'static str,
    pub bye: &'static str,
    pub no_worries: &'static str,
    pub ask_for_a_game: &'static str,
    pub correct: &'static str,
    pub play_again: &'static str,
    pub rules: &'static str,
    pub choose_difficulty: &'static str,
}

static EN: Messages = Messages {
    locale: Locale::En,
    yes: "Yes",
    no: "No",
    initial_welcome: "Welcome to \"Name the Capital\" quiz! Can I ask your name?",
    bye: "Goodbye!",
    no_worries: "Ok, no worries.",
    ask_for_a_game: "Do you want to play?",
    correct: "Correct!",
    play_again: "Do you want to play again?",
    rules: "Rules are easy. I say country and you name the capital.",
    choose_difficulty: "Please choose difficulty level.",
};

static RU: Messages = Messages {
    locale: Locale::Ru,
    yes: "Да",
    no: "Нет",
    initial_welcome: "Добро пожаловать в игру \"Назови Столицу\"! Могу ли я спросить ваше имя?",
    bye: "До свидания!",
    no_worries: "Без проблем.",
    ask_for_a_game: "Хотите начать игру?",
    correct: "Правильно!",
    play_again: "Хотите ли вы сыграть еще?",
    rules: "Правила простые. Я говорю страну, а вы называете столицу.",
    choose_difficulty: "Пожалуйста выберите уровень сложности.",
};

impl Messages {
    /// Greeting for a returning, known user.
    pub fn welcome(&self, user_name: &str) -> String {
        match self.locale {
            Locale::En => format!("Hello again, {user_name}!"),
            Locale::Ru => format!("Снова привет, {user_name}!"),
        }
    }

    /// Acknowledgement after the user shares their name.
    pub fn thanks_name(&self, user_name: &str) -> String {
        match self.locale {
            Locale::En => format!("Thanks {user_name}!"),
            Locale::Ru => format!("Спасибо {user_name}!"),
        }
    }

    /// Wrong-answer feedback with the expected capital.
    pub fn incorrect(&self, capital: &str) -> String {
        match self.locale {
            Locale::En => format!("Correct answer is {capital}."),
            Locale::Ru => format!("Правильный ответ - {capital}."),
        }
    }

    /// Final score report.
    pub fn score(&self, score: u32) -> String {
        match self.locale {
            Locale::En => format!("Your score is {score}."),
            Locale::Ru => format!("Ваш результат - {score}."),
        }
    }

    /// Personal-best announcement.
    pub fn new_best_score(&self, score: u32) -> String {
        match self.locale {
            Locale::En => format!("That's your new best score - {score}!"),
            Locale::Ru => format!("Это ваш новый рекорд - {score}!"),
        }
    }

    /// Confirmation of the chosen difficulty level.
    pub fn difficulty_chosen(&self, level: Difficulty) -> String {
        let name = self.difficulty_name(level);
        match self.locale {
            Locale::En => format!("Your difficulty level - {name}."),
            Locale::Ru => format!("Ваш уровень сложности - {name}."),
        }
    }

    /// Display name of a difficulty level.
    pub fn difficulty_name(&self, level: Difficulty) -> &'static str {
        match (self.locale, level) {
            (Locale::En, Difficulty::Easy) => "Easy",
            (Locale::En, Difficulty::Hard) => "Hard",
            (Locale::En, Difficulty::Insane) => "Insane",
            (Locale::Ru, Difficulty::Easy) => "Легкий",
            (Locale::Ru, Difficulty::Hard) => "Сложный",
            (Locale::Ru, Difficulty::Insane) => "Бог",
        }
    }

    /// Display names of all levels, in presentation order.
    pub fn difficulty_names(&self) -> [&'static str; 3] {
        [
            self.difficulty_name(Difficulty::Easy),
            self.difficulty_name(Difficulty::Hard),
            self.difficulty_name(Difficulty::Insane),
        ]
    }
}
