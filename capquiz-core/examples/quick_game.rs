//! Scripted demo game against the built-in dataset.
//!
//! Run with: `cargo run -p capquiz-core --example quick_game`

use capquiz_core::testing::{seeded_rng, TestQuiz};
use capquiz_core::{CountryDataset, Difficulty, Intent, Locale};

fn main() {
    // Show what selection alone produces for each level.
    let dataset = CountryDataset::builtin();
    let mut rng = seeded_rng(11);
    for level in Difficulty::all() {
        let country = capquiz_core::select::select_country_with_rng(
            dataset.countries(Locale::En),
            level,
            &mut rng,
        )
        .expect("built-in dataset covers every level");
        println!(
            "{level}: {} (capital {}, population {})",
            country.country_name, country.capital, country.population
        );
    }
    println!();

    // Then play a short scripted game.
    let mut quiz = TestQuiz::new(dataset.countries(Locale::En).to_vec(), Locale::En);

    let reply = quiz
        .send(Intent::ChooseDifficulty(Some(Difficulty::Hard)))
        .expect("round starts");
    println!("quiz: {}", reply.text);

    for _ in 0..3 {
        let capital = quiz
            .session()
            .current_country
            .as_ref()
            .map(|c| c.capital.clone())
            .unwrap_or_default();
        println!("you:  {capital}");
        let reply = quiz.answer_correctly().expect("round continues");
        println!("quiz: {}", reply.text);
    }

    println!("you:  Atlantis");
    let reply = quiz
        .send(Intent::Answer {
            guess: None,
            utterance: "Atlantis".to_string(),
        })
        .expect("game over reply");
    println!("quiz: {}", reply.text);
}
