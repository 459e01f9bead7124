//! Random country selection under a difficulty constraint.
//!
//! Selection filters the dataset down to the countries the difficulty level
//! accepts, then draws one uniformly from that subset. An empty subset is a
//! typed error, so selection always terminates even when a level has no
//! qualifying country (possible with boundary populations, see
//! [`crate::difficulty`]).

use crate::dataset::CountryRecord;
use crate::difficulty::Difficulty;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

/// Errors from country selection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    #[error("No country in the dataset matches difficulty {difficulty}")]
    NoCandidates { difficulty: Difficulty },
}

/// The subset of countries a difficulty level accepts.
pub fn candidates(countries: &[CountryRecord], difficulty: Difficulty) -> Vec<&CountryRecord> {
    countries
        .iter()
        .filter(|c| difficulty.accepts(c.population))
        .collect()
}

/// Pick a random country for the given difficulty.
pub fn select_country(
    countries: &[CountryRecord],
    difficulty: Difficulty,
) -> Result<CountryRecord, SelectError> {
    select_country_with_rng(countries, difficulty, &mut rand::thread_rng())
}

/// Pick with a specific RNG (useful for testing).
pub fn select_country_with_rng<R: Rng>(
    countries: &[CountryRecord],
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<CountryRecord, SelectError> {
    let pool = candidates(countries, difficulty);
    if pool.is_empty() {
        return Err(SelectError::NoCandidates { difficulty });
    }

    let index = rng.gen_range(0..pool.len());
    let country = pool[index].clone();
    debug!(
        country = %country.country_name,
        population = country.population,
        %difficulty,
        pool = pool.len(),
        "selected country"
    );
    Ok(country)
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

    fn sample() -> Vec<CountryRecord> {
        vec![
            record("Iceland", "Reykjavik", 360_000),
            record("Netherlands", "Amsterdam", 17_441_000),
            record("Brazil", "Brasilia", 211_000_000),
        ]
    }

    #[test]
    fn test_candidates_filtering() {
        let countries = sample();
        let easy: Vec<_> = candidates(&countries, Difficulty::Easy)
            .iter()
            .map(|c| c.country_name.as_str())
            .collect();
        assert_eq!(easy, ["Brazil"]);

        let insane: Vec<_> = candidates(&countries, Difficulty::Insane)
            .iter()
            .map(|c| c.country_name.as_str())
            .collect();
        assert_eq!(insane, ["Iceland"]);
    }

    #[test]
    fn test_selection_respects_difficulty() {
        let countries = sample();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let country =
                select_country_with_rng(&countries, Difficulty::Hard, &mut rng).unwrap();
            assert_eq!(country.country_name, "Netherlands");
        }
    }

    #[test]
    fn test_single_candidate_always_returned() {
        // Regardless of dataset size, a lone qualifying record must win.
        let mut countries = sample();
        for i in 0..20 {
            countries.push(record(&format!("Small {i}"), "Town", 1_000 + i));
        }
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let country =
                select_country_with_rng(&countries, Difficulty::Easy, &mut rng).unwrap();
            assert_eq!(country.country_name, "Brazil");
        }
    }

    #[test]
    fn test_no_candidates_is_an_error() {
        // Boundary populations belong to no bucket, so this pool is empty
        // for every level above insane.
        let countries = vec![
            record("Edge A", "A City", 10_000_000),
            record("Edge B", "B City", 40_000_000),
        ];
        let err = select_country(&countries, Difficulty::Hard).unwrap_err();
        assert_eq!(
            err,
            SelectError::NoCandidates {
                difficulty: Difficulty::Hard
            }
        );
    }

    #[test]
    fn test_all_candidates_reachable() {
        let countries = vec![
            record("A", "A City", 100_000),
            record("B", "B City", 200_000),
            record("C", "C City", 300_000),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();

        for _ in 0..200 {
            let country =
                select_country_with_rng(&countries, Difficulty::Insane, &mut rng).unwrap();
            seen.insert(country.country_name);
        }
        assert_eq!(seen.len(), 3);
    }
}
