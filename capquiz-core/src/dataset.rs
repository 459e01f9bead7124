//! Country dataset loading and validation.
//!
//! The dataset is produced offline by a scraper and shipped as a JSON
//! document `{ "en": [record…], "ru": [record…] }`, one partition per
//! content locale, each sorted ascending by population. Records with a
//! missing country name or capital are dropped at load time, and malformed
//! population values are coerced to 0 (which lands them in the `insane`
//! bucket).
//!
//! A built-in dataset is embedded in the crate so the quiz runs without any
//! external file.

use crate::locale::Locale;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tokio::fs;

/// Errors from dataset loading.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset has no usable countries for locale {0}")]
    EmptyLocale(Locale),
}

/// One country as the quiz sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRecord {
    pub country_name: String,
    pub capital: String,
    pub wiki_url: String,
    pub population: u64,
}

/// A record as the offline generator emits it: fields may be missing.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    country_name: Option<String>,
    capital: Option<String>,
    #[serde(default)]
    wiki_url: String,
    #[serde(default, deserialize_with = "lenient_population")]
    population: u64,
}

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    en: Vec<RawRecord>,
    #[serde(default)]
    ru: Vec<RawRecord>,
}

/// Populations arrive from scraped infobox text; anything that is not a
/// usable non-negative number becomes 0.
fn lenient_population<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

/// The immutable, locale-partitioned country dataset.
#[derive(Debug, Clone)]
pub struct CountryDataset {
    en: Vec<CountryRecord>,
    ru: Vec<CountryRecord>,
}

impl CountryDataset {
    /// Parse a dataset from the generator's JSON format.
    ///
    /// Applies the load-time hygiene the generator promises but files in
    /// the wild may lack: drops incomplete records and re-sorts each
    /// partition ascending by population.
    pub fn parse(json: &str) -> Result<Self, DatasetError> {
        let raw: RawDataset = serde_json::from_str(json)?;

        let en = clean(raw.en);
        let ru = clean(raw.ru);

        if en.is_empty() {
            return Err(DatasetError::EmptyLocale(Locale::En));
        }
        if ru.is_empty() {
            return Err(DatasetError::EmptyLocale(Locale::Ru));
        }

        Ok(Self { en, ru })
    }

    /// Load a dataset from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// The dataset embedded in the crate.
    pub fn builtin() -> &'static CountryDataset {
        lazy_static::lazy_static! {
            static ref BUILTIN: CountryDataset =
                CountryDataset::parse(include_str!("../data/countries.json"))
                    .expect("embedded dataset is valid");
        }
        &BUILTIN
    }

    /// The country list for one locale, ascending by population.
    pub fn countries(&self, locale: Locale) -> &[CountryRecord] {
        match locale {
            Locale::En => &self.en,
            Locale::Ru => &self.ru,
        }
    }
}

impl FromStr for CountryDataset {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CountryDataset::parse(s)
    }
}

fn clean(raw: Vec<RawRecord>) -> Vec<CountryRecord> {
    let mut records: Vec<CountryRecord> = raw
        .into_iter()
        .filter_map(|r| {
            let country_name = r.country_name.filter(|n| !n.trim().is_empty())?;
            let capital = r.capital.filter(|c| !c.trim().is_empty())?;
            Some(CountryRecord {
                country_name,
                capital,
                wiki_url: r.wiki_url,
                population: r.population,
            })
        })
        .collect();

    records.sort_by_key(|r| r.population);
    records
}
