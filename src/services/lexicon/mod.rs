//! Lexicon-based sentiment scorer.
//!
//! Each known word carries a polarity in `[-1, 1]` and a subjectivity in
//! `[0, 1]`. A text is scored as the mean over every lexicon hit, after
//! intensifiers ("very", "slightly") and negations ("not", "don't") have been
//! applied to the word that follows them.

mod default_words;

#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::models::Sentiment;
use crate::services::scorer::{ScorerError, SentimentScorer};

/// Polarity multiplier applied to a negated word.
const NEGATION_FACTOR: f64 = -0.5;

const NEGATIONS: &[&str] = &["not", "no", "never", "neither", "nor", "cannot", "without"];

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\p{L}+(?:['’]\p{L}+)*|[.!?;]+").expect("valid token pattern"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LexiconEntry {
    pub polarity: f64,
    pub subjectivity: f64,
}

#[derive(Debug, Deserialize)]
struct LexiconRow {
    word: String,
    polarity: f64,
    subjectivity: f64,
}

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    words: HashMap<String, LexiconEntry>,
    modifiers: HashMap<String, f64>,
}

impl LexiconScorer {
    /// Empty lexicon: every text scores neutral.
    pub fn new() -> Self {
        Self {
            words: HashMap::new(),
            modifiers: HashMap::new(),
        }
    }

    /// Default word list merged with the overrides in `path`.
    pub fn with_overrides(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open lexicon file {}", path.display()))?;
        let mut lexicon = Self::default();
        let added = lexicon
            .load_overrides(file)
            .with_context(|| format!("Failed to load lexicon file {}", path.display()))?;
        tracing::info!("Loaded {} lexicon overrides from {}", added, path.display());
        Ok(lexicon)
    }

    /// Adds or replaces a word. Values are clamped to their ranges.
    pub fn add_word(&mut self, word: &str, polarity: f64, subjectivity: f64) {
        self.words.insert(
            word.to_lowercase(),
            LexiconEntry {
                polarity: polarity.clamp(-1.0, 1.0),
                subjectivity: subjectivity.clamp(0.0, 1.0),
            },
        );
    }

    /// Registers an intensifier (factor > 1) or diminisher (factor < 1).
    pub fn add_modifier(&mut self, word: &str, factor: f64) {
        self.modifiers.insert(word.to_lowercase(), factor.max(0.0));
    }

    #[cfg(test)]
    pub fn get(&self, word: &str) -> Option<LexiconEntry> {
        self.words.get(&word.to_lowercase()).copied()
    }

    #[cfg(test)]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Reads `word,polarity,subjectivity` rows and merges them in.
    /// Returns the number of rows applied.
    pub fn load_overrides<R: Read>(&mut self, reader: R) -> Result<usize> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let mut added = 0;
        for (idx, row) in rdr.deserialize::<LexiconRow>().enumerate() {
            // header is line 1
            let line = idx + 2;
            let row = row.with_context(|| format!("Invalid lexicon row at line {}", line))?;
            if row.word.is_empty() {
                anyhow::bail!("Empty word at line {}", line);
            }
            if !(-1.0..=1.0).contains(&row.polarity) || !(0.0..=1.0).contains(&row.subjectivity) {
                anyhow::bail!(
                    "Scores out of range for '{}' at line {}: polarity {}, subjectivity {}",
                    row.word,
                    line,
                    row.polarity,
                    row.subjectivity
                );
            }
            self.add_word(&row.word, row.polarity, row.subjectivity);
            added += 1;
        }
        Ok(added)
    }

    pub fn analyze(&self, text: &str) -> Sentiment {
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut assessments = 0usize;

        let mut pending_factor: Option<f64> = None;
        let mut negated = false;

        for token in TOKEN_RE.find_iter(text) {
            let token = token.as_str().to_lowercase().replace('’', "'");

            if token.starts_with(['.', '!', '?', ';']) {
                pending_factor = None;
                negated = false;
                continue;
            }
            if is_negation(&token) {
                negated = true;
                continue;
            }
            if let Some(&factor) = self.modifiers.get(&token) {
                pending_factor = Some(pending_factor.unwrap_or(1.0) * factor);
                continue;
            }
            let Some(entry) = self.words.get(&token) else {
                continue;
            };

            let factor = pending_factor.take().unwrap_or(1.0);
            let mut polarity = entry.polarity * factor;
            if negated {
                polarity *= NEGATION_FACTOR;
                negated = false;
            }
            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += (entry.subjectivity * factor).clamp(0.0, 1.0);
            assessments += 1;
        }

        if assessments == 0 {
            return Sentiment::NEUTRAL;
        }

        let n = assessments as f64;
        Sentiment::new(
            (polarity_sum / n).clamp(-1.0, 1.0),
            (subjectivity_sum / n).clamp(0.0, 1.0),
        )
    }
}

fn is_negation(token: &str) -> bool {
    NEGATIONS.contains(&token) || token.ends_with("n't")
}

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> Result<Sentiment, ScorerError> {
        Ok(self.analyze(text))
    }
}
