use thiserror::Error;

use crate::models::Sentiment;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ScorerError {
    message: String,
}

impl ScorerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Anything that can turn a piece of text into polarity and subjectivity.
///
/// Implementations must be deterministic and return polarity in `[-1, 1]`
/// and subjectivity in `[0, 1]`; the pipeline rejects anything else.
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> Result<Sentiment, ScorerError>;
}

impl<F> SentimentScorer for F
where
    F: Fn(&str) -> Result<Sentiment, ScorerError> + Send + Sync,
{
    fn score(&self, text: &str) -> Result<Sentiment, ScorerError> {
        self(text)
    }
}
