//! Random fact provider: realistic scalar values plus uniqueness tracking.

mod adapter;
mod unique;

pub use adapter::FakeFacts;
pub use unique::{DEFAULT_MAX_UNIQUE_ATTEMPTS, UniqueTracker};

use chrono::NaiveDate;

use crate::errors::GenerationError;

/// Source of locale-realistic random scalars.
///
/// Implementations own their random state so that a provider seeded once
/// yields the same sequence of facts on every run.
pub trait FactProvider {
    fn word(&mut self) -> String;
    /// A sentence of roughly `words` words.
    fn sentence(&mut self, words: usize) -> String;
    fn person_name(&mut self) -> String;
    fn email(&mut self) -> String;
    fn city(&mut self) -> String;
    fn catch_phrase(&mut self) -> String;
    /// Uniform date in `[start, end]`, inclusive on both ends.
    fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate;
    fn unique_tracker(&mut self) -> &mut UniqueTracker;

    /// Draw from `next` until it yields a value not yet seen for `field`.
    ///
    /// Gives up after the tracker's attempt limit.
    fn unique_value<G>(&mut self, field: &str, mut next: G) -> Result<String, GenerationError>
    where
        Self: Sized,
        G: FnMut(&mut Self) -> String,
    {
        let max_attempts = self.unique_tracker().max_attempts();
        for _ in 0..max_attempts {
            let value = next(self);
            if self.unique_tracker().insert(field, &value) {
                return Ok(value);
            }
        }
        Err(GenerationError::UniquenessExhausted {
            field: field.to_string(),
            attempts: max_attempts,
        })
    }
}
