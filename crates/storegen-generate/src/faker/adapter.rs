use chrono::NaiveDate;
use fake::Fake;
use fake::faker::address::en::CityName;
use fake::faker::company::en::CatchPhrase;
use fake::faker::internet::en::FreeEmail;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::Name;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{FactProvider, UniqueTracker};

/// [`FactProvider`] backed by the `fake` crate (en locale) over a ChaCha8 stream.
#[derive(Debug, Clone)]
pub struct FakeFacts {
    rng: ChaCha8Rng,
    unique: UniqueTracker,
}

impl FakeFacts {
    pub fn new(seed: u64) -> Self {
        Self::with_tracker(seed, UniqueTracker::default())
    }

    pub fn with_tracker(seed: u64, unique: UniqueTracker) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            unique,
        }
    }
}

impl FactProvider for FakeFacts {
    fn word(&mut self) -> String {
        Word().fake_with_rng(&mut self.rng)
    }

    fn sentence(&mut self, words: usize) -> String {
        // Vary length by +/-40% around the requested word count.
        let min = (words * 6 / 10).max(1);
        let max = (words * 14 / 10).max(min) + 1;
        Sentence(min..max).fake_with_rng(&mut self.rng)
    }

    fn person_name(&mut self) -> String {
        Name().fake_with_rng(&mut self.rng)
    }

    fn email(&mut self) -> String {
        FreeEmail().fake_with_rng(&mut self.rng)
    }

    fn city(&mut self) -> String {
        CityName().fake_with_rng(&mut self.rng)
    }

    fn catch_phrase(&mut self) -> String {
        CatchPhrase().fake_with_rng(&mut self.rng)
    }

    fn date_between(&mut self, start: NaiveDate, end: NaiveDate) -> NaiveDate {
        let span = (end - start).num_days().max(0);
        let offset = self.rng.random_range(0..=span);
        start + chrono::Duration::days(offset)
    }

    fn unique_tracker(&mut self) -> &mut UniqueTracker {
        &mut self.unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_yields_same_facts() {
        let mut a = FakeFacts::new(7);
        let mut b = FakeFacts::new(7);
        for _ in 0..20 {
            assert_eq!(a.word(), b.word());
            assert_eq!(a.person_name(), b.person_name());
            assert_eq!(a.email(), b.email());
        }
    }

    #[test]
    fn date_between_stays_in_bounds() {
        let mut facts = FakeFacts::new(1);
        let start = NaiveDate::from_ymd_opt(2024, 12, 25).expect("valid date");
        let end = NaiveDate::from_ymd_opt(2025, 1, 5).expect("valid date");
        for _ in 0..200 {
            let date = facts.date_between(start, end);
            assert!(date >= start && date <= end, "{date} out of range");
        }
        assert_eq!(facts.date_between(end, end), end);
    }

    #[test]
    fn sentence_is_non_empty() {
        let mut facts = FakeFacts::new(3);
        let sentence = facts.sentence(6);
        assert!(!sentence.trim().is_empty());
    }
}
