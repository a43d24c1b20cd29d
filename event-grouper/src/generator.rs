//! Synthetic event generation for test fixtures
//!
//! Every function takes the random source explicitly, so a seeded RNG
//! reproduces the same events.

use crate::event::Event;
use crate::timestamp::Timestamp;
use crate::types::{EventCategory, EventError, EventVenue, Result};
use chrono::{Days, NaiveDate};
use rand::distr::Alphanumeric;
use rand::Rng;

/// Attendee pool generated events draw from
pub const ATTENDEE_NAMES: [&str; 5] = ["Alex", "Vova", "Sergey", "Roma", "Polina"];

const MAX_TITLE_WORDS: usize = 5;
const MAX_WORD_LENGTH: usize = 20;

/// Generate one random event dated within `[from, to]`
///
/// With `category` set, every event gets that category; otherwise it is picked
/// uniformly.
///
/// # Errors
/// Returns [`EventError::InvalidDateRange`] if `from` is after `to`.
pub fn generate_event<R: Rng + ?Sized>(
    rng: &mut R,
    from: NaiveDate,
    to: NaiveDate,
    category: Option<EventCategory>,
) -> Result<Event> {
    let invalid_range = || EventError::InvalidDateRange { from, to };

    let span = u64::try_from((to - from).num_days()).map_err(|_| invalid_range())?;
    let date = from
        .checked_add_days(Days::new(rng.random_range(0..=span)))
        .ok_or_else(invalid_range)?;
    let datetime = date
        .and_hms_opt(rng.random_range(0..24), rng.random_range(0..60), 0)
        .ok_or_else(invalid_range)?;

    let category = category.unwrap_or_else(|| pick(rng, &EventCategory::ALL));
    let venue = pick(rng, &EventVenue::ALL);

    Ok(Event::from_parts(
        Timestamp::from(datetime),
        category,
        random_title(rng),
        random_attendees(rng),
        venue,
    ))
}

/// Generate `count` random events dated within `[from, to]`
pub fn generate_events<R: Rng + ?Sized>(
    rng: &mut R,
    from: NaiveDate,
    to: NaiveDate,
    count: usize,
) -> Result<Vec<Event>> {
    (0..count)
        .map(|_| generate_event(rng, from, to, None))
        .collect()
}

fn pick<R: Rng + ?Sized, T: Copy>(rng: &mut R, items: &[T]) -> T {
    items[rng.random_range(0..items.len())]
}

/// 1-5 words of 1-20 alphanumeric characters
fn random_title<R: Rng + ?Sized>(rng: &mut R) -> String {
    let words = rng.random_range(1..=MAX_TITLE_WORDS);
    (0..words)
        .map(|_| random_word(rng))
        .collect::<Vec<_>>()
        .join(" ")
}

fn random_word<R: Rng + ?Sized>(rng: &mut R) -> String {
    let length = rng.random_range(1..=MAX_WORD_LENGTH);
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// Non-empty subset of [`ATTENDEE_NAMES`], without repeats
fn random_attendees<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let count = rng.random_range(1..=ATTENDEE_NAMES.len());
    rand::seq::index::sample(rng, ATTENDEE_NAMES.len(), count)
        .into_iter()
        .map(|i| ATTENDEE_NAMES[i].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_generated_events_are_valid_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let (from, to) = (date(2023, 10, 10), date(2023, 10, 17));

        for event in generate_events(&mut rng, from, to, 200).unwrap() {
            let day = event.timestamp().date();
            assert!(day >= from && day <= to);

            // Record form must convert back to the same event
            assert_eq!(Event::from_record(&event.to_record()).unwrap(), event);

            let words: Vec<_> = event.title().split(' ').collect();
            assert!((1..=MAX_TITLE_WORDS).contains(&words.len()));
            assert!(words
                .iter()
                .all(|w| (1..=MAX_WORD_LENGTH).contains(&w.len())
                    && w.chars().all(|c| c.is_ascii_alphanumeric())));

            let attendees = event.attendees();
            assert!(!attendees.is_empty() && attendees.len() <= ATTENDEE_NAMES.len());
            let unique: HashSet<_> = attendees.iter().collect();
            assert_eq!(unique.len(), attendees.len());
            assert!(attendees.iter().all(|a| ATTENDEE_NAMES.contains(&a.as_str())));
        }
    }

    #[test]
    fn test_single_day_range() {
        let mut rng = StdRng::seed_from_u64(1);
        let day = date(2024, 2, 29);
        let event = generate_event(&mut rng, day, day, None).unwrap();
        assert_eq!(event.date_key(), "2024-02-29");
        assert_eq!(event.timestamp().to_string().len(), "2024-02-29T00:00:00".len());
    }

    #[test]
    fn test_fixed_category() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let event = generate_event(
                &mut rng,
                date(2023, 1, 1),
                date(2023, 12, 31),
                Some(EventCategory::Other),
            )
            .unwrap();
            assert_eq!(event.category(), EventCategory::Other);
        }
    }

    #[test]
    fn test_reversed_range_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = generate_event(&mut rng, date(2023, 10, 17), date(2023, 10, 16), None).unwrap_err();
        assert!(matches!(err, EventError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_same_seed_same_events() {
        let (from, to) = (date(2023, 10, 1), date(2023, 10, 31));
        let a = generate_events(&mut StdRng::seed_from_u64(42), from, to, 10).unwrap();
        let b = generate_events(&mut StdRng::seed_from_u64(42), from, to, 10).unwrap();
        assert_eq!(a, b);
    }
}
