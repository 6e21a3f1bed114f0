//! Category filtering and shuffling of working sets.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::card::Flashcard;

/// Snapshot of the cards in `category` (case-insensitive), in store order.
/// An empty filter selects everything.
pub fn select(cards: &[Flashcard], category: &str) -> Vec<Flashcard> {
    if category.is_empty() {
        return cards.to_vec();
    }
    let wanted = category.to_lowercase();
    cards
        .iter()
        .filter(|c| c.category.to_lowercase() == wanted)
        .cloned()
        .collect()
}

/// Two independent random streams: one orders the cards of a session, the
/// other orders the options of multiple-choice cards.
#[derive(Debug)]
pub struct Shuffler {
    deck: StdRng,
    options: StdRng,
}

impl Shuffler {
    pub fn from_entropy() -> Self {
        Self {
            deck: StdRng::from_os_rng(),
            options: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        let mut root = StdRng::seed_from_u64(seed);
        Self {
            deck: StdRng::from_rng(&mut root),
            options: StdRng::from_rng(&mut root),
        }
    }

    pub fn shuffle_cards<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.deck);
    }

    /// Shuffled copy of `options`; the card itself is left alone.
    pub fn shuffled_options(&mut self, options: &[String]) -> Vec<String> {
        let mut out = options.to_vec();
        out.shuffle(&mut self.options);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn card(id: u64, category: &str) -> Flashcard {
        Flashcard {
            id,
            question: format!("q{id}"),
            answer: "a".into(),
            correct_answers: vec!["a".into()],
            options: vec![],
            category: category.into(),
            created_at: Utc::now(),
            last_reviewed: None,
            times_reviewed: 0,
            times_correct: 0,
        }
    }

    #[test]
    fn filter_is_case_insensitive_and_keeps_order() {
        let cards = vec![
            card(1, "Math"),
            card(2, "Geo"),
            card(3, "MATH"),
            card(4, "math "),
            card(5, "math"),
        ];
        let ids: Vec<u64> = select(&cards, "math").iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert!(select(&cards, "History").is_empty());
        assert_eq!(select(&cards, "").len(), 5);
    }

    #[test]
    fn seeded_shuffles_repeat() {
        let mut a = Shuffler::seeded(7);
        let mut b = Shuffler::seeded(7);
        let mut xs: Vec<u32> = (0..20).collect();
        let mut ys = xs.clone();
        a.shuffle_cards(&mut xs);
        b.shuffle_cards(&mut ys);
        assert_eq!(xs, ys);

        let mut sorted = xs.clone();
        sorted.sort();
        assert_eq!(sorted, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn option_stream_does_not_disturb_card_stream() {
        let opts: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();

        let mut plain = Shuffler::seeded(11);
        let mut busy = Shuffler::seeded(11);
        for _ in 0..5 {
            busy.shuffled_options(&opts);
        }

        let mut xs: Vec<u32> = (0..10).collect();
        let mut ys = xs.clone();
        plain.shuffle_cards(&mut xs);
        busy.shuffle_cards(&mut ys);
        assert_eq!(xs, ys);
    }
}
