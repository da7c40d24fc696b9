//! Seeded Generator
//!
//! Maps `(index, theme)` to an [`Item`] with no stored state. Every item draws
//! from its own stream seeded by its index, so any window of the dataset can be
//! regenerated in any order without touching its neighbours.

mod seeded;

pub use seeded::{Mulberry32, item_seed};

use crate::constants::{TIMESTAMP_ANCHOR_MS, TIMESTAMP_WINDOW_DAYS};
use crate::domain::{Item, Theme};

const DAY_MS: u64 = 86_400_000;

/// Generate the item at `index` for `theme`
pub fn generate_item(index: usize, theme: Theme) -> Item {
    let vocab = theme.vocabulary();
    let mut rng = Mulberry32::new(item_seed(index, theme.discriminant()));

    let title = *rng.pick(vocab.titles);
    let subtitle = *rng.pick(vocab.subtitles);
    let category = *rng.pick(vocab.categories);
    let tag_count = 1 + rng.below(3);
    let tags = rng.pick_n(vocab.tags, tag_count);
    let value = (rng.next_f64() * 10_000.0).floor() / 100.0;
    let age_ms = (rng.next_f64() * (DAY_MS * TIMESTAMP_WINDOW_DAYS) as f64).floor() as i64;

    Item {
        id: index,
        title,
        subtitle,
        category,
        tags,
        value,
        timestamp_ms: TIMESTAMP_ANCHOR_MS - age_ms,
        avatar: vocab.avatar,
    }
}

/// Generate `count` consecutive items starting at `start`
pub fn generate_batch(start: usize, count: usize, theme: Theme) -> Vec<Item> {
    (start..start.saturating_add(count))
        .map(|index| generate_item(index, theme))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        for theme in Theme::ALL {
            for index in [0, 1, 17, 9_999, 99_999] {
                assert_eq!(generate_item(index, theme), generate_item(index, theme));
            }
        }
    }

    #[test]
    fn test_item_fields_in_range() {
        let window_ms = (DAY_MS * TIMESTAMP_WINDOW_DAYS) as i64;
        for theme in Theme::ALL {
            for index in 0..500 {
                let item = generate_item(index, theme);
                assert_eq!(item.id, index);
                assert!((1..=3).contains(&item.tags.len()));
                assert!((0.0..100.0).contains(&item.value));
                assert_eq!((item.value * 100.0).round() / 100.0, item.value);
                assert!(item.timestamp_ms <= TIMESTAMP_ANCHOR_MS);
                assert!(item.timestamp_ms > TIMESTAMP_ANCHOR_MS - window_ms);
                assert_eq!(item.avatar, theme.vocabulary().avatar);
            }
        }
    }

    #[test]
    fn test_batch_matches_single_calls() {
        let batch = generate_batch(40, 25, Theme::Social);
        assert_eq!(batch.len(), 25);
        for (offset, item) in batch.iter().enumerate() {
            assert_eq!(*item, generate_item(40 + offset, Theme::Social));
        }
        assert!(generate_batch(10, 0, Theme::Logs).is_empty());
    }

    #[test]
    fn test_out_of_order_generation() {
        let forward: Vec<Item> = (0..50).map(|i| generate_item(i, Theme::Tasks)).collect();
        let backward: Vec<Item> = (0..50)
            .rev()
            .map(|i| generate_item(i, Theme::Tasks))
            .collect();
        assert!(forward.iter().eq(backward.iter().rev()));
    }

    #[test]
    fn test_themes_differ() {
        let ecommerce = generate_item(3, Theme::Ecommerce);
        let logs = generate_item(3, Theme::Logs);
        assert_ne!(ecommerce.title, logs.title);
    }
}
