//! Selection strategies making up the fallback chain.
//!
//! Each strategy is a pure function over the menu; an empty result means
//! "advance to the next strategy". The model-backed strategy lives in
//! [`crate::ranking`] because it performs I/O.

use rand::{Rng, seq::SliceRandom};

use crate::model::MenuItem;

/// Result cap applied by every strategy and by the orchestrator.
pub const DEFAULT_LIMIT: usize = 5;

/// One step of a fallback plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Case-insensitive substring match over titles.
    Lexical { query: String },
    /// Exact (case-insensitive) availability tag match, shuffled.
    MealType { meal_type: String },
    /// Ask the text model to rank the whole menu. Both hints absent means a generic request.
    RankingModel {
        query: Option<String>,
        meal_type: Option<String>,
    },
    /// Uniform sample without replacement.
    RandomSample,
}

impl Strategy {
    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Lexical { .. } => "lexical",
            Strategy::MealType { .. } => "meal_type",
            Strategy::RankingModel { .. } => "ranking_model",
            Strategy::RandomSample => "random_sample",
        }
    }
}

/// Items whose title contains `query` (case-insensitive), catalog order, at most `limit`.
pub fn lexical_match(query: &str, menu: &[MenuItem], limit: usize) -> Vec<MenuItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    menu.iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .take(limit)
        .cloned()
        .collect()
}

/// Items tagged with `meal_type` (case-insensitive equality), shuffled, at most `limit`.
pub fn meal_type_filter<R: Rng + ?Sized>(
    meal_type: &str,
    menu: &[MenuItem],
    limit: usize,
    rng: &mut R,
) -> Vec<MenuItem> {
    let wanted = meal_type.trim().to_lowercase();
    let mut matching: Vec<MenuItem> = menu
        .iter()
        .filter(|item| item.availability.trim().to_lowercase() == wanted)
        .cloned()
        .collect();
    matching.shuffle(rng);
    matching.truncate(limit);
    matching
}

/// `min(limit, menu.len())` distinct items chosen uniformly at random.
pub fn random_sample<R: Rng + ?Sized>(menu: &[MenuItem], limit: usize, rng: &mut R) -> Vec<MenuItem> {
    menu.choose_multiple(rng, limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use std::collections::{HashMap, HashSet};

    fn item(id: &str, title: &str, availability: &str) -> MenuItem {
        MenuItem {
            id: id.into(),
            title: title.into(),
            description: None,
            availability: availability.into(),
            rating: 4.0,
            vendor_id: "v1".into(),
        }
    }

    fn menu(n: usize) -> Vec<MenuItem> {
        (0..n)
            .map(|i| item(&i.to_string(), &format!("Dish {i}"), if i % 2 == 0 { "lunch" } else { "dinner" }))
            .collect()
    }

    #[test]
    fn lexical_is_case_insensitive_and_keeps_catalog_order() {
        let menu = vec![
            item("1", "Veg Burger", "lunch"),
            item("2", "Chicken Wrap", "lunch"),
            item("3", "VEGAN bowl", "dinner"),
        ];
        let ids: Vec<_> = lexical_match("veg", &menu, DEFAULT_LIMIT)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn lexical_caps_results_and_ignores_blank_query() {
        let menu = menu(12);
        let hits = lexical_match("dish", &menu, DEFAULT_LIMIT);
        assert_eq!(hits.len(), DEFAULT_LIMIT);
        assert!(hits.iter().all(|i| i.title.to_lowercase().contains("dish")));
        assert!(lexical_match("   ", &menu, DEFAULT_LIMIT).is_empty());
        assert!(lexical_match("pizza", &menu, DEFAULT_LIMIT).is_empty());
    }

    #[test]
    fn meal_type_returns_only_matching_tags() {
        let mut menu = menu(9);
        menu.push(item("x", "Pancakes", "Breakfast"));
        let mut rng = StdRng::seed_from_u64(7);

        let lunch = meal_type_filter("LUNCH", &menu, DEFAULT_LIMIT, &mut rng);
        assert_eq!(lunch.len(), 5);
        assert!(lunch.iter().all(|i| i.availability.eq_ignore_ascii_case("lunch")));

        let breakfast = meal_type_filter("breakfast", &menu, DEFAULT_LIMIT, &mut rng);
        assert_eq!(breakfast.len(), 1);
        assert!(meal_type_filter("brunch", &menu, DEFAULT_LIMIT, &mut rng).is_empty());
    }

    #[test]
    fn random_sample_is_distinct_and_sized() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [0, 1, 3, 5, 20] {
            let menu = menu(n);
            let picked = random_sample(&menu, DEFAULT_LIMIT, &mut rng);
            assert_eq!(picked.len(), n.min(DEFAULT_LIMIT));
            let ids: HashSet<_> = picked.iter().map(|i| i.id.as_str()).collect();
            assert_eq!(ids.len(), picked.len());
            assert!(picked.iter().all(|p| menu.contains(p)));
        }
    }

    #[test]
    fn meal_type_order_is_a_permutation() {
        let menu: Vec<_> = (0..50).map(|i| item(&i.to_string(), "Dish", "lunch")).collect();
        let picked = meal_type_filter("lunch", &menu, menu.len(), &mut StdRng::seed_from_u64(1));

        let mut ids: Vec<u32> = picked.iter().map(|i| i.id.parse().unwrap()).collect();
        assert_ne!(ids, (0..50).collect::<Vec<_>>());
        ids.sort_unstable();
        assert_eq!(ids, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn meal_type_shuffle_is_uniform() {
        let menu = vec![
            item("a", "Idli", "breakfast"),
            item("b", "Dosa", "breakfast"),
            item("c", "Poha", "breakfast"),
        ];
        let mut rng = StdRng::seed_from_u64(2024);
        let rounds = 60_000;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..rounds {
            let order: String = meal_type_filter("breakfast", &menu, DEFAULT_LIMIT, &mut rng)
                .iter()
                .map(|i| i.id.as_str())
                .collect();
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 6, "{counts:?}");
        for (order, n) in &counts {
            let share = *n as f64 / rounds as f64;
            assert!((share - 1.0 / 6.0).abs() < 0.01, "{order}: {share}");
        }
    }

    #[test]
    fn random_sample_picks_each_item_equally() {
        let menu = menu(3);
        let mut rng = StdRng::seed_from_u64(77);
        let rounds = 30_000;

        let mut counts: HashMap<String, usize> = HashMap::new();
        for _ in 0..rounds {
            for picked in random_sample(&menu, 1, &mut rng) {
                *counts.entry(picked.id).or_default() += 1;
            }
        }

        assert_eq!(counts.values().sum::<usize>(), rounds);
        for (id, n) in &counts {
            let share = *n as f64 / rounds as f64;
            assert!((share - 1.0 / 3.0).abs() < 0.015, "{id}: {share}");
        }
    }

    #[test]
    fn seeded_shuffles_are_reproducible() {
        let menu = menu(10);
        let a = random_sample(&menu, 5, &mut StdRng::seed_from_u64(99));
        let b = random_sample(&menu, 5, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn tiny_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(meal_type_filter("lunch", &[], DEFAULT_LIMIT, &mut rng).is_empty());
        assert!(random_sample(&[], DEFAULT_LIMIT, &mut rng).is_empty());
        let one = menu(1);
        assert_eq!(random_sample(&one, DEFAULT_LIMIT, &mut rng), one);
        assert!(random_sample(&one, 0, &mut rng).is_empty());
    }
}
