//! Percentile-based frequency tiers.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use clap::ValueEnum;

use crate::kanjidic::Character;

/// Frequency quartile, 1 (most frequent) to 4 (least frequent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(u8);

impl Tier {
    pub const MOST_FREQUENT: Tier = Tier(1);

    pub fn new(value: u8) -> Option<Tier> {
        (1..=4).contains(&value).then_some(Tier(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    fn from_percentile(percentile: f64) -> Tier {
        if percentile < 25.0 {
            Tier(1)
        } else if percentile < 50.0 {
            Tier(2)
        } else if percentile < 75.0 {
            Tier(3)
        } else {
            Tier(4)
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a word's tier is derived from the tiers of its kanji.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum TierStrategy {
    /// Least frequent kanji wins.
    #[default]
    Max,
    /// Mean of the matched tiers, rounded up.
    Average,
    /// Tier of the first matched kanji in scan order.
    First,
}

impl TierStrategy {
    /// Collapses matched tiers into one. `None` only for an empty slice.
    pub fn combine(self, tiers: &[Tier]) -> Option<Tier> {
        let first = *tiers.first()?;
        let tier = match self {
            TierStrategy::Max => tiers.iter().copied().max().unwrap_or(first),
            TierStrategy::First => first,
            TierStrategy::Average => {
                let sum: usize = tiers.iter().map(|t| usize::from(t.0)).sum();
                let mean = sum.div_ceil(tiers.len());
                // mean of values in 1..=4 stays in 1..=4
                Tier(mean as u8)
            }
        };
        Some(tier)
    }
}

/// Assigns quartile tiers over a ranked population. Ranks sort ascending
/// (rank 1 is the most frequent); equal ranks keep their input order.
/// Index `i` of `n` falls in tier 1 while `i / n * 100 < 25`, tier 2 below
/// 50, tier 3 below 75, tier 4 otherwise.
pub fn compute_tiers<K>(ranked: &[(K, u32)]) -> HashMap<K, Tier>
where
    K: Clone + Eq + Hash,
{
    let mut order: Vec<&(K, u32)> = ranked.iter().collect();
    order.sort_by_key(|(_, rank)| *rank);

    let total = order.len() as f64;
    order
        .into_iter()
        .enumerate()
        .map(|(i, (key, _))| {
            let percentile = i as f64 / total * 100.0;
            (key.clone(), Tier::from_percentile(percentile))
        })
        .collect()
}

/// Literal -> tier for every character with a frequency rank.
pub type TierMap = HashMap<String, Tier>;

/// Frequency ranks in collection order. A literal seen twice keeps its first
/// position and its last rank.
pub fn frequency_ranks(characters: &[Character]) -> Vec<(String, u32)> {
    let mut ranks: Vec<(String, u32)> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();

    for c in characters.iter().filter(|c| !c.literal.is_empty()) {
        let Some(rank) = c.misc.frequency else {
            continue;
        };
        match seen.get(c.literal.as_str()) {
            Some(&idx) => ranks[idx].1 = rank,
            None => {
                seen.insert(&c.literal, ranks.len());
                ranks.push((c.literal.clone(), rank));
            }
        }
    }

    ranks
}

pub fn build_tier_map(characters: &[Character]) -> TierMap {
    compute_tiers(&frequency_ranks(characters))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiers(values: &[u8]) -> Vec<Tier> {
        values.iter().map(|&v| Tier::new(v).unwrap()).collect()
    }

    #[test]
    fn test_empty_input() {
        let empty: Vec<(String, u32)> = Vec::new();
        assert!(compute_tiers(&empty).is_empty());
    }

    #[test]
    fn test_hundred_keys_split_evenly() {
        // Reverse insertion so the sort does real work.
        let ranked: Vec<(u32, u32)> = (1..=100).rev().map(|r| (r, r)).collect();
        let map = compute_tiers(&ranked);

        for rank in 1..=100u32 {
            let index = rank - 1;
            let expected = match index {
                0..=24 => 1,
                25..=49 => 2,
                50..=74 => 3,
                _ => 4,
            };
            assert_eq!(map[&rank].get(), expected, "rank {rank}");
        }
    }

    #[test]
    fn test_boundaries_belong_to_following_tier() {
        // With 4 keys, index 1 sits exactly on 25% and goes to tier 2.
        let ranked = vec![("a", 10), ("b", 20), ("c", 30), ("d", 40)];
        let map = compute_tiers(&ranked);
        assert_eq!(map["a"].get(), 1);
        assert_eq!(map["b"].get(), 2);
        assert_eq!(map["c"].get(), 3);
        assert_eq!(map["d"].get(), 4);
    }

    #[test]
    fn test_small_populations_use_fewer_tiers() {
        let map = compute_tiers(&[("only", 7)]);
        assert_eq!(map["only"], Tier::MOST_FREQUENT);

        let map = compute_tiers(&[("a", 1), ("b", 2), ("c", 3)]);
        assert_eq!(map["a"].get(), 1);
        assert_eq!(map["b"].get(), 2);
        assert_eq!(map["c"].get(), 3);
    }

    #[test]
    fn test_tiers_are_monotonic_in_rank() {
        let ranked: Vec<(usize, u32)> = [90, 3, 41, 3, 7, 200, 55, 1, 18, 64, 12]
            .into_iter()
            .enumerate()
            .collect();
        let map = compute_tiers(&ranked);

        for (ka, ra) in &ranked {
            for (kb, rb) in &ranked {
                if ra < rb {
                    assert!(map[ka] <= map[kb]);
                }
            }
        }
        let used: std::collections::HashSet<_> = map.values().collect();
        assert_eq!(used.len(), 4);
    }

    #[test]
    fn test_equal_ranks_keep_input_order() {
        let ranked = vec![("x", 5), ("y", 5), ("z", 5), ("w", 5)];
        let map = compute_tiers(&ranked);
        assert_eq!(map["x"].get(), 1);
        assert_eq!(map["y"].get(), 2);
        assert_eq!(map["z"].get(), 3);
        assert_eq!(map["w"].get(), 4);
    }

    #[test]
    fn test_strategies() {
        let matched = tiers(&[4, 1]);
        assert_eq!(TierStrategy::Max.combine(&matched).unwrap().get(), 4);
        assert_eq!(TierStrategy::Average.combine(&matched).unwrap().get(), 3);
        assert_eq!(TierStrategy::First.combine(&matched).unwrap().get(), 4);

        let matched = tiers(&[1, 2, 2]);
        assert_eq!(TierStrategy::Average.combine(&matched).unwrap().get(), 2);
        assert_eq!(TierStrategy::First.combine(&matched).unwrap().get(), 1);

        assert_eq!(TierStrategy::Max.combine(&[]), None);
    }

    #[test]
    fn test_build_tier_map_ignores_unranked() {
        let chars: Vec<Character> = serde_json::from_str(
            r#"[
                {"literal": "日", "misc": {"frequency": 1}},
                {"literal": "本", "misc": {"frequency": 10}},
                {"literal": "曜", "misc": {}},
                {"literal": "語", "misc": {"frequency": 301}},
                {"literal": "学", "misc": {"frequency": 62}}
            ]"#,
        )
        .unwrap();

        let map = build_tier_map(&chars);
        assert_eq!(map.len(), 4);
        assert!(!map.contains_key("曜"));
        assert_eq!(map["日"].get(), 1);
        assert_eq!(map["本"].get(), 2);
        assert_eq!(map["学"].get(), 3);
        assert_eq!(map["語"].get(), 4);
    }
}
