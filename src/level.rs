//! JLPT levels and the legacy 4-level to 5-level mapping.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use crate::kanjidic::Character;

/// Modern JLPT level. Ordered by difficulty, so `N1` is the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JlptLevel {
    N5,
    N4,
    N3,
    N2,
    N1,
}

impl JlptLevel {
    /// Deck order, easiest first.
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];

    /// 1 for N5 up to 5 for N1.
    pub fn difficulty(self) -> u8 {
        match self {
            JlptLevel::N5 => 1,
            JlptLevel::N4 => 2,
            JlptLevel::N3 => 3,
            JlptLevel::N2 => 4,
            JlptLevel::N1 => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }
}

impl Ord for JlptLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.difficulty().cmp(&other.difficulty())
    }
}

impl PartialOrd for JlptLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps a Kanjidic2 legacy level (4 = easiest, 1 = hardest) onto the modern
/// scale. Legacy level 2 straddles N3 and N2; school grades 1-6 land in N3.
/// Anything outside 1..=4 has no modern level.
pub fn map_legacy_level(level: Option<u8>, grade: Option<u8>) -> Option<JlptLevel> {
    match level? {
        4 => Some(JlptLevel::N5),
        3 => Some(JlptLevel::N4),
        2 => match grade {
            Some(g) if g <= 6 => Some(JlptLevel::N3),
            _ => Some(JlptLevel::N2),
        },
        1 => Some(JlptLevel::N1),
        _ => None,
    }
}

/// Literal -> modern level for every character that carries a mappable level.
pub type LevelMap = HashMap<String, JlptLevel>;

pub fn build_level_map(characters: &[Character]) -> LevelMap {
    characters
        .iter()
        .filter(|c| !c.literal.is_empty())
        .filter_map(|c| {
            map_legacy_level(c.misc.jlpt_level, c.misc.grade).map(|lvl| (c.literal.clone(), lvl))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_other_than_two_ignore_grade() {
        let grades = std::iter::once(None).chain((1..=20).map(Some));
        for grade in grades {
            assert_eq!(map_legacy_level(Some(4), grade), Some(JlptLevel::N5));
            assert_eq!(map_legacy_level(Some(3), grade), Some(JlptLevel::N4));
            assert_eq!(map_legacy_level(Some(1), grade), Some(JlptLevel::N1));
        }
    }

    #[test]
    fn test_level_two_splits_on_grade() {
        assert_eq!(map_legacy_level(Some(2), None), Some(JlptLevel::N2));
        for g in 1..=20u8 {
            let expected = if g <= 6 { JlptLevel::N3 } else { JlptLevel::N2 };
            assert_eq!(map_legacy_level(Some(2), Some(g)), Some(expected), "grade {g}");
        }
    }

    #[test]
    fn test_unknown_levels_are_unmapped() {
        assert_eq!(map_legacy_level(None, Some(1)), None);
        assert_eq!(map_legacy_level(Some(0), None), None);
        assert_eq!(map_legacy_level(Some(5), Some(3)), None);
    }

    #[test]
    fn test_ordering_is_by_difficulty() {
        assert!(JlptLevel::N1 > JlptLevel::N2);
        assert!(JlptLevel::N4 > JlptLevel::N5);
        assert_eq!(
            [JlptLevel::N5, JlptLevel::N1, JlptLevel::N3].into_iter().max(),
            Some(JlptLevel::N1)
        );
        let mut sorted = JlptLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, JlptLevel::ALL);
    }

    #[test]
    fn test_build_level_map_skips_unclassified() {
        let chars: Vec<Character> = serde_json::from_str(
            r#"[
                {"literal": "日", "misc": {"jlptLevel": 4, "grade": 1}},
                {"literal": "学", "misc": {"jlptLevel": 2, "grade": 1}},
                {"literal": "曜", "misc": {"jlptLevel": 2, "grade": 8}},
                {"literal": "鬱", "misc": {}},
                {"literal": "", "misc": {"jlptLevel": 1}}
            ]"#,
        )
        .unwrap();

        let map = build_level_map(&chars);
        assert_eq!(map.len(), 3);
        assert_eq!(map["日"], JlptLevel::N5);
        assert_eq!(map["学"], JlptLevel::N3);
        assert_eq!(map["曜"], JlptLevel::N2);
    }
}
