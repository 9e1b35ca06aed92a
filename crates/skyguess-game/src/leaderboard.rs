//! Static leaderboard shown on the stats screen.
//!
//! Illustrative only; it is not computed from any player's live state.

use crate::types::LeaderboardEntry;

const ENTRIES: &[(&str, u64, u32, &str)] = &[
    ("StormChaser", 2450, 25, "crown"),
    ("SunnyDays", 1980, 20, "medal"),
    ("CloudWatcher", 1720, 18, "medal"),
    ("RainMaker", 1350, 14, "star"),
    ("FrostByte", 990, 10, "star"),
];

pub fn entries() -> Vec<LeaderboardEntry> {
    ENTRIES
        .iter()
        .zip(1..)
        .map(|(&(name, points, level, badge), rank)| LeaderboardEntry {
            rank,
            name: name.to_string(),
            points,
            level,
            badge: badge.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_sequential_and_sorted() {
        let board = entries();
        assert_eq!(board.len(), 5);
        for (i, entry) in board.iter().enumerate() {
            assert_eq!(entry.rank as usize, i + 1);
        }
        assert!(board.windows(2).all(|w| w[0].points >= w[1].points));
    }
}
