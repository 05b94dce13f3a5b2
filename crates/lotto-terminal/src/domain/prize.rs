use std::collections::BTreeSet;

use serde::Serialize;

use super::draw::OfficialResult;
use super::ticket::Entry;

/// Prize tier awarded to a single entry
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum PrizeOutcome {
    /// All six numbers
    FirstPlace,
    /// Five numbers plus the bonus number
    SecondPlace,
    /// Five numbers
    ThirdPlace,
    /// Four numbers
    FourthPlace,
    /// Three numbers
    FifthPlace,
    NoPrize,
}

impl PrizeOutcome {
    /// Grades an entry against the official draw.
    ///
    /// Matches are counted over distinct numbers, so a scanned entry with
    /// repeated numbers never scores more than its distinct values allow.
    pub fn evaluate(entry: &Entry, result: &OfficialResult) -> Self {
        let distinct: BTreeSet<u8> = entry.numbers.iter().copied().collect();
        let match_count = distinct
            .iter()
            .filter(|number| result.is_winning_number(**number))
            .count();
        let has_bonus = entry.contains(result.bonus_number);

        match (match_count, has_bonus) {
            (6, _) => PrizeOutcome::FirstPlace,
            (5, true) => PrizeOutcome::SecondPlace,
            (5, false) => PrizeOutcome::ThirdPlace,
            (4, _) => PrizeOutcome::FourthPlace,
            (3, _) => PrizeOutcome::FifthPlace,
            _ => PrizeOutcome::NoPrize,
        }
    }

    /// Tier number, `None` when nothing was won
    pub fn rank(&self) -> Option<u8> {
        match self {
            PrizeOutcome::FirstPlace => Some(1),
            PrizeOutcome::SecondPlace => Some(2),
            PrizeOutcome::ThirdPlace => Some(3),
            PrizeOutcome::FourthPlace => Some(4),
            PrizeOutcome::FifthPlace => Some(5),
            PrizeOutcome::NoPrize => None,
        }
    }

    pub fn is_winning(&self) -> bool {
        self.rank().is_some()
    }
}
