use serde::Serialize;

use super::ticket::NUMBERS_PER_ENTRY;

/// Official outcome of one draw
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OfficialResult {
    pub round: u32,
    pub winning_numbers: [u8; NUMBERS_PER_ENTRY],
    pub bonus_number: u8,
}

impl OfficialResult {
    pub fn new(round: u32, winning_numbers: [u8; NUMBERS_PER_ENTRY], bonus_number: u8) -> Self {
        Self {
            round,
            winning_numbers,
            bonus_number,
        }
    }

    pub fn is_winning_number(&self, number: u8) -> bool {
        self.winning_numbers.contains(&number)
    }
}
