use thiserror::Error;

/// Errors raised while interpreting a scanned QR payload
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Error)]
#[repr(u32)]
pub enum ParseError {
    #[error("payload is not a lottery ticket code")]
    NotALotteryCode = 1,
}

/// Errors raised while looking up the official result of a round.
///
/// Unknown rounds, undrawn rounds and transport failures all collapse into
/// the same kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Error)]
#[repr(u32)]
pub enum LookupError {
    #[error("result for the requested round is unavailable")]
    Unavailable = 2,
}

impl ParseError {
    pub fn code(&self) -> u32 {
        *self as u32
    }
}

impl LookupError {
    pub fn code(&self) -> u32 {
        *self as u32
    }
}
