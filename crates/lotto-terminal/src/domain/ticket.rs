use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use url::Url;

use super::errors::ParseError;

/// Numbers picked per game
pub const NUMBERS_PER_ENTRY: usize = 6;

/// Width of a single number field inside an entry block
const FIELD_WIDTH: usize = 2;

/// How a game's numbers were chosen at the point of sale
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Method {
    /// Player filled in every number
    Manual,
    /// Player filled in some numbers, the machine picked the rest
    SemiAuto,
    /// Machine picked every number
    Auto,
    Unknown,
}

impl Method {
    /// Maps the marker letter that prefixes each entry block
    pub fn from_marker(marker: char) -> Self {
        match marker {
            'm' => Method::Manual,
            's' => Method::SemiAuto,
            'q' => Method::Auto,
            _ => Method::Unknown,
        }
    }
}

/// One game on the ticket
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Entry {
    pub method: Method,
    /// Always sorted ascending; duplicates are kept as scanned
    pub numbers: [u8; NUMBERS_PER_ENTRY],
}

impl Entry {
    pub fn new(method: Method, mut numbers: [u8; NUMBERS_PER_ENTRY]) -> Self {
        numbers.sort_unstable();
        Self { method, numbers }
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    /// True when the same number appears more than once
    pub fn has_duplicates(&self) -> bool {
        let mut sorted = self.numbers;
        sorted.sort_unstable();
        sorted.windows(2).any(|pair| pair[0] == pair[1])
    }
}

/// Round and games decoded from a ticket QR code
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ParsedTicket {
    pub round: u32,
    pub entries: Vec<Entry>,
}

/// Interpreter for the URL encoded on the ticket.
///
/// Payload grammar carried in the `v` query parameter:
///
/// ```text
/// payload := round block* trailer?
/// round   := [0-9]{4}
/// block   := [msq] [0-9]{12}
/// ```
pub struct TicketParser;

impl TicketParser {
    const PAYLOAD_PARAM: &'static str = "v";
    const PAYLOAD_SUFFIX: &'static str = ".net";
    const ROUND_DIGITS: usize = 4;
    const BLOCK_PATTERN: &'static str = r"[msq][0-9]{12}";

    /// Parses a scanned string into a ticket.
    ///
    /// A ticket without any recognisable game block is still returned; only
    /// a missing payload or an unreadable round is an error.
    pub fn parse(raw: &str) -> Result<ParsedTicket, ParseError> {
        let payload = Self::extract_payload(raw)?;
        let payload = payload
            .strip_suffix(Self::PAYLOAD_SUFFIX)
            .unwrap_or(payload.as_str());

        let round = Self::read_round(payload)?;
        let entries = Self::read_entries(&payload[Self::ROUND_DIGITS..]);

        Ok(ParsedTicket { round, entries })
    }

    fn extract_payload(raw: &str) -> Result<String, ParseError> {
        let url = Url::parse(raw.trim()).map_err(|_| ParseError::NotALotteryCode)?;

        url.query_pairs()
            .find(|(name, _)| name == Self::PAYLOAD_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or(ParseError::NotALotteryCode)
    }

    fn read_round(payload: &str) -> Result<u32, ParseError> {
        let digits = payload
            .get(..Self::ROUND_DIGITS)
            .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
            .ok_or(ParseError::NotALotteryCode)?;

        digits.parse().map_err(|_| ParseError::NotALotteryCode)
    }

    fn read_entries(body: &str) -> Vec<Entry> {
        Self::block_pattern()
            .find_iter(body)
            .filter_map(|block| Self::read_block(block.as_str()))
            .collect()
    }

    // A block that does not split into exactly six numbers is dropped.
    fn read_block(block: &str) -> Option<Entry> {
        let mut chars = block.chars();
        let method = Method::from_marker(chars.next()?);
        let digits = chars.as_str();

        let fields: Vec<u8> = digits
            .as_bytes()
            .chunks(FIELD_WIDTH)
            .filter_map(|field| std::str::from_utf8(field).ok()?.parse().ok())
            .collect();

        let numbers: [u8; NUMBERS_PER_ENTRY] = fields.try_into().ok()?;
        Some(Entry::new(method, numbers))
    }

    fn block_pattern() -> &'static Regex {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        PATTERN.get_or_init(|| {
            Regex::new(Self::BLOCK_PATTERN).expect("entry block pattern is valid")
        })
    }
}
