pub mod draw;
mod errors;
pub mod prize;
pub mod ticket;

pub use draw::OfficialResult;
pub use errors::{LookupError, ParseError};
pub use prize::PrizeOutcome;
pub use ticket::{Entry, Method, ParsedTicket, TicketParser, NUMBERS_PER_ENTRY};
