//! Lottery ticket checker for shop terminals.
//!
//! A scanned ticket QR code is parsed into its round and games, the official
//! draw for that round is fetched, and every game is graded into a prize tier.

mod application;
mod domain;
mod infrastructure;

pub use application::{
    CheckError, CheckTicketCommand, EntryReport, GetResultQuery, ParseTicketQuery, Popup,
    ScanSession, SessionEffect, SessionEvent, SessionState, Terminal, TerminalInput,
    TicketReport,
};
pub use domain::{
    Entry, LookupError, Method, OfficialResult, ParseError, ParsedTicket, PrizeOutcome,
    TicketParser,
};
pub use infrastructure::config::{DEFAULT_DISPLAY_WINDOW, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT};
pub use infrastructure::console::SCAN_GUIDE;
pub use infrastructure::{
    spawn_stdin_source, ConsoleDisplay, HttpResultGateway, LottoNumberRecord, ResultDisplay,
    ResultGateway, TerminalConfig,
};
