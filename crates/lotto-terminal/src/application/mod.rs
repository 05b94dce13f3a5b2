mod commands;
mod queries;
pub mod report;
pub mod session;
mod terminal;

pub use commands::{CheckError, CheckTicketCommand};
pub use queries::{GetResultQuery, ParseTicketQuery};
pub use report::{EntryReport, Popup, TicketReport};
pub use session::{ScanSession, SessionEffect, SessionEvent, SessionState};
pub use terminal::{Terminal, TerminalInput};
