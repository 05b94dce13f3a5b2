use log::warn;

use crate::domain::{LookupError, OfficialResult, ParseError, ParsedTicket, TicketParser};
use crate::infrastructure::ResultGateway;

/// Query: Interpret a scanned QR payload
pub struct ParseTicketQuery;

impl ParseTicketQuery {
    pub fn execute(raw: &str) -> Result<ParsedTicket, ParseError> {
        let ticket = TicketParser::parse(raw)?;

        for (index, entry) in ticket.entries.iter().enumerate() {
            if entry.has_duplicates() {
                warn!(
                    "round {} entry {} repeats a number: {:?}",
                    ticket.round,
                    index + 1,
                    entry.numbers
                );
            }
        }

        Ok(ticket)
    }
}

/// Query: Official result of a round
pub struct GetResultQuery;

impl GetResultQuery {
    pub async fn execute<G>(gateway: &G, round: u32) -> Result<OfficialResult, LookupError>
    where
        G: ResultGateway + ?Sized,
    {
        gateway.fetch_result(round).await
    }
}
