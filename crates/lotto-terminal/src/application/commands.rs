use log::info;
use thiserror::Error;

use crate::domain::{LookupError, ParseError};
use crate::infrastructure::ResultGateway;

use super::queries::{GetResultQuery, ParseTicketQuery};
use super::report::{Popup, TicketReport};

/// Why a scanned ticket could not be graded
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum CheckError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl CheckError {
    /// Fixed customer-facing message for this failure
    pub fn popup(&self) -> Popup {
        match self {
            CheckError::Parse(err) => Popup::for_parse_error(*err),
            CheckError::Lookup(err) => Popup::for_lookup_error(*err),
        }
    }
}

/// Command: Grade a scanned ticket against its round's official result
pub struct CheckTicketCommand;

impl CheckTicketCommand {
    pub async fn execute<G>(gateway: &G, raw: &str) -> Result<TicketReport, CheckError>
    where
        G: ResultGateway + ?Sized,
    {
        let ticket = ParseTicketQuery::execute(raw)?;
        let result = GetResultQuery::execute(gateway, ticket.round).await?;

        let report = TicketReport::evaluate(&ticket, &result);
        info!(
            "round {}: {} entries graded, winner: {}",
            report.round,
            report.entries.len(),
            report.has_winner()
        );

        Ok(report)
    }
}
