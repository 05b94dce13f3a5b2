use std::time::Duration;

use log::{debug, info};

use crate::domain::{LookupError, OfficialResult, ParsedTicket};

use super::queries::ParseTicketQuery;
use super::report::{Popup, TicketReport};

/// Where the terminal is in its scan cycle
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    /// Not started, or shut down
    Idle,
    /// Scanner live, waiting for a code
    Scanning,
    /// Ticket parsed, result lookup in flight
    AwaitingResult { request: u64, ticket: ParsedTicket },
    /// Popup visible until dismissed
    ShowingResult { generation: u64 },
}

/// Inputs to the state machine
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionEvent {
    Scanned(String),
    LookupFinished {
        request: u64,
        outcome: Result<OfficialResult, LookupError>,
    },
    DismissElapsed { generation: u64 },
    /// Customer closed the popup, or abandoned a pending lookup
    Dismiss,
    Shutdown,
}

/// Work the driver must carry out after a transition
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionEffect {
    PauseScanner,
    ResumeScanner,
    FetchResult { request: u64, round: u32 },
    ShowPopup(Popup),
    HidePopup,
    ScheduleDismiss { generation: u64, after: Duration },
}

/// Scan cycle state machine.
///
/// Idle -> Scanning -> AwaitingResult -> ShowingResult -> Scanning.
/// Lookup completions carry the request id they were issued for and dismiss
/// timers carry the popup generation they were armed for; anything that no
/// longer matches the current state is dropped.
pub struct ScanSession {
    state: SessionState,
    display_window: Duration,
    next_request: u64,
    next_generation: u64,
}

impl ScanSession {
    pub fn new(display_window: Duration) -> Self {
        Self {
            state: SessionState::Idle,
            display_window,
            next_request: 0,
            next_generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True while a lookup is pending or a popup is up
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            SessionState::AwaitingResult { .. } | SessionState::ShowingResult { .. }
        )
    }

    /// Turns the scanner on
    pub fn start(&mut self) -> Vec<SessionEffect> {
        match self.state {
            SessionState::Idle => {
                self.transition(SessionState::Scanning);
                vec![SessionEffect::ResumeScanner]
            }
            _ => Vec::new(),
        }
    }

    pub fn handle(&mut self, event: SessionEvent) -> Vec<SessionEffect> {
        match event {
            SessionEvent::Scanned(code) => self.on_scanned(code),
            SessionEvent::LookupFinished { request, outcome } => {
                self.on_lookup_finished(request, outcome)
            }
            SessionEvent::DismissElapsed { generation } => self.on_dismiss_elapsed(generation),
            SessionEvent::Dismiss => self.on_dismiss(),
            SessionEvent::Shutdown => self.on_shutdown(),
        }
    }

    fn on_scanned(&mut self, code: String) -> Vec<SessionEffect> {
        if self.state != SessionState::Scanning {
            debug!("scanner paused, ignoring code");
            return Vec::new();
        }
        if code.trim().is_empty() {
            return Vec::new();
        }

        info!("scanned code: {}", code.trim());
        let mut effects = vec![SessionEffect::PauseScanner];

        match ParseTicketQuery::execute(&code) {
            Ok(ticket) => {
                self.next_request += 1;
                let request = self.next_request;
                let round = ticket.round;

                self.transition(SessionState::AwaitingResult { request, ticket });
                effects.push(SessionEffect::FetchResult { request, round });
            }
            Err(err) => {
                info!("rejected scan: {}", err);
                effects.extend(self.show(Popup::for_parse_error(err)));
            }
        }

        effects
    }

    fn on_lookup_finished(
        &mut self,
        request: u64,
        outcome: Result<OfficialResult, LookupError>,
    ) -> Vec<SessionEffect> {
        let ticket = match &self.state {
            SessionState::AwaitingResult {
                request: pending,
                ticket,
            } if *pending == request => ticket.clone(),
            _ => {
                debug!("dropping stale lookup #{}", request);
                return Vec::new();
            }
        };

        let popup = match outcome {
            Ok(result) => {
                let report = TicketReport::evaluate(&ticket, &result);
                info!(
                    "round {} graded, winner: {}",
                    report.round,
                    report.has_winner()
                );
                Popup::for_report(&report)
            }
            Err(err) => Popup::for_lookup_error(err),
        };

        self.show(popup)
    }

    fn on_dismiss_elapsed(&mut self, generation: u64) -> Vec<SessionEffect> {
        match self.state {
            SessionState::ShowingResult {
                generation: current,
            } if current == generation => self.resume_scanning(),
            _ => {
                debug!("dropping stale dismiss timer #{}", generation);
                Vec::new()
            }
        }
    }

    fn on_dismiss(&mut self) -> Vec<SessionEffect> {
        match self.state {
            SessionState::ShowingResult { .. } => self.resume_scanning(),
            SessionState::AwaitingResult { request, .. } => {
                info!("abandoning lookup #{}", request);
                self.transition(SessionState::Scanning);
                vec![SessionEffect::ResumeScanner]
            }
            _ => Vec::new(),
        }
    }

    fn on_shutdown(&mut self) -> Vec<SessionEffect> {
        let mut effects = Vec::new();
        if matches!(self.state, SessionState::ShowingResult { .. }) {
            effects.push(SessionEffect::HidePopup);
        }
        if self.state != SessionState::Idle {
            effects.push(SessionEffect::PauseScanner);
        }

        self.transition(SessionState::Idle);
        effects
    }

    fn show(&mut self, popup: Popup) -> Vec<SessionEffect> {
        self.next_generation += 1;
        let generation = self.next_generation;

        self.transition(SessionState::ShowingResult { generation });
        vec![
            SessionEffect::ShowPopup(popup),
            SessionEffect::ScheduleDismiss {
                generation,
                after: self.display_window,
            },
        ]
    }

    fn resume_scanning(&mut self) -> Vec<SessionEffect> {
        self.transition(SessionState::Scanning);
        vec![SessionEffect::HidePopup, SessionEffect::ResumeScanner]
    }

    fn transition(&mut self, next: SessionState) {
        debug!("session: {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}
