use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::domain::LookupError;
use crate::infrastructure::{ResultDisplay, ResultGateway, TerminalConfig};

use super::session::{ScanSession, SessionEffect, SessionEvent};

/// What the scan source can deliver
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TerminalInput {
    /// A decoded QR string
    Scan(String),
    /// Close the popup (or give up on a pending lookup)
    Dismiss,
}

impl From<TerminalInput> for SessionEvent {
    fn from(input: TerminalInput) -> Self {
        match input {
            TerminalInput::Scan(code) => SessionEvent::Scanned(code),
            TerminalInput::Dismiss => SessionEvent::Dismiss,
        }
    }
}

/// Drives a [`ScanSession`] against real I/O.
///
/// The session and the display are only ever touched from the task running
/// [`Terminal::run`]; lookups and dismiss timers run on their own tasks and
/// report back through a channel.
pub struct Terminal<D> {
    gateway: Arc<dyn ResultGateway>,
    display: D,
    config: TerminalConfig,
}

impl<D: ResultDisplay> Terminal<D> {
    pub fn new(gateway: Arc<dyn ResultGateway>, display: D, config: TerminalConfig) -> Self {
        Self {
            gateway,
            display,
            config,
        }
    }

    /// Runs until `inputs` is closed and the last scan has been dismissed,
    /// then shuts the session down and hands the display back.
    pub async fn run(mut self, mut inputs: mpsc::Receiver<TerminalInput>) -> D {
        let (events_tx, mut events_rx) = mpsc::unbounded_channel();
        let mut session = ScanSession::new(self.config.display_window);

        info!("terminal ready, endpoint {}", self.config.endpoint);
        let effects = session.start();
        self.apply(effects, &events_tx);

        // Once the source closes, finish the scan in progress before stopping.
        let mut accepting = true;
        while accepting || session.is_busy() {
            let event = tokio::select! {
                Some(event) = events_rx.recv() => event,
                input = inputs.recv(), if accepting => match input {
                    Some(input) => SessionEvent::from(input),
                    None => {
                        debug!("scan source closed");
                        accepting = false;
                        continue;
                    }
                },
            };

            let effects = session.handle(event);
            self.apply(effects, &events_tx);
        }

        let effects = session.handle(SessionEvent::Shutdown);
        self.apply(effects, &events_tx);
        info!("terminal stopped");

        self.display
    }

    fn apply(&mut self, effects: Vec<SessionEffect>, events: &mpsc::UnboundedSender<SessionEvent>) {
        for effect in effects {
            match effect {
                SessionEffect::PauseScanner => self.display.scanner_active(false),
                SessionEffect::ResumeScanner => self.display.scanner_active(true),
                SessionEffect::ShowPopup(popup) => self.display.show(&popup),
                SessionEffect::HidePopup => self.display.hide(),
                SessionEffect::FetchResult { request, round } => {
                    self.spawn_lookup(request, round, events.clone())
                }
                SessionEffect::ScheduleDismiss { generation, after } => {
                    let events = events.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = events.send(SessionEvent::DismissElapsed { generation });
                    });
                }
            }
        }
    }

    fn spawn_lookup(
        &self,
        request: u64,
        round: u32,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) {
        let gateway = Arc::clone(&self.gateway);

        tokio::spawn(async move {
            debug!("lookup #{} for round {}", request, round);

            // A panicking gateway must still settle the pending scan.
            let lookup = tokio::spawn(async move { gateway.fetch_result(round).await });
            let outcome = match lookup.await {
                Ok(outcome) => outcome,
                Err(err) => {
                    warn!("lookup #{} aborted: {}", request, err);
                    Err(LookupError::Unavailable)
                }
            };

            let _ = events.send(SessionEvent::LookupFinished { request, outcome });
        });
    }
}
