use std::io::Write;

use log::warn;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::application::{Popup, TerminalInput};

/// Usage guide printed when the terminal starts
pub const SCAN_GUIDE: &str = "\
로또 QR 당첨 확인
1. QR 코드를 스캐너에 비춥니다.
2. 자동으로 인식되며 결과가 5초간 표시됩니다.
⚠️ 결과는 참고용으로 실제 당첨을 보장하지 않습니다.
ℹ️ 당첨금 수령을 위해 복권 판매자에게 당첨 용지를 제시하시기 바랍니다.";

/// Surface the terminal renders onto
pub trait ResultDisplay: Send {
    fn show(&mut self, popup: &Popup);

    fn hide(&mut self);

    /// Scanner paused or resumed
    fn scanner_active(&mut self, _active: bool) {}
}

/// Text display writing popups to a terminal
pub struct ConsoleDisplay<W> {
    out: W,
}

impl<W: Write + Send> ConsoleDisplay<W> {
    const RULE: &'static str = "==============================";
    const CLOSED: &'static str = "------------ 닫힘 ------------";

    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print_guide(&mut self) {
        self.emit(&format!("{}\n", SCAN_GUIDE));
    }

    fn emit(&mut self, text: &str) {
        if let Err(err) = writeln!(self.out, "{}", text).and_then(|_| self.out.flush()) {
            warn!("display write failed: {}", err);
        }
    }
}

impl<W: Write + Send> ResultDisplay for ConsoleDisplay<W> {
    fn show(&mut self, popup: &Popup) {
        let text = format!(
            "{rule}\n{}\n\n{}\n{rule}",
            popup.title,
            popup.body,
            rule = Self::RULE
        );
        self.emit(&text);
    }

    fn hide(&mut self) {
        let text = format!("{}\n", Self::CLOSED);
        self.emit(&text);
    }

    fn scanner_active(&mut self, active: bool) {
        if active {
            self.emit("QR 코드를 스캔하세요...");
        }
    }
}

/// Forwards stdin lines to the terminal; a blank line closes the popup.
///
/// Keyboard-wedge QR readers type the decoded string followed by Enter, so
/// each line is one scan.
pub fn spawn_stdin_source(inputs: mpsc::Sender<TerminalInput>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let input = match lines.next_line().await {
                Ok(Some(line)) if line.trim().is_empty() => TerminalInput::Dismiss,
                Ok(Some(line)) => TerminalInput::Scan(line),
                Ok(None) => break,
                Err(err) => {
                    warn!("scan input failed: {}", err);
                    break;
                }
            };

            if inputs.send(input).await.is_err() {
                break;
            }
        }
    })
}
