use std::fmt;

use serde::Serialize;

use crate::domain::{
    Entry, LookupError, Method, OfficialResult, ParseError, ParsedTicket, PrizeOutcome,
    NUMBERS_PER_ENTRY,
};

/// Title shown above every result popup
pub const POPUP_TITLE: &str = "추첨결과";

const ENTRY_LABELS: [&str; 5] = ["A", "B", "C", "D", "E"];

/// Text shown to the customer for a finished scan
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Popup {
    pub title: String,
    pub body: String,
}

impl Popup {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            title: POPUP_TITLE.to_string(),
            body: body.into(),
        }
    }

    pub fn for_report(report: &TicketReport) -> Self {
        Self::new(report.to_string())
    }

    pub fn for_parse_error(_err: ParseError) -> Self {
        Self::new("로또 QR 코드가 아닙니다")
    }

    pub fn for_lookup_error(_err: LookupError) -> Self {
        Self::new("아직 발표되지 않은 회차이거나\n조회할 수 없는 회차입니다.")
    }
}

/// Graded line for one entry
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntryReport {
    pub label: String,
    pub method: Method,
    pub numbers: [u8; NUMBERS_PER_ENTRY],
    pub outcome: PrizeOutcome,
}

/// Grades for every entry on a ticket
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TicketReport {
    pub round: u32,
    pub entries: Vec<EntryReport>,
}

impl TicketReport {
    pub fn evaluate(ticket: &ParsedTicket, result: &OfficialResult) -> Self {
        let entries = ticket
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| EntryReport::evaluate(index, entry, result))
            .collect();

        Self {
            round: ticket.round,
            entries,
        }
    }

    pub fn has_winner(&self) -> bool {
        self.entries.iter().any(|e| e.outcome.is_winning())
    }
}

impl EntryReport {
    fn evaluate(index: usize, entry: &Entry, result: &OfficialResult) -> Self {
        Self {
            label: entry_label(index),
            method: entry.method,
            numbers: entry.numbers,
            outcome: PrizeOutcome::evaluate(entry, result),
        }
    }
}

/// A to E for the five slips of a ticket, numbered past that
pub fn entry_label(index: usize) -> String {
    match ENTRY_LABELS.get(index) {
        Some(label) => label.to_string(),
        None => format!("게임{}", index + 1),
    }
}

pub fn method_label(method: Method) -> &'static str {
    match method {
        Method::Manual => "수  동",
        Method::SemiAuto => "반자동",
        Method::Auto => "자  동",
        Method::Unknown => "?",
    }
}

pub fn prize_message(outcome: PrizeOutcome) -> &'static str {
    match outcome {
        PrizeOutcome::FirstPlace => "㊗️ 1등 당첨! 농협 본점에서 수령 가능합니다. ㊗️",
        PrizeOutcome::SecondPlace => "㊗️ 2등 당첨! 전국 농협에서 수령 가능합니다. ㊗️",
        PrizeOutcome::ThirdPlace => "🎉 3등 당첨! 전국 농협에서 수령 가능합니다. 🎉",
        PrizeOutcome::FourthPlace => "🎉 4등 당첨! 복권 판매점에서 당첨금을 수령받으세요.",
        PrizeOutcome::FifthPlace => "🎉 5등 당첨! 복권 판매점에서 당첨금을 수령받으세요.",
        PrizeOutcome::NoPrize => "낙첨입니다.",
    }
}

impl fmt::Display for EntryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] - {}",
            self.label,
            method_label(self.method),
            prize_message(self.outcome)
        )
    }
}

impl fmt::Display for TicketReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}회차 당첨 결과\n\n", self.round)?;

        let lines: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        f.write_str(&lines.join("\n"))
    }
}
