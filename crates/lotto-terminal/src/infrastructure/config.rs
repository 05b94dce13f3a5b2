use std::time::Duration;

/// Official result service
pub const DEFAULT_ENDPOINT: &str = "https://www.dhlottery.co.kr/common.do";

/// How long a result popup stays up before scanning resumes
pub const DEFAULT_DISPLAY_WINDOW: Duration = Duration::from_secs(5);

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Terminal settings (defaults match the shop terminal)
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TerminalConfig {
    pub endpoint: String,
    pub request_timeout: Duration,
    pub display_window: Duration,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            display_window: DEFAULT_DISPLAY_WINDOW,
        }
    }
}
