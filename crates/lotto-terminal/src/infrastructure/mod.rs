pub mod config;
pub mod console;
mod external;

pub use config::TerminalConfig;
pub use console::{spawn_stdin_source, ConsoleDisplay, ResultDisplay};
pub use external::{HttpResultGateway, LottoNumberRecord, ResultGateway};
