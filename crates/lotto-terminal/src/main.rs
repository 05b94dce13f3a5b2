use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use tokio::sync::mpsc;

use lotto_terminal::{
    spawn_stdin_source, CheckTicketCommand, ConsoleDisplay, HttpResultGateway, ParseTicketQuery,
    Popup, Terminal, TerminalConfig, DEFAULT_ENDPOINT,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lottery ticket QR checker", long_about = None)]
struct Args {
    /// Official result service
    #[arg(long, global = true, env = "LOTTO_RESULT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Lookup timeout in seconds
    #[arg(long, global = true, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a ticket payload and print it as JSON
    Parse { payload: String },
    /// Grade a single ticket payload
    Check { payload: String },
    /// Read scans from stdin, one per line; an empty line closes the popup
    Run {
        /// Seconds a result stays on screen
        #[arg(long, default_value_t = 5)]
        display_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = TerminalConfig {
        endpoint: args.endpoint,
        request_timeout: Duration::from_secs(args.timeout_secs),
        ..TerminalConfig::default()
    };

    match args.command {
        Command::Parse { payload } => match ParseTicketQuery::execute(&payload) {
            Ok(ticket) => {
                println!("{}", serde_json::to_string_pretty(&ticket)?);
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                println!("{}", Popup::for_parse_error(err).body);
                Ok(ExitCode::FAILURE)
            }
        },
        Command::Check { payload } => {
            let gateway = HttpResultGateway::new(&config).context("building HTTP client")?;

            match CheckTicketCommand::execute(&gateway, &payload).await {
                Ok(report) => {
                    println!("{}", report);
                    Ok(ExitCode::SUCCESS)
                }
                Err(err) => {
                    println!("{}", err.popup().body);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Run { display_secs } => {
            config.display_window = Duration::from_secs(display_secs);
            let gateway = HttpResultGateway::new(&config).context("building HTTP client")?;

            let mut display = ConsoleDisplay::new(io::stdout());
            display.print_guide();

            let (inputs_tx, inputs_rx) = mpsc::channel(16);
            let source = spawn_stdin_source(inputs_tx);

            let terminal = Terminal::new(Arc::new(gateway), display, config);
            terminal.run(inputs_rx).await;
            source.abort();

            info!("bye");
            Ok(ExitCode::SUCCESS)
        }
    }
}
