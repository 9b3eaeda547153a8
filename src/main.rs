//! husk - entry point
//!
//! Usage:
//!   husk              Start the interactive loop
//!   husk -c "cmd"     Execute a single command line
//!   husk script       Read commands from a file

use std::fs::File;
use std::io;
use std::process::ExitCode;

use husk::cli;
use husk::history;
use husk::input::LineReader;
use husk::launcher::{STATUS_NOT_FOUND, STATUS_NO_PERMISSION};
use husk::repl;
use husk::session::Session;
use husk::signals;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let cli = cli::parse_args(&args);
    if cli.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if cli.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    signals::install();

    let mut session = Session::new(prog_name(&args));
    history::read_history(&mut session);

    let status = if let Some(command) = cli.command {
        repl::run_command(&mut session, &command)
    } else if let Some(script) = cli.script {
        match File::open(&script) {
            Ok(file) => repl::run_source(&mut session, LineReader::file(file)),
            Err(err) => {
                eprintln!("{}: 0: Can't open {}", session.prog, script);
                if err.kind() == io::ErrorKind::PermissionDenied {
                    STATUS_NO_PERMISSION
                } else {
                    STATUS_NOT_FOUND
                }
            }
        }
    } else {
        repl::run_source(&mut session, LineReader::stdin())
    };

    // Exit statuses are a byte on the wire.
    ExitCode::from((status & 0xff) as u8)
}

fn prog_name(args: &[String]) -> String {
    args.first()
        .and_then(|arg0| arg0.rsplit('/').next())
        .filter(|name| !name.is_empty())
        .unwrap_or("husk")
        .to_string()
}
