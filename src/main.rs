//! bashly - show the shell command under the cursor
//!
//! Usage:
//!   bashly                              Start the line editor with live hints
//!   bashly locate <FILE|-> <OFFSET>     Print the command at OFFSET
//!   bashly options <FILE|-> <OFFSET> --page <MANPAGE>

mod cli;
mod logging;
mod repl;

use bashly::Config;
use cli::{parse_args, print_help, print_version, run_locate, run_options, Action};
use std::env;
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let cli = match parse_args(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Try 'bashly --help'");
            return ExitCode::FAILURE;
        }
    };

    if cli.help {
        print_help();
        return ExitCode::SUCCESS;
    }

    if cli.version {
        print_version();
        return ExitCode::SUCCESS;
    }

    let loaded = match &cli.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_default(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = logging::init(&config, cli.trace) {
        eprintln!("Warning: {}", e);
    }

    match cli.action {
        Action::Locate { source, offset } => run_locate(&source, offset, cli.json),
        Action::Options {
            source,
            offset,
            page,
        } => run_options(&source, offset, &page),
        Action::Repl => match repl::run_repl(config.hint) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("REPL error: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
