use bashly::{locate, option_sections, Command};
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the binary was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Repl,
    Locate { source: String, offset: usize },
    Options { source: String, offset: usize, page: String },
}

/// Parsed command-line arguments
#[derive(Debug)]
pub(crate) struct CliArgs {
    pub(crate) config: Option<String>,
    pub(crate) trace: bool,
    pub(crate) json: bool,
    pub(crate) help: bool,
    pub(crate) version: bool,
    pub(crate) action: Action,
}

/// Parse command-line arguments
pub(crate) fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut config = None;
    let mut page = None;
    let mut trace = false;
    let mut json = false;
    let mut help = false;
    let mut version = false;
    let mut positional: Vec<&str> = Vec::new();

    let mut i = 1; // Skip program name
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                config = Some(args.get(i).ok_or("--config needs a path")?.clone());
            }
            "--page" => {
                i += 1;
                page = Some(args.get(i).ok_or("--page needs a path")?.clone());
            }
            "--trace" => trace = true,
            "--json" => json = true,
            "--help" | "-h" => help = true,
            "--version" | "-V" => version = true,
            // `-` alone names stdin
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown flag: {}", flag));
            }
            word => positional.push(word),
        }
        i += 1;
    }

    let action = match positional.as_slice() {
        [] => Action::Repl,
        ["locate", source, offset] => Action::Locate {
            source: source.to_string(),
            offset: parse_offset(offset)?,
        },
        ["options", source, offset] => Action::Options {
            source: source.to_string(),
            offset: parse_offset(offset)?,
            page: page.ok_or("options needs --page <FILE>")?,
        },
        [sub, ..] if *sub == "locate" || *sub == "options" => {
            return Err(format!("usage: bashly {} <FILE|-> <OFFSET>", sub));
        }
        [other, ..] => return Err(format!("unknown command: {}", other)),
    };

    Ok(CliArgs {
        config,
        trace,
        json,
        help,
        version,
        action,
    })
}

fn parse_offset(text: &str) -> Result<usize, String> {
    text.parse()
        .map_err(|_| format!("invalid offset: {}", text))
}

pub(crate) fn print_help() {
    println!(
        r#"bashly-{} - show the shell command under the cursor

USAGE:
    bashly                                  Start the line editor with live hints
    bashly locate <FILE|-> <OFFSET>         Print the command at OFFSET
    bashly options <FILE|-> <OFFSET> --page <MANPAGE>
                                            Print manual sections for its options
    bashly --help                           Show this help message
    bashly --version                        Show version

FLAGS:
    --config <PATH>         Use this config file instead of ~/.bashly.toml
    --json                  Print the command as JSON (locate)
    --trace                 Log every locator step to stderr

OFFSETS:
    Zero-based character index into the script. A `-` FILE reads stdin.

EXIT STATUS:
    0 when a command was found, 1 when the offset has no command
    (comment, operator, blank line), 1 with a message on errors.

LINE EDITOR:
    .help, .h               Show editor commands
    .show, .s               Print the lines entered so far
    .clear, .c              Forget the lines entered so far
    exit, quit              Leave the editor
"#,
        VERSION
    );
}

pub(crate) fn print_version() {
    println!("bashly-{}", VERSION);
}

/// Read a script from a path, or stdin for `-`
fn read_script(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut script = String::new();
        io::stdin()
            .read_to_string(&mut script)
            .map_err(|e| format!("cannot read stdin: {}", e))?;
        return Ok(script);
    }
    fs::read_to_string(source).map_err(|e| format!("cannot read {}: {}", source, e))
}

fn find(source: &str, offset: usize) -> Result<Option<Command>, String> {
    let script = read_script(source)?;
    Ok(locate(&script, offset))
}

/// `bashly locate`
pub(crate) fn run_locate(source: &str, offset: usize, json: bool) -> ExitCode {
    let cmd = match find(source, offset) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string(&cmd) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("{}", cmd);
    }
    ExitCode::SUCCESS
}

/// `bashly options`
pub(crate) fn run_options(source: &str, offset: usize, page: &str) -> ExitCode {
    let cmd = match find(source, offset) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let page = match fs::read_to_string(page) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read {}: {}", page, e);
            return ExitCode::FAILURE;
        }
    };

    print!("{}", option_sections(&page, &cmd));
    ExitCode::SUCCESS
}
