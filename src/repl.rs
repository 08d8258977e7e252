use bashly::{locate, Command, HintConfig};
use rustyline::completion::Completer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Editor, Helper, Result as RlResult};
use std::borrow::Cow;
use tracing::debug;

// ============================================
// BashlyHelper: rustyline helper with live command hints
// ============================================

/// Shows the command under the cursor as a dimmed hint while typing
struct BashlyHelper {
    hint: HintConfig,
    /// Lines entered so far, each ending in a newline
    buffer: String,
}

impl BashlyHelper {
    fn new(hint: HintConfig) -> Self {
        BashlyHelper {
            hint,
            buffer: String::new(),
        }
    }

    /// Locate against everything entered so far plus the line being edited
    fn command_at(&self, line: &str, pos: usize) -> Option<Command> {
        let script = format!("{}{}", self.buffer, line);
        let offset = self.buffer.chars().count() + line[..pos].chars().count();
        locate(&script, offset)
    }

    fn render(&self, cmd: &Command) -> String {
        if self.hint.show_options {
            format!("  [{}]", cmd)
        } else {
            format!("  [{}]", cmd.name)
        }
    }
}

impl Helper for BashlyHelper {}

impl Completer for BashlyHelper {
    type Candidate = String;
}

impl Hinter for BashlyHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if !self.hint.enabled {
            return None;
        }
        self.command_at(line, pos).map(|cmd| self.render(&cmd))
    }
}

impl Highlighter for BashlyHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        // Dim the command hint
        Cow::Owned(format!("\x1b[90m{}\x1b[0m", hint))
    }
}

impl Validator for BashlyHelper {}

/// A line ending in a backslash continues onto the next one
fn is_continued(line: &str) -> bool {
    line.ends_with('\\') && !line.contains('#')
}

fn print_editor_help() {
    println!(
        r#"Type shell script lines; the command under the cursor is hinted as you type.

    .help, .h       Show this help
    .show, .s       Print the lines entered so far
    .clear, .c      Forget the lines entered so far
    exit, quit      Leave the editor"#
    );
}

// ============================================
// REPL main loop
// ============================================

pub(crate) fn run_repl(hint: HintConfig) -> RlResult<()> {
    let mut rl: Editor<BashlyHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(BashlyHelper::new(hint)));

    let mut continuing = false;
    loop {
        let prompt = if continuing { "> " } else { "bashly> " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                continuing = false;
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        };

        let Some(helper) = rl.helper_mut() else {
            break;
        };

        match line.trim() {
            "exit" | "quit" if !continuing => break,
            ".help" | ".h" => {
                print_editor_help();
                continue;
            }
            ".show" | ".s" => {
                print!("{}", helper.buffer);
                continue;
            }
            ".clear" | ".c" => {
                helper.buffer.clear();
                continuing = false;
                continue;
            }
            _ => {}
        }

        helper.buffer.push_str(&line);
        helper.buffer.push('\n');
        continuing = is_continued(&line);

        if !continuing {
            // Cursor on the newline that just ended the logical line
            let offset = helper.buffer.chars().count() - 1;
            match locate(&helper.buffer, offset) {
                Some(cmd) => println!("{}", cmd),
                None => debug!(offset, "no command on entered line"),
            }
        }

        rl.add_history_entry(line.as_str())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn helper(buffer: &str) -> BashlyHelper {
        let mut helper = BashlyHelper::new(HintConfig::default());
        helper.buffer = buffer.to_string();
        helper
    }

    #[test]
    fn hint_uses_cursor_position() {
        let h = helper("");
        let line = "ls -l | grep -v x";
        assert_eq!(h.command_at(line, 1), Some(Command::with_options("ls", ["-l"])));
        assert_eq!(h.command_at(line, line.len()), Some(Command::with_options("grep", ["-v"])));
    }

    #[test]
    fn hint_spans_continued_lines() {
        let h = helper("tar -x \\\n");
        assert_eq!(h.command_at("  -z -f a.tgz", 4), Some(Command::with_options("tar", ["-x", "-z", "-f"])));
    }

    #[test]
    fn render_respects_show_options() {
        let mut h = helper("");
        let cmd = Command::with_options("grep", ["-i"]);
        assert_eq!(h.render(&cmd), "  [grep -i]");
        h.hint.show_options = false;
        assert_eq!(h.render(&cmd), "  [grep]");
    }

    #[test]
    fn continuation_detection() {
        assert!(is_continued("ls \\"));
        assert!(!is_continued("ls # \\"));
        assert!(!is_continued("ls"));
    }
}
