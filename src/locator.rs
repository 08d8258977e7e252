//! Command location for a cursor offset
//!
//! The locator answers one question: which command does the character at a
//! given offset belong to? It narrows the script to one logical line and then
//! scans that line only as far as the cursor, keeping a command per open
//! substitution level. It does not tokenize or validate the script.
//!
//! ```rust
//! use bashly::{locate, Command};
//!
//! let script = "grep -i -r foo | wc -l\n";
//! assert_eq!(locate(script, 8), Some(Command::with_options("grep", ["-i", "-r"])));
//! assert_eq!(locate(script, 17), Some(Command::with_options("wc", ["-l"])));
//! ```

use crate::command::Command;
use crate::line::logical_line;
use crate::stack::{Stack, StackError};
use crate::token::{self, Separator, SubstToken};
use tracing::{error, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Collecting a command word and then its options
    Command,
    /// Skipping characters that cannot change the result
    Throwaway,
    Separator(Separator),
    Substitution(SubstToken),
    /// Inside '...'
    Quote,
}

/// Scan state for one query. Positions are byte indices into `line`.
struct Finder<'a> {
    line: &'a str,
    pos: usize,
    target: usize,
    commands: Stack<Command>,
    delimiters: Stack<SubstToken>,
    state: State,
}

/// Find the command under character `offset` of `script`.
///
/// Returns `None` when the offset is in a comment, inside an operator or
/// substitution token, before any command word, or outside the script.
pub fn locate(script: &str, offset: usize) -> Option<Command> {
    let logical = logical_line(script, offset)?;
    if logical.text.is_empty() {
        return None;
    }

    let mut finder = Finder::new(&logical.text, logical.offset);
    match finder.run() {
        Ok(found) => found,
        Err(err) => {
            error!(%err, offset, "command stack out of step with the scan");
            None
        }
    }
}

impl<'a> Finder<'a> {
    fn new(line: &'a str, offset: usize) -> Self {
        let target = line
            .char_indices()
            .nth(offset)
            .map_or(line.len(), |(i, _)| i);

        Finder {
            line,
            pos: 0,
            target,
            commands: Stack::new(),
            delimiters: Stack::new(),
            state: State::Command,
        }
    }

    fn run(&mut self) -> Result<Option<Command>, StackError> {
        // A command word is always read to its end, even past the cursor
        while self.pos < self.target || self.state == State::Command {
            trace!(state = ?self.state, pos = self.pos, "step");
            match self.state {
                State::Command => self.command(),
                State::Throwaway => self.throwaway(),
                State::Separator(sep) => self.separator(sep)?,
                State::Substitution(tok) => self.substitution(tok)?,
                State::Quote => self.quote(),
            }
        }

        Ok(self
            .commands
            .top()
            .ok()
            .filter(|cmd| !cmd.is_placeholder())
            .cloned())
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    fn advance_char(&mut self) {
        self.pos += self.rest().chars().next().map_or(1, char::len_utf8);
    }

    fn command(&mut self) {
        let mut cmd = Command::default();
        let mut in_options = false;

        loop {
            let rest = self.rest();
            let Some(c) = rest.chars().next() else {
                self.state = State::Throwaway;
                break;
            };

            if c.is_whitespace() {
                if in_options {
                    if cmd.options.last().is_some_and(|opt| !opt.is_empty()) {
                        cmd.options.push(String::new());
                    }
                } else if !cmd.name.is_empty() {
                    in_options = true;
                    cmd.options.push(String::new());
                }
                self.pos += c.len_utf8();
            } else if token::is_continuation(rest) {
                self.pos += 2;
            } else if token::is_comment(rest) {
                self.state = State::Throwaway;
                break;
            } else if let Some(sep) = token::separator_at(rest) {
                self.state = State::Separator(sep);
                break;
            } else if let Some(tok) = token::substitution_at(rest) {
                self.state = State::Substitution(tok);
                break;
            } else if !in_options {
                cmd.name.push(c);
                self.pos += c.len_utf8();
            } else {
                match cmd.options.last_mut() {
                    Some(opt) if !opt.is_empty() || c == '-' => {
                        opt.push(c);
                        self.pos += c.len_utf8();
                    }
                    // First word that is not an option ends option collection
                    _ => {
                        self.state = State::Throwaway;
                        break;
                    }
                }
            }
        }

        if cmd.options.last().is_some_and(String::is_empty) {
            cmd.options.pop();
        }
        trace!(name = %cmd.name, options = ?cmd.options, "collected command");
        self.commands.push(cmd);
    }

    fn throwaway(&mut self) {
        let rest = self.rest();

        if token::is_comment(rest) {
            self.commands.push(Command::default());
            self.pos = self.target;
        } else if let Some(sep) = token::separator_at(rest) {
            self.state = State::Separator(sep);
        } else if let Some(tok) = token::substitution_at(rest) {
            self.state = State::Substitution(tok);
        } else if token::is_quote(rest) {
            self.state = State::Quote;
        } else {
            self.advance_char();
        }
    }

    fn separator(&mut self, sep: Separator) -> Result<(), StackError> {
        self.commands.pop()?;
        self.state = State::Command;
        self.consume(sep.width());
        Ok(())
    }

    fn substitution(&mut self, tok: SubstToken) -> Result<(), StackError> {
        if self.closes_level(tok) {
            self.commands.pop()?;
            self.delimiters.pop()?;
            self.state = State::Throwaway;
            self.consume(tok.width());
        } else if self.opens_level(tok) {
            self.delimiters.push(tok);
            self.state = State::Command;
            self.consume(tok.width());
        } else {
            // Stray `)` or backtick: no level to open or close
            self.state = State::Throwaway;
            self.pos += tok.width();
        }
        Ok(())
    }

    fn quote(&mut self) {
        self.advance_char();
        if self.pos >= self.target {
            self.state = State::Throwaway;
            return;
        }

        if token::is_quote(self.rest()) {
            self.pos += 1;
            self.state = State::Throwaway;
        }
    }

    /// Step over a separator or substitution token. A cursor inside the
    /// token resolves to no command.
    fn consume(&mut self, width: usize) {
        self.pos += width;
        if self.pos > self.target {
            self.commands.push(Command::default());
            self.state = State::Throwaway;
        }
    }

    fn closes_level(&self, tok: SubstToken) -> bool {
        self.delimiters.top().is_ok_and(|open| tok.closes(*open))
    }

    /// Backticks nest only when escaped for the current depth: each level
    /// needs `2 * previous + 1` backslashes (0, 1, 3, 7, ...).
    fn opens_level(&self, tok: SubstToken) -> bool {
        match tok {
            SubstToken::DollarParen => true,
            SubstToken::CloseParen => false,
            SubstToken::Backtick(0) => self.delimiters.top().map_or(true, |open| !open.is_backtick()),
            SubstToken::Backtick(1) => matches!(self.delimiters.top(), Ok(SubstToken::Backtick(0))),
            SubstToken::Backtick(_) => match self.delimiters.top2() {
                Ok((below, top)) => {
                    let top_width = top.width() as isize;
                    let below_width = below.width() as isize;
                    tok.width() as isize == top_width + (top_width - below_width) * 2
                }
                Err(_) => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_at(script: &str, offset: usize) -> String {
        locate(script, offset).map(|cmd| cmd.name).unwrap_or_default()
    }

    #[test]
    fn single_word() {
        assert_eq!(locate("ls\n", 0), Some(Command::new("ls")));
        assert_eq!(locate("ls\n", 1), Some(Command::new("ls")));
        assert_eq!(locate("ls\n", 2), Some(Command::new("ls")));
    }

    #[test]
    fn leading_whitespace_is_skipped() {
        assert_eq!(name_at("   pwd\n", 0), "pwd");
    }

    #[test]
    fn blank_line_has_no_command() {
        assert_eq!(locate("\n", 0), None);
        assert_eq!(locate("   \n", 2), None);
        assert_eq!(locate("", 0), None);
    }

    #[test]
    fn command_word_is_read_past_the_cursor() {
        assert_eq!(name_at("chmod 644 f\n", 2), "chmod");
    }

    #[test]
    fn cursor_inside_separator() {
        assert_eq!(locate("ls || mv\n", 4), None);
        assert_eq!(name_at("ls || mv\n", 5), "mv");
    }

    #[test]
    fn stray_closer_is_inert() {
        let script = "echo ) \\` | ls\n";
        assert_eq!(name_at(script, 10), "echo");
        assert_eq!(name_at(script, 11), "ls");
    }

    #[test]
    fn unterminated_quote_runs_to_end_of_line() {
        let script = "echo 'a | ls\n";
        assert_eq!(name_at(script, 11), "echo");
    }

    #[test]
    fn unmatched_opener_does_not_fail() {
        let script = "echo $(ls -l\n";
        assert_eq!(locate(script, 9), Some(Command::with_options("ls", ["-l"])));
    }

    #[test]
    fn multibyte_text_before_command() {
        let script = "echo ünïcode | wc -c\n";
        assert_eq!(name_at(script, 7), "echo");
        assert_eq!(locate(script, 15), Some(Command::with_options("wc", ["-c"])));
    }

    #[test]
    fn deep_backtick_requires_exact_escapes() {
        // `\\` (two backslashes) at depth two is neither opener nor closer
        let script = "echo `mv \\\\`ls\n";
        assert_eq!(name_at(script, 13), "mv");
    }
}
