//! Operator recognition for the locator
//!
//! The locator never tokenizes a whole line. At each position it asks whether
//! the unscanned remainder starts with one of the tokens below.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while},
    character::complete::char,
    combinator::{map, value},
    sequence::terminated,
    IResult,
};

/// Pipeline and list operators that end one command and start the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    Or,        // ||
    PipeBoth,  // |&
    Pipe,      // |
    And,       // &&
    Semicolon, // ;
}

impl Separator {
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Or => "||",
            Separator::PipeBoth => "|&",
            Separator::Pipe => "|",
            Separator::And => "&&",
            Separator::Semicolon => ";",
        }
    }

    pub fn width(self) -> usize {
        self.as_str().len()
    }
}

/// Tokens that open or close a command substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstToken {
    /// `$(`
    DollarParen,
    /// `)`
    CloseParen,
    /// A backtick preceded by this many backslashes
    Backtick(usize),
}

impl SubstToken {
    /// Length of the token in the source text.
    pub fn width(self) -> usize {
        match self {
            SubstToken::DollarParen => 2,
            SubstToken::CloseParen => 1,
            SubstToken::Backtick(escapes) => escapes + 1,
        }
    }

    pub fn is_backtick(self) -> bool {
        matches!(self, SubstToken::Backtick(_))
    }

    /// Whether this token closes a substitution that was opened with `open`.
    pub fn closes(self, open: SubstToken) -> bool {
        match open {
            SubstToken::DollarParen => self == SubstToken::CloseParen,
            SubstToken::Backtick(_) => self == open,
            SubstToken::CloseParen => false,
        }
    }
}

/// Parse || operator (must come before |)
fn or_op(input: &str) -> IResult<&str, Separator> {
    value(Separator::Or, tag("||"))(input)
}

/// Parse |& operator (must come before |)
fn pipe_both_op(input: &str) -> IResult<&str, Separator> {
    value(Separator::PipeBoth, tag("|&"))(input)
}

fn pipe_op(input: &str) -> IResult<&str, Separator> {
    value(Separator::Pipe, char('|'))(input)
}

fn and_op(input: &str) -> IResult<&str, Separator> {
    value(Separator::And, tag("&&"))(input)
}

fn semicolon(input: &str) -> IResult<&str, Separator> {
    value(Separator::Semicolon, char(';'))(input)
}

/// Parse any separator, longest match first
pub fn separator(input: &str) -> IResult<&str, Separator> {
    alt((or_op, pipe_both_op, pipe_op, and_op, semicolon))(input)
}

fn dollar_paren(input: &str) -> IResult<&str, SubstToken> {
    value(SubstToken::DollarParen, tag("$("))(input)
}

fn close_paren(input: &str) -> IResult<&str, SubstToken> {
    value(SubstToken::CloseParen, char(')'))(input)
}

/// Parse a backtick together with the whole run of backslashes before it
fn backtick(input: &str) -> IResult<&str, SubstToken> {
    map(
        terminated(take_while(|c: char| c == '\\'), char('`')),
        |escapes: &str| SubstToken::Backtick(escapes.len()),
    )(input)
}

/// Parse any substitution opener or closer
pub fn substitution(input: &str) -> IResult<&str, SubstToken> {
    alt((dollar_paren, close_paren, backtick))(input)
}

/// The separator at the start of `rest`, if any.
pub fn separator_at(rest: &str) -> Option<Separator> {
    separator(rest).ok().map(|(_, sep)| sep)
}

/// The substitution token at the start of `rest`, if any.
pub fn substitution_at(rest: &str) -> Option<SubstToken> {
    substitution(rest).ok().map(|(_, tok)| tok)
}

/// Backslash-newline inside a word.
pub fn is_continuation(rest: &str) -> bool {
    rest.starts_with("\\\n")
}

pub fn is_comment(rest: &str) -> bool {
    rest.starts_with('#')
}

pub fn is_quote(rest: &str) -> bool {
    rest.starts_with('\'')
}
