//! The command a cursor position resolves to

use serde::Serialize;
use std::fmt;

/// A shell command word plus the option flags typed after it, in typed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Command {
    pub name: String,
    pub options: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(name: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Command {
            name: name.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }

    /// A placeholder carries no name: the cursor sits in a comment, inside an
    /// operator, or before any command word.
    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for opt in &self.options {
            write!(f, " {}", opt)?;
        }
        Ok(())
    }
}
