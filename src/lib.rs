//! bashly - command lookup for shell scripts being edited
//!
//! # Overview
//!
//! Given the text of a shell script and a cursor offset, bashly finds the
//! command the cursor belongs to and the option flags already typed for it.
//! An editor calls this on every keystroke to show help for whatever is
//! being typed.
//!
//! # What the locator understands
//!
//! ```text
//! ls -l | grep -i x        # separators: |  ||  |&  &&  ;
//! tar -x \
//!     -z -f a.tgz          # backslash-newline continuations
//! echo $(ls `pwd`)         # nested $( ) and backtick substitutions
//! echo `mv \`ls\``         # escaped backticks nest one level deeper
//! echo 'a | b'             # single quotes make everything inert
//! ls # comment             # comments belong to no command
//! ```
//!
//! # Example
//!
//! ```rust
//! use bashly::{locate, Command};
//!
//! let script = "echo $(ls -la || wc -l)\n";
//! assert_eq!(locate(script, 0), Some(Command::new("echo")));
//! assert_eq!(locate(script, 8), Some(Command::with_options("ls", ["-la"])));
//! assert_eq!(locate(script, 15), None); // between the two pipes
//! ```

pub mod command;
pub mod config;
pub mod line;
pub mod locator;
pub mod manual;
pub mod stack;
pub mod token;

// Re-export commonly used items
pub use command::Command;
pub use config::{Config, ConfigError, HintConfig};
pub use line::{logical_line, LogicalLine};
pub use locator::locate;
pub use manual::option_sections;
pub use stack::{Stack, StackError};
pub use token::{Separator, SubstToken};
