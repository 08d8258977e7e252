//! Common test utilities for bashly integration tests

pub use bashly::{locate, Command};

/// Name of the command at `offset`, or "" when there is none
pub fn name_at(script: &str, offset: usize) -> String {
    locate(script, offset).map(|cmd| cmd.name).unwrap_or_default()
}

/// Assert the command name at each `(offset, name)` pair; "" means no command
#[allow(dead_code)]
pub fn assert_names(script: &str, expected: &[(usize, &str)]) {
    for &(offset, name) in expected {
        assert_eq!(
            name_at(script, offset),
            name,
            "offset {} of {:?}",
            offset,
            script
        );
    }
}
