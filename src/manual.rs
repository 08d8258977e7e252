//! Option help from a rendered manual page
//!
//! `man` output indents each option entry by seven spaces and its description
//! by eight or more. Given that text, this pulls out the entries for the
//! options a command was typed with. Producing the page is up to the caller.

use crate::command::Command;
use regex::Regex;
use tracing::debug;

/// Concatenate the manual sections documenting each option of `command`.
pub fn option_sections(page: &str, command: &Command) -> String {
    let mut sections = String::new();

    for opt in &command.options {
        // Hanging `-` or `--`
        if opt.len() <= 1 || opt == "--" {
            continue;
        }

        if opt.starts_with("--") {
            let pattern = format!(
                r"\n( {{7}}(?:[^ ].*?)?{}.*?(?:\n| {{8,}}.*?\n)+)",
                regex::escape(opt)
            );
            let Some(re) = compile(&pattern) else { continue };
            let found: Vec<&str> = re
                .captures_iter(page)
                .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
                .collect();
            // An ambiguous long option matches nothing
            if let [section] = found.as_slice() {
                sections.push_str(section);
            }
        } else {
            for flag in opt.chars().skip(1) {
                let pattern = format!(
                    r"\n( {{7}}-{}.*?(?:\n| {{8,}}.*?\n)+)",
                    regex::escape(&flag.to_string())
                );
                let Some(re) = compile(&pattern) else { continue };
                if let Some(section) = re.captures(page).and_then(|caps| caps.get(1)) {
                    sections.push_str(section.as_str());
                }
            }
        }
    }

    sections
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(err) => {
            debug!(%err, pattern, "skipping option pattern");
            None
        }
    }
}
