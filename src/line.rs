//! Logical line resolution
//!
//! Physical lines ending in a backslash are spliced onto the next one, unless
//! a `#` appears on the line: the comment swallows the backslash.

use tracing::debug;

/// A logical line and the queried offset re-based onto it, both in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    pub offset: usize,
}

fn is_continued(physical: &str) -> bool {
    physical.ends_with("\\\n") && !physical.contains('#')
}

/// Find the logical line of `script` that contains character `offset`.
///
/// Returns `None` for an empty script or an offset past the end of it. The
/// trailing newline of the line is dropped; continuation sequences inside the
/// line are kept so the locator can skip them.
pub fn logical_line(script: &str, offset: usize) -> Option<LogicalLine> {
    let mut text = String::new();
    let mut len = 0;
    let mut offset = offset;

    for physical in script.split_inclusive('\n') {
        text.push_str(physical);
        len += physical.chars().count();

        if is_continued(physical) {
            continue;
        }

        // A cursor at the very end of an unterminated last line still belongs to it
        let terminated = physical.ends_with('\n');
        if offset > len || (offset == len && terminated) {
            offset -= len;
            text.clear();
            len = 0;
            continue;
        }

        if terminated {
            text.pop();
        }
        debug!(offset, chars = len, "resolved logical line");
        return Some(LogicalLine { text, offset });
    }

    // Script ends in a continuation: the cursor sits on the dangling line
    if !text.is_empty() && offset <= len {
        debug!(offset, chars = len, "resolved dangling continued line");
        return Some(LogicalLine { text, offset });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(script: &str, offset: usize) -> Option<(String, usize)> {
        logical_line(script, offset).map(|l| (l.text, l.offset))
    }

    #[test]
    fn picks_physical_line() {
        let script = "ls\npwd\n";
        assert_eq!(resolve(script, 1), Some(("ls".to_string(), 1)));
        assert_eq!(resolve(script, 3), Some(("pwd".to_string(), 0)));
        assert_eq!(resolve(script, 6), Some(("pwd".to_string(), 3)));
    }

    #[test]
    fn joins_continued_lines() {
        let script = "ls|\\\n m\\\nv\necho\n";
        let expected = "ls|\\\n m\\\nv".to_string();
        assert_eq!(resolve(script, 0), Some((expected.clone(), 0)));
        assert_eq!(resolve(script, 8), Some((expected, 8)));
        assert_eq!(resolve(script, 11), Some(("echo".to_string(), 0)));
    }

    #[test]
    fn comment_stops_continuation() {
        let script = "mv #; ls \\\ngrep\n";
        assert_eq!(resolve(script, 0), Some(("mv #; ls \\".to_string(), 0)));
        assert_eq!(resolve(script, 11), Some(("grep".to_string(), 0)));
    }

    #[test]
    fn unterminated_last_line_is_a_line() {
        assert_eq!(resolve("ls\ngrep -i", 10), Some(("grep -i".to_string(), 7)));
        assert_eq!(resolve("ls", 2), Some(("ls".to_string(), 2)));
        assert_eq!(resolve("ls", 3), None);
    }

    #[test]
    fn empty_or_out_of_range() {
        assert_eq!(resolve("", 0), None);
        assert_eq!(resolve("ls\n", 3), None);
        assert_eq!(resolve("ls\n", 40), None);
    }

    #[test]
    fn offsets_count_characters() {
        let script = "échø\nls\n";
        assert_eq!(resolve(script, 5), Some(("ls".to_string(), 0)));
    }

    #[test]
    fn dangling_continuation_keeps_the_line() {
        assert_eq!(resolve("ls \\\n", 5), Some(("ls \\\n".to_string(), 5)));
    }
}
