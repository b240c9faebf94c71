use crate::types::{Patch, PatchDescriptor};
use std::path::PathBuf;

pub const MARKER_SEARCH_START: &str = "<<<<<<< SEARCH";
pub const MARKER_DIVIDER: &str = "=======";
pub const MARKER_REPLACE_END: &str = ">>>>>>> REPLACE";

/// Parses a patch document into literal patches. A block looks like:
///
/// ```text
/// path/to/target
/// <<<<<<< SEARCH
/// literal old text
/// =======
/// literal new text
/// >>>>>>> REPLACE
/// ```
///
/// The non-empty line preceding `<<<<<<< SEARCH` names the target file.
/// Block bodies are captured verbatim, line endings included; the one line
/// terminator separating the last body line from the following marker
/// belongs to the marker and is stripped, so a snippet without a trailing
/// newline is expressible. Markers indented by whitespace are recognized;
/// markers preceded by other text on the same line are ignored.
pub fn parse(content: &str) -> Vec<Patch> {
    let mut patches = Vec::new();
    let mut state = ParserState::Idle;
    let mut previous_line = String::new();
    let mut file_path = PathBuf::new();
    let mut search_lines: Vec<&str> = Vec::new();
    let mut replace_lines: Vec<&str> = Vec::new();

    for line in content.split_inclusive('\n') {
        let stripped = line.trim();

        match state {
            ParserState::Idle => {
                if stripped == MARKER_SEARCH_START {
                    let potential_path = previous_line.trim();
                    if !potential_path.is_empty() {
                        file_path = PathBuf::from(potential_path);
                    }
                    state = ParserState::InSearch;
                    search_lines.clear();
                    replace_lines.clear();
                } else if stripped.starts_with("```") {
                } else if stripped.is_empty() {
                    previous_line.clear();
                } else {
                    previous_line = line.to_string();
                }
            }
            ParserState::InSearch => {
                if stripped == MARKER_DIVIDER {
                    state = ParserState::InReplace;
                } else {
                    search_lines.push(line);
                }
            }
            ParserState::InReplace => {
                if stripped == MARKER_REPLACE_END {
                    patches.push(Patch {
                        file_path: file_path.clone(),
                        descriptor: PatchDescriptor {
                            old: strip_block_terminator(search_lines.concat()),
                            new: strip_block_terminator(replace_lines.concat()),
                        },
                    });
                    state = ParserState::Idle;
                    previous_line.clear();
                } else {
                    replace_lines.push(line);
                }
            }
        }
    }

    patches
}

// Removes the single terminator that separated the last body line from the
// marker line. CRLF counts as one terminator.
fn strip_block_terminator(mut block: String) -> String {
    if block.ends_with('\n') {
        block.pop();
        if block.ends_with('\r') {
            block.pop();
        }
    }
    block
}

#[derive(PartialEq)]
enum ParserState {
    Idle,
    InSearch,
    InReplace,
}
