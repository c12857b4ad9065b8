use super::{Parser, FIELD_SEPARATOR};
use crate::tiddler::Tiddler;

/// Opening marker line of a module metadata block
const BLOCK_OPEN: &str = r"/*\";

/// Closing marker line of a module metadata block
const BLOCK_CLOSE: &str = r"\*/";

/// Parser for script modules carrying a comment-delimited metadata block.
///
/// Lines between the `/*\` and `\*/` marker lines are header fields with
/// key and value trimmed; metadata lines without a separator (blank lines,
/// free-text descriptions) are dropped. Everything outside the block, blank
/// lines included, becomes the body in original order. Marker lines appear
/// in neither.
#[derive(Debug, Default)]
pub struct ModuleParser;

impl Parser for ModuleParser {
    fn parse(&self, source: &str) -> Tiddler {
        let mut tiddler = Tiddler::new();
        let mut body_lines = Vec::new();
        // Every marker occurrence toggles the state, so a malformed second
        // block is scanned as metadata again rather than rejected.
        let mut in_metadata = false;

        for line in source.split('\n') {
            let trimmed = line.trim();
            if trimmed == BLOCK_OPEN {
                in_metadata = true;
                continue;
            }
            if trimmed == BLOCK_CLOSE {
                in_metadata = false;
                continue;
            }

            if in_metadata {
                if let Some((key, value)) = line.split_once(FIELD_SEPARATOR) {
                    tiddler.set(key.trim(), value.trim());
                }
            } else {
                body_lines.push(line);
            }
        }

        tiddler.set_text(body_lines.join("\n"));
        tiddler
    }
}
