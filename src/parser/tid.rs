use super::{Parser, FIELD_SEPARATOR};
use crate::tiddler::Tiddler;

/// Parser for plain tiddler files: header fields, a blank line, body text.
///
/// Only the first blank line separates header from body; later blank-line
/// sequences belong to the body. Without a separator the whole input is
/// header and the body is empty.
#[derive(Debug, Default)]
pub struct TidParser;

impl Parser for TidParser {
    fn parse(&self, source: &str) -> Tiddler {
        let (header, body) = match source.split_once("\n\n") {
            Some((header, body)) => (header, body),
            None => (source, ""),
        };

        let mut tiddler = Tiddler::new();
        for line in header.split('\n') {
            // Lines without the separator are not an error, just skipped
            if let Some((name, value)) = line.split_once(FIELD_SEPARATOR) {
                tiddler.set(name, value);
            }
        }
        tiddler.set_text(body);
        tiddler
    }
}
