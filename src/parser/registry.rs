use super::{ModuleParser, Parser, TidParser};
use std::collections::HashMap;
use std::path::Path;

/// Dynamic dispatch table for file type parsers
pub struct ParserRegistry {
    /// Fallback parser for unknown extensions
    fallback: Box<dyn Parser>,
    /// Extension -> Parser mapping
    map: HashMap<String, Box<dyn Parser>>,
}

impl ParserRegistry {
    /// Create a registry with the stock tiddler parsers registered
    ///
    /// `.tid` files use the plain header format, `.js` files the metadata
    /// comment block. Anything else falls back to the plain format.
    pub fn new() -> Self {
        let mut registry = Self {
            fallback: Box::new(TidParser),
            map: HashMap::new(),
        };
        registry.register("tid", TidParser);
        registry.register("js", ModuleParser);
        registry
    }

    /// Register a parser for a specific file extension
    ///
    /// # Arguments
    /// * `extension` - File extension without dot (e.g., "tid", "js")
    /// * `parser` - Parser implementation
    pub fn register(&mut self, extension: impl Into<String>, parser: impl Parser + 'static) {
        self.map.insert(extension.into(), Box::new(parser));
    }

    /// Select the appropriate parser for a given file path
    pub fn select(&self, path: &Path) -> &dyn Parser {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_default();

        self.map.get(&ext).map(|p| &**p).unwrap_or(&*self.fallback)
    }

    /// Get the number of registered parsers (excluding fallback)
    pub fn parser_count(&self) -> usize {
        self.map.len()
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
