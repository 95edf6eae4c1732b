use log::trace;

use super::patterns::{file_extension, PatternTable, SourcePattern};
use super::{ExtractionResult, SourceExtractor};

/// Line-oriented regex extractor driven by a [`PatternTable`].
#[derive(Debug, Clone, Copy)]
pub struct PatternExtractor {
    table: &'static PatternTable,
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            table: PatternTable::global(),
        }
    }
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceExtractor for PatternExtractor {
    fn extract(&self, file_path: &str, content: &str) -> ExtractionResult {
        let extension = file_extension(file_path);

        let imports = collect_matches(self.table.import_patterns(&extension), content);
        let definitions = collect_matches(self.table.definition_patterns(&extension), content);

        trace!(
            "extracted {} imports, {} definitions from {}",
            imports.len(),
            definitions.len(),
            file_path
        );

        ExtractionResult {
            imports,
            definitions,
        }
    }
}

/// Pattern-major, then line order. Payloads are trimmed and blanks dropped.
fn collect_matches(patterns: &[SourcePattern], content: &str) -> Vec<String> {
    let mut found = Vec::new();
    for pattern in patterns {
        for line in content.split('\n') {
            for payload in pattern.captures(line) {
                let payload = payload.trim();
                if !payload.is_empty() {
                    found.push(payload.to_string());
                }
            }
        }
    }
    found
}
