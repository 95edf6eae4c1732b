pub mod extractor;
pub mod patterns;

use serde::{Deserialize, Serialize};

pub use extractor::PatternExtractor;
pub use patterns::{file_extension, PatternTable, SourcePattern};

/// Raw imports and declared symbols found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// One entry per matched statement, duplicates kept.
    pub imports: Vec<String>,
    pub definitions: Vec<String>,
}

/// Turns one file's text into an [`ExtractionResult`].
///
/// Implementations must depend only on the file they are given so the
/// analyzer can fan extraction out across worker threads.
pub trait SourceExtractor: Send + Sync {
    fn extract(&self, file_path: &str, content: &str) -> ExtractionResult;
}
