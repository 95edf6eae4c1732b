use serde::Serialize;

use super::analytics::{KeyFile, RelationStats};
use super::fileset::FileMap;

/// Aggregate dependency/dependent counts. Zeroes and `None` for an empty set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetrics {
    pub total_files: usize,
    pub avg_dependencies: f64,
    pub max_dependencies: usize,
    pub file_with_max_dependencies: Option<String>,
    /// Resolved importers per file, averaged over every analyzed file
    /// including files nobody imports.
    pub avg_dependents: f64,
    pub max_dependents: usize,
    /// First file in input order with `max_dependents` importers. Set even
    /// when nothing resolves, in which case it is the first file.
    pub file_with_max_dependents: Option<String>,
}

impl AnalysisMetrics {
    pub fn from_stats(
        total_files: usize,
        dependencies: RelationStats,
        dependents: RelationStats,
    ) -> Self {
        Self {
            total_files,
            avg_dependencies: dependencies.average,
            max_dependencies: dependencies.maximum,
            file_with_max_dependencies: dependencies.file_with_max,
            avg_dependents: dependents.average,
            max_dependents: dependents.maximum,
            file_with_max_dependents: dependents.file_with_max,
        }
    }
}

/// Complete output of one analysis run.
///
/// `key_files` comes from the substring-built graph while `entry_points`,
/// `isolated_files` and the dependent metrics come from the per-language
/// `imported_by` relation; the two are not guaranteed to agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub imports: FileMap<Vec<String>>,
    pub imported_by: FileMap<Vec<String>>,
    pub definitions: FileMap<Vec<String>>,
    pub extension_counts: FileMap<usize>,
    pub key_files: Vec<KeyFile>,
    pub entry_points: Vec<String>,
    pub isolated_files: Vec<String>,
    pub metrics: AnalysisMetrics,
}
