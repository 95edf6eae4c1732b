use log::debug;
use rayon::prelude::*;

use super::analytics::{self, RelationStats};
use super::fileset::{FileMap, RepositoryFileSet};
use super::graph::{DependencyGraph, GraphBuilder};
use super::report::{AnalysisMetrics, AnalysisReport};
use super::resolver::ImportResolver;
use crate::parsers::{file_extension, ExtractionResult, PatternExtractor, SourceExtractor};

/// Runs extraction, resolution, graph construction and analytics over one
/// file set. Stateless between calls.
pub struct DependencyAnalyzer<E: SourceExtractor = PatternExtractor> {
    extractor: E,
    resolver: ImportResolver,
}

impl DependencyAnalyzer<PatternExtractor> {
    pub fn new() -> Self {
        Self::with_extractor(PatternExtractor::new())
    }
}

impl Default for DependencyAnalyzer<PatternExtractor> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: SourceExtractor> DependencyAnalyzer<E> {
    pub fn with_extractor(extractor: E) -> Self {
        Self {
            extractor,
            resolver: ImportResolver::new(),
        }
    }

    pub fn analyze(&self, files: &RepositoryFileSet) -> AnalysisReport {
        self.analyze_with_graph(files).0
    }

    /// Same as [`analyze`](Self::analyze), also handing back the graph used
    /// for centrality.
    pub fn analyze_with_graph(
        &self,
        files: &RepositoryFileSet,
    ) -> (AnalysisReport, DependencyGraph) {
        debug!("analyzing {} files", files.len());

        let extractions = self.extract_all(files);
        let relation = self.resolver.resolve(files, &extractions);
        let graph = GraphBuilder::from_imports(files, &relation.imports);

        let key_files = analytics::key_files(&graph).unwrap_or_else(|err| {
            debug!("key files unavailable: {err}");
            Vec::new()
        });
        let entry_points = analytics::entry_points(files, &relation.imported_by);
        let isolated_files =
            analytics::isolated_files(files, &relation.imports, &relation.imported_by);

        let dependencies = relation_stats_or_default(files, &relation.imports);
        let dependents = relation_stats_or_default(files, &relation.imported_by);
        let metrics = AnalysisMetrics::from_stats(files.len(), dependencies, dependents);

        let definitions = extractions
            .into_iter()
            .map(|(path, result)| (path, result.definitions))
            .collect();

        debug!(
            "{} key files, {} entry points, {} isolated files",
            key_files.len(),
            entry_points.len(),
            isolated_files.len()
        );

        let report = AnalysisReport {
            imports: relation.imports,
            imported_by: relation.imported_by,
            definitions,
            extension_counts: extension_counts(files),
            key_files,
            entry_points,
            isolated_files,
            metrics,
        };
        (report, graph)
    }

    /// Per-file extraction across the rayon pool. Each worker writes only its
    /// own slot; results come back in input order.
    pub fn extract_all(&self, files: &RepositoryFileSet) -> FileMap<ExtractionResult> {
        let results: Vec<ExtractionResult> = files
            .as_slice()
            .par_iter()
            .map(|(path, content)| self.extractor.extract(path, content))
            .collect();

        files.keys().zip(results).collect()
    }
}

/// File count per lowercase extension, in first-seen order.
pub fn extension_counts(files: &RepositoryFileSet) -> FileMap<usize> {
    let mut counts: FileMap<usize> = FileMap::new();
    for path in files.keys() {
        *counts.entry_or_default(&file_extension(path)) += 1;
    }
    counts
}

fn relation_stats_or_default(
    files: &RepositoryFileSet,
    relation: &FileMap<Vec<String>>,
) -> RelationStats {
    analytics::relation_stats(files, relation).unwrap_or_else(|err| {
        debug!("relation metrics defaulted: {err}");
        RelationStats::default()
    })
}
