//! Markdown summary of a dependency analysis.
//!
//! Sections, in order:
//!
//! - **File Type Distribution**: extensions by descending file count
//! - **Dependency Metrics**: averages and maxima of both relations
//! - **Key Files**: highest betweenness centrality
//! - **Potential Entry Points** / **Isolated Files**: truncated previews
//! - **Dependency Graph**: edge listing, when a graph is supplied

use anyhow::{Context, Result};
use petgraph::visit::EdgeRef;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::core::{AnalysisReport, DependencyGraph};

pub struct SummaryFormatter {
    /// Entries shown per list section before "... and N more"
    preview_limit: usize,
    /// Key files listed
    key_file_limit: usize,
    /// Edges listed in the graph section
    edge_limit: usize,
}

impl SummaryFormatter {
    pub fn new() -> Self {
        Self {
            preview_limit: 5,
            key_file_limit: 5,
            edge_limit: 25,
        }
    }

    pub fn with_preview_limit(mut self, limit: usize) -> Self {
        self.preview_limit = limit;
        self
    }

    pub fn with_key_file_limit(mut self, limit: usize) -> Self {
        self.key_file_limit = limit;
        self
    }

    pub fn with_edge_limit(mut self, limit: usize) -> Self {
        self.edge_limit = limit;
        self
    }

    pub fn format_to_file(
        &self,
        report: &AnalysisReport,
        graph: Option<&DependencyGraph>,
        output_path: &Path,
    ) -> Result<()> {
        let content = self.format_report(report, graph)?;
        fs::write(output_path, content)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_report(
        &self,
        report: &AnalysisReport,
        graph: Option<&DependencyGraph>,
    ) -> Result<String> {
        let mut out = String::from("## Code Dependency Analysis\n\n");

        out.push_str("### File Type Distribution\n");
        let mut extensions: Vec<(&str, usize)> = report
            .extension_counts
            .iter()
            .map(|(ext, count)| (ext, *count))
            .collect();
        extensions.sort_by(|a, b| b.1.cmp(&a.1));
        for (ext, count) in extensions.into_iter().filter(|(_, count)| *count > 0) {
            let label = if ext.is_empty() { "(no extension)" } else { ext };
            writeln!(out, "- {label}: {count} files")?;
        }

        let metrics = &report.metrics;
        out.push_str("\n### Dependency Metrics\n");
        writeln!(out, "- Total files analyzed: {}", metrics.total_files)?;
        writeln!(
            out,
            "- Average dependencies per file: {:.2}",
            metrics.avg_dependencies
        )?;
        writeln!(
            out,
            "- Maximum dependencies: {} (in {})",
            metrics.max_dependencies,
            metrics.file_with_max_dependencies.as_deref().unwrap_or("N/A")
        )?;
        writeln!(
            out,
            "- Average dependents per file: {:.2}",
            metrics.avg_dependents
        )?;
        writeln!(
            out,
            "- Maximum dependents: {} (for {})",
            metrics.max_dependents,
            metrics.file_with_max_dependents.as_deref().unwrap_or("N/A")
        )?;

        if !report.key_files.is_empty() {
            out.push_str("\n### Key Files (Highest Centrality)\n");
            for (file, centrality) in report.key_files.iter().take(self.key_file_limit) {
                writeln!(out, "- {file} (centrality: {centrality:.3})")?;
            }
        }

        self.write_preview(&mut out, "Potential Entry Points", &report.entry_points)?;
        self.write_preview(
            &mut out,
            "Isolated Files (No Dependencies)",
            &report.isolated_files,
        )?;

        if let Some(graph) = graph {
            out.push_str("\n### Dependency Graph\n");
            writeln!(
                out,
                "- {} files, {} import edges",
                graph.node_count(),
                graph.edge_count()
            )?;
            for edge in graph.edge_references().take(self.edge_limit) {
                writeln!(
                    out,
                    "- {} -> {} (`{}`)",
                    graph[edge.source()].path,
                    graph[edge.target()].path,
                    edge.weight().import
                )?;
            }
            if graph.edge_count() > self.edge_limit {
                writeln!(out, "- ... and {} more", graph.edge_count() - self.edge_limit)?;
            }
        }

        Ok(out)
    }

    fn write_preview(&self, out: &mut String, title: &str, files: &[String]) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }
        writeln!(out, "\n### {title}")?;
        for file in files.iter().take(self.preview_limit) {
            writeln!(out, "- {file}")?;
        }
        if files.len() > self.preview_limit {
            writeln!(out, "- ... and {} more", files.len() - self.preview_limit)?;
        }
        Ok(())
    }
}

impl Default for SummaryFormatter {
    fn default() -> Self {
        Self::new()
    }
}
