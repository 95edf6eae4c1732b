use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::core::AnalysisReport;

/// Serializes an [`AnalysisReport`] as the JSON output contract.
pub struct JsonReportFormatter {
    pretty: bool,
}

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn format_to_file(&self, report: &AnalysisReport, output_path: &Path) -> Result<()> {
        let json_content = self.format_report(report)?;
        fs::write(output_path, json_content)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        Ok(())
    }

    pub fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let content = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(content)
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}
