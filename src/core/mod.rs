pub mod analytics;
pub mod analyzer;
pub mod cache;
pub mod fileset;
pub mod graph;
pub mod report;
pub mod resolver;
pub mod scanner;

pub use analytics::{AnalyticsError, KeyFile, RelationStats, KEY_FILE_LIMIT};
pub use analyzer::{extension_counts, DependencyAnalyzer};
pub use cache::{ContentCache, MemoryCache, NoCache};
pub use fileset::{FileMap, RepositoryFileSet};
pub use graph::{DependencyGraph, FileNode, GraphBuilder, ImportEdge};
pub use report::{AnalysisMetrics, AnalysisReport};
pub use resolver::{ImportRelation, ImportResolver, ResolutionStrategy};
pub use scanner::{FileScanner, ScanOptions, DEFAULT_SKIP_DIRS};
