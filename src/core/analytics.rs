use rustworkx_core::centrality;
use thiserror::Error;

use super::fileset::{FileMap, RepositoryFileSet};
use super::graph::DependencyGraph;

/// Number of entries kept in the key-file ranking.
pub const KEY_FILE_LIMIT: usize = 10;

/// Node count above which centrality runs across the rayon pool.
const PARALLEL_THRESHOLD: usize = 50;

/// A file and its betweenness centrality score.
pub type KeyFile = (String, f64);

/// Reasons an analytics pass cannot produce a meaningful value. Callers map
/// each variant to an empty/zero default.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("graph has no nodes")]
    EmptyGraph,

    #[error("centrality for {file} is not a finite number")]
    NonFiniteScore { file: String },

    #[error("no centrality computed for {file}")]
    MissingScore { file: String },

    #[error("relation covers no files")]
    EmptyRelation,
}

/// Average and maximum sequence length of a relation, plus the first file
/// (in input order) holding the maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelationStats {
    pub average: f64,
    pub maximum: usize,
    pub file_with_max: Option<String>,
}

/// Betweenness centrality of every node, in node order.
///
/// Unweighted directed shortest paths, endpoints excluded, scaled by
/// `1 / ((n - 1)(n - 2))` when there are more than two nodes.
pub fn betweenness_centrality(graph: &DependencyGraph) -> Result<Vec<KeyFile>, AnalyticsError> {
    if graph.node_count() == 0 {
        return Err(AnalyticsError::EmptyGraph);
    }

    let scores = centrality::betweenness_centrality(graph, false, true, PARALLEL_THRESHOLD);

    graph
        .node_indices()
        .map(|idx| {
            let path = graph[idx].path.clone();
            match scores.get(idx.index()).copied().flatten() {
                Some(score) if score.is_finite() => Ok((path, score)),
                Some(_) => Err(AnalyticsError::NonFiniteScore { file: path }),
                None => Err(AnalyticsError::MissingScore { file: path }),
            }
        })
        .collect()
}

/// Highest-centrality files, descending, ties kept in node order.
pub fn key_files(graph: &DependencyGraph) -> Result<Vec<KeyFile>, AnalyticsError> {
    let mut ranked = betweenness_centrality(graph)?;
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(KEY_FILE_LIMIT);
    Ok(ranked)
}

/// Files that never appear as the target of a resolved import.
pub fn entry_points(files: &RepositoryFileSet, imported_by: &FileMap<Vec<String>>) -> Vec<String> {
    files
        .keys()
        .filter(|path| is_absent_or_empty(imported_by, path))
        .map(str::to_string)
        .collect()
}

/// Files with no raw imports and no resolved importers.
pub fn isolated_files(
    files: &RepositoryFileSet,
    imports: &FileMap<Vec<String>>,
    imported_by: &FileMap<Vec<String>>,
) -> Vec<String> {
    files
        .keys()
        .filter(|path| is_absent_or_empty(imports, path) && is_absent_or_empty(imported_by, path))
        .map(str::to_string)
        .collect()
}

/// Length statistics of `relation` over every file of `files`; a file missing
/// from the relation counts as zero.
pub fn relation_stats(
    files: &RepositoryFileSet,
    relation: &FileMap<Vec<String>>,
) -> Result<RelationStats, AnalyticsError> {
    if files.is_empty() {
        return Err(AnalyticsError::EmptyRelation);
    }

    let mut total = 0usize;
    let mut best: Option<(&str, usize)> = None;
    for path in files.keys() {
        let count = relation.get(path).map_or(0, Vec::len);
        total += count;
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((path, count));
        }
    }

    let (file, maximum) = best.ok_or(AnalyticsError::EmptyRelation)?;
    Ok(RelationStats {
        average: total as f64 / files.len() as f64,
        maximum,
        file_with_max: Some(file.to_string()),
    })
}

fn is_absent_or_empty(relation: &FileMap<Vec<String>>, path: &str) -> bool {
    relation.get(path).map_or(true, Vec::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::{FileNode, GraphBuilder};

    fn chain(paths: &[&str]) -> DependencyGraph {
        let mut builder = GraphBuilder::new();
        for path in paths {
            builder.add_node(FileNode::new(path.to_string()));
        }
        for pair in paths.windows(2) {
            builder.add_edge(pair[0], pair[1], pair[1]);
        }
        builder.build()
    }

    #[test]
    fn middle_of_a_chain_carries_all_paths() {
        // a -> b -> c: only the pair (a, c) routes through b.
        let scores = betweenness_centrality(&chain(&["a", "b", "c"])).unwrap();
        assert_eq!(scores[0].1, 0.0);
        assert!((scores[1].1 - 0.5).abs() < 1e-12);
        assert_eq!(scores[2].1, 0.0);
    }

    #[test]
    fn diamond_splits_credit_between_parallel_paths() {
        // a -> {b, c} -> d: each branch carries half of the (a, d) paths.
        let mut builder = GraphBuilder::new();
        for path in ["a", "b", "c", "d"] {
            builder.add_node(FileNode::new(path.to_string()));
        }
        builder.add_edge("a", "b", "b");
        builder.add_edge("a", "c", "c");
        builder.add_edge("b", "d", "d");
        builder.add_edge("c", "d", "d");
        let scores = betweenness_centrality(&builder.build()).unwrap();
        let expected = [0.0, 1.0 / 12.0, 1.0 / 12.0, 0.0];
        for ((_, score), want) in scores.iter().zip(expected) {
            assert!((score - want).abs() < 1e-12, "{score} != {want}");
        }
    }

    #[test]
    fn two_node_graph_is_not_rescaled() {
        let scores = betweenness_centrality(&chain(&["a", "b"])).unwrap();
        assert!(scores.iter().all(|(_, score)| *score == 0.0));
    }

    #[test]
    fn empty_graph_is_an_error() {
        let graph = DependencyGraph::new();
        assert_eq!(betweenness_centrality(&graph), Err(AnalyticsError::EmptyGraph));
    }

    #[test]
    fn self_loops_do_not_score() {
        let mut builder = GraphBuilder::new();
        builder.add_node(FileNode::new("a".into()));
        builder.add_edge("a", "a", "a");
        let scores = betweenness_centrality(&builder.build()).unwrap();
        assert_eq!(scores, vec![("a".to_string(), 0.0)]);
    }
}
