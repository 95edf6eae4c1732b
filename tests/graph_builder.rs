use depscope::core::{
    graph::{FileNode, GraphBuilder},
    DependencyGraph, FileMap, RepositoryFileSet,
};

fn file_set(paths: &[&str]) -> RepositoryFileSet {
    paths.iter().map(|path| (*path, String::new())).collect()
}

fn imports(entries: &[(&str, &[&str])]) -> FileMap<Vec<String>> {
    entries
        .iter()
        .map(|(path, raw)| (*path, raw.iter().map(|s| s.to_string()).collect()))
        .collect()
}

fn has_edge(graph: &DependencyGraph, from: &str, to: &str) -> bool {
    let find = |path: &str| graph.node_indices().find(|&idx| graph[idx].path == path);
    match (find(from), find(to)) {
        (Some(a), Some(b)) => graph.find_edge(a, b).is_some(),
        _ => false,
    }
}

#[test]
fn every_file_becomes_a_node() {
    let files = file_set(&["a.py", "b.py", "lonely.rs"]);
    let graph = GraphBuilder::from_imports(&files, &FileMap::new());

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 0);
    let paths: Vec<&str> = graph.node_indices().map(|idx| graph[idx].path.as_str()).collect();
    assert_eq!(paths, vec!["a.py", "b.py", "lonely.rs"]);
    assert_eq!(graph[graph.node_indices().next().unwrap()].extension, ".py");
}

#[test]
fn edges_follow_substring_matches_with_set_semantics() {
    let files = file_set(&["a.py", "b.py", "lib/b_helpers.py"]);
    let raw = imports(&[("a.py", &["b", "b"][..])]);
    let graph = GraphBuilder::from_imports(&files, &raw);

    assert!(has_edge(&graph, "a.py", "b.py"));
    assert!(has_edge(&graph, "a.py", "lib/b_helpers.py"));
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn self_loops_are_kept() {
    let files = file_set(&["config.py"]);
    let raw = imports(&[("config.py", &["config"][..])]);
    let graph = GraphBuilder::from_imports(&files, &raw);

    assert!(has_edge(&graph, "config.py", "config.py"));
}

#[test]
fn relative_specifiers_do_not_produce_substring_edges() {
    let files = file_set(&["util.js", "helper.js"]);
    let raw = imports(&[("util.js", &["./helper"][..])]);
    let graph = GraphBuilder::from_imports(&files, &raw);

    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn add_edge_returns_none_when_missing_nodes() {
    let mut gb = GraphBuilder::new();
    gb.add_node(FileNode::new("a.py".to_string()));

    assert!(gb.add_edge("a.py", "missing.py", "missing").is_none());
    let first = gb.add_edge("a.py", "a.py", "a");
    assert!(first.is_some());
    assert_eq!(gb.add_edge("a.py", "a.py", "a"), first);
    assert_eq!(gb.build().edge_count(), 1);
}
