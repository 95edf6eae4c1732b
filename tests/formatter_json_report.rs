use depscope::core::{DependencyAnalyzer, RepositoryFileSet};
use depscope::formatters::JsonReportFormatter;
use serde_json::Value;

#[test]
fn json_report_exposes_the_output_contract() {
    let files: RepositoryFileSet = vec![
        ("a.py", "import b\ndef run(): pass\n".to_string()),
        ("b.py", "x = 1\n".to_string()),
    ]
    .into_iter()
    .collect();
    let report = DependencyAnalyzer::new().analyze(&files);

    let tmp = tempfile::NamedTempFile::new().unwrap();
    let path = tmp.path().with_extension("json");
    JsonReportFormatter::new().format_to_file(&report, &path).unwrap();

    let data = std::fs::read_to_string(&path).unwrap();
    let v: Value = serde_json::from_str(&data).unwrap();

    assert_eq!(v["imports"]["a.py"][0], "b");
    assert_eq!(v["importedBy"]["b.py"][0], "a.py");
    assert_eq!(v["importedBy"]["a.py"].as_array().unwrap().len(), 0);
    assert_eq!(v["definitions"]["a.py"][0], "run");
    assert_eq!(v["extensionCounts"][".py"], 2);
    // Key files are [file, score] pairs.
    assert!(v["keyFiles"][0][0].is_string());
    assert!(v["keyFiles"][0][1].is_number());
    assert_eq!(v["entryPoints"][0], "a.py");
    assert!(v["isolatedFiles"].as_array().unwrap().is_empty());
    assert_eq!(v["metrics"]["totalFiles"], 2);
    assert_eq!(v["metrics"]["fileWithMaxDependencies"], "a.py");
    assert_eq!(v["metrics"]["fileWithMaxDependents"], "b.py");

    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_report_has_null_max_files() {
    let report = DependencyAnalyzer::new().analyze(&RepositoryFileSet::new());
    let json = JsonReportFormatter::new()
        .with_pretty(false)
        .format_report(&report)
        .unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();

    assert!(v["metrics"]["fileWithMaxDependencies"].is_null());
    assert!(v["metrics"]["fileWithMaxDependents"].is_null());
    assert_eq!(v["metrics"]["avgDependencies"], 0.0);
    assert!(v["keyFiles"].as_array().unwrap().is_empty());
    assert!(v["imports"].as_object().unwrap().is_empty());
}
