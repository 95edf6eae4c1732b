use depscope::core::{DependencyAnalyzer, ImportResolver, RepositoryFileSet, ResolutionStrategy};

fn file_set(entries: &[(&str, &str)]) -> RepositoryFileSet {
    entries
        .iter()
        .map(|(path, content)| (*path, content.to_string()))
        .collect()
}

fn resolve(files: &RepositoryFileSet) -> depscope::core::ImportRelation {
    let extractions = DependencyAnalyzer::new().extract_all(files);
    ImportResolver::new().resolve(files, &extractions)
}

#[test]
fn python_module_names_and_packages_resolve() {
    let files = file_set(&[
        ("main.py", "import utils\nfrom app.models import User\n"),
        ("utils.py", "x = 1\n"),
        ("app/models/__init__.py", ""),
        ("app/models/user.py", "class User: pass\n"),
    ]);
    let relation = resolve(&files);

    assert_eq!(relation.imports.get("main.py").unwrap(), &vec!["utils", "app.models"]);
    assert_eq!(relation.imported_by.get("utils.py").unwrap(), &vec!["main.py"]);
    // `app.models` equals the package path of both files in that directory.
    assert_eq!(
        relation.imported_by.get("app/models/__init__.py").unwrap(),
        &vec!["main.py"]
    );
    assert_eq!(
        relation.imported_by.get("app/models/user.py").unwrap(),
        &vec!["main.py"]
    );
}

#[test]
fn relative_imports_resolve_against_importer_directory() {
    let files = file_set(&[
        ("src/util.js", "import helper from './helper'\nimport lib from '../lib/core'\n"),
        ("src/helper.js", "export default 1;\n"),
        ("lib/core.ts", "export const x = 1;\n"),
        ("lib/core/index.ts", "export const y = 1;\n"),
    ]);
    let relation = resolve(&files);

    assert_eq!(relation.imported_by.get("src/helper.js").unwrap(), &vec!["src/util.js"]);
    // Prefix matching is permissive: both the file and the directory index match.
    assert_eq!(relation.imported_by.get("lib/core.ts").unwrap(), &vec!["src/util.js"]);
    assert_eq!(
        relation.imported_by.get("lib/core/index.ts").unwrap(),
        &vec!["src/util.js"]
    );
}

#[test]
fn bare_specifiers_from_javascript_resolve_to_nothing() {
    let files = file_set(&[
        ("app.js", "const react = require('react');\n"),
        ("react.js", "module.exports = {};\n"),
    ]);
    let relation = resolve(&files);

    assert!(relation.imported_by.get("react.js").unwrap().is_empty());
}

#[test]
fn other_languages_use_substring_matching_on_every_candidate() {
    let files = file_set(&[
        ("main.c", "#include \"util.h\"\n"),
        ("util.h", ""),
        ("lib/util.h", ""),
    ]);
    let relation = resolve(&files);

    assert_eq!(relation.imported_by.get("util.h").unwrap(), &vec!["main.c"]);
    assert_eq!(relation.imported_by.get("lib/util.h").unwrap(), &vec!["main.c"]);
    assert!(relation.imported_by.get("main.c").unwrap().is_empty());
}

#[test]
fn imported_by_keeps_duplicates() {
    let files = file_set(&[("a.py", "import b\nimport b\n"), ("b.py", "")]);
    let relation = resolve(&files);

    assert_eq!(relation.imported_by.get("b.py").unwrap(), &vec!["a.py", "a.py"]);
}

#[test]
fn every_file_has_both_relations() {
    let files = file_set(&[("a.txt", "nothing"), ("b.txt", "")]);
    let relation = resolve(&files);

    for path in files.keys() {
        assert!(relation.imports.get(path).is_some());
        assert!(relation.imported_by.get(path).is_some());
    }
}

#[test]
fn strategy_follows_importer_extension() {
    assert_eq!(
        ResolutionStrategy::for_extension(".py"),
        ResolutionStrategy::ModulePath { separator: '.' }
    );
    assert_eq!(ResolutionStrategy::for_extension(".jsx"), ResolutionStrategy::RelativePath);
    assert_eq!(ResolutionStrategy::for_extension(".rb"), ResolutionStrategy::Substring);
}
