use log::debug;

use super::fileset::{FileMap, RepositoryFileSet};
use crate::parsers::{file_extension, ExtractionResult};

/// How an importer's raw import strings are matched against repository paths.
///
/// Chosen from the importing file's extension. Matching favours recall: one
/// import string may resolve to several files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Dotted module paths (`pkg.sub.module`), matched against file stems and
    /// directory-derived package paths.
    ModulePath { separator: char },
    /// `./` and `../` specifiers normalized against the importer's directory.
    RelativePath,
    /// Import string appears anywhere in the candidate path.
    Substring,
}

impl ResolutionStrategy {
    pub fn for_extension(extension: &str) -> Self {
        match extension {
            ".py" => ResolutionStrategy::ModulePath { separator: '.' },
            ".js" | ".jsx" | ".ts" | ".tsx" => ResolutionStrategy::RelativePath,
            _ => ResolutionStrategy::Substring,
        }
    }

    /// Whether `import` written in `importer` refers to `candidate`.
    pub fn matches(self, importer: &str, import: &str, candidate: &str) -> bool {
        match self {
            ResolutionStrategy::ModulePath { separator } => {
                let (module_name, _) = split_extension(basename(candidate));
                let package_path = dirname(candidate).replace('/', &separator.to_string());

                import == module_name
                    || import == package_path
                    || import.ends_with(&format!("{separator}{module_name}"))
                    || package_path.ends_with(&format!("{separator}{import}"))
            }
            ResolutionStrategy::RelativePath => {
                if !(import.starts_with("./") || import.starts_with("../")) {
                    return false;
                }
                let import_path = normpath(&join(dirname(importer), import));
                candidate.starts_with(&import_path) || import_path.starts_with(candidate)
            }
            ResolutionStrategy::Substring => candidate.contains(import),
        }
    }
}

/// Raw imports per file plus the resolved reverse relation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRelation {
    pub imports: FileMap<Vec<String>>,
    /// Importer appended once per successful match; never deduplicated.
    pub imported_by: FileMap<Vec<String>>,
}

/// Maps raw import strings to in-repository files with per-language heuristics.
#[derive(Debug, Clone, Default)]
pub struct ImportResolver;

impl ImportResolver {
    pub fn new() -> Self {
        Self
    }

    /// Build both relations. Every file of `files` gets an entry in each,
    /// possibly empty. `extractions` is keyed like `files`.
    pub fn resolve(
        &self,
        files: &RepositoryFileSet,
        extractions: &FileMap<ExtractionResult>,
    ) -> ImportRelation {
        let mut imports = FileMap::with_capacity(files.len());
        let mut imported_by: FileMap<Vec<String>> = FileMap::with_capacity(files.len());
        for path in files.keys() {
            imported_by.insert(path, Vec::new());
        }

        let mut resolved = 0usize;
        for importer in files.keys() {
            let raw = extractions
                .get(importer)
                .map(|result| result.imports.clone())
                .unwrap_or_default();
            let strategy = ResolutionStrategy::for_extension(&file_extension(importer));

            for import in &raw {
                for candidate in files.keys() {
                    if strategy.matches(importer, import, candidate) {
                        imported_by.entry_or_default(candidate).push(importer.to_string());
                        resolved += 1;
                    }
                }
            }

            imports.insert(importer, raw);
        }

        debug!(
            "resolved {} import matches across {} files",
            resolved,
            files.len()
        );

        ImportRelation {
            imports,
            imported_by,
        }
    }
}

/// Final path component.
pub(crate) fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(slash) => &path[slash + 1..],
        None => path,
    }
}

/// Everything before the final component, trailing slashes removed unless the
/// head is made only of slashes.
pub(crate) fn dirname(path: &str) -> &str {
    let head = match path.rfind('/') {
        Some(slash) => &path[..slash + 1],
        None => "",
    };
    if !head.is_empty() && head.chars().any(|c| c != '/') {
        head.trim_end_matches('/')
    } else {
        head
    }
}

/// Split a file name into stem and extension; the extension needs a
/// non-dot character before its dot.
pub(crate) fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => (&name[..dot], &name[dot..]),
        _ => (name, ""),
    }
}

pub(crate) fn join(base: &str, tail: &str) -> String {
    if tail.starts_with('/') || base.is_empty() {
        tail.to_string()
    } else if base.ends_with('/') {
        format!("{base}{tail}")
    } else {
        format!("{base}/{tail}")
    }
}

/// Lexical normalization: drops `.` and empty components and folds `..`.
pub(crate) fn normpath(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let leading = if path.starts_with("//") && !path.starts_with("///") {
        "//"
    } else if path.starts_with('/') {
        "/"
    } else {
        ""
    };

    let mut parts: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if leading.is_empty() && parts.last().map_or(true, |last| *last == "..") {
                    parts.push("..");
                } else if !parts.is_empty() {
                    parts.pop();
                }
            }
            other => parts.push(other),
        }
    }

    let joined = format!("{leading}{}", parts.join("/"));
    if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirname_and_basename() {
        assert_eq!(dirname("a/b/c.py"), "a/b");
        assert_eq!(dirname("c.py"), "");
        assert_eq!(dirname("/c.py"), "/");
        assert_eq!(dirname("a//c.py"), "a");
        assert_eq!(basename("a/b/c.py"), "c.py");
    }

    #[test]
    fn split_extension_ignores_leading_dots() {
        assert_eq!(split_extension("b.py"), ("b", ".py"));
        assert_eq!(split_extension(".env"), (".env", ""));
        assert_eq!(split_extension("x.tar.gz"), ("x.tar", ".gz"));
    }

    #[test]
    fn normpath_folds_components() {
        assert_eq!(normpath("./helper"), "helper");
        assert_eq!(normpath("src/./lib/../util"), "src/util");
        assert_eq!(normpath("../x"), "../x");
        assert_eq!(normpath("a/../.."), "..");
        assert_eq!(normpath("/../x"), "/x");
        assert_eq!(normpath("a/.."), ".");
    }

    #[test]
    fn module_path_matches_package_suffix() {
        let strategy = ResolutionStrategy::for_extension(".py");
        assert!(strategy.matches("main.py", "app.models", "app/models/__init__.py"));
        assert!(strategy.matches("main.py", "pkg.util", "lib/util.py"));
        assert!(strategy.matches("main.py", "models", "app/models/user.py"));
        assert!(!strategy.matches("main.py", "os", "app/models/user.py"));
    }

    #[test]
    fn relative_path_requires_marker() {
        let strategy = ResolutionStrategy::for_extension(".ts");
        assert!(strategy.matches("src/a.ts", "../lib/b", "lib/b.ts"));
        assert!(!strategy.matches("src/a.ts", "lib/b", "lib/b.ts"));
    }
}
