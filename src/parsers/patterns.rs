use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// A compiled line pattern plus the capture group that carries its payload.
///
/// Some statements capture more than one group (an include keyword and its path,
/// or visibility, modifier and name of a method), so every pattern declares up
/// front which group is authoritative.
#[derive(Debug, Clone)]
pub struct SourcePattern {
    regex: Regex,
    group: usize,
}

impl SourcePattern {
    fn new(pattern: &str, group: usize) -> Self {
        Self {
            regex: Regex::new(pattern).expect("built-in source pattern must compile"),
            group,
        }
    }

    /// Payloads of every non-overlapping match on `line`. Matches whose
    /// designated group did not participate are skipped.
    pub fn captures<'a>(&'a self, line: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex
            .captures_iter(line)
            .filter_map(move |caps| caps.get(self.group).map(|m| m.as_str()))
    }
}

const ES_IMPORT: &str = r#"^\s*import\s+.*\s+from\s+['"](.+?)['"]"#;
const ES_REQUIRE: &str = r#"^\s*const\s+.*\s+=\s+require\(['"](.+?)['"]\)"#;
const C_INCLUDE: &str = r#"^\s*#include\s+[<"](.+?)[>"]"#;

static GLOBAL_TABLE: Lazy<PatternTable> = Lazy::new(PatternTable::new);

/// Per-extension import and definition patterns with a language-agnostic fallback.
#[derive(Debug, Clone)]
pub struct PatternTable {
    imports: HashMap<&'static str, Vec<SourcePattern>>,
    definitions: HashMap<&'static str, Vec<SourcePattern>>,
    fallback_imports: Vec<SourcePattern>,
}

impl PatternTable {
    pub fn new() -> Self {
        let mut imports = HashMap::with_capacity(16);

        imports.insert(
            ".py",
            vec![
                SourcePattern::new(r"^\s*import\s+([a-zA-Z0-9_.,\s]+)", 1),
                SourcePattern::new(r"^\s*from\s+([a-zA-Z0-9_.]+)\s+import", 1),
            ],
        );
        for ext in [".js", ".jsx", ".ts", ".tsx"] {
            imports.insert(
                ext,
                vec![SourcePattern::new(ES_IMPORT, 1), SourcePattern::new(ES_REQUIRE, 1)],
            );
        }
        imports.insert(
            ".java",
            vec![SourcePattern::new(r"^\s*import\s+([a-zA-Z0-9_.]+);", 1)],
        );
        for ext in [".c", ".cpp", ".h"] {
            imports.insert(ext, vec![SourcePattern::new(C_INCLUDE, 1)]);
        }
        imports.insert(
            ".php",
            vec![
                SourcePattern::new(
                    r#"(include|require|include_once|require_once)\s*\(\s*['"](.+?)['"]\s*\)"#,
                    2,
                ),
                SourcePattern::new(
                    r#"(include|require|include_once|require_once)\s+['"](.+?)['"]\s*;"#,
                    2,
                ),
            ],
        );
        imports.insert(
            ".rb",
            vec![
                SourcePattern::new(r#"^\s*require\s+['"](.+?)['"]"#, 1),
                SourcePattern::new(r#"^\s*require_relative\s+['"](.+?)['"]"#, 1),
            ],
        );

        let fallback_imports = vec![
            SourcePattern::new(r#"import\s+['"](.+?)['"]"#, 1),
            SourcePattern::new(r#"require\(['"](.+?)['"]\)"#, 1),
            SourcePattern::new(r#"include\s+['"](.+?)['"]"#, 1),
        ];

        let mut definitions = HashMap::with_capacity(4);
        definitions.insert(
            ".py",
            vec![
                SourcePattern::new(r"^\s*def\s+([a-zA-Z0-9_]+)\s*\(", 1),
                SourcePattern::new(r"^\s*class\s+([a-zA-Z0-9_]+)\s*", 1),
                SourcePattern::new(r"^\s*async\s+def\s+([a-zA-Z0-9_]+)\s*\(", 1),
            ],
        );
        definitions.insert(
            ".js",
            vec![
                SourcePattern::new(r"^\s*function\s+([a-zA-Z0-9_]+)\s*\(", 1),
                SourcePattern::new(r"^\s*class\s+([a-zA-Z0-9_]+)", 1),
                SourcePattern::new(r"^\s*const\s+([a-zA-Z0-9_]+)\s*=\s*\([^)]*\)\s*=>", 1),
                SourcePattern::new(r"^\s*const\s+([a-zA-Z0-9_]+)\s*=\s*function", 1),
            ],
        );
        // Name is the last group in each of these.
        definitions.insert(
            ".java",
            vec![
                SourcePattern::new(
                    r"^\s*(public|private|protected)?\s*(static)?\s*[a-zA-Z0-9_<>]+\s+([a-zA-Z0-9_]+)\s*\(",
                    3,
                ),
                SourcePattern::new(
                    r"^\s*(public|private|protected)?\s*(static)?\s*class\s+([a-zA-Z0-9_]+)",
                    3,
                ),
                SourcePattern::new(
                    r"^\s*(public|private|protected)?\s*interface\s+([a-zA-Z0-9_]+)",
                    2,
                ),
            ],
        );
        definitions.insert(
            ".php",
            vec![
                SourcePattern::new(r"^\s*function\s+([a-zA-Z0-9_]+)\s*\(", 1),
                SourcePattern::new(r"^\s*class\s+([a-zA-Z0-9_]+)", 1),
            ],
        );

        Self {
            imports,
            definitions,
            fallback_imports,
        }
    }

    /// Shared, lazily compiled table.
    pub fn global() -> &'static PatternTable {
        &GLOBAL_TABLE
    }

    /// Import patterns for an extension such as `".py"`; unknown extensions get
    /// the fallback set.
    pub fn import_patterns(&self, extension: &str) -> &[SourcePattern] {
        self.imports
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or(&self.fallback_imports)
    }

    /// Definition patterns for an extension; unknown extensions get none.
    pub fn definition_patterns(&self, extension: &str) -> &[SourcePattern] {
        self.definitions
            .get(extension)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_dedicated_imports(&self, extension: &str) -> bool {
        self.imports.contains_key(extension)
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased extension with its leading dot, or an empty string.
///
/// Names whose only dots are leading (`.bashrc`) have no extension.
pub fn file_extension(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => name[dot..].to_lowercase(),
        _ => String::new(),
    }
}
