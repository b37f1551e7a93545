use std::sync::OnceLock;

use regex::Regex;

use crate::language::Language;

/// What a compiled import pattern captures, declared next to the pattern
/// itself so the extractor never branches on capture-group counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportShape {
    /// `import Default, { A, B } from 'path'`: groups (default?, named?, path).
    EsBinding,
    /// `import * as Ns from 'path'`: groups (namespace, path).
    EsNamespace,
    /// Side-effect, dynamic `import()` and `require()`: group (path).
    PathOnly,
    /// `from module import A, B`: groups (module, names).
    PythonFrom,
    /// `import module`: group (module).
    PythonImport,
    /// `import ( ... )`: group (block body).
    GoBlock,
    /// `import "path"`: group (path).
    GoSingle,
    /// `use path;` / `mod name;`: group (path).
    RustPath,
}

/// A compiled import pattern and the shape of its captures.
#[derive(Debug)]
pub struct ImportPattern {
    pub regex: Regex,
    pub shape: ImportShape,
}

/// Ordered import and export patterns for one language.
#[derive(Debug, Default)]
pub struct LanguagePatterns {
    pub imports: Vec<ImportPattern>,
    /// Group 1, when present, names the exported symbol(s). Patterns without a
    /// group only detect that the file exports something.
    pub exports: Vec<Regex>,
}

/// Per-language pattern tables. Built once per process and read-only after.
#[derive(Debug)]
pub struct PatternCatalog {
    typescript: LanguagePatterns,
    javascript: LanguagePatterns,
    python: LanguagePatterns,
    go: LanguagePatterns,
    rust: LanguagePatterns,
}

// ---------------------------------------------------------------------------
// Pattern sources
// ---------------------------------------------------------------------------

const TS_IMPORTS: &[(&str, ImportShape)] = &[
    (
        r#"(?m)^import\s+(?:type\s+)?(?:(\w+)(?:\s*,\s*)?)?(?:\{([^}]+)\})?\s*from\s*['"]([^'"]+)['"]"#,
        ImportShape::EsBinding,
    ),
    (
        r#"(?m)^import\s+\*\s+as\s+(\w+)\s+from\s*['"]([^'"]+)['"]"#,
        ImportShape::EsNamespace,
    ),
    (r#"(?m)^import\s+['"]([^'"]+)['"]"#, ImportShape::PathOnly),
    (r#"import\(['"]([^'"]+)['"]\)"#, ImportShape::PathOnly),
    (r#"require\(['"]([^'"]+)['"]\)"#, ImportShape::PathOnly),
];

const JS_IMPORTS: &[(&str, ImportShape)] = &[
    (
        r#"(?m)^import\s+(?:(\w+)(?:\s*,\s*)?)?(?:\{([^}]+)\})?\s*from\s*['"]([^'"]+)['"]"#,
        ImportShape::EsBinding,
    ),
    (
        r#"(?m)^import\s+\*\s+as\s+(\w+)\s+from\s*['"]([^'"]+)['"]"#,
        ImportShape::EsNamespace,
    ),
    (r#"(?m)^import\s+['"]([^'"]+)['"]"#, ImportShape::PathOnly),
    (r#"import\(['"]([^'"]+)['"]\)"#, ImportShape::PathOnly),
    (r#"require\(['"]([^'"]+)['"]\)"#, ImportShape::PathOnly),
];

const PY_IMPORTS: &[(&str, ImportShape)] = &[
    (r"(?m)^from\s+([.\w]+)\s+import\s+(.+)", ImportShape::PythonFrom),
    (r"(?m)^import\s+([.\w]+)(?:\s+as\s+\w+)?", ImportShape::PythonImport),
];

const GO_IMPORTS: &[(&str, ImportShape)] = &[
    (r"(?m)import\s+\(\s*([^)]+)\s*\)", ImportShape::GoBlock),
    (r#"(?m)import\s+"([^"]+)""#, ImportShape::GoSingle),
];

const RS_IMPORTS: &[(&str, ImportShape)] = &[
    (r"(?m)^use\s+([^;]+);", ImportShape::RustPath),
    (r"(?m)^mod\s+(\w+);", ImportShape::RustPath),
];

const TS_EXPORTS: &[&str] = &[
    r"(?m)^export\s+(?:default\s+)?(?:async\s+)?(?:function|class|const|let|var|interface|type|enum)\s+(\w+)",
    r"(?m)^export\s+\{([^}]+)\}",
    r"(?m)^export\s+default",
];

const JS_EXPORTS: &[&str] = &[
    r"(?m)^export\s+(?:default\s+)?(?:async\s+)?(?:function|class|const|let|var)\s+(\w+)",
    r"(?m)^export\s+\{([^}]+)\}",
    r"(?m)^export\s+default",
    r"module\.exports\s*=",
];

const PY_EXPORTS: &[&str] = &[
    r"(?m)^def\s+(\w+)\s*\(",
    r"(?m)^class\s+(\w+)",
    r"(?m)^(\w+)\s*=",
];

const GO_EXPORTS: &[&str] = &[
    r"(?m)^func\s+([A-Z]\w*)",
    r"(?m)^type\s+([A-Z]\w*)",
    r"(?m)^var\s+([A-Z]\w*)",
    r"(?m)^const\s+([A-Z]\w*)",
];

const RS_EXPORTS: &[&str] = &[
    r"(?m)^pub\s+fn\s+(\w+)",
    r"(?m)^pub\s+struct\s+(\w+)",
    r"(?m)^pub\s+enum\s+(\w+)",
    r"(?m)^pub\s+trait\s+(\w+)",
];

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Compile `src` with `\w` and `\s` narrowed to their ASCII sets.
///
/// Other classes and `.` stay Unicode-aware. Inside a bracket class the
/// replacement nests, e.g. `[.\w]` becomes `[.[0-9A-Za-z_]]`.
fn ascii_regex(src: &str) -> Result<Regex, regex::Error> {
    let narrowed = src
        .replace(r"\w", "[0-9A-Za-z_]")
        .replace(r"\s", r"[\t\n\f\r ]");
    Regex::new(&narrowed)
}

fn compile(
    imports: &[(&str, ImportShape)],
    exports: &[&str],
) -> Result<LanguagePatterns, regex::Error> {
    let imports = imports
        .iter()
        .map(|&(src, shape)| {
            Ok(ImportPattern {
                regex: ascii_regex(src)?,
                shape,
            })
        })
        .collect::<Result<Vec<_>, regex::Error>>()?;
    let exports = exports
        .iter()
        .map(|src| ascii_regex(src))
        .collect::<Result<Vec<_>, regex::Error>>()?;
    Ok(LanguagePatterns { imports, exports })
}

impl PatternCatalog {
    /// Compile every language's pattern table.
    pub fn build() -> Result<Self, regex::Error> {
        Ok(Self {
            typescript: compile(TS_IMPORTS, TS_EXPORTS)?,
            javascript: compile(JS_IMPORTS, JS_EXPORTS)?,
            python: compile(PY_IMPORTS, PY_EXPORTS)?,
            go: compile(GO_IMPORTS, GO_EXPORTS)?,
            rust: compile(RS_IMPORTS, RS_EXPORTS)?,
        })
    }

    /// Patterns for `language`, or `None` for styles, JSON and unknown files.
    pub fn patterns(&self, language: Language) -> Option<&LanguagePatterns> {
        match language {
            Language::TypeScript => Some(&self.typescript),
            Language::JavaScript => Some(&self.javascript),
            Language::Python => Some(&self.python),
            Language::Go => Some(&self.go),
            Language::Rust => Some(&self.rust),
            Language::Css | Language::Json | Language::Unknown => None,
        }
    }
}

static CATALOG: OnceLock<PatternCatalog> = OnceLock::new();

/// The process-wide catalog, compiled on first use.
///
/// The pattern sources are compile-time constants, so a compile failure is a
/// bug in this file rather than a runtime condition.
pub fn catalog() -> &'static PatternCatalog {
    CATALOG.get_or_init(|| PatternCatalog::build().expect("invalid built-in pattern"))
}
