use serde::{Deserialize, Serialize};

/// Language tag derived from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    TypeScript,
    JavaScript,
    Python,
    Go,
    Rust,
    Css,
    Json,
    Unknown,
}

/// Extension table, checked in order against the lowercased path.
const SUFFIXES: &[(&str, Language)] = &[
    (".ts", Language::TypeScript),
    (".tsx", Language::TypeScript),
    (".js", Language::JavaScript),
    (".jsx", Language::JavaScript),
    (".mjs", Language::JavaScript),
    (".py", Language::Python),
    (".go", Language::Go),
    (".rs", Language::Rust),
    (".css", Language::Css),
    (".scss", Language::Css),
    (".sass", Language::Css),
    (".json", Language::Json),
];

impl Language {
    /// Wire name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Go => "go",
            Language::Rust => "rust",
            Language::Css => "css",
            Language::Json => "json",
            Language::Unknown => "unknown",
        }
    }
}

/// Classify a path by its lowercased suffix. Unmapped suffixes yield `Unknown`.
pub fn classify_language(path: &str) -> Language {
    let lower = path.to_lowercase();
    SUFFIXES
        .iter()
        .find(|(suffix, _)| lower.ends_with(suffix))
        .map(|&(_, lang)| lang)
        .unwrap_or(Language::Unknown)
}

/// Coarse file-role category, used for display and the importance bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Component,
    Utility,
    Type,
    Api,
    Page,
    Config,
    Style,
    File,
    /// Only carried by synthetic nodes for unresolved dependency targets.
    External,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Component => "component",
            Role::Utility => "utility",
            Role::Type => "type",
            Role::Api => "api",
            Role::Page => "page",
            Role::Config => "config",
            Role::Style => "style",
            Role::File => "file",
            Role::External => "external",
        }
    }
}

/// Categorize a path. First match wins, in this order:
/// `/components/`, `/lib/` or `/utils/`, `/types/`, `/api/`, page file under
/// `/app/`, config suffixes, style suffixes, then `File`.
pub fn classify_role(path: &str) -> Role {
    let name = file_name(path);

    if path.contains("/components/") {
        Role::Component
    } else if path.contains("/lib/") || path.contains("/utils/") {
        Role::Utility
    } else if path.contains("/types/") {
        Role::Type
    } else if path.contains("/api/") {
        Role::Api
    } else if path.contains("/app/")
        && (name.ends_with("page.tsx") || name.ends_with("page.ts"))
    {
        Role::Page
    } else if name.ends_with(".config.ts")
        || name.ends_with(".config.js")
        || name.ends_with(".json")
    {
        Role::Config
    } else if name.ends_with(".css") || name.ends_with(".scss") {
        Role::Style
    } else {
        Role::File
    }
}

/// Last `/`-separated segment of `path`, or the whole path if it has none.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}
