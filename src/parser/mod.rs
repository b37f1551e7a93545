pub mod exports;
pub mod imports;
pub mod patterns;

use crate::graph::edge::DependencyLink;
use crate::language::Language;

use exports::extract_exports;
use imports::extract_imports;
use patterns::PatternCatalog;

/// Raw extraction result for one file: unresolved import links and export names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub imports: Vec<DependencyLink>,
    pub exports: Vec<String>,
}

/// Extract imports and exports from `content` using `language`'s patterns.
///
/// Languages without patterns (styles, JSON, unknown) yield an empty result.
pub fn extract(catalog: &PatternCatalog, content: &str, language: Language) -> Extracted {
    match catalog.patterns(language) {
        Some(patterns) => Extracted {
            imports: extract_imports(content, language, patterns),
            exports: extract_exports(content, patterns),
        },
        None => Extracted::default(),
    }
}
