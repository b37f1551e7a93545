use regex::Captures;

use crate::graph::edge::{DependencyLink, ImportKind};
use crate::language::Language;
use crate::parser::patterns::{ImportShape, LanguagePatterns};

/// What one pattern match contributes before externality is decided.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ImportCapture {
    target: String,
    kind: ImportKind,
    names: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helper utilities
// ---------------------------------------------------------------------------

fn group<'a>(caps: &'a Captures, idx: usize) -> &'a str {
    caps.get(idx).map(|m| m.as_str()).unwrap_or("")
}

/// Split a comma-separated capture into trimmed, non-blank names.
pub(crate) fn split_names(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}

// ---------------------------------------------------------------------------
// Shape dispatch
// ---------------------------------------------------------------------------

fn capture(shape: ImportShape, caps: &Captures) -> ImportCapture {
    match shape {
        ImportShape::EsBinding => {
            let default = group(caps, 1);
            let named = group(caps, 2);
            // A named clause takes precedence over the default binding, and the
            // default identifier is not kept in that case.
            let (kind, names) = if !named.is_empty() {
                (ImportKind::Named, split_names(named))
            } else if !default.is_empty() {
                (ImportKind::Default, vec![default.to_owned()])
            } else {
                (ImportKind::Default, Vec::new())
            };
            ImportCapture {
                target: group(caps, 3).to_owned(),
                kind,
                names,
            }
        }
        ImportShape::EsNamespace => ImportCapture {
            target: group(caps, 2).to_owned(),
            kind: ImportKind::Namespace,
            names: vec![group(caps, 1).to_owned()],
        },
        ImportShape::PathOnly => ImportCapture {
            target: group(caps, 1).to_owned(),
            kind: ImportKind::SideEffect,
            names: Vec::new(),
        },
        ImportShape::PythonFrom => ImportCapture {
            target: group(caps, 1).to_owned(),
            kind: ImportKind::Named,
            names: split_names(group(caps, 2)),
        },
        ImportShape::PythonImport | ImportShape::GoSingle | ImportShape::RustPath => {
            ImportCapture {
                target: group(caps, 1).to_owned(),
                kind: ImportKind::Default,
                names: Vec::new(),
            }
        }
        ImportShape::GoBlock => ImportCapture {
            target: last_go_block_entry(group(caps, 1)),
            kind: ImportKind::Default,
            names: Vec::new(),
        },
    }
}

/// Last non-empty, non-comment entry of a grouped Go import body.
///
/// Earlier entries of the same block are overwritten, so one block match
/// yields a single link.
fn last_go_block_entry(body: &str) -> String {
    body.split('\n')
        .map(|entry| entry.trim().trim_matches('"'))
        .rev()
        .find(|entry| !entry.is_empty() && !entry.starts_with("//"))
        .unwrap_or("")
        .to_owned()
}

// ---------------------------------------------------------------------------
// Externality
// ---------------------------------------------------------------------------

/// Whether `target` refers to something outside the repository, judged by the
/// importing file's language conventions.
pub fn is_external(target: &str, language: Language) -> bool {
    match language {
        Language::TypeScript | Language::JavaScript => {
            !target.starts_with('.') && !target.starts_with("@/") && !target.starts_with("~/")
        }
        Language::Python => !target.starts_with('.'),
        Language::Go => target.contains('/'),
        Language::Rust => {
            !target.starts_with("crate::")
                && !target.starts_with("self::")
                && !target.starts_with("super::")
        }
        Language::Css | Language::Json | Language::Unknown => true,
    }
}

// ---------------------------------------------------------------------------
// Import extraction
// ---------------------------------------------------------------------------

/// Extract every import occurrence from `content`, line by line.
///
/// Every pattern is run against every line and all matches are kept, so one
/// line can produce several links. Matches with an empty target are dropped.
pub fn extract_imports(
    content: &str,
    language: Language,
    patterns: &LanguagePatterns,
) -> Vec<DependencyLink> {
    let mut links = Vec::new();

    for (idx, line) in content.split('\n').enumerate() {
        for pattern in &patterns.imports {
            for caps in pattern.regex.captures_iter(line) {
                let ImportCapture { target, kind, names } = capture(pattern.shape, &caps);
                if target.is_empty() {
                    continue;
                }
                let is_external = is_external(&target, language);
                links.push(DependencyLink {
                    target_path: target,
                    kind,
                    import_names: names,
                    line_number: idx + 1,
                    is_external,
                });
            }
        }
    }

    links
}
