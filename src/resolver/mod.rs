use std::collections::BTreeMap;

use crate::language::Language;
use crate::parser::imports::is_external;

/// Repository snapshot: repository-relative path → file content.
pub type Snapshot = BTreeMap<String, String>;

/// Suffixes probed against the snapshot, in priority order. An exact match
/// beats an extension match, which beats a directory index file.
const PROBE_SUFFIXES: &[&str] = &[
    "",
    ".ts",
    ".tsx",
    ".js",
    ".jsx",
    "/index.ts",
    "/index.tsx",
    "/index.js",
    "/index.jsx",
];

/// The outcome of resolving a single import specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Resolved path when `confirmed`; otherwise the best-effort cleaned path
    /// (or the untouched specifier for package-style targets).
    pub path: String,
    /// `true` when `path` is a key of the snapshot.
    pub confirmed: bool,
}

impl Resolution {
    fn unconfirmed(path: String) -> Self {
        Self {
            path,
            confirmed: false,
        }
    }
}

/// Resolve `target` as imported from `source_path` against `snapshot`.
///
/// Only the `@/` → `src/` alias and `./` / `../` arithmetic are understood.
/// Specifiers that look like package names under the TypeScript convention
/// are returned unchanged, whatever the importing file's language.
pub fn resolve(source_path: &str, target: &str, snapshot: &Snapshot) -> Resolution {
    if is_external(target, Language::TypeScript) {
        return Resolution::unconfirmed(target.to_owned());
    }

    let target = match target.strip_prefix("@/") {
        Some(rest) => format!("src/{rest}"),
        None => target.to_owned(),
    };

    let source_dir = match source_path.rfind('/') {
        Some(idx) => &source_path[..idx],
        None => "",
    };

    let joined = if let Some(rest) = target.strip_prefix("./") {
        format!("{source_dir}/{rest}")
    } else if target.starts_with("../") {
        join_parent(source_dir, &target).unwrap_or_default()
    } else {
        target
    };

    let cleaned = clean(&joined);

    for suffix in PROBE_SUFFIXES {
        let candidate = format!("{cleaned}{suffix}");
        if snapshot.contains_key(&candidate) {
            return Resolution {
                path: candidate,
                confirmed: true,
            };
        }
    }

    Resolution::unconfirmed(cleaned)
}

/// Apply a leading run of `..` segments to `source_dir`.
///
/// Returns `None` when the target climbs above the available segments.
fn join_parent(source_dir: &str, target: &str) -> Option<String> {
    let dir_parts: Vec<&str> = source_dir.split('/').collect();
    let target_parts: Vec<&str> = target.split('/').collect();

    let up = target_parts.iter().take_while(|&&p| p == "..").count();
    if up > dir_parts.len() {
        return None;
    }

    let kept = dir_parts[..dir_parts.len() - up].join("/");
    let rest = target_parts[up..].join("/");
    Some(format!("{kept}/{rest}"))
}

/// Collapse doubled separators and strip a leading separator.
fn clean(path: &str) -> String {
    let collapsed = path.replace("//", "/");
    match collapsed.strip_prefix('/') {
        Some(rest) => rest.to_owned(),
        None => collapsed,
    }
}
