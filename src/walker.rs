use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::language::{Language, classify_language};
use crate::resolver::Snapshot;

/// Walk a project directory into a snapshot of repository-relative paths.
///
/// Respects `.gitignore` rules, always excludes `node_modules`, and applies
/// any additional exclusions from `config.exclude`. Only files with a known
/// language tag are kept (source, styles, JSON). Files that are not UTF-8 or
/// exceed `config.max_file_bytes()` are skipped.
///
/// Keys use `/` separators regardless of platform so they line up with the
/// import specifiers the resolver produces.
pub fn walk_snapshot(root: &Path, config: &BridgeConfig) -> Result<Snapshot> {
    if !root.is_dir() {
        anyhow::bail!("{} is not a directory", root.display());
    }

    let max_bytes = config.max_file_bytes();
    let mut snapshot = Snapshot::new();

    let walker = ignore::WalkBuilder::new(root)
        .standard_filters(true)
        // Read .gitignore files even when the directory is not inside a git repository.
        .require_git(false)
        .build();

    for result in walker {
        let entry = match result {
            Ok(e) => e,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };

        if entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false) {
            continue;
        }

        let path = entry.path();
        let Ok(rel) = path.strip_prefix(root) else {
            continue;
        };
        let key = relative_key(rel);

        if path_contains_node_modules(rel) || is_excluded_by_config(rel, &key, config) {
            continue;
        }
        if classify_language(&key) == Language::Unknown {
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        if size > max_bytes {
            debug!(path = %key, size, "skipping oversized file");
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => {
                snapshot.insert(key, content);
            }
            Err(err) => debug!(path = %key, "skipping unreadable file: {err}"),
        }
    }

    Ok(snapshot)
}

/// Read one file for analysis, returning its repository-relative key.
pub fn read_target(root: &Path, file: &Path) -> Result<(String, String)> {
    let full = if file.is_absolute() { file.to_path_buf() } else { root.join(file) };
    let content = std::fs::read_to_string(&full)
        .with_context(|| format!("failed to read {}", full.display()))?;
    let rel = full.strip_prefix(root).unwrap_or(file);
    Ok((relative_key(rel), content))
}

/// `/`-joined form of a relative path.
fn relative_key(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns true if any component of `path` is named `node_modules`.
fn path_contains_node_modules(path: &Path) -> bool {
    path.components().any(|c| {
        c.as_os_str()
            .to_str()
            .map(|s| s == "node_modules")
            .unwrap_or(false)
    })
}

/// Returns true if the relative path, or any of its components, matches an
/// exclusion pattern from config.
fn is_excluded_by_config(path: &Path, key: &str, config: &BridgeConfig) -> bool {
    let Some(patterns) = &config.exclude else {
        return false;
    };

    for pattern in patterns {
        let Ok(matcher) = glob::Pattern::new(pattern) else {
            continue;
        };
        if matcher.matches(key) {
            return true;
        }
        if path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|s| matcher.matches(s))
        {
            return true;
        }
    }

    false
}
