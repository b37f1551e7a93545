use serde::{Deserialize, Serialize};

/// How an import binds names. Fixed at extraction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    /// `import React from 'react'`, Python `import os`, Go and Rust imports.
    Default,
    /// `import { a, b } from './m'`, Python `from m import a, b`.
    Named,
    /// `import * as ns from './m'`.
    Namespace,
    /// `import './polyfill'`, `import('./lazy')`, `require('./m')`.
    SideEffect,
}

/// One declared import occurrence in a file.
///
/// `target_path` holds the raw specifier after extraction and the resolved
/// path after resolution; `kind` and `line_number` never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyLink {
    pub target_path: String,
    #[serde(rename = "importType")]
    pub kind: ImportKind,
    pub import_names: Vec<String>,
    /// 1-based source line.
    pub line_number: usize,
    pub is_external: bool,
}

impl DependencyLink {
    /// Copy of this link pointing at `resolved` instead of the raw specifier.
    pub fn retarget(&self, resolved: String) -> Self {
        Self {
            target_path: resolved,
            ..self.clone()
        }
    }
}
