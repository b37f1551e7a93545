use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use crate::graph::RepoGraph;
use crate::graph::node::{DependencyNode, ExternalNode, RelatedNode};
use crate::language::classify_language;
use crate::parser::{extract, patterns::PatternCatalog};
use crate::resolver::{Snapshot, resolve};

/// One analysis request: the target file plus an optional repository snapshot.
///
/// Missing and `null` fields read as empty, so only malformed JSON or a
/// wrongly typed value is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeRequest {
    #[serde(deserialize_with = "null_as_empty")]
    pub file_path: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub file_content: String,
    /// Every other known file, path → content. Without it only the target's
    /// own imports are reported and nothing resolves to a real node.
    pub repo_files: Option<Snapshot>,
    /// Passed through by clients; not used by the analysis.
    #[serde(deserialize_with = "null_as_empty")]
    pub owner: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub repo: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// The dependency bridge of one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub source_file: DependencyNode,
    /// Files the target imports, most important first.
    pub dependencies: Vec<RelatedNode>,
    /// Files importing the target, most important first.
    pub dependents: Vec<DependencyNode>,
    pub total_nodes: usize,
    pub total_edges: usize,
}

/// Analyze `request.file_path` against its snapshot.
///
/// Deterministic: the same request always produces the same result. Ties in
/// importance are ordered by path.
pub fn analyze(catalog: &PatternCatalog, request: &AnalyzeRequest) -> AnalysisResult {
    let empty = Snapshot::new();
    let snapshot = request.repo_files.as_ref().unwrap_or(&empty);
    let repo = if snapshot.is_empty() {
        RepoGraph::empty()
    } else {
        RepoGraph::build(catalog, snapshot)
    };

    let path = request.file_path.as_str();
    let language = classify_language(path);
    let extracted = extract(catalog, &request.file_content, language);

    let mut source = DependencyNode::new(path, Vec::new(), extracted.exports);
    let mut dependencies = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for link in &extracted.imports {
        let resolution = resolve(path, &link.target_path, snapshot);
        if !seen.insert(resolution.path.clone()) {
            continue;
        }
        let related = if resolution.confirmed
            && let Some(node) = repo.node(&resolution.path)
        {
            RelatedNode::Resolved(node.clone())
        } else {
            RelatedNode::External(ExternalNode::new(&resolution.path, language))
        };
        source.dependencies.push(link.retarget(resolution.path));
        dependencies.push(related);
    }

    let mut dependents: Vec<DependencyNode> = repo.dependents(path).into_iter().cloned().collect();

    dependencies.sort_by(|a, b| {
        b.importance()
            .cmp(&a.importance())
            .then_with(|| a.path().cmp(b.path()))
    });
    dependents.sort_by(|a, b| {
        b.importance
            .cmp(&a.importance)
            .then_with(|| a.path.cmp(&b.path))
    });

    source.importance = repo.score(path, source.exports.len());

    let total_edges = dependencies.len() + dependents.len();
    AnalysisResult {
        source_file: source,
        dependencies,
        dependents,
        total_nodes: total_edges + 1,
        total_edges,
    }
}
