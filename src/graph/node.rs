use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::graph::edge::DependencyLink;
use crate::language::{Language, Role, classify_language, classify_role, file_name};

/// A file from the request: the target itself or a snapshot entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub path: String,
    pub name: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub language: Language,
    pub importance: u32,
    pub dependencies: Vec<DependencyLink>,
    pub exports: Vec<String>,
}

impl DependencyNode {
    /// Node for `path` with name, role and language derived from the path.
    /// Importance starts at zero and is filled in once the graph is complete.
    pub fn new(path: &str, dependencies: Vec<DependencyLink>, exports: Vec<String>) -> Self {
        Self {
            path: path.to_owned(),
            name: file_name(path).to_owned(),
            role: classify_role(path),
            language: classify_language(path),
            importance: 0,
            dependencies,
            exports,
        }
    }
}

/// Stand-in for a dependency target that is not a node of the snapshot
/// (third-party package, standard library, or an unconfirmed path).
///
/// Terminal: no exports, no outgoing dependencies, importance zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalNode {
    pub path: String,
    pub name: String,
    /// Language of the importing file; the target's real language is unknown.
    pub language: Language,
}

impl ExternalNode {
    pub fn new(path: &str, language: Language) -> Self {
        Self {
            path: path.to_owned(),
            name: file_name(path).to_owned(),
            language,
        }
    }
}

// Same field shape as `DependencyNode` so clients render both uniformly.
impl Serialize for ExternalNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ExternalNode", 7)?;
        s.serialize_field("path", &self.path)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("type", &Role::External)?;
        s.serialize_field("language", &self.language)?;
        s.serialize_field("importance", &0u32)?;
        s.serialize_field("dependencies", &[] as &[DependencyLink])?;
        s.serialize_field("exports", &[] as &[String])?;
        s.end()
    }
}

/// An entry of the target's dependency list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RelatedNode {
    Resolved(DependencyNode),
    External(ExternalNode),
}

impl RelatedNode {
    pub fn path(&self) -> &str {
        match self {
            RelatedNode::Resolved(n) => &n.path,
            RelatedNode::External(n) => &n.path,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            RelatedNode::Resolved(n) => n.role,
            RelatedNode::External(_) => Role::External,
        }
    }

    pub fn importance(&self) -> u32 {
        match self {
            RelatedNode::Resolved(n) => n.importance,
            RelatedNode::External(_) => 0,
        }
    }
}
