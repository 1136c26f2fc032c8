//! Disease node in the association graph.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical namespace token for MeSH disease terms.
///
/// Older exports spelled it `MeSH`; only the lower-case form is emitted.
pub const MESH: &str = "mesh";

/// Opaque node identifier. Dense: the n-th inserted node has id `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pathology term, identified by `(namespace, name)`.
///
/// Two entities with equal namespace and name are the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiseaseEntity {
    pub namespace: String,
    pub name: String,
}

impl DiseaseEntity {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// A term in the [`MESH`] namespace.
    pub fn mesh(name: impl Into<String>) -> Self {
        Self::new(MESH, name)
    }
}

/// BEL rendering: `path(mesh:"Asthma")`.
impl fmt::Display for DiseaseEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path({}:\"{}\")", self.namespace, self.name.replace('"', "\\\""))
    }
}
