//! Association (undirected edge) in the graph.

use std::fmt;

use serde::{Deserialize, Serialize};
use super::{Annotations, NodeId, Value};

/// Opaque edge identifier. Dense, in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Literature reference attached to an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Citation {
    /// Citation database, e.g. `PubMed`.
    pub db: String,
    pub reference: String,
}

impl Citation {
    pub fn pubmed(reference: impl Into<String>) -> Self {
        Self {
            db: "PubMed".to_string(),
            reference: reference.into(),
        }
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.db, self.reference)
    }
}

/// An undirected "association" between two diseases.
///
/// `source`/`target` record the row's column order (`disease_A`, `disease_B`)
/// but carry no direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssociationEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub citation: Citation,
    pub evidence: String,
    pub annotations: Annotations,
}

impl AssociationEdge {
    pub fn annotation(&self, key: &str) -> Option<&Value> {
        self.annotations.get(key)
    }

    /// True if the edge joins `a` and `b`, in either order.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The "other" end of the edge from the given node.
    pub fn other_node(&self, from: NodeId) -> Option<NodeId> {
        if from == self.source { Some(self.target) }
        else if from == self.target { Some(self.source) }
        else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(source: usize, target: usize) -> AssociationEdge {
        AssociationEdge {
            id: EdgeId(0),
            source: NodeId(source),
            target: NodeId(target),
            citation: Citation::pubmed("25700523"),
            evidence: "from ddr".into(),
            annotations: Annotations::new(),
        }
    }

    #[test]
    fn test_connects_is_undirected() {
        let e = edge(0, 1);
        assert!(e.connects(NodeId(0), NodeId(1)));
        assert!(e.connects(NodeId(1), NodeId(0)));
        assert!(!e.connects(NodeId(0), NodeId(2)));
    }

    #[test]
    fn test_other_node() {
        let e = edge(3, 7);
        assert_eq!(e.other_node(NodeId(3)), Some(NodeId(7)));
        assert_eq!(e.other_node(NodeId(7)), Some(NodeId(3)));
        assert_eq!(e.other_node(NodeId(1)), None);
    }

    #[test]
    fn test_citation_display() {
        assert_eq!(Citation::pubmed("25700523").to_string(), "PubMed:25700523");
    }
}
