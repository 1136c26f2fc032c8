//! In-memory association graph.
//!
//! Owns every [`DiseaseEntity`] node and [`AssociationEdge`] edge.
//! Nodes live in a dense `Vec` indexed by [`NodeId`]; a hash index maps
//! `(namespace, name)` back to the id so insertion is idempotent.
//!
//! ## Lifecycle
//!
//! - Created empty by the builder
//! - Populated in one pass (mutators are crate-private)
//! - Handed out read-only; safe to share across threads behind an `Arc`
//!
//! Multi-edges are kept: every retained row is its own edge, even when the
//! disease pair repeats.

use hashbrown::HashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::model::*;

/// Default graph name.
pub const GRAPH_NAME: &str = "Disease-disease relationships";

/// Default graph version.
pub const GRAPH_VERSION: &str = "1.0.0";

// ============================================================================
// AssociationGraph
// ============================================================================

/// Disease-disease association multigraph.
#[derive(Debug, Clone)]
pub struct AssociationGraph {
    name: String,
    version: String,
    nodes: Vec<DiseaseEntity>,
    /// (namespace, name) → node id
    index: HashMap<DiseaseEntity, NodeId>,
    edges: Vec<AssociationEdge>,
    /// node id → incident edge ids (self-loops listed once)
    adjacency: Vec<SmallVec<[EdgeId; 4]>>,
}

impl Default for AssociationGraph {
    fn default() -> Self {
        Self::new(GRAPH_NAME, GRAPH_VERSION)
    }
}

impl AssociationGraph {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            adjacency: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    // ========================================================================
    // Build-time mutation (crate-private)
    // ========================================================================

    /// Insert a node, or return the id of the equal node already present.
    pub(crate) fn add_node(&mut self, entity: DiseaseEntity) -> NodeId {
        if let Some(id) = self.index.get(&entity) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.index.insert(entity.clone(), id);
        self.nodes.push(entity);
        self.adjacency.push(SmallVec::new());
        id
    }

    /// Append an association between two existing nodes.
    pub(crate) fn add_association(
        &mut self,
        source: NodeId,
        target: NodeId,
        citation: Citation,
        evidence: impl Into<String>,
        annotations: Annotations,
    ) -> EdgeId {
        debug_assert!(source.0 < self.nodes.len() && target.0 < self.nodes.len());

        let id = EdgeId(self.edges.len());
        self.edges.push(AssociationEdge {
            id,
            source,
            target,
            citation,
            evidence: evidence.into(),
            annotations,
        });

        self.adjacency[source.0].push(id);
        if source != target {
            self.adjacency[target.0].push(id);
        }
        id
    }

    // ========================================================================
    // Read-only access
    // ========================================================================

    /// Number of distinct disease identities.
    pub fn count_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of associations, parallel edges included.
    pub fn count_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&DiseaseEntity> {
        self.nodes.get(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&AssociationEdge> {
        self.edges.get(id.0)
    }

    /// Look up a node by its identity pair.
    pub fn find_node(&self, namespace: &str, name: &str) -> Option<NodeId> {
        self.index.get(&DiseaseEntity::new(namespace, name)).copied()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeId, &DiseaseEntity)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Edges in creation order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = &AssociationEdge> + '_ {
        self.edges.iter()
    }

    /// Edges touching `node`, in creation order.
    pub fn edges_of(&self, node: NodeId) -> impl Iterator<Item = &AssociationEdge> + '_ {
        self.adjacency
            .get(node.0)
            .into_iter()
            .flatten()
            .map(|id| &self.edges[id.0])
    }

    /// Distinct neighbours of `node`, in first-seen order.
    pub fn neighbors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        for edge in self.edges_of(node) {
            if let Some(other) = edge.other_node(node) {
                if !out.contains(&other) {
                    out.push(other);
                }
            }
        }
        out
    }

    /// Resolved endpoints of an edge.
    pub fn endpoints(&self, edge: &AssociationEdge) -> Option<(&DiseaseEntity, &DiseaseEntity)> {
        Some((self.node(edge.source)?, self.node(edge.target)?))
    }

    pub fn summarize(&self) -> Summary {
        Summary {
            associations: self.count_edges(),
            diseases: self.count_nodes(),
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Headline counts for a built graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub associations: usize,
    pub diseases: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "associations: {}\ndiseases: {}", self.associations, self.diseases)
    }
}
