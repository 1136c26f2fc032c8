//! Graph export — node-link JSON, BEL script, and Cypher DUMP.
//!
//! All exporters read the graph through its public traversal API only.
//!
//! ```text
//! AssociationGraph → to_node_link()        → serde JSON {graph, nodes, links}
//!                  → export_bel_script()   → SET Citation / path() -- path()
//!                  → export_cypher_dump()  → CREATE / MATCH … CREATE
//! ```

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::AssociationGraph;
use crate::model::*;
use crate::Result;

/// Relationship type used in the Cypher dump.
pub const CYPHER_REL_TYPE: &str = "ASSOCIATION";

/// Node label used in the Cypher dump.
pub const CYPHER_NODE_LABEL: &str = "Pathology";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    NodeLink,
    Bel,
    Cypher,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" | "node-link" | "nodelink" => Ok(ExportFormat::NodeLink),
            "bel" => Ok(ExportFormat::Bel),
            "cypher" => Ok(ExportFormat::Cypher),
            other => Err(format!("unknown export format '{other}' (expected json, bel or cypher)")),
        }
    }
}

/// Write `graph` to `writer` in `format`.
pub fn export(graph: &AssociationGraph, format: ExportFormat, writer: &mut dyn Write) -> Result<()> {
    match format {
        ExportFormat::NodeLink => export_node_link_json(graph, writer),
        ExportFormat::Bel => export_bel_script(graph, writer),
        ExportFormat::Cypher => export_cypher_dump(graph, writer),
    }
}

// ============================================================================
// Node-link JSON
// ============================================================================

/// Graph-level metadata in the node-link document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMeta {
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated: Option<DateTime<Utc>>,
}

/// `{id, namespace, name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkNode {
    pub id: NodeId,
    pub namespace: String,
    pub name: String,
}

/// `{source, target, citation, evidence, annotations}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub citation: Citation,
    pub evidence: String,
    pub annotations: Annotations,
}

/// Interchange document: an undirected multigraph in node-link form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkGraph {
    pub directed: bool,
    pub multigraph: bool,
    pub graph: GraphMeta,
    pub nodes: Vec<NodeLinkNode>,
    pub links: Vec<NodeLinkEdge>,
}

/// Node-link view of `graph`, without a generation timestamp.
pub fn to_node_link(graph: &AssociationGraph) -> NodeLinkGraph {
    NodeLinkGraph {
        directed: false,
        multigraph: true,
        graph: GraphMeta {
            name: graph.name().to_string(),
            version: graph.version().to_string(),
            generated: None,
        },
        nodes: graph
            .nodes()
            .map(|(id, entity)| NodeLinkNode {
                id,
                namespace: entity.namespace.clone(),
                name: entity.name.clone(),
            })
            .collect(),
        links: graph
            .edges()
            .map(|edge| NodeLinkEdge {
                source: edge.source,
                target: edge.target,
                citation: edge.citation.clone(),
                evidence: edge.evidence.clone(),
                annotations: edge.annotations.clone(),
            })
            .collect(),
    }
}

/// Pretty-printed node-link JSON, stamped with the current time.
pub fn export_node_link_json(graph: &AssociationGraph, writer: &mut dyn Write) -> Result<()> {
    let mut doc = to_node_link(graph);
    doc.graph.generated = Some(Utc::now());
    serde_json::to_writer_pretty(&mut *writer, &doc)?;
    writeln!(writer)?;
    Ok(())
}

// ============================================================================
// BEL script
// ============================================================================

/// Export as a BEL script.
///
/// Citation and evidence are re-SET only when they change between edges;
/// annotations are SET before and UNSET after each statement.
pub fn export_bel_script(graph: &AssociationGraph, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "SET DOCUMENT Name = {}", bel_quote(graph.name()))?;
    writeln!(writer, "SET DOCUMENT Version = {}", bel_quote(graph.version()))?;
    writeln!(writer)?;

    let mut current: Option<(&Citation, &str)> = None;
    for edge in graph.edges() {
        let Some((a, b)) = graph.endpoints(edge) else { continue };

        if current != Some((&edge.citation, edge.evidence.as_str())) {
            writeln!(
                writer,
                "SET Citation = {{{}, {}}}",
                bel_quote(&edge.citation.db),
                bel_quote(&edge.citation.reference)
            )?;
            writeln!(writer, "SET Evidence = {}", bel_quote(&edge.evidence))?;
            current = Some((&edge.citation, edge.evidence.as_str()));
        }

        for (key, value) in &edge.annotations {
            writeln!(writer, "SET {} = {}", key, bel_quote(&value.to_string()))?;
        }
        writeln!(writer, "{a} -- {b}")?;
        if !edge.annotations.is_empty() {
            let keys: Vec<&str> = edge.annotations.keys().map(String::as_str).collect();
            writeln!(writer, "UNSET {{{}}}", keys.join(", "))?;
        }
    }
    Ok(())
}

fn bel_quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

// ============================================================================
// Cypher DUMP
// ============================================================================

/// Export as a Cypher DUMP script.
///
/// Nodes are created with an `_id` property equal to their [`NodeId`];
/// each association becomes one `ASSOCIATION` relationship.
pub fn export_cypher_dump(graph: &AssociationGraph, writer: &mut dyn Write) -> Result<()> {
    // Header
    writeln!(writer, "// ddr-bel Cypher DUMP")?;
    writeln!(writer, "// Graph: {} {}", graph.name(), graph.version())?;
    writeln!(writer, "// Nodes: {}", graph.count_nodes())?;
    writeln!(writer, "// Relationships: {}", graph.count_edges())?;
    writeln!(writer)?;

    for (id, entity) in graph.nodes() {
        writeln!(
            writer,
            "CREATE (n:{} {{_id: {}, namespace: {}, name: {}}});",
            CYPHER_NODE_LABEL,
            id,
            format_value(&Value::from(entity.namespace.as_str())),
            format_value(&Value::from(entity.name.as_str())),
        )?;
    }

    writeln!(writer)?;
    writeln!(writer, "// Relationships")?;

    for edge in graph.edges() {
        let mut props = vec![
            format!("citation: {}", format_value(&Value::from(edge.citation.to_string()))),
            format!("evidence: {}", format_value(&Value::from(edge.evidence.as_str()))),
        ];
        let annotations = format_properties(&edge.annotations);
        if !annotations.is_empty() {
            props.push(annotations);
        }

        writeln!(
            writer,
            "MATCH (a {{_id: {}}}), (b {{_id: {}}}) CREATE (a)-[:{} {{{}}}]->(b);",
            edge.source,
            edge.target,
            CYPHER_REL_TYPE,
            props.join(", "),
        )?;
    }

    Ok(())
}

/// Format annotations as a Cypher property string (key: value, ...).
fn format_properties(props: &Annotations) -> String {
    let parts: Vec<String> = props
        .iter()
        .map(|(key, value)| format!("{}: {}", format_key(key), format_value(value)))
        .collect();
    parts.join(", ")
}

/// Backtick-quote keys that are not plain identifiers.
fn format_key(key: &str) -> String {
    let plain = key.chars().next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain { key.to_string() } else { format!("`{}`", key.replace('`', "``")) }
}

/// Format a Value as a Cypher literal.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Value::Int(i) => i.to_string(),
        Value::Float(f) if f.is_finite() => format!("{}", f),
        Value::Float(_) => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
    }
}
