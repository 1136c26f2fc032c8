//! Export round-trip tests: build a graph → export → verify the output.
//!
//! Node-link JSON is parsed back with serde and compared structurally;
//! the BEL and Cypher scripts are checked line by line.

use ddr_bel::export::{self, ExportFormat, NodeLinkGraph};
use ddr_bel::{AssociationGraph, Row, Table, Value};
use pretty_assertions::assert_eq;

/// Helper: 3 diseases, 3 associations (one parallel pair), one filtered row.
fn seed_graph() -> AssociationGraph {
    let table: Table = vec![
        Row::pair("Asthma", "Diabetes", -0.3),
        Row::pair("Flu", "Cold", 0.5),
        Row::pair("Asthma", "Crohn's Disease", -0.1),
        Row::pair("Asthma", "Diabetes", -0.05),
    ]
    .into();
    ddr_bel::builder::build(&table, 0.0)
}

fn render(graph: &AssociationGraph, format: ExportFormat) -> String {
    let mut buf = Vec::new();
    export::export(graph, format, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

// ============================================================================
// Node-link JSON
// ============================================================================

#[test]
fn test_node_link_roundtrip() {
    let graph = seed_graph();
    let json = render(&graph, ExportFormat::NodeLink);

    let mut parsed: NodeLinkGraph = serde_json::from_str(&json).unwrap();
    assert!(parsed.graph.generated.is_some());
    parsed.graph.generated = None;

    assert_eq!(parsed, export::to_node_link(&graph));
}

#[test]
fn test_node_link_wire_fields() {
    let graph = seed_graph();
    let json: serde_json::Value = serde_json::from_str(&render(&graph, ExportFormat::NodeLink)).unwrap();

    assert_eq!(json["directed"], false);
    assert_eq!(json["multigraph"], true);
    assert_eq!(json["graph"]["name"], "Disease-disease relationships");
    assert_eq!(json["graph"]["version"], "1.0.0");

    let nodes = json["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["namespace"], "mesh");
    assert_eq!(nodes[0]["name"], "Asthma");

    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 3);
    let first = &links[0];
    assert_eq!(first["source"], 0);
    assert_eq!(first["target"], 1);
    assert_eq!(first["citation"]["db"], "PubMed");
    assert_eq!(first["citation"]["reference"], "25700523");
    assert_eq!(first["evidence"], "from ddr");
    assert_eq!(first["annotations"]["bio2bel"], "ddr");
    assert_eq!(first["annotations"]["s_AB"], -0.3);
}

#[test]
fn test_node_link_annotations_typed() {
    let doc = export::to_node_link(&seed_graph());
    let seps: Vec<Value> = doc
        .links
        .iter()
        .map(|l| l.annotations["s_AB"].clone())
        .collect();
    assert_eq!(seps, vec![Value::Float(-0.3), Value::Float(-0.1), Value::Float(-0.05)]);
}

#[test]
fn test_node_link_has_no_null_separation() {
    let table: Table = vec![
        Row::pair("Asthma", "Diabetes", f64::NEG_INFINITY),
        Row::pair("Asthma", "Obesity", -0.2),
    ]
    .into();
    let graph = ddr_bel::builder::build(&table, 0.0);
    let json: serde_json::Value = serde_json::from_str(&render(&graph, ExportFormat::NodeLink)).unwrap();

    let links = json["links"].as_array().unwrap();
    assert_eq!(links.len(), 1);
    assert!(links.iter().all(|l| l["annotations"]["s_AB"].is_f64()));
}

// ============================================================================
// BEL script
// ============================================================================

#[test]
fn test_bel_statements() {
    let bel = render(&seed_graph(), ExportFormat::Bel);

    let statements: Vec<&str> = bel.lines().filter(|l| l.contains(" -- ")).collect();
    assert_eq!(statements, vec![
        "path(mesh:\"Asthma\") -- path(mesh:\"Diabetes\")",
        "path(mesh:\"Asthma\") -- path(mesh:\"Crohn's Disease\")",
        "path(mesh:\"Asthma\") -- path(mesh:\"Diabetes\")",
    ]);

    // Citation and evidence are constant, so they are set once.
    assert_eq!(bel.lines().filter(|l| l.starts_with("SET Citation")).count(), 1);
    assert!(bel.contains("SET Citation = {\"PubMed\", \"25700523\"}"));
    assert!(bel.contains("SET Evidence = \"from ddr\""));
    assert!(bel.contains("SET s_AB = \"-0.3\""));
    assert_eq!(bel.lines().filter(|l| l.starts_with("UNSET")).count(), 3);
    assert!(bel.starts_with("SET DOCUMENT Name = \"Disease-disease relationships\""));
}

// ============================================================================
// Cypher DUMP
// ============================================================================

#[test]
fn test_cypher_counts() {
    let dump = render(&seed_graph(), ExportFormat::Cypher);

    let creates = dump.lines().filter(|l| l.starts_with("CREATE")).count();
    let matches = dump.lines().filter(|l| l.starts_with("MATCH")).count();
    assert_eq!(creates, 3, "Expected 3 CREATE node statements");
    assert_eq!(matches, 3, "Expected 3 relationship statements");
    assert!(dump.contains("// Nodes: 3"));
    assert!(dump.contains("// Relationships: 3"));
}

#[test]
fn test_cypher_escapes_and_properties() {
    let dump = render(&seed_graph(), ExportFormat::Cypher);

    assert!(dump.contains("name: 'Crohn\\'s Disease'"), "{dump}");
    assert!(dump.contains(
        "MATCH (a {_id: 0}), (b {_id: 1}) CREATE (a)-[:ASSOCIATION {citation: 'PubMed:25700523', evidence: 'from ddr', bio2bel: 'ddr', s_AB: -0.3}]->(b);"
    ), "{dump}");
}

#[test]
fn test_export_empty_graph() {
    let graph = AssociationGraph::default();

    let dump = render(&graph, ExportFormat::Cypher);
    assert!(dump.contains("// Nodes: 0"));
    let statements = dump.lines()
        .filter(|l| l.starts_with("CREATE") || l.starts_with("MATCH"))
        .count();
    assert_eq!(statements, 0);

    let doc = export::to_node_link(&graph);
    assert!(doc.nodes.is_empty());
    assert!(doc.links.is_empty());

    let bel = render(&graph, ExportFormat::Bel);
    assert_eq!(bel.lines().filter(|l| l.contains(" -- ")).count(), 0);
}
